use crate::backend_state::Record;

use super::{Axis, Field};

/// Prefix shown in front of a value in the hover tooltip, indexed by
/// `Field::index`.
static TOOLTIP_LABELS: [&str; 6] = [
    "Median Age (years): ",
    "Poverty (%): ",
    "Median Household Income: $",
    "Obesity (%): ",
    "Smoking (%): ",
    "Lacks Healthcare (%): ",
];

pub fn tooltip_label(field: Field) -> &'static str {
    TOOLTIP_LABELS[field.index()]
}

/// Region name followed by the values of the two selected fields, one per line.
pub fn format_tooltip(record: &Record, x_field: Field, y_field: Field) -> Result<String, String> {
    for (field, axis) in [(x_field, Axis::X), (y_field, Axis::Y)] {
        if field.axis() != axis {
            return Err(format!("'{field}' is not a field of the {axis} axis"));
        }
    }
    Ok(format!(
        "{}\n{}{}\n{}{}",
        record.state,
        tooltip_label(x_field),
        record.value(x_field),
        tooltip_label(y_field),
        record.value(y_field),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alabama() -> Record {
        Record::new("Alabama", "AL", [38.6, 19.3, 42830.0, 33.5, 21.1, 13.9]).unwrap()
    }

    #[test]
    fn test_default_tooltip() {
        let text = format_tooltip(&alabama(), Field::Age, Field::Smokes).unwrap();
        assert_eq!(text, "Alabama\nMedian Age (years): 38.6\nSmoking (%): 21.1");
    }

    #[test]
    fn test_every_field_has_a_label() {
        let record = alabama();
        for x in Axis::X.fields() {
            for y in Axis::Y.fields() {
                let text = format_tooltip(&record, x, y).unwrap();
                let lines: Vec<_> = text.lines().collect();
                assert_eq!(lines.len(), 3);
                assert!(lines[1].starts_with(tooltip_label(x)));
                assert!(lines[2].starts_with(tooltip_label(y)));
            }
        }
        assert_eq!(tooltip_label(Field::Income), "Median Household Income: $");
        assert_eq!(tooltip_label(Field::Obesity), "Obesity (%): ");
    }

    #[test]
    fn test_wrong_axis_is_rejected() {
        assert!(format_tooltip(&alabama(), Field::Smokes, Field::Age).is_err());
        assert!(format_tooltip(&alabama(), Field::Age, Field::Poverty).is_err());
    }
}
