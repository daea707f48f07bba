use crate::backend_state::Record;

use super::{Axis, Field};

/// Relative padding added around the data extent of each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub x_lower: f64,
    pub x_upper: f64,
    pub y_lower: f64,
    pub y_upper: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            x_lower: 0.05,
            x_upper: 0.05,
            y_lower: 0.25,
            y_upper: 0.1,
        }
    }
}

impl Padding {
    fn for_axis(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.x_lower, self.x_upper),
            Axis::Y => (self.y_lower, self.y_upper),
        }
    }
}

/// Size of the chart area, without margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// Affine mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range. A collapsed domain maps everything
    /// to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !(hi - lo).is_finite() {
            return Vec::new();
        }
        if hi == lo {
            return vec![lo];
        }
        let step = nice_step((hi - lo) / count as f64);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        // Multiplying the index avoids accumulating rounding errors.
        (first..=last).map(|i| i as f64 * step).collect()
    }

    pub fn approx_eq(&self, other: &LinearScale, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
        close(self.domain.0, other.domain.0)
            && close(self.domain.1, other.domain.1)
            && close(self.range.0, other.range.0)
            && close(self.range.1, other.range.1)
    }
}

/// Smallest value of 1, 2, 5 or 10 times a power of ten that is not smaller
/// than `raw_step`.
fn nice_step(raw_step: f64) -> f64 {
    let magnitude = 10f64.powf(raw_step.abs().log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| *candidate >= raw_step.abs())
        .unwrap_or(10.0 * magnitude)
}

/// Format tick values with a precision matching their spacing.
pub fn format_ticks(tick_positions: &[f64]) -> Vec<String> {
    if tick_positions.len() < 2 {
        return tick_positions.iter().map(|z| format!("{z}")).collect();
    }
    let increment = tick_positions
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .sum::<f64>()
        / (tick_positions.len() - 1) as f64;

    let fmt_fun = match increment.log10().floor() as i8 {
        i8::MIN..=-4 => |z: &f64| format!("{z:.2e}"),
        -3 => |z: &f64| format!("{z:.3}"),
        -2 => |z: &f64| format!("{z:.2}"),
        -1 => |z: &f64| format!("{z:.1}"),
        0..=6 => |z: &f64| format!("{z:.0}"),
        7..=i8::MAX => |z: &f64| format!("{z:.0e}"),
    };
    tick_positions.iter().map(fmt_fun).collect()
}

/// Build the scale for `field` on `axis` from the data extent plus padding.
///
/// Fails on an empty record set, a non-finite value or a field that does
/// not belong to `axis`.
pub fn build_scale(
    records: &[Record],
    field: Field,
    axis: Axis,
    padding: &Padding,
    extent: Extent,
) -> Result<LinearScale, String> {
    if field.axis() != axis {
        return Err(format!("field '{field}' cannot be shown on the {axis} axis"));
    }
    if records.is_empty() {
        return Err(format!("no records to build the '{field}' scale from"));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in records {
        let value = record.value(field);
        if !value.is_finite() {
            return Err(format!("{}: '{field}' is not a finite number", record.state));
        }
        min = min.min(value);
        max = max.max(value);
    }

    let (lower, upper) = padding.for_axis(axis);
    let domain = (min - min.abs() * lower, max + max.abs() * upper);
    let range = match axis {
        Axis::X => (0.0, extent.width),
        Axis::Y => (extent.height, 0.0),
    };
    log::debug!("scale for '{field}': domain {:?}, range {:?}", domain, range);
    Ok(LinearScale::new(domain, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend_state::record;

    const EXTENT: Extent = Extent {
        width: 770.0,
        height: 480.0,
    };

    #[test]
    fn test_x_domain_padding() {
        let records = vec![record("AL", 40.0, 20.0), record("AK", 33.0, 18.0)];
        let scale =
            build_scale(&records, Field::Age, Axis::X, &Padding::default(), EXTENT).unwrap();
        let (lo, hi) = scale.domain();
        assert!((lo - 31.35).abs() < 1e-9, "{lo}");
        assert!((hi - 42.0).abs() < 1e-9, "{hi}");
        assert_eq!(scale.range(), (0.0, 770.0));
    }

    #[test]
    fn test_y_range_is_flipped() {
        let records = vec![record("AL", 40.0, 20.0), record("AK", 33.0, 10.0)];
        let scale =
            build_scale(&records, Field::Smokes, Axis::Y, &Padding::default(), EXTENT).unwrap();
        let (lo, hi) = scale.domain();
        assert!((lo - 7.5).abs() < 1e-9 && (hi - 22.0).abs() < 1e-9);
        assert_eq!(scale.range(), (480.0, 0.0));
        assert!(scale.apply(hi).abs() < 1e-9);
        assert!((scale.apply(lo) - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_domain_contains_data() {
        let records: Vec<_> = (0..20)
            .map(|i| record("XX", 20.0 + i as f64 * 1.7, 5.0 + (i % 7) as f64))
            .collect();
        for (field, axis) in [(Field::Age, Axis::X), (Field::Smokes, Axis::Y)] {
            let scale =
                build_scale(&records, field, axis, &Padding::default(), EXTENT).unwrap();
            let (lo, hi) = scale.domain();
            let min = records.iter().map(|r| r.value(field)).fold(f64::MAX, f64::min);
            let max = records.iter().map(|r| r.value(field)).fold(f64::MIN, f64::max);
            assert!(lo <= min && min <= max && max <= hi);
        }
    }

    #[test]
    fn test_build_scale_errors() {
        let padding = Padding::default();
        assert!(build_scale(&[], Field::Age, Axis::X, &padding, EXTENT).is_err());
        let records = vec![record("AL", 40.0, 20.0)];
        assert!(build_scale(&records, Field::Smokes, Axis::X, &padding, EXTENT).is_err());
        assert!(build_scale(&records, Field::Age, Axis::Y, &padding, EXTENT).is_err());
    }

    #[test]
    fn test_single_record_scale() {
        let records = vec![record("AL", 40.0, 20.0)];
        let scale =
            build_scale(&records, Field::Age, Axis::X, &Padding::default(), EXTENT).unwrap();
        let (lo, hi) = scale.domain();
        assert!((lo - 38.0).abs() < 1e-9 && (hi - 42.0).abs() < 1e-9);
        assert!((scale.apply(40.0) - 385.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply() {
        let scale = LinearScale::new((10.0, 20.0), (100.0, 0.0));
        assert_eq!(scale.apply(15.0), 50.0);
        assert_eq!(scale.apply(10.0), 100.0);
        assert_eq!(scale.apply(20.0), 0.0);

        let collapsed = LinearScale::new((3.0, 3.0), (0.0, 100.0));
        assert_eq!(collapsed.apply(3.0), 50.0);
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale::new((31.35, 42.0), (0.0, 1.0));
        assert_eq!(scale.ticks(10), vec![32.0, 34.0, 36.0, 38.0, 40.0, 42.0]);

        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let reversed = LinearScale::new((100.0, 0.0), (0.0, 1.0));
        assert_eq!(reversed.ticks(5), scale.ticks(5));
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.065), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7000.0), 10000.0);
    }

    #[test]
    fn test_format_ticks() {
        assert_eq!(format_ticks(&[30000.0, 40000.0]), vec!["30000", "40000"]);
        assert_eq!(format_ticks(&[0.5, 1.0, 1.5]), vec!["0.5", "1.0", "1.5"]);
        assert_eq!(format_ticks(&[32.0, 34.0]), vec!["32", "34"]);
    }
}
