use std::path::Path;

use app_core::string_error::ErrorStringExt;
use census_csv::{Cell, Table};

use crate::chart::Field;

/// One region of the census extract.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: String,
    pub abbreviation: String,
    values: [f64; 6],
}

impl Record {
    /// Fails if any of the values is not finite, so a stored record can
    /// always be placed on the chart.
    pub fn new(state: &str, abbreviation: &str, values: [f64; 6]) -> Result<Self, String> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|field| !values[field.index()].is_finite())
        {
            return Err(format!("{state}: value for '{field}' is not a number"));
        }
        Ok(Self {
            state: state.to_string(),
            abbreviation: abbreviation.to_string(),
            values,
        })
    }

    pub fn value(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub fn from_path(path: &Path) -> Result<Vec<Record>, String> {
        let table = census_csv::Parser::from_path(path)
            .err_to_string(&format!("unable to read {:?}", path))?
            .parse_table()?;
        Self::from_table(&table)
    }

    /// Build records from a parsed table.
    ///
    /// Missing columns are an error. A row with a non-numeric value in one of
    /// the six fields is left out with a warning; the row is never plotted.
    pub fn from_table(table: &Table) -> Result<Vec<Record>, String> {
        let column = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| format!("required column '{name}' not found"))
        };
        let state_col = column("state")?;
        let abbr_col = column("abbr")?;
        let mut value_cols = [0; 6];
        for field in Field::ALL {
            value_cols[field.index()] = column(field.column_name())?;
        }

        let mut records = Vec::with_capacity(table.len());
        'rows: for row in table.rows() {
            let state = row.get(state_col).map(Cell::text).unwrap_or_default();
            let abbreviation = row.get(abbr_col).map(Cell::text).unwrap_or_default();
            let mut values = [f64::NAN; 6];
            for field in Field::ALL {
                match row.get(value_cols[field.index()]).and_then(Cell::as_f64) {
                    Some(value) => values[field.index()] = value,
                    None => {
                        log::warn!(
                            "line {}: '{}' of '{}' is not numeric, leaving the region out",
                            row.line_no,
                            field,
                            state
                        );
                        continue 'rows;
                    }
                }
            }
            records.push(Record::new(&state, &abbreviation, values)?);
        }

        if records.is_empty() {
            return Err("dataset contains no usable records".to_string());
        }
        log::info!(
            "loaded {} of {} regions",
            records.len(),
            table.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(state: &str, age: f64, smokes: f64) -> Record {
        let mut values = [1.0; 6];
        values[Field::Age.index()] = age;
        values[Field::Smokes.index()] = smokes;
        Record::new(state, &state[..2.min(state.len())], values).unwrap()
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const HEADER: &str =
        "id,state,abbr,poverty,povertyMoe,age,ageMoe,income,incomeMoe,healthcare,obesity,smokes";

    fn parse(rows: &[&str]) -> Result<Vec<Record>, String> {
        let raw = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        let table = census_csv::Parser::from_string(raw).parse_table()?;
        Record::from_table(&table)
    }

    #[test]
    fn test_records_from_table() {
        init();
        let records = parse(&[
            "1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1",
            "2,Alaska,AK,11.2,0.9,33.3,0.3,71583,1784,15,29.7,19.9",
        ])
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "Alabama");
        assert_eq!(records[0].abbreviation, "AL");
        assert_eq!(records[0].value(Field::Age), 38.6);
        assert_eq!(records[1].value(Field::Income), 71583.0);
        assert_eq!(records[1].value(Field::Healthcare), 15.0);
        assert_eq!(records[1].value(Field::Smokes), 19.9);
    }

    #[test]
    fn test_non_numeric_rows_are_left_out() {
        init();
        let records = parse(&[
            "1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1",
            "2,Alaska,AK,11.2,0.9,n/a,0.3,71583,1784,15,29.7,19.9",
            "3,Arizona,AZ,18.2,0.4,36.9,0.1,50068,,10.3,28.9,",
        ])
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].abbreviation, "AL");
    }

    #[test]
    fn test_missing_column_is_an_error() {
        init();
        let table = census_csv::Parser::from_string("state,abbr,age\nAlabama,AL,38.6".into())
            .parse_table()
            .unwrap();
        let err = Record::from_table(&table).unwrap_err();
        assert!(err.contains("poverty"), "{err}");
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        init();
        assert!(parse(&[]).is_err());
    }

    fn shipped_dataset() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/data/data.csv")
    }

    #[test]
    fn test_shipped_dataset_loads() {
        init();
        let records = Record::from_path(&shipped_dataset()).unwrap();
        assert!(!records.is_empty());
        assert_eq!(records[0].state, "Alabama");
        assert_eq!(records[0].abbreviation, "AL");
        assert_eq!(records[0].value(Field::Age), 38.6);
        for record in records.iter() {
            for field in Field::ALL {
                assert!(record.value(field).is_finite());
            }
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        init();
        let err = Record::from_path(Path::new("/nonexistent/census.csv")).unwrap_err();
        assert!(err.contains("unable to read"), "{err}");
    }

    #[test]
    fn test_record_rejects_nan() {
        let mut values = [1.0; 6];
        values[Field::Obesity.index()] = f64::NAN;
        let err = Record::new("Nowhere", "NW", values).unwrap_err();
        assert!(err.contains("obesity"));
    }
}
