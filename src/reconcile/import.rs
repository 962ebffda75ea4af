//! CSV holiday sheet parsing.
//!
//! Uploaded sheets are expected to carry a header row with `date`,
//! `description`, and `floater` columns. Parsing is strict on dates and
//! forgiving on the floater column, which accepts the common truthy
//! spellings.

use std::io;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::ImportedHoliday;

#[derive(Debug, Deserialize)]
struct SheetRow {
    date: String,
    description: String,
    #[serde(default)]
    floater: String,
}

/// Parses an uploaded holiday sheet into rows ready for the reconciler.
///
/// # Arguments
///
/// * `reader` - The raw CSV content
///
/// # Returns
///
/// The parsed rows in file order, or [`EngineError::ImportParse`] naming
/// the first offending line.
pub fn parse_holiday_sheet<R: io::Read>(reader: R) -> EngineResult<Vec<ImportedHoliday>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in csv_reader.deserialize::<SheetRow>().enumerate() {
        // Line 1 is the header.
        let line = (index + 2) as u64;
        let raw = result.map_err(|e| EngineError::ImportParse {
            line,
            message: e.to_string(),
        })?;

        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").map_err(|_| {
            EngineError::ImportParse {
                line,
                message: format!("invalid date '{}', expected YYYY-MM-DD", raw.date),
            }
        })?;
        if raw.description.is_empty() {
            return Err(EngineError::ImportParse {
                line,
                message: "description is empty".to_string(),
            });
        }

        rows.push(ImportedHoliday {
            date,
            description: raw.description,
            floater: is_truthy(&raw.floater),
        });
    }
    Ok(rows)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parses_a_well_formed_sheet() {
        let sheet = "\
date,description,floater
2025-12-25,Christmas,false
2025-11-01,Founders Day,true
";
        let rows = parse_holiday_sheet(sheet.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, make_date("2025-12-25"));
        assert_eq!(rows[0].description, "Christmas");
        assert!(!rows[0].floater);
        assert!(rows[1].floater);
    }

    #[test]
    fn test_trims_whitespace_around_fields() {
        let sheet = "date,description,floater\n 2025-12-25 , Christmas , yes \n";
        let rows = parse_holiday_sheet(sheet.as_bytes()).unwrap();

        assert_eq!(rows[0].description, "Christmas");
        assert!(rows[0].floater);
    }

    #[test]
    fn test_truthy_spellings_of_floater() {
        for spelling in ["true", "TRUE", "1", "yes", "Y"] {
            let sheet = format!("date,description,floater\n2025-12-25,Christmas,{}\n", spelling);
            let rows = parse_holiday_sheet(sheet.as_bytes()).unwrap();
            assert!(rows[0].floater, "'{}' should read as true", spelling);
        }
        for spelling in ["", "false", "0", "no", "maybe"] {
            let sheet = format!("date,description,floater\n2025-12-25,Christmas,{}\n", spelling);
            let rows = parse_holiday_sheet(sheet.as_bytes()).unwrap();
            assert!(!rows[0].floater, "'{}' should read as false", spelling);
        }
    }

    #[test]
    fn test_missing_floater_column_defaults_to_false() {
        let sheet = "date,description\n2025-12-25,Christmas\n";
        let rows = parse_holiday_sheet(sheet.as_bytes()).unwrap();
        assert!(!rows[0].floater);
    }

    #[test]
    fn test_bad_date_names_the_offending_line() {
        let sheet = "\
date,description,floater
2025-12-25,Christmas,false
25/12/2025,Boxing Day,false
";
        let err = parse_holiday_sheet(sheet.as_bytes()).unwrap_err();
        match err {
            EngineError::ImportParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("25/12/2025"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let sheet = "date,description,floater\n2025-12-25,,false\n";
        let err = parse_holiday_sheet(sheet.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::ImportParse { line: 2, .. }));
    }

    #[test]
    fn test_empty_sheet_parses_to_no_rows() {
        let rows = parse_holiday_sheet("date,description,floater\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
