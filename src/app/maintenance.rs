// OilLog - app/maintenance.rs
//
// Operations the front end calls: load a log, estimate mileage, validate
// and append a new oil change. Each read is a full re-parse.

use crate::core::estimator;
use crate::core::model::{LogSummary, NewEntry, VehicleLog};
use crate::core::parser;
use crate::platform::fs;
use crate::util::error::{OilLogError, ReadError, ValidationError, WriteError};
use std::path::Path;

/// Read and parse the maintenance log at `path`.
pub fn load_and_parse(path: &Path) -> Result<VehicleLog, ReadError> {
    let content =
        fs::read_file_lossy(path).map_err(|e| ReadError::from_io(path.to_path_buf(), e))?;
    let result = parser::parse_content(&content);

    tracing::info!(
        path = %path.display(),
        records = result.log.records.len(),
        lines = result.lines_processed,
        "Maintenance log loaded"
    );
    if result.log.records.is_empty() {
        tracing::info!(path = %path.display(), "No oil changes found");
    }
    Ok(result.log)
}

/// Current mileage estimate for `log`, `None` when unknown.
pub fn current_estimate(log: &VehicleLog) -> Option<i64> {
    estimator::estimate(&log.records)
}

/// Validate a mileage typed by the user: digits only, fits in `u64`.
pub fn parse_mileage_input(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    let non_numeric = || ValidationError::NonNumericMileage {
        input: input.to_string(),
    };
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    trimmed.parse::<u64>().map_err(|_| non_numeric())
}

/// Reject oil or filter text that would break the written line: a `(` or
/// `)` ends the group early and a line break splits the entry.
pub fn validate_part_text(field: &'static str, text: &str) -> Result<(), ValidationError> {
    if text.chars().any(|c| c == '(' || c == ')' || c.is_control()) {
        return Err(ValidationError::InvalidPartText {
            field,
            input: text.to_string(),
        });
    }
    Ok(())
}

/// Reject an entry whose mileage is below the last recorded oil change, or
/// whose oil or filter text cannot be written back.
pub fn validate_entry(entry: &NewEntry, summary: &LogSummary) -> Result<(), ValidationError> {
    validate_part_text("oil type", &entry.oil_type)?;
    validate_part_text("filter type", &entry.filter_type)?;
    if entry.mileage < summary.last_mileage {
        return Err(ValidationError::MileageBelowPrevious {
            mileage: entry.mileage,
            previous: summary.last_mileage,
        });
    }
    Ok(())
}

/// Append `entry` to the log at `path` as a single line.
///
/// Validation runs first; a rejected entry leaves the file unmodified.
/// No date heading is written.
pub fn append_entry(
    path: &Path,
    entry: &NewEntry,
    summary: &LogSummary,
) -> Result<(), OilLogError> {
    validate_entry(entry, summary).map_err(|e| {
        tracing::warn!(
            mileage = entry.mileage,
            previous = summary.last_mileage,
            error = %e,
            "New entry rejected"
        );
        e
    })?;

    let line = entry.to_log_line();
    fs::append_line(path, &line).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        operation: "appending entry to",
        source,
    })?;

    tracing::info!(path = %path.display(), line = %line, "Oil change entry added");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(mileage: u64) -> NewEntry {
        NewEntry {
            mileage,
            oil_type: "5W-20".to_string(),
            filter_type: "XG9688".to_string(),
        }
    }

    #[test]
    fn test_parse_mileage_input() {
        assert_eq!(parse_mileage_input("45210"), Ok(45210));
        assert_eq!(parse_mileage_input("  45210 "), Ok(45210));
        assert!(parse_mileage_input("").is_err());
        assert!(parse_mileage_input("-5").is_err());
        assert!(parse_mileage_input("+5").is_err());
        assert!(parse_mileage_input("12k").is_err());
        assert!(parse_mileage_input("4.5").is_err());
        assert!(parse_mileage_input("99999999999999999999999").is_err());
    }

    #[test]
    fn test_validate_entry_allows_equal_mileage() {
        let summary = LogSummary {
            last_mileage: 1000,
            ..Default::default()
        };
        assert!(validate_entry(&entry(1000), &summary).is_ok());
        assert_eq!(
            validate_entry(&entry(999), &summary),
            Err(ValidationError::MileageBelowPrevious {
                mileage: 999,
                previous: 1000
            })
        );
    }

    #[test]
    fn test_validate_part_text_rejects_unparseable_text() {
        assert!(validate_part_text("oil type", "0W-16").is_ok());
        assert!(validate_part_text("filter type", "WIX 51348").is_ok());
        assert_eq!(
            validate_part_text("filter type", "PH(1)"),
            Err(ValidationError::InvalidPartText {
                field: "filter type",
                input: "PH(1)".to_string()
            })
        );
        assert!(validate_part_text("oil type", "5W-20)").is_err());
        assert!(validate_part_text("oil type", "5W-20\nJanuary 2030").is_err());
        assert!(validate_part_text("oil type", "5W\t20").is_err());
    }

    #[test]
    fn test_append_with_newline_in_filter_leaves_file_unmodified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let original = "Car\nMay 2020\n5000 miles : Oil and Filter change (5W-20) (XG9688)\n";
        std::fs::write(&path, original).unwrap();

        let bad = NewEntry {
            filter_type: "XG9688\n9000 miles : Oil and Filter change".to_string(),
            ..entry(6000)
        };
        let summary = load_and_parse(&path).unwrap().summary();
        let err = append_entry(&path, &bad, &summary).unwrap_err();
        assert!(matches!(
            err,
            OilLogError::Validation(ValidationError::InvalidPartText { field: "filter type", .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_and_parse(&dir.path().join("none.txt")).unwrap_err();
        assert!(matches!(err, ReadError::NotFound { .. }));
    }

    #[test]
    fn test_rejected_append_leaves_file_unmodified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let original = "Car\nMay 2020\n5000 miles : Oil and Filter change (5W-20) (XG9688)\n";
        std::fs::write(&path, original).unwrap();

        let summary = load_and_parse(&path).unwrap().summary();
        let err = append_entry(&path, &entry(4000), &summary).unwrap_err();
        assert!(matches!(err, OilLogError::Validation(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_append_then_reparse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(
            &path,
            "Car\nMay 2020\n5000 miles : Oil and Filter change (5W-20) (XG9688)\n",
        )
        .unwrap();

        let before = load_and_parse(&path).unwrap();
        append_entry(&path, &entry(8000), &before.summary()).unwrap();

        let after = load_and_parse(&path).unwrap();
        assert_eq!(after.records.len(), 2);
        let last = &after.records[1];
        assert_eq!(last.mileage, 8000);
        assert_eq!(last.date.as_deref(), Some("May 2020"));
        assert_eq!(last.oil_type.as_deref(), Some("5W-20"));
        assert_eq!(last.filter_type.as_deref(), Some("XG9688"));
    }

    #[test]
    fn test_append_to_missing_file_is_write_error() {
        let dir = TempDir::new().unwrap();
        let err = append_entry(
            &dir.path().join("gone.txt"),
            &entry(1),
            &LogSummary::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OilLogError::Write(_)));
    }
}
