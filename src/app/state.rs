// OilLog - app/state.rs
//
// Application state: the selected maintenance log and everything derived
// from it. Parse, estimate and render happen as one step; the log and the
// estimate are rebuilt wholesale whenever the file is selected or appended.

use crate::app::maintenance;
use crate::core::model::{NewEntry, VehicleLog};
use crate::util::error::{Result, ValidationError};
use std::path::{Path, PathBuf};

/// Top-level application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Currently selected maintenance log (None until one is opened).
    pub file_path: Option<PathBuf>,

    /// Parsed content of `file_path`.
    pub log: VehicleLog,

    /// Mileage estimate for `log`, `None` when unknown.
    pub estimate: Option<i64>,
}

/// User input for a new oil change. Empty or missing fields fall back to
/// values derived from the log.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    /// Raw mileage text; `None` means "use the current estimate".
    pub mileage: Option<String>,
    pub oil_type: Option<String>,
    pub filter_type: Option<String>,
}

impl AppState {
    /// Select `path` and parse it. On failure the previous state is kept.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let log = maintenance::load_and_parse(path)?;
        self.estimate = maintenance::current_estimate(&log);
        self.log = log;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Re-read the selected file from disk.
    pub fn reload(&mut self) -> Result<()> {
        match self.file_path.clone() {
            Some(path) => self.open(&path),
            None => Ok(()),
        }
    }

    /// Build a validated entry from user input, pre-populated the way the
    /// add-entry form is: estimate for mileage, last oil and filter types.
    pub fn prepare_entry(&self, input: &EntryInput) -> Result<NewEntry> {
        let mileage = match input.mileage.as_deref() {
            Some(text) => maintenance::parse_mileage_input(text)?,
            None => match self.estimate {
                Some(estimate) if estimate >= 0 => estimate as u64,
                _ => return Err(ValidationError::MissingMileage.into()),
            },
        };

        let summary = self.log.summary();
        let pick = |given: &Option<String>, default: String| {
            given
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(default)
        };

        let oil_type = pick(&input.oil_type, summary.default_oil_type);
        let filter_type = pick(&input.filter_type, summary.default_filter_type);
        maintenance::validate_part_text("oil type", &oil_type)?;
        maintenance::validate_part_text("filter type", &filter_type)?;

        Ok(NewEntry {
            mileage,
            oil_type,
            filter_type,
        })
    }

    /// Validate and append a new oil change to the selected file, then
    /// re-parse it. Returns the entry that was written.
    pub fn add_entry(&mut self, input: &EntryInput) -> Result<NewEntry> {
        let Some(path) = self.file_path.clone() else {
            return Err(ValidationError::NoFileSelected.into());
        };
        let entry = self.prepare_entry(input)?;
        maintenance::append_entry(&path, &entry, &self.log.summary())?;
        self.reload()?;
        Ok(entry)
    }
}
