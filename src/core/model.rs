// OilLog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use serde::{Deserialize, Serialize};

// =============================================================================
// Oil change record (one observed event)
// =============================================================================

/// A single oil change extracted from the maintenance log.
///
/// `None` in any optional field means the value was not present in the
/// source text ("unknown"). Records are kept in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OilChangeRecord {
    /// Odometer reading at the time of the oil change.
    pub mileage: u64,

    /// Raw "Month Year" heading in effect when the entry was read.
    /// `None` if no date heading preceded the entry.
    pub date: Option<String>,

    /// Oil grade such as `5W-20`.
    pub oil_type: Option<String>,

    /// Filter part code such as `XG9688`.
    pub filter_type: Option<String>,
}

// =============================================================================
// Vehicle log (the full parsed document)
// =============================================================================

/// A fully parsed maintenance log. Rebuilt from scratch on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleLog {
    /// First non-blank line of the file, verbatim (trimmed).
    /// Empty when the file has no content.
    pub vehicle: String,

    /// Oil changes in the order they appear in the file.
    pub records: Vec<OilChangeRecord>,
}

impl VehicleLog {
    /// Vehicle identifier for display, with a placeholder when missing.
    pub fn vehicle_label(&self) -> &str {
        if self.vehicle.is_empty() {
            constants::VEHICLE_NOT_SPECIFIED
        } else {
            &self.vehicle
        }
    }

    /// Derive the defaults used to pre-populate and validate a new entry.
    ///
    /// Computed fresh from the last record every time; nothing is cached.
    pub fn summary(&self) -> LogSummary {
        match self.records.last() {
            Some(last) => LogSummary {
                default_oil_type: last.oil_type.clone().unwrap_or_default(),
                default_filter_type: last.filter_type.clone().unwrap_or_default(),
                last_date: last.date.clone().unwrap_or_default(),
                last_mileage: last.mileage,
            },
            None => LogSummary::default(),
        }
    }
}

/// Convenience values derived from the most recent oil change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSummary {
    /// Oil type of the last record, empty if unknown or no records.
    pub default_oil_type: String,

    /// Filter type of the last record, empty if unknown or no records.
    pub default_filter_type: String,

    /// Date heading of the last record, empty if unknown or no records.
    pub last_date: String,

    /// Mileage of the last record, zero if no records.
    pub last_mileage: u64,
}

// =============================================================================
// New entry (validated append input)
// =============================================================================

/// A validated oil change about to be appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub mileage: u64,
    pub oil_type: String,
    pub filter_type: String,
}

impl NewEntry {
    /// Render the entry as a log line, without the trailing newline.
    ///
    /// No date heading is produced: the entry belongs to the most recent
    /// date section already in the file.
    pub fn to_log_line(&self) -> String {
        format!(
            "{} miles : {} ({}) ({})",
            self.mileage,
            constants::APPENDED_DESCRIPTION,
            self.oil_type,
            self.filter_type
        )
    }
}
