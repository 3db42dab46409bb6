// OilLog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "OilLog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "OilLog";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log format
// =============================================================================

/// Full English month names recognised in date headings, in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Description text written for every appended entry. Must satisfy the
/// parser's oil-change phrase match so appended lines are read back.
pub const APPENDED_DESCRIPTION: &str = "Oil and Filter change";

// =============================================================================
// Display
// =============================================================================

/// Label shown for unknown dates, oil types, filter types and estimates.
pub const DEFAULT_UNKNOWN_LABEL: &str = "NA";

/// Maximum length of a configured unknown label.
pub const MAX_UNKNOWN_LABEL_LEN: usize = 16;

/// Shown in place of the vehicle identifier when the log has none.
pub const VEHICLE_NOT_SPECIFIED: &str = "Not specified";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept quiet so command output on stdout stays clean.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
