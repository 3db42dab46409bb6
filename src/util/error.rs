// OilLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its cause so the
// CLI can print a single actionable line and debug logs keep the chain.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all OilLog operations.
/// Errors are categorised by the operation that produced them.
#[derive(Debug)]
pub enum OilLogError {
    /// The maintenance log could not be read.
    Read(ReadError),

    /// Appending to the maintenance log failed.
    Write(WriteError),

    /// User input was rejected before any file was touched.
    Validation(ValidationError),

    /// Exporting records failed.
    Export(ExportError),

    /// Configuration or session persistence failed.
    Config(ConfigError),
}

impl fmt::Display for OilLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Failed to read file: {e}"),
            Self::Write(e) => write!(f, "Failed to write to file: {e}"),
            Self::Validation(e) => write!(f, "Invalid input: {e}"),
            Self::Export(e) => write!(f, "Export failed: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for OilLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Write(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Read errors
// ---------------------------------------------------------------------------

/// Errors raised while reading a maintenance log.
#[derive(Debug)]
pub enum ReadError {
    /// The file does not exist.
    NotFound { path: PathBuf },

    /// The file exists but may not be read.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Any other I/O failure.
    Io { path: PathBuf, source: io::Error },
}

impl ReadError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "'{}' does not exist", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "permission denied reading '{}': {source}",
                    path.display()
                )
            }
            Self::Io { path, source } => {
                write!(f, "'{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ReadError> for OilLogError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Write errors
// ---------------------------------------------------------------------------

/// Errors raised while appending to a maintenance log.
#[derive(Debug)]
pub enum WriteError {
    /// I/O failure opening or writing the file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(f, "{operation} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<WriteError> for OilLogError {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Input rejected before an append is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Mileage input was empty, non-numeric, or too large.
    NonNumericMileage { input: String },

    /// Mileage is lower than the last recorded oil change.
    MileageBelowPrevious { mileage: u64, previous: u64 },

    /// No mileage was supplied and none could be estimated.
    MissingMileage,

    /// An entry was submitted before any maintenance log was selected.
    NoFileSelected,

    /// Oil or filter text that would not survive a re-parse: parentheses
    /// or control characters such as a newline.
    InvalidPartText { field: &'static str, input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNumericMileage { input } => {
                write!(f, "mileage must be a number (got '{input}')")
            }
            Self::MileageBelowPrevious { mileage, previous } => write!(
                f,
                "mileage {mileage} cannot be lower than the previous oil change mileage {previous}"
            ),
            Self::MissingMileage => write!(
                f,
                "no mileage given and the current mileage cannot be estimated; pass --mileage"
            ),
            Self::NoFileSelected => write!(f, "please select a maintenance log file"),
            Self::InvalidPartText { field, input } => write!(
                f,
                "{field} must not contain parentheses or line breaks (got {input:?})"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for OilLogError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for OilLogError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors writing the session file. Config problems are reported as
/// warnings by `load_config` instead.
#[derive(Debug)]
pub enum ConfigError {
    /// Session JSON could not be produced.
    Serialise { source: serde_json::Error },

    /// I/O error reading or writing a config/session file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialise { source } => write!(f, "Failed to serialise session: {source}"),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialise { source } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for OilLogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for OilLog results.
pub type Result<T> = std::result::Result<T, OilLogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_classifies_not_found() {
        let err = ReadError::from_io(
            PathBuf::from("missing.txt"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ReadError::NotFound { .. }));
        assert_eq!(err.to_string(), "'missing.txt' does not exist");
    }

    #[test]
    fn test_read_error_classifies_permission_denied() {
        let err = ReadError::from_io(
            PathBuf::from("locked.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, ReadError::PermissionDenied { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_message_names_both_mileages() {
        let err: OilLogError = ValidationError::MileageBelowPrevious {
            mileage: 900,
            previous: 1000,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid input:"));
        assert!(msg.contains("900"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn test_config_error_keeps_io_source() {
        let err: OilLogError = ConfigError::Io {
            path: PathBuf::from("session.json"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        }
        .into();
        assert!(err.to_string().starts_with("Configuration error: Config I/O error 'session.json'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
