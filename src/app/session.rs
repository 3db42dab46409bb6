// OilLog - app/session.rs
//
// Session persistence: remember the last selected maintenance log between
// runs so it need not be passed on every invocation.
//
// Design principles:
// - Session is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good session.
// - Load errors are silently discarded (corrupt or incompatible sessions
//   just start fresh rather than surfacing errors to the user).
// - The data directory is created on first save.

use crate::util::constants::SESSION_FILE_NAME;
use crate::util::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Persistent session snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Maintenance log most recently opened successfully.
    #[serde(default)]
    pub last_file: Option<PathBuf>,
}

impl SessionData {
    pub fn new(last_file: Option<PathBuf>) -> Self {
        Self {
            version: SESSION_VERSION,
            last_file,
        }
    }
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed. The caller decides whether
/// to surface a failure; typically it is logged and ignored.
pub fn save(data: &SessionData, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json =
        serde_json::to_string_pretty(data).map_err(|e| ConfigError::Serialise { source: e })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| ConfigError::Io {
        path: tmp.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch). The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed, starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch, starting fresh"
        );
        return None;
    }

    tracing::debug!(path = %path.display(), "Session file loaded");
    Some(data)
}

/// Pick the maintenance log to operate on.
///
/// Priority: explicit `arg`, then the last file recorded in the session at
/// `session_file`, then the configured `default_file`. `None` when none
/// of them is set.
pub fn select_log_file(
    arg: Option<&Path>,
    session_file: &Path,
    default_file: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = arg {
        return Some(path.to_path_buf());
    }
    if let Some(path) = load(session_file).and_then(|s| s.last_file) {
        tracing::debug!(path = %path.display(), "Using last selected file");
        return Some(path);
    }
    default_file.map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        let original = SessionData::new(Some(PathBuf::from("/tmp/civic.txt")));

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path).expect("load should return Some after valid save");

        assert_eq!(loaded.version, SESSION_VERSION);
        assert_eq!(loaded.last_file, original.last_file);
    }

    #[test]
    fn test_session_save_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let path = session_path(&dir.path().join("nested").join("data"));
        save(&SessionData::new(None), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_session_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nonexistent.json")).is_none());
    }

    #[test]
    fn test_session_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        let mut data = SessionData::new(Some(PathBuf::from("a.txt")));
        data.version = 99;
        save(&data, &path).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_save_overwrites_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        save(&SessionData::new(Some(PathBuf::from("old.txt"))), &path).unwrap();

        // Simulate a leftover temp file from a previous crash.
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        save(&SessionData::new(Some(PathBuf::from("new.txt"))), &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.last_file, Some(PathBuf::from("new.txt")));
    }

    #[test]
    fn test_select_prefers_explicit_argument() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        save(&SessionData::new(Some(PathBuf::from("session.txt"))), &path).unwrap();

        let chosen = select_log_file(
            Some(Path::new("arg.txt")),
            &path,
            Some(Path::new("config.txt")),
        );
        assert_eq!(chosen, Some(PathBuf::from("arg.txt")));
    }

    #[test]
    fn test_select_falls_back_to_session() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        save(&SessionData::new(Some(PathBuf::from("session.txt"))), &path).unwrap();

        let chosen = select_log_file(None, &path, Some(Path::new("config.txt")));
        assert_eq!(chosen, Some(PathBuf::from("session.txt")));
    }

    #[test]
    fn test_select_falls_back_to_config_default() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());

        // No session file at all.
        let chosen = select_log_file(None, &path, Some(Path::new("config.txt")));
        assert_eq!(chosen, Some(PathBuf::from("config.txt")));

        // Session present but without a last file.
        save(&SessionData::new(None), &path).unwrap();
        let chosen = select_log_file(None, &path, Some(Path::new("config.txt")));
        assert_eq!(chosen, Some(PathBuf::from("config.txt")));
    }

    #[test]
    fn test_select_nothing_configured_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(select_log_file(None, &session_path(dir.path()), None), None);
    }
}
