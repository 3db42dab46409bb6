// OilLog - platform/fs.rs
//
// Filesystem primitives for the maintenance log: whole-file read and
// single-line append. Blocking calls; logs are kilobytes in size.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Append `line` plus a terminating newline to the end of `path`.
///
/// If the file is non-empty and its last byte is not a newline, one is
/// written first so `line` starts on its own line. The file must exist.
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).append(true).open(path)?;

    let needs_separator = if file.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        last[0] != b'\n'
    } else {
        false
    };

    let mut buf = String::with_capacity(line.len() + 2);
    if needs_separator {
        buf.push('\n');
    }
    buf.push_str(line);
    buf.push('\n');

    // Append mode: the write lands at the end regardless of the seek above.
    file.write_all(buf.as_bytes())?;
    file.flush()?;

    tracing::debug!(
        path = %path.display(),
        bytes = buf.len(),
        separator = needs_separator,
        "Line appended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_to_file_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "Car\n").unwrap();

        append_line(&path, "100 miles : x").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Car\n100 miles : x\n");
    }

    #[test]
    fn test_append_adds_missing_newline_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "Car").unwrap();

        append_line(&path, "100 miles : x").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Car\n100 miles : x\n");
    }

    #[test]
    fn test_append_to_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "").unwrap();

        append_line(&path, "Car").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Car\n");
    }

    #[test]
    fn test_append_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");
        let err = append_line(&path, "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_read_file_lossy_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, b"Car \xff\n").unwrap();
        assert_eq!(read_file_lossy(&path).unwrap(), "Car \u{fffd}\n");
    }
}
