use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::{trace, warn};

use crate::errors::{ScanError, ScanResult};
use crate::project::SourceFile;

/// Files at or above this size are memory-mapped instead of read whole.
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Reads a source file's lines, best-effort.
///
/// Any failure (missing file, permission error, file locked by another
/// process) yields an empty Vec; to this scan an unreadable file and an
/// empty file are the same thing, and a transient read error must not
/// abort the whole run. The throttle pause taken before each read keeps a
/// background scan from saturating disk I/O; pass `Duration::ZERO` to
/// disable it.
pub fn read_lines(file: &SourceFile, throttle: Duration) -> Vec<String> {
    if !throttle.is_zero() {
        std::thread::sleep(throttle);
    }
    match read_file_text(file.path()) {
        Ok(text) => text.lines().map(str::to_owned).collect(),
        Err(e) => {
            warn!("Skipping unreadable file {}: {}", file.path().display(), e);
            Vec::new()
        }
    }
}

/// Reads the full text of a file, choosing the strategy by file size.
fn read_file_text(path: &Path) -> ScanResult<String> {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    if size >= LARGE_FILE_THRESHOLD {
        trace!("Memory-mapping large file: {}", path.display());
        let file = File::open(path).map_err(|e| map_open_error(path, e))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(ScanError::IoError)?;
        Ok(decode_lossy(&mmap, path))
    } else {
        let bytes = std::fs::read(path).map_err(|e| map_open_error(path, e))?;
        Ok(decode_lossy(&bytes, path))
    }
}

fn map_open_error(path: &Path, e: std::io::Error) -> ScanError {
    match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => ScanError::permission_denied(path),
        _ => ScanError::IoError(e),
    }
}

fn decode_lossy(bytes: &[u8], path: &Path) -> String {
    let cow = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = cow {
        warn!("Invalid UTF-8 replaced in file: {}", path.display());
    }
    cow.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_reads_lines_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Program.cs");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "var a = Strings.Greeting;").unwrap();
        writeln!(file, "var b = Strings.Farewell;").unwrap();

        let lines = read_lines(&SourceFile::new(&path), Duration::ZERO);
        assert_eq!(
            lines,
            vec![
                "var a = Strings.Greeting;".to_string(),
                "var b = Strings.Farewell;".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_file_yields_no_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.cs");
        let lines = read_lines(&SourceFile::new(&path), Duration::ZERO);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.cs");
        std::fs::write(&path, b"Strings.Greeting \xE9 here\n").unwrap();

        let lines = read_lines(&SourceFile::new(&path), Duration::ZERO);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Strings.Greeting"));
    }

    #[test]
    fn test_throttle_is_applied_before_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.cs");
        std::fs::write(&path, "line\n").unwrap();

        let start = std::time::Instant::now();
        let lines = read_lines(&SourceFile::new(&path), Duration::from_millis(20));
        assert_eq!(lines.len(), 1);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
