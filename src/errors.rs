/// This module defines custom error types for refscout.
///
/// Most failure modes in this crate are recovered locally rather than
/// propagated: an unreadable source file is treated as an empty one, and a
/// cancelled scan is an ordinary outcome, not an error. In .NET the
/// equivalent code would reach for exceptions and a broad `catch`:
/// ```csharp
/// try {
///     lines = File.ReadAllLines(file.FilePath);
/// } catch {
///     lines = new string[0];
/// }
/// ```
/// Rust makes the recovery explicit: fallible operations return
/// `ScanResult<T>` and the scan pipeline decides, per call site, whether an
/// error is swallowed (file reads) or reported (contract violations).
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur during scan operations
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Cannot segment a line without {0} token offsets")]
    EmptyOffsetSet(&'static str),
    #[error("Token span [{start}, {end}) lies outside a line of {line_len} bytes")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        line_len: usize,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScanError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }
}
