//! CSV line counting
//!
//! Counts raw lines, so the result does not depend on the file's encoding.

use crate::error::{Result, ShipError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument};

/// Line totals for a counted file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCount {
    /// Every line, header included
    pub total: u64,
    /// Lines after the header
    pub data_rows: u64,
}

impl LineCount {
    #[must_use]
    pub const fn from_total(total: u64) -> Self {
        Self {
            total,
            data_rows: total.saturating_sub(1),
        }
    }
}

/// Count the lines of `path`.
///
/// `\n`, `\r\n` and a lone `\r` each end one line. A trailing line without
/// a terminator still counts; an empty file has none.
#[instrument]
pub fn count_lines(path: &Path) -> Result<LineCount> {
    if !path.is_file() {
        return Err(ShipError::validation(format!(
            "File '{}' does not exist",
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| ShipError::file_system("open", path, e))?;
    let mut reader = BufReader::new(file);
    let mut total = 0u64;
    let mut in_line = false;
    let mut after_cr = false;

    loop {
        let consumed = {
            let buf = reader
                .fill_buf()
                .map_err(|e| ShipError::file_system("read", path, e))?;
            if buf.is_empty() {
                break;
            }
            for &byte in buf {
                match byte {
                    b'\r' => {
                        total += 1;
                        in_line = false;
                        after_cr = true;
                    }
                    b'\n' => {
                        // second half of a \r\n pair
                        if !after_cr {
                            total += 1;
                        }
                        in_line = false;
                        after_cr = false;
                    }
                    _ => {
                        in_line = true;
                        after_cr = false;
                    }
                }
            }
            buf.len()
        };
        reader.consume(consumed);
    }

    if in_line {
        total += 1;
    }

    debug!("Counted {} lines in {}", total, path.display());
    Ok(LineCount::from_total(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn count(content: &[u8]) -> LineCount {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        fs::write(&path, content).unwrap();
        count_lines(&path).unwrap()
    }

    #[test]
    fn test_terminated_lines() {
        assert_eq!(count(b"id,name\n1,a\n2,b\n"), LineCount { total: 3, data_rows: 2 });
    }

    #[test]
    fn test_unterminated_last_line() {
        assert_eq!(count(b"id,name\n1,a\n2,b").total, 3);
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(count(b""), LineCount { total: 0, data_rows: 0 });
    }

    #[test]
    fn test_header_only() {
        assert_eq!(count(b"id,name\n"), LineCount { total: 1, data_rows: 0 });
    }

    #[test]
    fn test_non_utf8_content() {
        // latin-1 "año" and a CRLF line ending
        assert_eq!(count(b"a\xf1o\r\nb\n").total, 2);
    }

    #[test]
    fn test_carriage_return_line_endings() {
        assert_eq!(
            count(b"id,name\r1,a\r2,b\r"),
            LineCount { total: 3, data_rows: 2 }
        );
        assert_eq!(count(b"id,name\r1,a\r2,b").total, 3);
    }

    #[test]
    fn test_mixed_line_endings() {
        assert_eq!(count(b"a\r\nb\rc\nd").total, 4);
        assert_eq!(count(b"a\r\r\nb\n").total, 3);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = count_lines(&temp_dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ShipError::Validation { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
