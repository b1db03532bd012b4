//! Parsing of current memory usage from cgroup `memory.current` files.
//!
//! A `memory.current` file holds exactly one unsigned integer, the cgroup's
//! resident memory usage in bytes, optionally followed by a newline.

use std::io::BufRead;

use super::{SingleLineStat, StatParseError};

/// Represents memory usage from `memory.current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    /// Total memory usage in bytes.
    pub usage_bytes: u64,
}

impl SingleLineStat for MemoryUsage {
    /// Parses a `memory.current`-style file from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error of kind `std::io::ErrorKind::InvalidData` if the
    /// value cannot be parsed as a `u64`.
    fn from_reader<R: BufRead>(buf: &mut R) -> std::io::Result<Self> {
        let mut line = String::new();

        buf.read_line(&mut line)?;
        let line = line.trim();
        let usage_bytes = line
            .parse::<u64>()
            .map_err(|source| StatParseError::InvalidValue {
                value: line.to_string(),
                line: 1,
                source,
            })?;

        Ok(MemoryUsage { usage_bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgroup::stats::error::{StatParseError, extract_stat_parse_error};

    #[test]
    fn test_parse_memory_usage() {
        let data = "67890\n";
        let stat = MemoryUsage::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(stat.usage_bytes, 67890);
    }

    #[test]
    fn test_parse_memory_usage_without_newline() {
        let data = "104857600";
        let stat = MemoryUsage::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(stat.usage_bytes, 104_857_600);
    }

    #[test]
    fn test_parse_invalid_memory_usage() {
        let data = "not-a-number\n";
        let err = MemoryUsage::from_reader(&mut data.as_bytes()).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        let err = extract_stat_parse_error(&err);
        match err {
            StatParseError::InvalidValue { value, line, .. } => {
                assert_eq!(value, "not-a-number");
                assert_eq!(*line, 1);
            }
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_parse_empty_memory_usage_errors() {
        let data = "";
        let err = MemoryUsage::from_reader(&mut data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
