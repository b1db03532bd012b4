//! Generic traits for parsing Linux cgroup accounting files into structured
//! types.
//!
//! Two file shapes occur under `/sys/fs/cgroup`:
//!
//! - [`KeyValueStat`]: multi-line files with one whitespace-separated
//!   `key value` pair per line, such as `cpu.stat`.
//! - [`SingleLineStat`]: files holding a single numeric value, such as
//!   `memory.current`.
//!
//! Implementors of [`KeyValueStat`] declare their known keys through
//! [`KeyValueStat::field_handlers`]; unknown keys are ignored so new kernel
//! fields do not break parsing, and scanning stops early once every known
//! key has been seen.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use super::StatParseError;

/// A trait for parsing key-value style `*.stat` files such as `cpu.stat`.
pub trait KeyValueStat: Default
where
    Self: 'static,
{
    /// Returns a map of known field names and corresponding handler functions
    /// that apply parsed values to the struct's fields.
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)>;

    /// Parses a key-value formatted buffer into a struct implementing
    /// [`KeyValueStat`].
    ///
    /// Each line holds one pair. For a known key the first occurrence wins;
    /// unknown keys are skipped. Reading stops as soon as all known keys have
    /// been seen.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if reading fails, or a [`StatParseError`]
    /// wrapped in an `io::Error` if the value of a known key is not an
    /// unsigned integer.
    fn from_reader<R: BufRead>(buf: &mut R) -> std::io::Result<Self> {
        let mut stat = Self::default();
        let handlers = Self::field_handlers();
        let mut seen_keys = HashSet::with_capacity(handlers.len());

        let mut line = String::new();
        let mut lineno = 0;
        while buf.read_line(&mut line)? != 0 {
            lineno += 1;
            Self::parse_line(&mut stat, &line, lineno, handlers, &mut seen_keys)?;
            if seen_keys.len() == handlers.len() {
                break;
            }

            line.clear();
        }

        Ok(stat)
    }

    /// Parses one `key value` line and applies the handler for a known,
    /// not-yet-seen key.
    ///
    /// # Errors
    ///
    /// Returns [`StatParseError::InvalidKeyValue`] (as an `io::Error`) if the
    /// value of a known key cannot be parsed as a `u64`.
    fn parse_line(
        stat: &mut Self,
        line: &str,
        lineno: usize,
        handlers: &HashMap<&'static str, fn(&mut Self, u64)>,
        seen_keys: &mut HashSet<&'static str>,
    ) -> std::io::Result<()> {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            return Ok(());
        };

        let Some((known_key, handler)) = handlers.get_key_value(key) else {
            return Ok(());
        };

        let parsed = val
            .parse::<u64>()
            .map_err(|source| StatParseError::InvalidKeyValue {
                key: key.to_string(),
                value: val.to_string(),
                line: lineno,
                source,
            })?;
        if seen_keys.insert(known_key) {
            handler(stat, parsed);
        }

        Ok(())
    }
}

/// A trait for parsing single-line, single-value statistics, such as the
/// `memory.current` file.
pub trait SingleLineStat: Sized + Default {
    /// Parses a single-line statistic from the provided buffered reader.
    ///
    /// # Errors
    ///
    /// Returns `Err(std::io::Error)` if reading or parsing fails.
    fn from_reader<R: BufRead>(buf: &mut R) -> std::io::Result<Self>;
}
