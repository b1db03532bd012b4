//! Parsing of CPU usage statistics from cgroup `cpu.stat` files.
//!
//! A `cpu.stat` file holds whitespace-separated `key value` lines. Only the
//! cumulative usage fields are mapped to [`CpuStat`]; throttling and burst
//! counters are ignored. Scanning stops once the mapped fields have all been
//! seen, so the usage figures are available without reading the full file.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::KeyValueStat;

/// Represents parsed usage data from a cgroup `cpu.stat` file.
///
/// All values are reported by the Linux kernel in microseconds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CpuStat {
    /// Total time the cgroup used CPU (user + system).
    pub usage_usec: u64,
    /// Time spent in user space.
    pub user_usec: u64,
    /// Time spent in kernel (system) space.
    pub system_usec: u64,
}

impl CpuStat {
    fn set_usage_usec(&mut self, usage_usec: u64) {
        self.usage_usec = usage_usec;
    }

    fn set_user_usec(&mut self, user_usec: u64) {
        self.user_usec = user_usec;
    }

    fn set_system_usec(&mut self, system_usec: u64) {
        self.system_usec = system_usec;
    }
}

type Setter = fn(&mut CpuStat, u64);

static SETTERS: LazyLock<HashMap<&'static str, Setter>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Setter> = HashMap::with_capacity(3);

    m.insert("usage_usec", CpuStat::set_usage_usec);
    m.insert("user_usec", CpuStat::set_user_usec);
    m.insert("system_usec", CpuStat::set_system_usec);

    m
});

impl KeyValueStat for CpuStat {
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)> {
        &SETTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgroup::stats::error::{StatParseError, extract_stat_parse_error};

    #[test]
    fn test_parse_empty_cpu_stat() {
        let data = "";
        let stat = CpuStat::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(stat, CpuStat::default());
    }

    #[test]
    fn test_parse_complete_cpu_stat() {
        let data = "\
usage_usec 623932088000
user_usec 421230248000
system_usec 202701840000
nr_periods 0
nr_throttled 0
throttled_usec 0
";
        let stat = CpuStat::from_reader(&mut data.as_bytes()).unwrap();

        assert_eq!(stat.usage_usec, 623_932_088_000);
        assert_eq!(stat.user_usec, 421_230_248_000);
        assert_eq!(stat.system_usec, 202_701_840_000);
    }

    #[test]
    fn test_parse_partial_cpu_stat() {
        let data = "usage_usec 12345\n";
        let stat = CpuStat::from_reader(&mut data.as_bytes()).unwrap();

        assert_eq!(stat.usage_usec, 12345);
        assert_eq!(stat.user_usec, 0); // defaults
        assert_eq!(stat.system_usec, 0);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let data = "\
some_future_field 99
usage_usec 100
";
        let stat = CpuStat::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(stat.usage_usec, 100);
    }

    #[test]
    fn test_first_occurrence_of_key_wins() {
        let data = "\
usage_usec 100
user_usec 60
system_usec 40
usage_usec 999
";
        let stat = CpuStat::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(stat.usage_usec, 100);
    }

    #[test]
    fn test_parse_invalid_cpu_stat() {
        let data = "\
user_usec 42
usage_usec abc
";
        let err = CpuStat::from_reader(&mut data.as_bytes()).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        let err = extract_stat_parse_error(&err);
        match err {
            StatParseError::InvalidKeyValue {
                key, value, line, ..
            } => {
                assert_eq!(key, "usage_usec");
                assert_eq!(value, "abc");
                assert_eq!(*line, 2);
            }
            _ => panic!("Expected InvalidKeyValue error"),
        }
    }
}
