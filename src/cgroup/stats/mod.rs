//! Reading and normalizing container resource usage from cgroup accounting
//! files.
//!
//! Given the cgroup v2 mount point and a container process's cgroup path,
//! [`read_stats`] reads `cpu.stat` and `memory.current` under the resolved
//! directory and produces a [`ResourceStats`] snapshot. Not every host has
//! every accounting controller enabled, so an *absent* file degrades its
//! field to zero instead of failing the whole read; any other I/O failure,
//! and unparseable content in a file that is present, still propagates.

mod cpu;
mod error;
mod memory;
mod parser;

pub use cpu::CpuStat;
pub use error::StatParseError;
pub use memory::MemoryUsage;
pub use parser::{KeyValueStat, SingleLineStat};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::fsutil;

const CPU_STAT_FILE: &str = "cpu.stat";
const MEMORY_CURRENT_FILE: &str = "memory.current";

/// A point-in-time snapshot of a container's resource usage.
///
/// Meaningful only relative to the process it was read for at the moment of
/// the read; it carries no timestamp and is not a time series. A zero field
/// either reports a true zero counter or an accounting file that was absent
/// on this host; the two are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResourceStats {
    /// Cumulative CPU consumption in microseconds.
    pub cpu_usage_usec: u64,
    /// Current resident memory usage in bytes.
    pub memory_usage_bytes: u64,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read accounting file `{path}`: {source}")]
pub struct Error {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reads CPU and memory usage for the cgroup at `cgroup_path` under
/// `mount_point`.
///
/// The cgroup path is the slash-prefixed relative path from
/// `/proc/<pid>/cgroup`; it is joined onto the mount point to locate the
/// accounting directory.
///
/// # Errors
///
/// Returns [`Error`] if a *present* accounting file cannot be read or
/// parsed. A missing accounting file is not an error; its field is zero.
pub fn read_stats(mount_point: &Path, cgroup_path: &str) -> Result<ResourceStats> {
    let cgroup_dir = mount_point.join(cgroup_path.trim_start_matches('/'));

    let cpu = read_optional(&cgroup_dir.join(CPU_STAT_FILE), CpuStat::from_reader)?
        .unwrap_or_default();
    let memory = read_optional(
        &cgroup_dir.join(MEMORY_CURRENT_FILE),
        MemoryUsage::from_reader,
    )?
    .unwrap_or_default();

    Ok(ResourceStats {
        cpu_usage_usec: cpu.usage_usec,
        memory_usage_bytes: memory.usage_bytes,
    })
}

/// Opens and parses one accounting file, mapping an absent file to `None`.
fn read_optional<T>(
    path: &Path,
    parse: fn(&mut BufReader<File>) -> std::io::Result<T>,
) -> Result<Option<T>> {
    let mut reader = match fsutil::open_file_reader(path) {
        Ok(reader) => reader,
        Err(err) if err.is_not_found() => {
            log::debug!("Accounting file `{}` is absent, using zero", path.display());
            return Ok(None);
        }
        Err(err) => {
            return Err(Error {
                path: err.path,
                source: err.source,
            });
        }
    };

    parse(&mut reader).map(Some).map_err(|source| Error {
        path: path.to_path_buf(),
        source,
    })
}
