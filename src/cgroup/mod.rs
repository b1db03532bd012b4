//! Container resource introspection via the Linux cgroup v2 filesystem.
//!
//! This module composes the full discovery pipeline: an inspect document is
//! searched for the container's process identifier, the process's cgroup v2
//! membership path is resolved from procfs, the live cgroup2 mount point is
//! detected from the mount table, and the accounting files under the
//! resolved directory are read into a [`ResourceStats`] snapshot.
//!
//! Every invocation re-resolves everything from the kernel's pseudo-files;
//! nothing is cached across calls, so container restarts and remounts are
//! picked up and concurrent invocations do not interact.
//!
//! # Platform Requirements
//!
//! - Linux with cgroup v2 support.
//! - Read access to `/proc` and the cgroup2 mount (normally `/sys/fs/cgroup`).

mod error;
pub mod path;
pub mod stats;

pub use error::{Error, Result};
pub use stats::ResourceStats;

use std::path::PathBuf;

use crate::inspect;
use crate::mountinfo;

/// Drives the introspection pipeline against a procfs root.
///
/// The default procfs root is `/proc`; tests point it at a fake tree. The
/// struct holds no other state and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct Introspector {
    proc_root: PathBuf,
}

impl Default for Introspector {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl Introspector {
    /// Creates an introspector resolving process information under the given
    /// procfs root.
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// Returns resource usage for the container described by the given
    /// inspect document.
    ///
    /// The pipeline short-circuits on the first failing stage and returns
    /// that stage's error unchanged. On success both figures are from a
    /// single pass over the container's current accounting files.
    ///
    /// # Errors
    ///
    /// - [`Error::Inspect`] if the document is malformed or holds no `pid`.
    /// - [`Error::CgroupPath`] if the process is gone or has no unified
    ///   hierarchy record.
    /// - [`Error::Mountinfo`] if no cgroup2 mount is present.
    /// - [`Error::Stats`] if a present accounting file cannot be read.
    pub fn stats_from_inspect(&self, data: &[u8]) -> Result<ResourceStats> {
        let pid = inspect::pid_from_inspect(data)?;
        log::debug!("Resolved container process id: {pid}");

        let cgroup_path = path::cgroup_path_for_pid(&self.proc_root, pid)?;
        log::debug!("Resolved cgroup path for pid {pid}: {cgroup_path}");

        let mount_point = mountinfo::detect_cgroup2_mount_point(self.mountinfo_path())?;

        let stats = stats::read_stats(&mount_point, &cgroup_path)?;
        Ok(stats)
    }

    fn mountinfo_path(&self) -> PathBuf {
        self.proc_root.join("self/mountinfo")
    }
}

/// Convenience wrapper over [`Introspector::stats_from_inspect`] using the
/// host's `/proc`.
pub fn stats_from_inspect(data: &[u8]) -> Result<ResourceStats> {
    Introspector::default().stats_from_inspect(data)
}
