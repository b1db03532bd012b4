//! Container Stats: discovery of cgroup v2 resource usage for containers.
//!
//! Given a container runtime's inspection JSON (the inspect document), this
//! library finds the container's host process id, resolves the process's
//! cgroup v2 membership path, detects the live cgroup2 mount point, and reads
//! the CPU and memory accounting files into a normalized
//! [`ResourceStats`](cgroup::ResourceStats) snapshot.
//!
//! The pipeline is synchronous and stateless: every call re-reads the
//! kernel's pseudo-files, so it is safe to invoke concurrently and tolerates
//! container restarts and remounts between calls.
//!
//! ```no_run
//! let doc = std::fs::read("inspect.json")?;
//! let stats = container_stats::cgroup::stats_from_inspect(&doc)?;
//! println!("cpu: {}us, mem: {}B", stats.cpu_usage_usec, stats.memory_usage_bytes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cgroup;
pub mod container;
pub mod fsutil;
pub mod inspect;
pub mod mountinfo;
pub mod storage;

pub use cgroup::{Introspector, ResourceStats};
