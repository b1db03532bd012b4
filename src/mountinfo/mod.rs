//! Detection of the cgroup v2 mount point from Linux mountinfo tables.

mod detect;
mod error;
mod parser;

pub use detect::detect_cgroup2_mount_point;
pub use error::{Error, Result};
