use crate::{inspect, mountinfo};

/// Error returned by the composed introspection pipeline.
///
/// Each variant wraps one stage's error transparently, so the originating
/// cause surfaces unchanged and callers can tell which stage aborted the
/// pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Inspect(#[from] inspect::Error),
    #[error(transparent)]
    CgroupPath(#[from] super::path::Error),
    #[error(transparent)]
    Mountinfo(#[from] mountinfo::Error),
    #[error(transparent)]
    Stats(#[from] super::stats::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
