//! Resolution of a process's cgroup v2 membership path from its
//! `/proc/<pid>/cgroup` table.
//!
//! The table is newline-delimited with records of the form
//! `<hierarchy-id>:<controller-list>:<path>`. On the unified (v2) hierarchy
//! the hierarchy id is always `0` and the controller list is always empty; v1
//! records carry a comma-separated controller list. The unified record is
//! therefore identified by its empty controller-list field.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::fsutil;
use crate::inspect::Pid;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to read line from file `{path}`: {source}")]
    ReadLine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no unified hierarchy record in file `{path}`")]
    MissingUnifiedHierarchy { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns the cgroup v2 path for the given process.
///
/// Reads `<proc_root>/<pid>/cgroup` and returns the path field of the record
/// whose controller-list field is empty, verbatim as the kernel emits it
/// (relative to the cgroup root, with a leading slash).
///
/// # Errors
///
/// - [`Error::FileOpen`] if the membership file cannot be opened, which is
///   the normal outcome when the process exited between discovery and lookup.
/// - [`Error::ReadLine`] if reading from the file fails.
/// - [`Error::MissingUnifiedHierarchy`] if the table has no record with an
///   empty controller-list field (cgroup v1-only host).
pub fn cgroup_path_for_pid(proc_root: impl AsRef<Path>, pid: Pid) -> Result<String> {
    let path = proc_root.as_ref().join(pid.to_string()).join("cgroup");
    let buf = fsutil::open_file_reader(&path)?;

    cgroup_path_from_reader(buf, &path)
}

fn cgroup_path_from_reader<R: BufRead>(mut reader: R, origin: &Path) -> Result<String> {
    let mut line = String::with_capacity(128);

    while reader
        .read_line(&mut line)
        .map_err(|source| Error::ReadLine {
            path: origin.to_path_buf(),
            source,
        })?
        != 0
    {
        let record = line.trim_end_matches('\n');
        if let Some((_, rest)) = record.split_once(':') {
            if let Some((controllers, path)) = rest.split_once(':') {
                if controllers.is_empty() {
                    return Ok(path.to_owned());
                }
            }
        }

        line.clear();
    }

    Err(Error::MissingUnifiedHierarchy {
        path: origin.to_path_buf(),
    })
}
