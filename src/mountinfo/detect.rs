use crate::fsutil;

use super::parser::parse_mount_info_line;
use super::{Error, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Detects the cgroup v2 mount point by parsing a Linux `mountinfo` file.
///
/// Scans the file for entries whose filesystem type is `cgroup2` and returns
/// the associated mount point. If multiple `cgroup2` entries exist, the first
/// one wins. Malformed lines are skipped rather than treated as fatal.
///
/// # Arguments
///
/// * `path` - Path to a Linux mountinfo file (e.g., `/proc/self/mountinfo`).
///
/// # Errors
///
/// - [`Error::FileOpen`] if the file can't be opened.
/// - [`Error::ReadLine`] if reading from the file fails.
/// - [`Error::MissingCgroup2Mount`] if no `cgroup2` mount is found.
///
/// # Example
///
/// ```no_run
/// use container_stats::mountinfo::detect_cgroup2_mount_point;
///
/// let root = detect_cgroup2_mount_point("/proc/self/mountinfo").unwrap();
/// println!("cgroup2 root: {}", root.display());
/// ```
pub fn detect_cgroup2_mount_point(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let buf = fsutil::open_file_reader(path)?;

    detect_cgroup2_mount_point_from_reader(buf, path)
}

fn detect_cgroup2_mount_point_from_reader<R: BufRead>(
    mut reader: R,
    origin: &Path,
) -> Result<PathBuf> {
    let mut line = String::with_capacity(256);

    while reader
        .read_line(&mut line)
        .map_err(|source| Error::ReadLine {
            path: origin.to_path_buf(),
            source,
        })?
        != 0
    {
        match parse_mount_info_line(line.trim_end_matches('\n')) {
            Ok(mount_info) if mount_info.fs_type == "cgroup2" => {
                log::debug!(
                    "Found `cgroup2` mount point with root `{}`: {}",
                    mount_info.root,
                    mount_info.mount_point
                );
                return Ok(PathBuf::from(mount_info.mount_point));
            }
            Ok(_) => {}
            Err(err) => {
                log::debug!("Skipping malformed mountinfo line in `{}`: {err}", origin.display());
            }
        }

        line.clear();
    }

    Err(Error::MissingCgroup2Mount {
        path: origin.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn new_cursor_from_contents(contents: &str) -> Cursor<Vec<u8>> {
        Cursor::new(contents.as_bytes().to_vec())
    }

    #[test]
    fn test_detect_single_cgroup2_mount() {
        let input =
            "42 35 0:39 / /sys/fs/cgroup rw nosuid,nodev,noexec,relatime - cgroup2 cgroup rw\n";
        let path = Path::new("/dummy");
        let reader = new_cursor_from_contents(input);

        let mount = detect_cgroup2_mount_point_from_reader(reader, path).unwrap();
        assert_eq!(mount, PathBuf::from("/sys/fs/cgroup"));
    }

    #[test]
    fn test_detect_first_of_multiple_cgroup2_mounts() {
        let input = "\
43 35 0:39 / /sys/fs/cgroup rw nosuid,nodev,noexec,relatime - cgroup2 cgroup rw
42 35 0:39 / /ignored rw nosuid,nodev,noexec,relatime - cgroup2 cgroup rw
";
        let path = Path::new("/dummy");
        let reader = new_cursor_from_contents(input);

        let mount = detect_cgroup2_mount_point_from_reader(reader, path).unwrap();
        assert_eq!(mount, PathBuf::from("/sys/fs/cgroup"));
    }

    #[test]
    fn test_detect_missing_cgroup2_mount() {
        let input = "25 1 0:24 / /proc rw,relatime - proc proc rw\n";
        let path = Path::new("/dummy");
        let reader = new_cursor_from_contents(input);

        let err = detect_cgroup2_mount_point_from_reader(reader, path).unwrap_err();
        match err {
            Error::MissingCgroup2Mount { path: err_path } => assert_eq!(err_path, path),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let input = "\
not a mountinfo line
25 1 0:24 / /proc
42 35 0:39 / /sys/fs/cgroup rw nosuid,nodev,noexec,relatime - cgroup2 cgroup rw
";
        let path = Path::new("/dummy");
        let reader = new_cursor_from_contents(input);

        let mount = detect_cgroup2_mount_point_from_reader(reader, path).unwrap();
        assert_eq!(mount, PathBuf::from("/sys/fs/cgroup"));
    }

    #[test]
    fn test_only_malformed_lines_is_missing_mount() {
        let input = "garbage\nmore garbage\n";
        let path = Path::new("/dummy");
        let reader = new_cursor_from_contents(input);

        let err = detect_cgroup2_mount_point_from_reader(reader, path).unwrap_err();
        assert!(matches!(err, Error::MissingCgroup2Mount { .. }));
    }

    #[test]
    fn test_detect_from_tempfile() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "42 35 0:39 / /sys/fs/cgroup rw nosuid,nodev,noexec,relatime - cgroup2 cgroup rw"
        )
        .unwrap();

        let mount = detect_cgroup2_mount_point(tmp.path()).unwrap();
        assert_eq!(mount, PathBuf::from("/sys/fs/cgroup"));
    }

    #[test]
    fn test_detect_missing_file_is_file_open_error() {
        let err = detect_cgroup2_mount_point("/definitely/does/not/exist").unwrap_err();
        assert!(matches!(err, Error::FileOpen(_)));
    }
}
