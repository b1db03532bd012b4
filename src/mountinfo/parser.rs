//! Mountinfo line parser for Linux systems.
//!
//! Parses lines in `/proc/[pid]/mountinfo` format. See
//! [`proc_pid_mountinfo(5)`](https://man7.org/linux/man-pages/man5/proc_pid_mountinfo.5.html)
//! for details on the structure.

/// A parsed mountinfo record, borrowing from the input line.
///
/// Only the fields the mount point detection consumes are kept by name; the
/// variable-length optional fields between the mount point and the ` - `
/// separator are validated but not retained.
#[derive(Debug, PartialEq, Eq)]
pub struct MountInfo<'a> {
    /// Mount ID field.
    pub mount_id: &'a str,
    /// Root of the mount within the filesystem.
    pub root: &'a str,
    /// Mount point relative to the process's root.
    pub mount_point: &'a str,
    /// Filesystem type (e.g., `ext4`, `cgroup2`).
    pub fs_type: &'a str,
    /// Source of the mount (e.g., device).
    pub source: &'a str,
    /// Superblock options.
    pub super_options: &'a str,
}

/// Errors that may occur when parsing a mountinfo line.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing separator ` - ` in line: `{0}`")]
    MissingSeparator(String),

    #[error("missing field `{field}` in line: `{line}`")]
    MissingField {
        field: &'static str,
        line: String,
    },
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
    line: &str,
) -> Result<&'a str, ParseError> {
    fields.next().ok_or_else(|| ParseError::MissingField {
        field,
        line: line.to_owned(),
    })
}

/// Parses a single line of mountinfo data.
///
/// The fields before the literal ` - ` separator describe the mount; the
/// fields after it describe the filesystem type and source. Parsing is
/// zero-allocation on success.
///
/// # Errors
///
/// Returns a [`ParseError`] if the separator is absent or a required field
/// before or after it is missing.
pub fn parse_mount_info_line(line: &str) -> Result<MountInfo<'_>, ParseError> {
    let (pre, post) = line
        .split_once(" - ")
        .ok_or_else(|| ParseError::MissingSeparator(line.to_owned()))?;

    let mut pre_fields = pre.split_whitespace();
    let mount_id = next_field(&mut pre_fields, "mount_id", line)?;
    next_field(&mut pre_fields, "parent_id", line)?;
    next_field(&mut pre_fields, "major:minor", line)?;
    let root = next_field(&mut pre_fields, "root", line)?;
    let mount_point = next_field(&mut pre_fields, "mount_point", line)?;

    let mut post_fields = post.split_whitespace();
    let fs_type = next_field(&mut post_fields, "fs_type", line)?;
    let source = next_field(&mut post_fields, "source", line)?;
    let super_options = next_field(&mut post_fields, "super_options", line)?;

    Ok(MountInfo {
        mount_id,
        root,
        mount_point,
        fs_type,
        source,
        super_options,
    })
}
