use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

mod error;

pub use error::{Error, Result};

/// The maximum allowed length for a [`ContainerID`].
const CONTAINER_ID_MAX_LEN: usize = 255;

/// A validated container identifier.
///
/// Container ids are used as path components when probing runtime storage
/// directories, so an id must be a single plain path component: non-empty,
/// free of `/`, and not `.` or `..`.
///
/// # Examples
///
/// ```
/// # use container_stats::container::ContainerID;
/// let raw_id = "abc123abc123abc123abc123abc123abc123abc123abc123abc123abc123abcd";
/// let container_id = ContainerID::new(raw_id).unwrap();
/// assert_eq!(container_id.as_ref(), raw_id);
///
/// assert!(ContainerID::new("../../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerID(Box<str>);

impl ContainerID {
    /// Creates a new `ContainerID` from the given raw id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] if the input is empty, longer
    /// than [`CONTAINER_ID_MAX_LEN`], contains a path separator, or is a
    /// relative path component (`.` or `..`).
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        let valid = !src.is_empty()
            && src.len() <= CONTAINER_ID_MAX_LEN
            && !src.contains('/')
            && src != "."
            && src != "..";
        if !valid {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContainerID {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
