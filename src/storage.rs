//! Lookup of a container's runtime config document in CRI-O overlay storage.
//!
//! CRI-O keeps each container's OCI config at
//! `<storage-root>/overlay-containers/<id>/userdata/config.json`. The storage
//! root differs between rootful and rootless setups, so a fixed list of
//! well-known roots is probed in order, with `$XDG_RUNTIME_DIR/containers/storage`
//! first when that variable is set. The returned bytes are an inspect
//! document usable with [`crate::cgroup::Introspector`].

use std::path::{Path, PathBuf};

use crate::container::ContainerID;

const STORAGE_ROOTS: [&str; 2] = ["/run/containers/storage", "/var/lib/containers/storage"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read container config `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no container config found for container `{id}`")]
    MissingConfig { id: ContainerID },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reads the config document for the given container from well-known CRI-O
/// storage locations.
///
/// # Errors
///
/// - [`Error::Read`] if a candidate config exists but cannot be read.
/// - [`Error::MissingConfig`] if no probed storage root has a config for the
///   container.
pub fn read_container_config(id: &ContainerID) -> Result<Vec<u8>> {
    let mut roots: Vec<PathBuf> = Vec::with_capacity(STORAGE_ROOTS.len() + 1);
    if let Some(runtime_dir) = std::env::var_os("XDG_RUNTIME_DIR") {
        roots.push(PathBuf::from(runtime_dir).join("containers/storage"));
    }
    roots.extend(STORAGE_ROOTS.iter().map(PathBuf::from));

    read_container_config_from_roots(id, &roots)
}

fn read_container_config_from_roots(id: &ContainerID, roots: &[PathBuf]) -> Result<Vec<u8>> {
    for root in roots {
        let path = config_path(root, id);
        match std::fs::read(&path) {
            Ok(data) => {
                log::debug!("Found container config for `{id}` at `{}`", path.display());
                return Ok(data);
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(Error::Read { path, source }),
        }
    }

    Err(Error::MissingConfig { id: id.clone() })
}

fn config_path(root: &Path, id: &ContainerID) -> PathBuf {
    root.join("overlay-containers")
        .join(id.as_ref())
        .join("userdata/config.json")
}
