//! The mount table.

use crate::{DirFs, FileSystem, VfsError};
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Builds providers for `name://argument` mount sources.
pub trait Protocol: Send + Sync {
    fn file_system(&self, argument: &str) -> Result<Arc<dyn FileSystem>, VfsError>;
}

struct MountPoint {
    mount_point: String,
    fs: Arc<dyn FileSystem>,
}

impl MountPoint {
    /// Path relative to this mount point, if the mount point contains
    /// `path`. Matching respects components: `/a` contains `/a/x` but not
    /// `/ab`.
    fn relative<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.mount_point == "/" {
            return path.starts_with('/').then_some(path);
        }
        let rest = path.strip_prefix(self.mount_point.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

/// Table of mounted providers, safe to share between interpreters.
#[derive(Default)]
pub struct MountTable {
    tab: Mutex<Vec<MountPoint>>,
    protocols: RwLock<FxHashMap<String, Arc<dyn Protocol>>>,
}

/// Mount points are stored without a trailing `/`, except the root.
fn canonical(mount_point: &str) -> Result<String, VfsError> {
    if !mount_point.starts_with('/') {
        return Err(VfsError::InvalidMountPoint {
            mount_point: mount_point.to_string(),
        });
    }
    let trimmed = mount_point.trim_end_matches('/');
    Ok(if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    })
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `fs` at `mount_point`, shadowing earlier mounts that contain
    /// the same paths.
    pub fn mount(&self, mount_point: &str, fs: Arc<dyn FileSystem>) -> Result<(), VfsError> {
        let mount_point = canonical(mount_point)?;
        let mut tab = self.tab.lock();
        if tab.iter().any(|m| m.mount_point == mount_point) {
            return Err(VfsError::AlreadyMounted { mount_point });
        }
        debug!(mount_point = %mount_point, source = %fs.describe(), "mount");
        tab.push(MountPoint { mount_point, fs });
        Ok(())
    }

    pub fn umount(&self, mount_point: &str) -> Result<(), VfsError> {
        let mount_point = canonical(mount_point)?;
        let mut tab = self.tab.lock();
        let Some(index) = tab.iter().rposition(|m| m.mount_point == mount_point) else {
            return Err(VfsError::NotMounted { mount_point });
        };
        tab.remove(index);
        debug!(mount_point = %mount_point, "umount");
        Ok(())
    }

    /// Provider responsible for `path` and the path relative to it. The
    /// most recent mount is tried first.
    fn lookup(&self, path: &str) -> Result<(Arc<dyn FileSystem>, String), VfsError> {
        let tab = self.tab.lock();
        if tab.is_empty() {
            return Err(VfsError::NothingMounted {
                path: path.to_string(),
            });
        }
        tab.iter()
            .rev()
            .find_map(|m| m.relative(path).map(|rel| (Arc::clone(&m.fs), rel.to_string())))
            .ok_or_else(|| VfsError::NotFound {
                path: path.to_string(),
            })
    }

    /// Open a file or directory listing.
    pub fn open(&self, path: &str) -> Result<Box<dyn Read + Send>, VfsError> {
        // The provider runs without the table lock held.
        let (fs, relative) = self.lookup(path)?;
        fs.open(&relative).map_err(|err| VfsError::io(path, &err))
    }

    pub fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        let mut out = String::new();
        self.open(path)?
            .read_to_string(&mut out)
            .map_err(|err| VfsError::io(path, &err))?;
        Ok(out)
    }

    /// `(mount point, provider description)` in mount order.
    pub fn mounts(&self) -> Vec<(String, String)> {
        self.tab
            .lock()
            .iter()
            .map(|m| (m.mount_point.clone(), m.fs.describe()))
            .collect()
    }

    /// Make `name://...` sources available to [`MountTable::mount_uri`].
    pub fn register_protocol(&self, name: &str, protocol: Arc<dyn Protocol>) {
        self.protocols.write().insert(name.to_string(), protocol);
    }

    /// Mount a source given as `name://argument`, or as a host directory
    /// path when there is no scheme.
    pub fn mount_uri(&self, mount_point: &str, uri: &str) -> Result<(), VfsError> {
        let fs: Arc<dyn FileSystem> = match uri.split_once("://") {
            None => Arc::new(DirFs::new(uri)),
            Some((name, argument)) => {
                let protocol = self
                    .protocols
                    .read()
                    .get(name)
                    .cloned()
                    .ok_or_else(|| VfsError::UnknownProtocol {
                        name: name.to_string(),
                    })?;
                protocol.file_system(argument)?
            }
        };
        self.mount(mount_point, fs)
    }
}
