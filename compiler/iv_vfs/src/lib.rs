//! iv VFS - a virtual namespace for loading code and data.
//!
//! A [`MountTable`] maps absolute path prefixes to [`FileSystem`]
//! providers. Later mounts shadow earlier ones: lookup tries the table from
//! the most recent mount backwards and picks the first mount point that
//! contains the path. Opening a directory yields its entries, one per
//! line, with directories suffixed by `/`.
//!
//! The table is an explicit value with its own lock. Interpreters that
//! share code loading share an `Arc<MountTable>`.

mod error;
mod fs;
mod mount;

pub use error::VfsError;
pub use fs::{DirFs, FileSystem, MemFs};
pub use mount::{MountTable, Protocol};
