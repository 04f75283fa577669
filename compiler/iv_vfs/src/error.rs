//! Filesystem errors.

use std::fmt;

/// Error from the mount table or a provider. Every variant names the path
/// or mount point it concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VfsError {
    /// Mount point does not start with `/`.
    InvalidMountPoint { mount_point: String },
    AlreadyMounted { mount_point: String },
    NotMounted { mount_point: String },
    /// Open with an empty mount table.
    NothingMounted { path: String },
    /// No mount point contains the path.
    NotFound { path: String },
    UnknownProtocol { name: String },
    /// Provider failure.
    Io { path: String, message: String },
}

impl VfsError {
    pub(crate) fn io(path: &str, err: &std::io::Error) -> Self {
        VfsError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    /// The path or mount point the error concerns.
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidMountPoint { mount_point }
            | Self::AlreadyMounted { mount_point }
            | Self::NotMounted { mount_point } => mount_point,
            Self::NothingMounted { path } | Self::NotFound { path } | Self::Io { path, .. } => path,
            Self::UnknownProtocol { name } => name,
        }
    }

    /// What went wrong, without the path.
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidMountPoint { .. } => "mount point must start with /",
            Self::AlreadyMounted { .. } => "mount point already used",
            Self::NotMounted { .. } => "not mounted",
            Self::NothingMounted { .. } => "no filesystem is mounted",
            Self::NotFound { .. } => "not found",
            Self::UnknownProtocol { .. } => "unknown protocol",
            Self::Io { message, .. } => message,
        }
    }
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.reason())
    }
}

impl std::error::Error for VfsError {}
