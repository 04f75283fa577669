//! System functions backed by the host: file access through the mount
//! table.

use iv_domain::{Domain, Registry, SingleDomain};
use iv_value::{vfs_error, Value};
use iv_vfs::MountTable;
use std::sync::Arc;
use tracing::debug;

/// Read a file from the virtual file system: `⎕READ '/lib/x.iv'`.
pub const READ: &str = "⎕READ";

/// Register the system functions that need a mount table.
pub fn register_system_functions(registry: &mut Registry, mounts: Arc<MountTable>) {
    registry.register_primitive(
        READ,
        Domain::Monadic(Some(SingleDomain::is_string(None))),
        move |_, _, path| {
            let path = path.as_str().unwrap_or_default();
            debug!(path, "⎕READ");
            mounts
                .read_to_string(path)
                .map(Value::string)
                .map_err(|err| vfs_error(err.path(), err.reason()))
        },
    );
}
