//! File system providers.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// A provider mounted into a [`MountTable`](crate::MountTable).
///
/// Paths handed to a provider are relative to its mount point and always
/// start with `/`. Opening a directory yields its entry names separated by
/// newlines, directories suffixed with `/`.
pub trait FileSystem: Send + Sync {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send>>;

    /// Short description for mount listings.
    fn describe(&self) -> String;
}

fn listing<I: IntoIterator<Item = String>>(names: I) -> Box<dyn Read + Send> {
    let joined = names.into_iter().collect::<Vec<_>>().join("\n");
    Box::new(Cursor::new(joined.into_bytes()))
}

/// Directory of the host file system.
#[derive(Clone, Debug)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for `path`. `..` components are refused so a mount never
    /// reaches outside its root.
    fn host_path(&self, path: &str) -> io::Result<PathBuf> {
        let mut host = self.root.clone();
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "path leaves the mounted directory",
                    ))
                }
                part => host.push(part),
            }
        }
        Ok(host)
    }
}

impl FileSystem for DirFs {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send>> {
        let host = self.host_path(path)?;
        if !std::fs::metadata(&host)?.is_dir() {
            return Ok(Box::new(std::fs::File::open(&host)?));
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&host)? {
            let entry = entry?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                name.push('/');
            }
            names.push(name);
        }
        names.sort_unstable();
        Ok(listing(names))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory file tree. Directories exist implicitly through the files
/// below them.
#[derive(Clone, Debug, Default)]
pub struct MemFs {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file. `path` is normalized to a single leading
    /// `/`.
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(normalize(path), contents.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn normalize(path: &str) -> String {
    let mut out = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        out.push('/');
        out.push_str(part);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

impl FileSystem for MemFs {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send>> {
        let path = normalize(path);
        if let Some(contents) = self.files.get(&path) {
            return Ok(Box::new(Cursor::new(contents.clone())));
        }
        let prefix = if path == "/" { path } else { path + "/" };
        let entries: BTreeSet<String> = self
            .files
            .keys()
            .filter_map(|file| file.strip_prefix(&prefix))
            .map(|rest| match rest.split_once('/') {
                Some((dir, _)) => format!("{dir}/"),
                None => rest.to_string(),
            })
            .collect();
        if entries.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "file does not exist",
            ));
        }
        Ok(listing(entries))
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}
