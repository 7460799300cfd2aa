//! Filesystem access seam for the session.
//!
//! Navigation and CSV loading go through the [`Workspace`] trait instead of
//! ambient process state, so the command handlers can be exercised against an
//! in-memory filesystem in tests. [`OsWorkspace`] is the production
//! implementation over `std::fs`.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use crate::error::{NavigationError, Result, ShellError};

/// A single directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File or directory name (no path components)
    pub name: String,

    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Filesystem operations needed by the session.
pub trait Workspace: Send + Sync {
    /// Check whether the path is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check whether the path is an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// List the immediate entries of a directory
    fn read_dir(&self, path: &Path) -> Result<Vec<Entry>>;

    /// Remove a regular file
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Resolve a path to an absolute, normalized form
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Open a file for reading
    fn open(&self, path: &Path) -> Result<Box<dyn Read + Send>>;
}

/// Classify an I/O error against the navigation taxonomy.
fn classify_io(err: io::Error, path: &Path) -> ShellError {
    match err.kind() {
        io::ErrorKind::NotFound => NavigationError::PathNotFound(path.to_path_buf()).into(),
        io::ErrorKind::PermissionDenied => {
            NavigationError::PermissionDenied(path.to_path_buf()).into()
        }
        _ => ShellError::Io(err),
    }
}

/// Production workspace backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsWorkspace;

impl OsWorkspace {
    pub fn new() -> Self {
        Self
    }
}

impl Workspace for OsWorkspace {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| classify_io(e, path))? {
            let entry = entry.map_err(|e| classify_io(e, path))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|e| classify_io(e, path))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| classify_io(e, path))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let file = std::fs::File::open(path).map_err(|e| classify_io(e, path))?;
        Ok(Box::new(file))
    }
}

/// Node in the in-memory filesystem.
#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

/// In-memory workspace used as a test double.
///
/// Paths are stored in normalized absolute form; `canonicalize` resolves
/// `.` and `..` components lexically.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
}

impl MemoryWorkspace {
    /// Create an empty workspace containing only the root directory.
    pub fn new() -> Self {
        let ws = Self {
            nodes: RwLock::new(BTreeMap::new()),
        };
        ws.nodes
            .write()
            .unwrap()
            .insert(PathBuf::from("/"), Node::Dir);
        ws
    }

    /// Add a directory (and its ancestors).
    pub fn add_dir(&self, path: &str) {
        let path = normalize(Path::new(path));
        let mut nodes = self.nodes.write().unwrap();
        for ancestor in path.ancestors() {
            nodes.insert(ancestor.to_path_buf(), Node::Dir);
        }
    }

    /// Add a file with the given contents (creating ancestor directories).
    pub fn add_file(&self, path: &str, contents: &str) {
        let path = normalize(Path::new(path));
        let mut nodes = self.nodes.write().unwrap();
        for ancestor in path.ancestors().skip(1) {
            nodes.insert(ancestor.to_path_buf(), Node::Dir);
        }
        nodes.insert(path, Node::File(contents.to_string()));
    }

    /// Check whether any node exists at the path.
    pub fn contains(&self, path: &str) -> bool {
        let path = normalize(Path::new(path));
        self.nodes.read().unwrap().contains_key(&path)
    }
}

/// Lexically normalize a path, resolving `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::RootDir => normalized.push("/"),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
                if normalized.as_os_str().is_empty() {
                    normalized.push("/");
                }
            }
            Component::Normal(part) => normalized.push(part),
            Component::Prefix(_) => {}
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push("/");
    }
    normalized
}

impl Workspace for MemoryWorkspace {
    fn is_dir(&self, path: &Path) -> bool {
        let path = normalize(path);
        matches!(self.nodes.read().unwrap().get(&path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = normalize(path);
        matches!(self.nodes.read().unwrap().get(&path), Some(Node::File(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<Entry>> {
        let path = normalize(path);
        let nodes = self.nodes.read().unwrap();
        if !matches!(nodes.get(&path), Some(Node::Dir)) {
            return Err(NavigationError::PathNotFound(path).into());
        }

        let entries = nodes
            .iter()
            .filter(|(candidate, _)| candidate.parent() == Some(path.as_path()))
            .map(|(candidate, node)| Entry {
                name: candidate
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                is_dir: matches!(node, Node::Dir),
            })
            .collect();
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes.write().unwrap();
        match nodes.get(&path) {
            Some(Node::File(_)) => {
                nodes.remove(&path);
                Ok(())
            }
            Some(Node::Dir) => Err(NavigationError::NotAFile(path).into()),
            None => Err(NavigationError::PathNotFound(path).into()),
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let path = normalize(path);
        if self.nodes.read().unwrap().contains_key(&path) {
            Ok(path)
        } else {
            Err(NavigationError::PathNotFound(path).into())
        }
    }

    fn open(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let path = normalize(path);
        match self.nodes.read().unwrap().get(&path) {
            Some(Node::File(contents)) => Ok(Box::new(Cursor::new(contents.clone()))),
            Some(Node::Dir) => Err(NavigationError::NotAFile(path).into()),
            None => Err(NavigationError::PathNotFound(path).into()),
        }
    }
}
