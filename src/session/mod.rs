//! Session state for the interactive shell.
//!
//! A [`Session`] owns the current browsing directory and the loaded
//! [`Dataset`]. The directory lives in a [`SharedState`] handle so the
//! completion layer observes `cd` without ambient process state; the process
//! working directory is never mutated.

pub mod workspace;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{LoadError, NavigationError, Result};

pub use workspace::{Entry, MemoryWorkspace, OsWorkspace, Workspace};

/// Shared state between the session and the completion layer.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Current browsing directory
    current_dir: Arc<RwLock<PathBuf>>,
}

impl SharedState {
    /// Create a new shared state rooted at the given directory.
    ///
    /// * `root` - Initial browsing directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            current_dir: Arc::new(RwLock::new(root)),
        }
    }

    /// Get the current browsing directory.
    pub fn current_dir(&self) -> PathBuf {
        self.current_dir.read().unwrap().clone()
    }

    /// Set the current browsing directory.
    pub fn set_current_dir(&self, dir: PathBuf) {
        *self.current_dir.write().unwrap() = dir;
    }
}

/// Transient, process-lifetime state for one interactive session.
pub struct Session {
    /// Shared directory handle (also held by the completer)
    state: SharedState,

    /// Filesystem access
    workspace: Arc<dyn Workspace>,

    /// Loaded dataset, replaced wholesale on each successful load
    dataset: Option<Dataset>,
}

impl Session {
    /// Create a new session.
    ///
    /// # Arguments
    /// * `state` - Shared directory state, already pointing at the root
    /// * `workspace` - Filesystem implementation
    ///
    /// # Returns
    /// * `Self` - New session
    pub fn new(state: SharedState, workspace: Arc<dyn Workspace>) -> Self {
        Self {
            state,
            workspace,
            dataset: None,
        }
    }

    /// Get the current browsing directory.
    pub fn cwd(&self) -> PathBuf {
        self.state.current_dir()
    }

    /// Get the shared state handle.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Get the workspace handle.
    pub fn workspace(&self) -> Arc<dyn Workspace> {
        Arc::clone(&self.workspace)
    }

    /// Get the loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Resolve a user-supplied path against the current directory.
    ///
    /// Absolute paths pass through unchanged.
    pub fn resolve(&self, input: &str) -> PathBuf {
        let path = Path::new(input);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd().join(path)
        }
    }

    /// List the entries of the current directory, or of `path` if given.
    ///
    /// # Arguments
    /// * `path` - Optional directory to list instead of the current one
    ///
    /// # Returns
    /// * `Result<Vec<Entry>>` - Directory entries or a navigation error
    pub fn list(&self, path: Option<&str>) -> Result<Vec<Entry>> {
        let target = match path {
            Some(path) => self.resolve(path),
            None => self.cwd(),
        };

        if !self.workspace.is_dir(&target) {
            return Err(self.missing_dir_error(target));
        }
        self.workspace.read_dir(&target)
    }

    /// Change the current directory.
    ///
    /// On any failure the current directory is left unchanged.
    ///
    /// # Arguments
    /// * `path` - Target directory, absolute or relative
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The new canonical directory or a navigation error
    pub fn change_dir(&mut self, path: &str) -> Result<PathBuf> {
        let target = self.resolve(path);

        if !self.workspace.is_dir(&target) {
            return Err(self.missing_dir_error(target));
        }

        let canonical = self.workspace.canonicalize(&target)?;
        self.state.set_current_dir(canonical.clone());
        debug!("changed directory to {}", canonical.display());
        Ok(canonical)
    }

    /// Remove a regular file.
    ///
    /// Directories are refused; only regular files may be deleted.
    ///
    /// # Arguments
    /// * `path` - Target file, absolute or relative
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The removed path or a navigation error
    pub fn remove_file(&self, path: &str) -> Result<PathBuf> {
        let target = self.resolve(path);

        if self.workspace.is_dir(&target) {
            return Err(NavigationError::NotAFile(target).into());
        }
        if !self.workspace.is_file(&target) {
            return Err(NavigationError::PathNotFound(target).into());
        }

        self.workspace.remove_file(&target)?;
        Ok(target)
    }

    /// Load a CSV file, replacing the session dataset on success.
    ///
    /// On any failure the previously loaded dataset is left unchanged.
    ///
    /// # Arguments
    /// * `path` - CSV file, absolute or relative
    ///
    /// # Returns
    /// * `Result<usize>` - Number of data rows loaded, or a load error
    pub fn load_csv(&mut self, path: &str) -> Result<usize> {
        let target = self.resolve(path);

        if !self.workspace.is_file(&target) {
            return Err(LoadError::FileNotFound(target).into());
        }

        let reader = self.workspace.open(&target)?;
        let dataset = Dataset::from_reader(reader).map_err(|e| LoadError::Malformed {
            path: target.clone(),
            cause: e.to_string(),
        })?;

        let rows = dataset.len();
        debug!("loaded {} rows from {}", rows, target.display());
        self.dataset = Some(dataset);
        Ok(rows)
    }

    fn missing_dir_error(&self, target: PathBuf) -> crate::error::ShellError {
        if self.workspace.is_file(&target) {
            NavigationError::NotADirectory(target).into()
        } else {
            NavigationError::PathNotFound(target).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    fn test_session() -> Session {
        let ws = MemoryWorkspace::new();
        ws.add_dir("/host/data");
        ws.add_file("/host/people.csv", "name,age\nalice,30\nbob,25\n");
        ws.add_file("/host/data/empty.csv", "a,b\n");
        ws.add_file("/host/broken.csv", "a,b\n1\n");
        Session::new(SharedState::new(PathBuf::from("/host")), Arc::new(ws))
    }

    #[test]
    fn test_pwd_reports_root() {
        let session = test_session();
        assert_eq!(session.cwd(), PathBuf::from("/host"));
    }

    #[test]
    fn test_change_dir_updates_cwd() {
        let mut session = test_session();
        let new_dir = session.change_dir("data").unwrap();
        assert_eq!(new_dir, PathBuf::from("/host/data"));
        assert_eq!(session.cwd(), PathBuf::from("/host/data"));
    }

    #[test]
    fn test_change_dir_parent() {
        let mut session = test_session();
        session.change_dir("data").unwrap();
        session.change_dir("..").unwrap();
        assert_eq!(session.cwd(), PathBuf::from("/host"));
    }

    #[test]
    fn test_change_dir_failure_leaves_cwd_unchanged() {
        let mut session = test_session();
        let err = session.change_dir("missing").unwrap_err();
        assert!(matches!(
            err,
            ShellError::Navigation(NavigationError::PathNotFound(_))
        ));
        // A subsequent pwd proves no state mutation occurred
        assert_eq!(session.cwd(), PathBuf::from("/host"));
    }

    #[test]
    fn test_change_dir_into_file_is_rejected() {
        let mut session = test_session();
        let err = session.change_dir("people.csv").unwrap_err();
        assert!(matches!(
            err,
            ShellError::Navigation(NavigationError::NotADirectory(_))
        ));
        assert_eq!(session.cwd(), PathBuf::from("/host"));
    }

    #[test]
    fn test_list_current_directory() {
        let session = test_session();
        let mut names: Vec<String> = session
            .list(None)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["broken.csv", "data", "people.csv"]);
    }

    #[test]
    fn test_list_explicit_path() {
        let session = test_session();
        let entries = session.list(Some("data")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "empty.csv");
        assert!(!entries[0].is_dir);
    }

    #[test]
    fn test_delete_refuses_directory() {
        let session = test_session();
        let err = session.remove_file("data").unwrap_err();
        assert!(matches!(
            err,
            ShellError::Navigation(NavigationError::NotAFile(_))
        ));
        // The directory must not be removed
        assert!(session.list(Some("data")).is_ok());
    }

    #[test]
    fn test_delete_missing_file() {
        let session = test_session();
        let err = session.remove_file("nope.csv").unwrap_err();
        assert!(matches!(
            err,
            ShellError::Navigation(NavigationError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_delete_regular_file() {
        let session = test_session();
        session.remove_file("people.csv").unwrap();
        let names: Vec<String> = session
            .list(None)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert!(!names.contains(&"people.csv".to_string()));
    }

    #[test]
    fn test_load_csv_reports_row_count() {
        let mut session = test_session();
        let rows = session.load_csv("people.csv").unwrap();
        assert_eq!(rows, 2);
        assert!(session.dataset().is_some());
    }

    #[test]
    fn test_load_csv_missing_file_keeps_dataset() {
        let mut session = test_session();
        session.load_csv("people.csv").unwrap();
        let err = session.load_csv("missing.csv").unwrap_err();
        assert!(matches!(err, ShellError::Load(LoadError::FileNotFound(_))));
        // Previous dataset survives the failed load
        assert_eq!(session.dataset().unwrap().len(), 2);
    }

    #[test]
    fn test_load_csv_malformed_keeps_dataset() {
        let mut session = test_session();
        session.load_csv("people.csv").unwrap();
        let err = session.load_csv("broken.csv").unwrap_err();
        assert!(matches!(err, ShellError::Load(LoadError::Malformed { .. })));
        assert_eq!(session.dataset().unwrap().len(), 2);
    }

    #[test]
    fn test_load_csv_replaces_dataset() {
        let mut session = test_session();
        session.load_csv("people.csv").unwrap();
        let rows = session.load_csv("data/empty.csv").unwrap();
        assert_eq!(rows, 0);
        assert_eq!(session.dataset().unwrap().len(), 0);
    }
}
