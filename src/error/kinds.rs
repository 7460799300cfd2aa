use std::path::PathBuf;
use std::{fmt, io};

/// Crate-wide `Result` type using [`ShellError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Top-level error type for csvsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum ShellError {
    /// Filesystem navigation errors.
    Navigation(NavigationError),

    /// CSV loading errors.
    Load(LoadError),

    /// Command parsing errors.
    Parse(ParseError),

    /// JSON export errors.
    Export(ExportError),

    /// MongoDB connection errors.
    Connection(ConnectionError),

    /// MongoDB import errors.
    Import(ImportError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// CSV parser errors.
    Csv(csv::Error),

    /// JSON serialization errors.
    Json(serde_json::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Navigation-specific errors.
#[derive(Debug)]
pub enum NavigationError {
    /// Path does not exist.
    PathNotFound(PathBuf),

    /// Path exists but is not a directory.
    NotADirectory(PathBuf),

    /// Path exists but is not a regular file.
    NotAFile(PathBuf),

    /// Operation denied by filesystem permissions.
    PermissionDenied(PathBuf),
}

/// CSV-loading-specific errors.
#[derive(Debug)]
pub enum LoadError {
    /// Path does not resolve to an existing regular file.
    FileNotFound(PathBuf),

    /// File exists but could not be parsed as CSV.
    Malformed { path: PathBuf, cause: String },
}

/// Parsing-specific errors.
#[derive(Debug)]
pub enum ParseError {
    /// Invalid command format.
    InvalidCommand(String),

    /// Command requires an argument that was not supplied.
    MissingArgument { command: String, usage: String },
}

/// Export-specific errors.
#[derive(Debug)]
pub enum ExportError {
    /// Failed to write the JSON output file.
    WriteFailed { path: PathBuf, cause: String },

    /// Dataset could not be serialized.
    Serialization(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Ping command failed.
    PingFailed(String),

    /// Not currently connected to MongoDB.
    NotConnected,
}

/// Import-specific errors.
#[derive(Debug)]
pub enum ImportError {
    /// The loaded dataset has no rows to import.
    EmptyDataset,

    /// A count, clear, or insert operation failed.
    OperationFailed(String),

    /// The external database shell could not be launched.
    ShellFailed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(PathBuf),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Navigation(e) => write!(f, "{e}"),
            ShellError::Load(e) => write!(f, "{e}"),
            ShellError::Parse(e) => write!(f, "{e}"),
            ShellError::Export(e) => write!(f, "Export error: {e}"),
            ShellError::Connection(e) => write!(f, "Connection error: {e}"),
            ShellError::Import(e) => write!(f, "Import error: {e}"),
            ShellError::Config(e) => write!(f, "Configuration error: {e}"),
            ShellError::Io(e) => write!(f, "I/O error: {e}"),
            ShellError::Csv(e) => write!(f, "CSV error: {e}"),
            ShellError::Json(e) => write!(f, "JSON error: {e}"),
            ShellError::MongoDb(e) => write!(f, "MongoDB error: {e}"),
            ShellError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::PathNotFound(path) => {
                write!(f, "Path not found: {}", path.display())
            }
            NavigationError::NotADirectory(path) => {
                write!(f, "Not a directory: {}", path.display())
            }
            NavigationError::NotAFile(path) => {
                write!(f, "Not a regular file: {}", path.display())
            }
            NavigationError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::FileNotFound(path) => {
                write!(f, "File not found: {}", path.display())
            }
            LoadError::Malformed { path, cause } => {
                write!(f, "Failed to read CSV {}: {cause}", path.display())
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidCommand(cmd) => write!(f, "Invalid command: {cmd}"),
            ParseError::MissingArgument { command, usage } => {
                write!(f, "'{command}' requires an argument (usage: {usage})")
            }
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::WriteFailed { path, cause } => {
                write!(f, "Failed to save JSON to {}: {cause}", path.display())
            }
            ExportError::Serialization(msg) => write!(f, "Serialization failed: {msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::EmptyDataset => write!(f, "Dataset has no rows to import"),
            ImportError::OperationFailed(msg) => write!(f, "Database operation failed: {msg}"),
            ImportError::ShellFailed(msg) => {
                write!(f, "Failed to launch database shell: {msg}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for ShellError {}
impl std::error::Error for NavigationError {}
impl std::error::Error for LoadError {}
impl std::error::Error for ParseError {}
impl std::error::Error for ExportError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ImportError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to ShellError ========================= */

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<csv::Error> for ShellError {
    fn from(err: csv::Error) -> Self {
        ShellError::Csv(err)
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::Json(err)
    }
}

impl From<mongodb::error::Error> for ShellError {
    fn from(err: mongodb::error::Error) -> Self {
        ShellError::MongoDb(err)
    }
}

impl From<NavigationError> for ShellError {
    fn from(err: NavigationError) -> Self {
        ShellError::Navigation(err)
    }
}

impl From<LoadError> for ShellError {
    fn from(err: LoadError) -> Self {
        ShellError::Load(err)
    }
}

impl From<ParseError> for ShellError {
    fn from(err: ParseError) -> Self {
        ShellError::Parse(err)
    }
}

impl From<ExportError> for ShellError {
    fn from(err: ExportError) -> Self {
        ShellError::Export(err)
    }
}

impl From<ConnectionError> for ShellError {
    fn from(err: ConnectionError) -> Self {
        ShellError::Connection(err)
    }
}

impl From<ImportError> for ShellError {
    fn from(err: ImportError) -> Self {
        ShellError::Import(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

impl From<String> for ShellError {
    fn from(msg: String) -> Self {
        ShellError::Generic(msg)
    }
}

impl From<&str> for ShellError {
    fn from(msg: &str) -> Self {
        ShellError::Generic(msg.to_owned())
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Generic(format!("Readline error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error_display() {
        let err = NavigationError::PathNotFound(PathBuf::from("/data/missing"));
        assert_eq!(err.to_string(), "Path not found: /data/missing");

        let err = NavigationError::NotAFile(PathBuf::from("/data/dir"));
        assert_eq!(err.to_string(), "Not a regular file: /data/dir");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::MissingArgument {
            command: "cd".to_string(),
            usage: "cd <dir>".to_string(),
        };
        assert!(err.to_string().contains("cd <dir>"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: ShellError = io_err.into();
        assert!(matches!(err, ShellError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn test_import_error_display() {
        assert_eq!(
            ImportError::EmptyDataset.to_string(),
            "Dataset has no rows to import"
        );
    }
}
