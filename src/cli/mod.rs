//! Command-line interface for csvsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Application initialization and startup
//! - Subcommands (version, completion, config)
//!
//! The interactive surface itself has no flags; arguments only override the
//! startup root, the database endpoint, and display behavior.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// csvsh - interactive CSV to JSON / MongoDB import shell
#[derive(Parser, Debug)]
#[command(
    name = "csvsh",
    version,
    about = "Interactive CSV to JSON / MongoDB import shell",
    long_about = "An interactive shell for browsing a mounted filesystem, loading CSV files,
and exporting them as JSON or importing them into a MongoDB collection."
)]
pub struct CliArgs {
    /// Directory to start browsing in (overrides MOUNT_PATH)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// MongoDB server to connect to (overrides MONGODB_HOST)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// MongoDB port to connect to (overrides MONGODB_PORT)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not open the database shell after an import
    #[arg(long = "no-shell")]
    pub no_shell: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for csvsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {e}");
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        // Apply CLI arguments to override config values
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Apply CLI argument overrides to the configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(root) = &args.root {
            config.workspace.root = root.clone();
        }
        if let Some(host) = &args.host {
            config.connection.host = host.clone();
        }
        if let Some(port) = args.port {
            config.connection.port = port;
        }
        if args.no_color {
            config.display.color_output = false;
        }
        if args.no_shell {
            config.connection.open_shell = false;
        }
    }

    /// Handle subcommands (version, completion, config)
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled and the program
    ///   should exit
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                println!("csvsh {}", env!("CARGO_PKG_VERSION"));
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                let mut cmd = CliArgs::command();
                clap_complete::generate(*shell, &mut cmd, "csvsh", &mut std::io::stdout());
                Ok(true)
            }
            Some(Commands::Config { show }) => {
                if *show {
                    println!("{}", self.config.to_toml()?);
                } else {
                    println!("Config file: {}", Config::default_path().display());
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Print the startup banner unless in quiet mode
    pub fn print_banner(&self) {
        if self.args.quiet {
            return;
        }
        println!("csvsh v{}", env!("CARGO_PKG_VERSION"));
        println!("Browsing {}", self.config.workspace.root.display());
        println!(
            "Enter a CSV file path to convert, or: pwd, ls [dir], cd <dir>, delete <file>, exit"
        );
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the parsed arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::try_parse_from(["csvsh"]).unwrap();
        assert!(args.root.is_none());
        assert!(args.host.is_none());
        assert!(!args.no_color);
        assert!(!args.no_shell);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "csvsh",
            "--root",
            "/mnt/data",
            "--host",
            "localhost",
            "--port",
            "27018",
            "--no-color",
            "--no-shell",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/mnt/data")));
        assert_eq!(args.host.as_deref(), Some("localhost"));
        assert_eq!(args.port, Some(27018));
        assert!(args.no_color);
        assert!(args.no_shell);
        assert!(args.quiet);
    }

    #[test]
    fn test_args_override_config() {
        let args = CliArgs::try_parse_from([
            "csvsh",
            "--root",
            "/mnt/data",
            "--host",
            "localhost",
            "--no-shell",
        ])
        .unwrap();

        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert_eq!(config.workspace.root, PathBuf::from("/mnt/data"));
        assert_eq!(config.connection.host, "localhost");
        // Unset args leave config values alone
        assert_eq!(config.connection.port, 27017);
        assert!(!config.connection.open_shell);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(CliArgs::try_parse_from(["csvsh", "--port", "notaport"]).is_err());
    }

    #[test]
    fn test_version_subcommand_parses() {
        let args = CliArgs::try_parse_from(["csvsh", "version"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Version)));
    }
}
