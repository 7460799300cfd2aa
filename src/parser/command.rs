//! Shell command parser
//!
//! This module handles parsing of the shell's top-level commands:
//! - pwd, ls [path], cd <dir>, delete <file>
//! - exit, quit
//! - any other non-empty input, treated as a CSV file path
//!
//! Commands are matched case-insensitively on the first whitespace-delimited
//! token; arguments keep their original spelling.

use crate::error::{ParseError, Result};

/// A parsed top-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current directory
    Pwd,

    /// List directory entries, optionally of an explicit path
    Ls(Option<String>),

    /// Change the current directory
    Cd(String),

    /// Delete a regular file
    Delete(String),

    /// Load a CSV file into the session dataset
    Load(String),

    /// Terminate the session
    Exit,
}

/// A parsed export sub-prompt choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportChoice {
    /// `yes` - serialize the dataset to a JSON file
    Save,

    /// `no` - print the dataset as JSON
    Print,

    /// `import` - bulk-insert the dataset into MongoDB
    Import,
}

/// Parser for top-level shell commands.
pub struct CommandParser;

impl CommandParser {
    /// Parse one line of user input.
    ///
    /// # Arguments
    /// * `input` - Raw input line
    ///
    /// # Returns
    /// * `Result<Command>` - Parsed command, or a usage error
    pub fn parse(input: &str) -> Result<Command> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::InvalidCommand("empty input".to_string()).into());
        }

        let mut tokens = trimmed.splitn(2, char::is_whitespace);
        let head = tokens.next().unwrap_or_default();
        let argument = tokens
            .next()
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(String::from);

        let command = match head.to_ascii_lowercase().as_str() {
            "pwd" => Command::Pwd,
            "ls" => Command::Ls(argument),
            "cd" => match argument {
                Some(dir) => Command::Cd(dir),
                None => return Err(Self::missing_argument("cd", "cd <dir>")),
            },
            "delete" => match argument {
                Some(file) => Command::Delete(file),
                None => return Err(Self::missing_argument("delete", "delete <file>")),
            },
            "exit" | "quit" => Command::Exit,
            _ => Command::Load(trimmed.to_string()),
        };

        Ok(command)
    }

    fn missing_argument(command: &str, usage: &str) -> crate::error::ShellError {
        ParseError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        }
        .into()
    }
}

impl ExportChoice {
    /// Parse an export sub-prompt answer, case-insensitively.
    ///
    /// # Arguments
    /// * `input` - Raw answer
    ///
    /// # Returns
    /// * `Option<Self>` - The choice, or None for anything unrecognized
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(ExportChoice::Save),
            "no" => Some(ExportChoice::Print),
            "import" => Some(ExportChoice::Import),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(CommandParser::parse("pwd").unwrap(), Command::Pwd);
        assert_eq!(CommandParser::parse("ls").unwrap(), Command::Ls(None));
        assert_eq!(CommandParser::parse("exit").unwrap(), Command::Exit);
        assert_eq!(CommandParser::parse("quit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(CommandParser::parse("PWD").unwrap(), Command::Pwd);
        assert_eq!(CommandParser::parse("Exit").unwrap(), Command::Exit);
        assert_eq!(
            CommandParser::parse("CD data").unwrap(),
            Command::Cd("data".to_string())
        );
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            CommandParser::parse("cd /mnt/files").unwrap(),
            Command::Cd("/mnt/files".to_string())
        );
        assert_eq!(
            CommandParser::parse("delete old.csv").unwrap(),
            Command::Delete("old.csv".to_string())
        );
        assert_eq!(
            CommandParser::parse("ls data").unwrap(),
            Command::Ls(Some("data".to_string()))
        );
    }

    #[test]
    fn test_argument_keeps_case() {
        assert_eq!(
            CommandParser::parse("cd Data/Reports").unwrap(),
            Command::Cd("Data/Reports".to_string())
        );
    }

    #[test]
    fn test_unknown_input_is_a_csv_path() {
        assert_eq!(
            CommandParser::parse("exports/q3 report.csv").unwrap(),
            Command::Load("exports/q3 report.csv".to_string())
        );
        // A command-like word that is not in the set still falls through
        assert_eq!(
            CommandParser::parse("list").unwrap(),
            Command::Load("list".to_string())
        );
    }

    #[test]
    fn test_bare_cd_and_delete_are_usage_errors() {
        for input in ["cd", "delete", "cd  ", "delete   "] {
            let err = CommandParser::parse(input).unwrap_err();
            assert!(
                matches!(err, ShellError::Parse(ParseError::MissingArgument { .. })),
                "expected usage error for {input:?}"
            );
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(CommandParser::parse("").is_err());
        assert!(CommandParser::parse("   ").is_err());
    }

    #[test]
    fn test_export_choice_parsing() {
        assert_eq!(ExportChoice::parse("yes"), Some(ExportChoice::Save));
        assert_eq!(ExportChoice::parse("NO"), Some(ExportChoice::Print));
        assert_eq!(ExportChoice::parse(" Import "), Some(ExportChoice::Import));
        assert_eq!(ExportChoice::parse("maybe"), None);
        assert_eq!(ExportChoice::parse(""), None);
    }
}
