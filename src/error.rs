//! Error types for table-reader

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for table-reader
#[derive(Debug, Error)]
pub enum TableReaderError {
    #[error("Invalid tag arguments '{raw}': {message}")]
    ArgSyntax { raw: String, message: String },

    #[error("Keyword argument '{name}' given more than once in '{raw}'")]
    DuplicateArgument { name: String, raw: String },

    #[error(
        "Cannot find table file '{path}'. The following directories were searched: {}",
        format_dirs(.searched)
    )]
    FileNotFound { path: String, searched: Vec<String> },

    #[error("Reader '{reader}' failed: {message}")]
    Render { reader: String, message: String },

    #[error("Failed to process tag {{{{ {tag}({raw_args}) }}}}: {source}")]
    TagFailed {
        tag: String,
        raw_args: String,
        #[source]
        source: Box<TableReaderError>,
    },

    #[error("Substitution error: {0}")]
    Substitution(String),

    #[error("Not a table-reader project: {0}")]
    NotProjectDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_dirs(dirs: &[String]) -> String {
    let quoted: Vec<String> = dirs.iter().map(|d| format!("'{}'", d)).collect();
    format!("[{}]", quoted.join(", "))
}

impl TableReaderError {
    /// Build a render error for the named reader
    pub fn render(reader: &str, message: impl Into<String>) -> Self {
        TableReaderError::Render {
            reader: reader.to_string(),
            message: message.into(),
        }
    }

    /// The innermost error, looking through tag context wrappers
    pub fn root_cause(&self) -> &TableReaderError {
        match self {
            TableReaderError::TagFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.root_cause() {
            TableReaderError::ArgSyntax { .. } | TableReaderError::DuplicateArgument { .. } => 2,
            TableReaderError::FileNotFound { .. } => 3,
            TableReaderError::Render { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self.root_cause() {
            TableReaderError::ArgSyntax { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Quote strings that contain spaces or punctuation: read_csv(\"my table.csv\")\n\
                    • Only literals are allowed: strings, numbers, True/False, None, [lists]\n\
                    • Keyword arguments must come after positional ones: read_csv(\"a.csv\", sep=\";\")",
                    self
                )
            }
            TableReaderError::DuplicateArgument { name, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Remove the repeated '{}=' argument from the tag",
                    self, name
                )
            }
            TableReaderError::FileNotFound { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the file name in the tag (paths are relative to the data directory)\n\
                    • Set 'data_path' in table-reader.toml to the directory holding your tables\n\
                    • Enable 'search_page_directory' to also look next to the page\n\
                    • Check 'base_path' (config_dir or docs_dir) anchors the directories you expect",
                    self
                )
            }
            TableReaderError::NotProjectDirectory(path) => {
                format!(
                    "Not a table-reader project: {}\n\n\
                    Suggestions:\n\
                    • Run 'table-reader init' to create table-reader.toml\n\
                    • Set TABLE_READER_ROOT environment variable to your project path",
                    path.display()
                )
            }
            TableReaderError::Config(msg) => {
                if msg.contains("base_path") {
                    format!(
                        "{}\n\n\
                        Valid values for base_path: config_dir, docs_dir\n\
                        Example: table-reader config base_path docs_dir",
                        self
                    )
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TableReaderError
pub type Result<T> = std::result::Result<T, TableReaderError>;
