//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "table-reader")]
#[command(about = "Render inline table tags in markdown documentation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print debug logging (path resolution, reader calls)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a table-reader.toml with default settings
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Render the table tags of one markdown page
    Render {
        /// Markdown page to process
        page: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every page of the docs directory into the site directory
    Build {
        /// Output directory (default: site_dir from the config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// List the available table readers
    Readers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["table-reader", "render", "docs/index.md", "-o", "out.md"])
            .unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Render { page, output } => {
                assert_eq!(page, PathBuf::from("docs/index.md"));
                assert_eq!(output, Some(PathBuf::from("out.md")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["table-reader", "build", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build { out: None }));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["table-reader"]).is_err());
    }
}
