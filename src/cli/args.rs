use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "devhub")]
#[command(version)]
#[command(
    about = "Search, sort and chart a GitHub user's repositories",
    long_about = "Reads an already fetched GitHub document (the repository array from \
                  /users/{user}/repos, or {\"user\": ..., \"repos\": [...]}) and prints the \
                  filtered, sorted repository list with a language breakdown."
)]
pub struct Cli {
    /// JSON document to read ("-" or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Only show repositories whose name or description contains this text
    #[arg(short, long, global = true)]
    pub search: Option<String>,

    /// Sort order: updated, stars, forks or name
    #[arg(long, global = true)]
    pub sort: Option<String>,

    /// Only show repositories in this language ("All" for every language)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DEVHUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub output_format: Option<OutputFormat>,

    /// List at most this many repositories
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Input given to the subcommand, falling back to the top-level one
    pub fn input_path(&self) -> Option<&Path> {
        let nested = match &self.command {
            Some(Commands::View { input }) | Some(Commands::Languages { input }) => input.as_deref(),
            _ => None,
        };
        nested.or(self.input.as_deref())
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the filtered and sorted repository list (default)
    View {
        /// JSON document to read ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },
    /// List the language filter options and the language breakdown
    Languages {
        /// JSON document to read ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}
