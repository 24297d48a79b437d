pub mod commands;
pub mod errors;
pub mod render;
pub mod tracing_init;

use crate::constants;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// Output as JSON
    Json,
    /// Output as YAML
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "oastool: OpenAPI command-layout compiler and spec utilities",
    long_about = "oastool compiles an OpenAPI document and a hand-authored command layout\n\
                  into validated command trees and per-operation argument specifications.\n\n\
                  Examples:\n  \
                  oastool layout check layout.yaml\n  \
                  oastool layout validate layout.yaml openapi.yaml\n  \
                  oastool compile layout.yaml openapi.yaml --format json\n  \
                  oastool diff old.yaml new.yaml --summary\n  \
                  oastool models used-by openapi.yaml Pet\n  \
                  oastool paths ops openapi.yaml /pets --sub-paths"
)]
pub struct Cli {
    /// Output all errors as structured JSON to stderr
    #[arg(long, global = true, help = "Output errors in JSON format")]
    pub json_errors: bool,

    /// Suppress non-essential output
    #[arg(
        long,
        short = 'q',
        global = true,
        help = "Suppress informational output"
    )]
    pub quiet: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        global = true,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v for debug, -vv for trace)"
    )]
    pub verbosity: u8,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "text",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and validate command layout files
    Layout {
        #[command(subcommand)]
        command: LayoutCommands,
    },
    /// Compile every layout leaf into an argument specification
    Compile {
        /// Layout file
        layout: PathBuf,
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Layout entry to start from
        #[arg(long)]
        start: Option<String>,
        /// Compiler configuration file (TOML); defaults to `$OASTOOL_CONFIG`
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also compile bug-tagged commands
        #[arg(long)]
        include_bugged: bool,
    },
    /// Show structural differences between two specifications
    Diff {
        /// Original specification
        old: PathBuf,
        /// Updated specification
        new: PathBuf,
        /// Only print the number of differences
        #[arg(long)]
        summary: bool,
    },
    /// Query the model reference graph
    Models {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Query the operation index
    Ops {
        #[command(subcommand)]
        command: OpsCommands,
    },
    /// Look up path items and the operations under them
    Paths {
        #[command(subcommand)]
        command: PathCommands,
    },
    /// Group operations by tag
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Count models, paths, methods and tags
    Summary {
        /// `OpenAPI` specification file
        spec: PathBuf,
    },
    /// Write a reduced specification to stdout
    Prune {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Operations to remove
        #[arg(long = "remove-op", value_name = "OPERATION_ID", conflicts_with = "allow_ops")]
        remove_ops: Vec<String>,
        /// Operations to keep; all others are removed
        #[arg(long = "allow-op", value_name = "OPERATION_ID")]
        allow_ops: Vec<String>,
        /// Remove operation tags and tag definitions
        #[arg(long)]
        remove_tags: bool,
        /// Drop nullable properties from required lists
        #[arg(long)]
        nullable_not_required: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommands {
    /// Check the formatting of a layout file
    Check {
        /// Layout file
        layout: PathBuf,
        /// Layout entry to start from
        #[arg(long, default_value = constants::DEFAULT_START)]
        start: String,
    },
    /// Cross-check a layout against a specification
    Validate {
        /// Layout file
        layout: PathBuf,
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Layout entry to start from
        #[arg(long, default_value = constants::DEFAULT_START)]
        start: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModelCommands {
    /// Models a model references, directly or transitively
    Uses {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Model name
        model: String,
    },
    /// Models that reference a model, directly or transitively
    UsedBy {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Model name
        model: String,
    },
    /// Operations that use a model
    Ops {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Model name
        model: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OpsCommands {
    /// List operations in document order
    List {
        /// `OpenAPI` specification file
        spec: PathBuf,
    },
    /// Models an operation uses
    Models {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Operation identifier
        operation: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PathCommands {
    /// List path templates in document order
    List {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Only paths containing this text (case-insensitive)
        #[arg(long)]
        contains: Option<String>,
    },
    /// Print matching path items
    Show {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Path template, e.g. `/pets/{petId}`
        path: String,
        /// Also match paths beneath this one
        #[arg(long)]
        sub_paths: bool,
    },
    /// Operations declared under matching paths
    Ops {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Path template, e.g. `/pets`
        path: String,
        /// Also match paths beneath this one
        #[arg(long)]
        sub_paths: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags used by operations
    List {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Only tags containing this text (case-insensitive)
        #[arg(long)]
        contains: Option<String>,
    },
    /// Operations carrying a tag
    Show {
        /// `OpenAPI` specification file
        spec: PathBuf,
        /// Tag name
        tag: String,
    },
}
