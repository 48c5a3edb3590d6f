mod format;

use clap::{Parser, Subcommand};
pub use format::{ColorMode, OutputFormat};
use std::path::PathBuf;

/// Compile device inventory filters to fleet index query strings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file with firmware types, favorite devices and defaults
    #[arg(long, global = true, env = "FLEET_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Favorite device ids (comma separated), overriding the config
    #[arg(long, global = true, value_delimiter = ',')]
    pub favorites: Option<Vec<String>>,

    /// Known firmware types (comma separated), overriding the config
    #[arg(long, global = true, value_delimiter = ',')]
    pub firmware_types: Option<Vec<String>>,

    /// When to color output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a UI filter query (JSON) to the index query string
    Compile {
        /// Query JSON, or a path to a file containing it
        input: String,

        /// Print the query string, or the transport filter set as JSON
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show how each token of a UI filter query is translated
    Explain {
        /// Query JSON, or a path to a file containing it
        input: String,
    },
    /// Check a UI filter query the way the filter builder forms do
    Validate {
        /// Query JSON, or a path to a file containing it
        input: String,
    },
    /// Rebuild the UI filter query from a transport filter set or a preset
    Restore {
        /// Filter set JSON, or a path to a file containing it
        input: String,

        /// Treat the input as a saved filter preset
        #[arg(long)]
        preset: bool,
    },
    /// Encode a UI filter query as a shareable link parameter
    Link {
        /// Query JSON, or with --decode a URL query string
        input: String,

        /// Decode a `query=` parameter back into query JSON
        #[arg(short, long)]
        decode: bool,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
