//! Command-line interface for propdiff

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "propdiff")]
#[command(about = "A structural diff tool for versioned property configurations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override store location
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Default log level; `--verbose` enables debug records
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a propdiff store
    Init {
        /// Rewrite the config file even if the store exists
        #[arg(long)]
        force: bool,
    },

    /// List stored properties
    List {
        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show a property's version pointers
    Show {
        /// Property name
        property: String,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Compare two property versions
    ///
    /// With --prop, FROM and TO are version selectors (LATEST, STAGING,
    /// PRODUCTION or a version number). Without it they take the form
    /// <property>@<selector>.
    Diff {
        /// Version to compare from
        from: String,

        /// Version to compare to
        to: String,

        /// Property both selectors refer to
        #[arg(long)]
        prop: Option<String>,

        /// Pruning of unchanged branches: "top" or "recursive"
        #[arg(long)]
        prune: Option<String>,

        /// Output format: "pretty", "json"
        #[arg(long)]
        format: Option<String>,

        /// Write the JSON diff to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Parse output format string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
