use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// Formwright - design form templates and fill them in with validation
#[derive(Parser, Debug, Clone)]
#[command(name = "formwright", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FORMWRIGHT_CONFIG", default_value = "formwright.toml", global = true)]
    pub config: PathBuf,

    /// JSON file holding saved templates (implies the file backend)
    #[arg(long, env = "FORMWRIGHT_STORAGE_PATH", global = true)]
    pub storage_path: Option<String>,

    /// Keep templates in memory only
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "FORMWRIGHT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Seed field values from their defaults when filling a form
    #[arg(long, global = true)]
    pub prefill_defaults: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List saved templates
    List,

    /// Show a template's fields and the controls they render as
    Show {
        id: Uuid,
    },

    /// Build a template from a YAML or JSON list of fields
    Create {
        /// Form name
        #[arg(short, long)]
        title: String,

        /// Field list file (.yaml, .yml or .json)
        #[arg(short, long)]
        fields: PathBuf,
    },

    /// Delete a template
    Delete {
        id: Uuid,
    },

    /// Fill in a template and submit it
    Fill {
        id: Uuid,

        /// Field value as name=value (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Toggle a checkbox group option as name=option (repeatable)
        #[arg(long = "toggle", value_parser = parse_assignment)]
        toggle: Vec<(String, String)>,
    },
}

/// Parse `name=value`
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}
