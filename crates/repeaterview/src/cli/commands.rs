//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::repeater::LinkType;

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// HTML page whose containers should be filled
    pub input: PathBuf,

    /// Write the rendered page here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Page to render (index or repeaters); detected from the input name if omitted
    #[arg(short, long)]
    pub page: Option<String>,

    /// Repeater JSON document (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

/// Fragments command arguments.
#[derive(Debug, Args)]
pub struct FragmentsCommand {
    /// Page to render (index or repeaters); both when omitted
    #[arg(short, long)]
    pub page: Option<String>,

    /// Repeater JSON document (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Repeater JSON document (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Only show one link type
    #[arg(short, long, value_enum)]
    pub link_type: Option<LinkTypeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Link type argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkTypeArg {
    /// Full-time linked repeaters
    Fulltime,
    /// Part-time linked repeaters
    Parttime,
    /// SKYWARN repeaters
    Skywarn,
}

impl From<LinkTypeArg> for LinkType {
    fn from(arg: LinkTypeArg) -> Self {
        match arg {
            LinkTypeArg::Fulltime => Self::Fulltime,
            LinkTypeArg::Parttime => Self::Parttime,
            LinkTypeArg::Skywarn => Self::Skywarn,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_arg_conversion() {
        assert_eq!(LinkType::from(LinkTypeArg::Fulltime), LinkType::Fulltime);
        assert_eq!(LinkType::from(LinkTypeArg::Parttime), LinkType::Parttime);
        assert_eq!(LinkType::from(LinkTypeArg::Skywarn), LinkType::Skywarn);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_render_command_debug() {
        let cmd = RenderCommand {
            input: PathBuf::from("site/repeaters.html"),
            output: None,
            page: None,
            data: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("repeaters.html"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
