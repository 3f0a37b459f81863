//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// lmt-config - Write and inspect MODFLOW Link-MT3DMS (LMT) package files.
#[derive(Parser, Debug)]
#[command(name = "lmt-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to the user config directory).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text, json, or table (overrides the config file).
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an LMT package file into the model workspace.
    Write {
        /// Name of the flow-transport link file MODFLOW produces.
        #[arg(long, default_value = "mt3d_link.ftl")]
        output_file_name: String,

        /// Unit number of the flow-transport link file.
        #[arg(long, default_value = "54")]
        output_file_unit: i64,

        /// Header style of the link file (standard or extended).
        #[arg(long, default_value = "extended")]
        output_file_header: String,

        /// Format of the link file (formatted or unformatted).
        #[arg(long, default_value = "unformatted")]
        output_file_format: String,

        /// Package flows to add to the link file (sfr, lak, uzf).
        #[arg(long, value_delimiter = ',')]
        package_flows: Vec<String>,

        /// Unit number of the LMT package file itself.
        #[arg(long)]
        unit_number: Option<i32>,

        /// Extension of the LMT package file.
        #[arg(long, default_value = "lmt6")]
        extension: String,

        /// Package file name (defaults to <model name>.<extension>).
        #[arg(long)]
        filename: Option<String>,
    },

    /// Load an LMT package file and display it.
    Show {
        /// Package file to load ("-" reads standard input).
        file: String,

        /// Name file used to resolve the package unit number.
        #[arg(long)]
        nam: Option<PathBuf>,
    },

    /// Load an LMT package file and rewrite it in canonical form.
    Normalize {
        /// Package file to load ("-" reads standard input).
        file: String,

        /// Output path (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name file used to resolve the package unit number.
        #[arg(long)]
        nam: Option<PathBuf>,
    },

    /// Create the default configuration file.
    Init,

    /// Show the configuration file path in use.
    Paths,
}

impl Cli {
    /// Parse the output format argument, falling back to `configured`.
    pub fn output_format(&self, configured: &str) -> Result<OutputFormat, String> {
        self.format.as_deref().unwrap_or(configured).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_flags() {
        let cli = Cli::parse_from([
            "lmt-config",
            "write",
            "--package-flows",
            "sfr,uzf",
            "--package-flows",
            "lak",
            "--unit-number",
            "44",
        ]);

        match cli.command {
            Commands::Write {
                package_flows,
                unit_number,
                output_file_unit,
                ..
            } => {
                assert_eq!(package_flows, vec!["sfr", "uzf", "lak"]);
                assert_eq!(unit_number, Some(44));
                assert_eq!(output_file_unit, 54);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_format_override() {
        let cli = Cli::parse_from(["lmt-config", "show", "a.lmt", "-f", "json"]);
        assert_eq!(cli.output_format("table"), Ok(OutputFormat::Json));

        let cli = Cli::parse_from(["lmt-config", "show", "a.lmt"]);
        assert_eq!(cli.output_format("table"), Ok(OutputFormat::Table));
    }
}
