//! lmt-config - Write and inspect MODFLOW Link-MT3DMS (LMT) package files.
//!
//! The LMT package tells MODFLOW how to produce the flow-transport link
//! (FTL) file consumed by MT3DMS: its name, unit, header style, format and
//! which optional package flows to include.
//!
//!   lmt-config write --package-flows sfr,uzf   # Write <model>.lmt6
//!   lmt-config show model.lmt6 -f table        # Inspect an existing deck
//!   lmt-config normalize model.lmt6 -o out.lmt # Rewrite in canonical form

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    format_package, format_written, load_file, load_from_reader, render_package,
    write_package_file, OutputFormat,
};
use cli::{Cli, Commands};
use domain::{AppConfig, AppError, ExtUnitTable, LinkageConfig, LinkageOptions, Result};
use infrastructure::{ensure_config_exists, load_config, read_name_file, Modflow};

fn main() {
    let cli = Cli::parse();

    // The config decides whether the model wants load notices, so it is
    // read before logging is set up.
    let config = load_config(cli.config.as_deref());
    let model_verbose = config.as_ref().is_ok_and(|c| c.model.verbose);

    // Setup logging based on verbosity
    setup_logging(cli.verbose, model_verbose);

    if let Err(e) = run(cli, config) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli, config: Result<AppConfig>) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_file);

    match cli.command {
        Commands::Init => return cmd_init(&config_path),
        Commands::Paths => return cmd_paths(&config_path),
        _ => {}
    }

    let config = config
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    let format = cli
        .output_format(&config.output.format)
        .map_err(|message| AppError::Config { message })?;

    match cli.command {
        Commands::Write {
            output_file_name,
            output_file_unit,
            output_file_header,
            output_file_format,
            package_flows,
            unit_number,
            extension,
            filename,
        } => {
            let mut options = LinkageOptions {
                output_file_name,
                output_file_unit,
                output_file_header,
                output_file_format,
                package_flows,
                extension,
                unit_number,
                ..LinkageOptions::default()
            };
            if let Some(name) = filename {
                options = options.with_filename(name);
            }
            cmd_write(&config, options)?;
        }
        Commands::Show { file, nam } => {
            cmd_show(&config, &file, nam.as_deref(), format)?;
        }
        Commands::Normalize { file, output, nam } => {
            cmd_normalize(&config, &file, output.as_deref(), nam.as_deref())?;
        }
        Commands::Init | Commands::Paths => {}
    }

    Ok(())
}

/// Build a package from flags, attach it and write it.
fn cmd_write(config: &AppConfig, options: LinkageOptions) -> anyhow::Result<()> {
    let mut model = Modflow::from_settings(&config.model);

    let lmt = LinkageConfig::new(&model, options)?;
    lmt.attach(&mut model)?;

    std::fs::create_dir_all(&config.model.model_ws).map_err(|e| {
        AppError::io(
            format!(
                "Failed to create model workspace {}",
                config.model.model_ws.display()
            ),
            e,
        )
    })?;
    write_package_file(&lmt)
        .with_context(|| format!("writing {}", lmt.fn_path().display()))?;

    println!("{}", format_written(&lmt));
    Ok(())
}

/// Load a package and display it.
fn cmd_show(
    config: &AppConfig,
    file: &str,
    nam: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let lmt = load_attached(config, file, nam)?;
    let output = format_package(&lmt, format).map_err(AppError::json_parse)?;

    println!("{}", output.trim_end_matches('\n'));
    Ok(())
}

/// Load a package and rewrite it in canonical form.
fn cmd_normalize(
    config: &AppConfig,
    file: &str,
    output: Option<&Path>,
    nam: Option<&Path>,
) -> anyhow::Result<()> {
    let lmt = load_attached(config, file, nam)?;
    let content = render_package(&lmt);

    match output {
        Some(path) => {
            std::fs::write(path, content.as_bytes())
                .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;
            println!(
                "{} Normalized {} to {}",
                "✓".green().bold(),
                file,
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .map_err(|e| AppError::io("Failed to write to stdout", e))?;
        }
    }

    Ok(())
}

/// Create the default configuration file.
fn cmd_init(config_path: &Path) -> anyhow::Result<()> {
    if ensure_config_exists(config_path)? {
        println!(
            "{} Created {}",
            "✓".green().bold(),
            config_path.display()
        );
    } else {
        println!("Configuration already exists at {}", config_path.display());
    }
    Ok(())
}

/// Show the configuration path in use.
fn cmd_paths(config_path: &Path) -> anyhow::Result<()> {
    let label = if config_path.exists() {
        "found".green()
    } else {
        "missing, defaults apply".yellow()
    };

    println!("{}", "📂 lmt-config Paths".bold());
    println!();
    println!("  config: {} [{}]", config_path.display(), label);
    Ok(())
}

/// Load a package from `file` ("-" for stdin) and attach it to a model
/// built from the configuration.
fn load_attached(
    config: &AppConfig,
    file: &str,
    nam: Option<&Path>,
) -> anyhow::Result<LinkageConfig> {
    let mut model = Modflow::from_settings(&config.model);

    let mut table: Option<ExtUnitTable> = nam
        .map(read_name_file)
        .transpose()
        .context("reading name file")?;

    let lmt = if file == "-" {
        load_from_reader(std::io::stdin().lock(), "stdin", &model, table.as_mut())?
    } else {
        let path = PathBuf::from(file);
        load_file(&path, &model, table.as_mut())
            .with_context(|| format!("loading {}", path.display()))?
    };

    lmt.attach(&mut model)?;
    tracing::debug!(packages = model.packages().len(), "Model assembled");

    Ok(lmt)
}

/// Log level for the `-v` count; a verbose model raises it to at least `info`.
const fn log_level(verbosity: u8, model_verbose: bool) -> &'static str {
    match verbosity {
        0 if model_verbose => "info",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8, model_verbose: bool) {
    let filter = log_level(verbosity, model_verbose);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_verbose_model() {
        assert_eq!(log_level(0, false), "warn");
        assert_eq!(log_level(0, true), "info");
        assert_eq!(log_level(2, true), "debug");
        assert_eq!(log_level(3, false), "trace");
    }
}
