//! Retouch CLI - Deterministic Image Filters
//!
//! A headless shell over the Retouch library: open an image, apply a filter,
//! export the result.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use retouch::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "retouch", version, about = "Apply a filter to an image")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all available filters
    List,
    /// Show detailed info about a filter
    Info {
        /// Filter ID
        filter: String,
        /// Print the description as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a filter to an image and save the result
    Apply {
        /// Input image
        input: PathBuf,
        /// Output image
        output: PathBuf,
        /// Filter to apply, e.g. `grayscale`, `brightness=40`, `contrast=1.5`.
        /// When repeated, each is computed from the original and the last one wins.
        #[arg(short, long = "filter")]
        filters: Vec<FilterRequest>,
        /// Output format (defaults to the output extension, then the config)
        #[arg(long)]
        format: Option<ExportFormat>,
        /// Session options file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Command::List => list_filters(),
        Command::Info { filter, json } => filter_info(&filter, json),
        Command::Apply {
            input,
            output,
            filters,
            format,
            config,
        } => apply(input, output, filters, format, config),
    }
}

fn list_filters() -> Result<()> {
    let registry = FilterRegistry::with_builtins();

    println!("Available filters ({} total):", registry.len());
    println!();

    for (category, filters) in registry.grouped_by_category() {
        println!("  {:?}", category);
        for descriptor in filters {
            println!("      {} - {}", descriptor.id, descriptor.description);
        }
        println!();
    }
    Ok(())
}

fn filter_info(filter_id: &str, json: bool) -> Result<()> {
    let registry = FilterRegistry::with_builtins();
    let Some(descriptor) = registry.get(filter_id) else {
        bail!("Filter not found: {} (use 'list' to see available filters)", filter_id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(descriptor)?);
        return Ok(());
    }

    println!("Filter: {}", descriptor.name);
    println!("ID: {}", descriptor.id);
    println!("Category: {:?}", descriptor.category);
    println!();
    println!("Description:");
    println!("  {}", descriptor.description);

    if let Some(parameter) = &descriptor.parameter {
        println!();
        println!("Parameter:");
        println!(
            "  {} in [{}, {}]{} (neutral: {})",
            parameter.name,
            parameter.min,
            parameter.max,
            if parameter.integer { ", whole numbers" } else { "" },
            parameter.neutral
        );
        println!("  usage: --filter {}=<value>", descriptor.id);
    }
    Ok(())
}

fn apply(
    input: PathBuf,
    output: PathBuf,
    filters: Vec<FilterRequest>,
    format: Option<ExportFormat>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut options = match &config {
        Some(path) => SessionOptions::from_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SessionOptions::default(),
    };

    if let Some(format) = format.or_else(|| ExportFormat::from_path(&output).ok()) {
        options = options.with_export_format(format);
    }

    let codec = ImageCrateCodec;
    let mut session = FilterSession::with_options(options);
    session
        .open(&codec, &input)
        .with_context(|| format!("opening {}", input.display()))?;

    if filters.len() > 1 {
        log::warn!(
            "{} filters given; each is computed from the original so only '{}' shows in the output",
            filters.len(),
            filters[filters.len() - 1]
        );
    }

    for request in filters {
        session
            .apply_filter(request)
            .with_context(|| format!("applying {}", request))?;
    }

    session
        .export(&codec, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    match session.active_filter() {
        Some(request) => println!("Saved {} ({}) to {}", input.display(), request, output.display()),
        None => println!("Saved {} unchanged to {}", input.display(), output.display()),
    }
    Ok(())
}
