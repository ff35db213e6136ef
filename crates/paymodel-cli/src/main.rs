//! # paymodel CLI Entry Point
//!
//! Reads one JSON document and prints what the model layer makes of it.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use paymodel_core::{Converter, ConverterConfig};
use paymodel_model::{registered_tags, NextAction, Resolver};

/// Payment model inspector.
///
/// Converts documents to generic trees or flat string mappings, and
/// resolves customer sources by their `object` discriminator.
#[derive(Parser, Debug)]
#[command(name = "paymodel", version, about)]
struct Cli {
    /// Maximum composite nesting accepted by the converter.
    /// Overrides `PAYMODEL_MAX_DEPTH`. Input files are parsed with
    /// serde_json's 128-level limit, so values above 128 have no effect here.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the generic tree of a document.
    Generic(InputArgs),
    /// Print the flat string mapping of an object document.
    Flatten(InputArgs),
    /// Resolve a customer source and print the resolved variant.
    Resolve(InputArgs),
    /// Parse an intent `next_action` object.
    NextAction(InputArgs),
    /// List the registered discriminator tags.
    Tags,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// JSON file to read; stdin when omitted.
    path: Option<PathBuf>,
}

impl InputArgs {
    fn read_document(&self) -> anyhow::Result<Value> {
        let text = match &self.path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                buf
            }
        };
        // serde_json rejects input nested past 128 levels before the
        // converter sees it.
        serde_json::from_str(&text).context("parsing JSON document")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.max_depth {
        Some(depth) => ConverterConfig::with_max_depth(depth)?,
        None => ConverterConfig::from_env()?,
    };
    let converter = Converter::new(config);
    tracing::debug!(max_depth = config.max_depth(), "converter configured");

    match cli.command {
        Commands::Generic(args) => {
            let doc = args.read_document()?;
            print_json(&converter.to_generic(&doc)?)?;
        }
        Commands::Flatten(args) => {
            let doc = args.read_document()?;
            print_json(&converter.to_flat_string_mapping(&doc)?)?;
        }
        Commands::Resolve(args) => {
            let doc = args.read_document()?;
            let resolved = Resolver::new(converter).resolve(&doc);
            if resolved.is_none() {
                tracing::info!("document did not resolve to a known payment source");
            }
            print_json(&resolved)?;
        }
        Commands::NextAction(args) => {
            let doc = args.read_document()?;
            print_json(&NextAction::from_json_with(&converter, &doc))?;
        }
        Commands::Tags => {
            for tag in registered_tags() {
                println!("{tag}");
            }
        }
    }

    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
