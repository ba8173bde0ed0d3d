use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use crate::models::{FieldRegistry, Node, Value};
use crate::parsers::{PchrParser, parse_pchr_file};
use crate::utils::readable_file_size;

#[derive(Parser)]
#[command(name = "pchr-parser")]
#[command(version = "0.1.0")]
#[command(about = "Parse PCHR call history record dumps", long_about = None)]
pub struct Cli {
    /// Field registry JSON file (defaults to the built-in tables)
    #[arg(long, global = true, value_name = "PATH")]
    pub fields: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show record and leaf counts for PCHR files
    Stats {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print an outline of one record
    Show {
        file: PathBuf,
        /// Record number, starting at 1
        #[arg(long, default_value_t = 1)]
        record: usize,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Stats { files }) => {
            let parser = load_parser(cli.fields.as_deref())?;
            show_stats(&parser, files)?;
        }
        Some(Commands::Show { file, record }) => {
            let parser = load_parser(cli.fields.as_deref())?;
            show_record(&parser, file, *record)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn load_parser(fields: Option<&Path>) -> Result<PchrParser> {
    let registry = match fields {
        Some(path) => FieldRegistry::from_path(path)
            .with_context(|| format!("Failed to load field registry: {}", path.display()))?,
        None => FieldRegistry::standard(),
    };
    Ok(PchrParser::new(registry))
}

fn show_stats(parser: &PchrParser, files: &[PathBuf]) -> Result<()> {
    // Files are independent; records within one file stay sequential
    let results: Vec<_> = files.par_iter().map(|path| parse_pchr_file(path, parser)).collect();

    println!("PCHR File Statistics");
    println!("====================");

    let mut total_records = 0;
    let mut failed = 0;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(parsed) => {
                total_records += parsed.stats.records;
                println!("{}", path.display());
                println!("  Size: {}", readable_file_size(parsed.size));
                println!("  Records: {}", parsed.stats.records);
                println!(
                    "  Leaves: {} ({} dropped, {} kept as text)",
                    parsed.stats.leaves, parsed.stats.dropped_leaves, parsed.stats.fallback_leaves
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("Warning: {:#}", e);
            }
        }
    }

    println!();
    println!("Total records: {}", total_records);

    if failed > 0 {
        bail!("{} of {} files failed to parse", failed, files.len());
    }

    Ok(())
}

fn show_record(parser: &PchrParser, file: &Path, number: usize) -> Result<()> {
    let parsed = parse_pchr_file(file, parser)?;
    let count = parsed.records.len();

    let Some(record) = number.checked_sub(1).and_then(|i| parsed.records.get(i)) else {
        bail!("Record {} not found: {} has {} records", number, file.display(), count);
    };

    println!(
        "Record {} of {} (version {}, leaves: {})",
        number,
        count,
        record.version,
        record.data.leaf_count()
    );
    print!("{}", outline(&record.data));

    Ok(())
}

/// Indented outline of a node, one line per field.
///
/// Leaves are shown as `key: value (Type)`, list elements as `key[n]`.
pub fn outline(node: &Node) -> String {
    let mut out = String::new();
    write_outline(&mut out, node, 1);
    out
}

fn write_outline(out: &mut String, node: &Node, level: usize) {
    let pad = "  ".repeat(level);
    for (key, value) in node.iter() {
        match value {
            Value::Node(child) => {
                out.push_str(&format!("{}{}\n", pad, key));
                write_outline(out, child, level + 1);
            }
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    out.push_str(&format!("{}{}[{}]\n", pad, key, i + 1));
                    write_outline(out, item, level + 1);
                }
            }
            leaf => {
                out.push_str(&format!("{}{}: {} ({})\n", pad, key, leaf, leaf.type_name()));
            }
        }
    }
}
