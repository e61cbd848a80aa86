//! Arbor CLI binary.
//!
//! Reads Penn-style bracketed trees (one per line) and prints their
//! dependency graphs. A sentence that fails to parse or convert is reported
//! and skipped; the batch continues.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbor::convert::DependencyConverter;
use arbor::graph::{DependencyMode, RenderOptions};
use arbor::tree::TreeReader;

#[derive(Parser, Debug)]
#[command(name = "arbor", version, about = "Constituency-to-dependency conversion")]
struct Args {
    /// File of bracketed trees, one per line; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Post-processing mode: basic, collapsed, or cc-processed.
    #[arg(short, long, default_value = "basic")]
    mode: String,

    /// Emit edges as JSON records instead of plain text.
    #[arg(long)]
    json: bool,

    /// Omit token indices from plain-text node names.
    #[arg(long)]
    no_indices: bool,

    /// Document id stamped onto tokens.
    #[arg(long)]
    doc_id: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mode: DependencyMode = args
        .mode
        .parse()
        .with_context(|| format!("bad --mode '{}'", args.mode))?;
    let converter = DependencyConverter::chinese().context("building converter")?;
    let options = RenderOptions {
        show_indices: !args.no_indices,
    };

    let text = match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut failures = 0usize;
    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut reader = TreeReader::new().with_sentence_index(line_number);
        if let Some(doc_id) = &args.doc_id {
            reader = reader.with_doc_id(doc_id.clone());
        }

        let result = reader
            .read_tree(line)
            .and_then(|tree| converter.convert(&tree, mode));
        match result {
            Ok(graph) => {
                if args.json {
                    println!("{}", serde_json::to_string(&graph.to_records())?);
                } else {
                    print!("{}", graph.render(&options));
                    println!();
                }
            }
            Err(e) => {
                // One bad sentence must not abort the batch.
                failures += 1;
                eprintln!("line {}: {e}", line_number + 1);
            }
        }
    }
    if failures > 0 {
        eprintln!("{failures} sentence(s) failed");
    }
    Ok(())
}
