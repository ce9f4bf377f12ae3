#![warn(clippy::pedantic)]

//! # Item Tree CLI
//!
//! Command line interface over the `itemtree` crate.
//!
//! 1. Build the item tree from `--schema`.
//! 2. Ingest every `--values` document in order.
//! 3. Run the requested command and print its result to stdout.
//!
//! Logs go to stderr through `tracing`; set `RUST_LOG` or pass `--verbose`
//! to see individual items and values.
//!
//! ## Exit codes
//! * 0 – success.
//! * 1 – usage, I/O, XML or configuration failure.
//! * 2 – argument parsing failure (reported by clap), or a document without
//!   a root element (`ErrorKind::NullPointer`). The two share the code; the
//!   stderr message tells them apart.
//! * otherwise – the store's error code, see `ErrorKind::code`.
//!
//! ## Example
//! ```bash
//! itree --schema xml_name.xml --values xml_val.xml demo
//! ```

mod parser;

use std::process;

use anyhow::Result;
use clap::Parser;
use itemtree::{
    ItemId, ItemTree, TreeError, Value, ValueType, Vocabulary, add_batches_from_file,
    build_tree_from_file, load_config,
};
use parser::{Cli, Command, Format};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("Error: {err:#}");
        let code = err
            .downcast_ref::<TreeError>()
            .map_or(1, |tree_err| tree_err.kind().code());
        process::exit(code);
    }
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "itree=debug,itemtree=debug,itemtree_store=debug"
    } else {
        "itree=info,itemtree=info,itemtree_store=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Cli) -> Result<()> {
    let vocabulary = match &args.config {
        Some(path) => load_config(path)?.vocabulary,
        None => Vocabulary::default(),
    };
    let mut tree = build_tree_from_file(&args.schema, vocabulary)?;
    for path in &args.values {
        add_batches_from_file(&mut tree, path)?;
    }

    let out = Printer {
        format: args.format,
    };
    match &args.command {
        Command::Tree => out.tree(&tree),
        Command::Batches => out.batches(&tree.batches()),
        Command::Name { id } => {
            let id: ItemId = id.parse()?;
            let name = tree
                .item_name(id)
                .ok_or_else(|| TreeError::UnregisteredItem {
                    name: id.to_string(),
                })?;
            out.name(id, name)
        }
        Command::Item { name } => out.item(&tree, name),
        Command::Batch { index } => out.batch(&tree, *index),
        Command::Delete { index } => {
            tree.delete_batch(*index)?;
            info!(batch = *index, remaining = tree.batches().len(), "delete committed");
            out.batches(&tree.batches())
        }
        Command::Demo { item, batch } => demo(&mut tree, item, *batch),
    }
}

/// The classic walk-through: known batches, one item across batches, one
/// batch across items, then deletion of that batch.
fn demo(tree: &mut ItemTree, item: &str, batch: u32) -> Result<()> {
    let batches = tree.batches();
    println!("1. batch set info");
    println!("batch num: {}", batches.len());
    for index in &batches {
        println!("batch index: {index}");
    }

    println!();
    println!("2. item {item} has value");
    for (index, value) in tree.values_for_item(item)? {
        println!("{index}: {}", describe(value));
    }

    println!();
    println!("3. batch {batch} content");
    for entry in tree.values_for_batch(batch)? {
        if !entry.name.is_empty() {
            println!("{}: {}", entry.name, describe(entry.value));
        }
    }

    tree.delete_batch(batch)?;
    info!(batch, remaining = tree.batches().len(), "delete committed");
    println!();
    println!("4. batch num: {}", tree.batches().len());
    Ok(())
}

fn describe(value: &Value) -> String {
    let type_name = value.value_type().map_or("none", ValueType::name);
    format!("{value}({type_name})")
}

struct Printer {
    format: Format,
}

#[derive(Serialize)]
struct TreeRow<'a> {
    id: ItemId,
    name: &'a str,
    depth: u32,
}

impl Printer {
    fn json<T: Serialize>(data: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(data)?);
        Ok(())
    }

    fn tree(&self, tree: &ItemTree) -> Result<()> {
        let rows: Vec<TreeRow> = tree
            .iter()
            .filter_map(|item| {
                item.name().map(|name| TreeRow {
                    id: item.id(),
                    name,
                    depth: item.id().depth(),
                })
            })
            .collect();
        if self.format == Format::Json {
            return Self::json(&rows);
        }
        for row in rows {
            let indent = "  ".repeat(row.depth.saturating_sub(1) as usize);
            println!("{indent}{} ({})", row.name, row.id);
        }
        Ok(())
    }

    fn batches(&self, batches: &[u32]) -> Result<()> {
        if self.format == Format::Json {
            return Self::json(&batches);
        }
        for index in batches {
            println!("{index}");
        }
        Ok(())
    }

    fn name(&self, id: ItemId, name: &str) -> Result<()> {
        if self.format == Format::Json {
            return Self::json(&TreeRow {
                id,
                name,
                depth: id.depth(),
            });
        }
        println!("{name}");
        Ok(())
    }

    fn item(&self, tree: &ItemTree, name: &str) -> Result<()> {
        let values = tree.values_for_item(name)?;
        if self.format == Format::Json {
            return Self::json(&values);
        }
        for (index, value) in values {
            println!("{index}: {}", describe(value));
        }
        Ok(())
    }

    fn batch(&self, tree: &ItemTree, index: u32) -> Result<()> {
        let entries = tree.values_for_batch(index)?;
        if self.format == Format::Json {
            return Self::json(&entries);
        }
        for entry in entries.iter().filter(|entry| !entry.name.is_empty()) {
            println!("{}: {}", entry.name, describe(entry.value));
        }
        Ok(())
    }
}
