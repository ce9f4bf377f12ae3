//! Command line argument parsing for the item tree CLI.
//!
//! This module defines the CLI interface using `clap`. The `Cli` struct captures
//! the input documents and output options, `Command` the query to run.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command line interface definition for `itree`.
///
/// Every invocation builds the tree from `--schema`, ingests each `--values`
/// document in the order given, then runs one command against the result.
/// Nothing is written back: `delete` reports the state after deletion only.
///
/// ## Examples
///
/// ```bash
/// itree --schema xml_name.xml --values xml_val.xml item student
/// itree --schema xml_name.xml --values xml_val.xml --format json batch 2
/// itree --schema xml_name.xml tree
/// ```
#[derive(Parser)]
#[command(
    name = "itree",
    author,
    version,
    about = "Query batches of values stored on a named item tree",
    long_about = "The 'itree' command builds an item tree from a schema document, fills it with \
the batches of one or more value documents and runs a single query or deletion against it."
)]
pub(crate) struct Cli {
    /// Schema document declaring the item tree.
    #[arg(long, short = 's')]
    pub(crate) schema: PathBuf,

    /// Batch document to ingest; may be repeated.
    #[arg(long = "values", short = 'b')]
    pub(crate) values: Vec<PathBuf>,

    /// TOML configuration overriding tag and attribute names.
    #[arg(long, short = 'c')]
    pub(crate) config: Option<PathBuf>,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub(crate) format: Format,

    /// Log every item and value as it is processed.
    #[arg(long, short = 'v', action = clap::ArgAction::SetTrue)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the schema items with their packed ids.
    Tree,
    /// List known batch indices, highest first.
    Batches,
    /// Print the name of the item with the given hexadecimal id.
    Name { id: String },
    /// Print the value of one item in every batch.
    Item { name: String },
    /// Print the value of every item in one batch.
    Batch { index: u32 },
    /// Delete one batch and list the batches that remain.
    Delete { index: u32 },
    /// Walk through batch set, item values, one batch and a deletion.
    Demo {
        /// Item queried in the walk-through.
        #[arg(long, default_value = "student")]
        item: String,
        /// Batch queried and then deleted in the walk-through.
        #[arg(long, default_value_t = 2)]
        batch: u32,
    },
}
