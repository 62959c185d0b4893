//! Command-line interface definitions.
//!
//! One binary, one subcommand per pipeline stage. clap reports usage errors
//! with exit code 2; everything else that fails exits 1.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "maiir",
    about = "Boolean-retrieval inverted index over Russian/Latin text corpora",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize a corpus directory into per-document token files
    Tokenize {
        /// Directory with input .txt documents
        input_dir: PathBuf,

        /// Output directory for .tok files
        out_dir: PathBuf,

        /// Per-document stats TSV to write
        meta_out: PathBuf,

        /// Run the Russian suffix stemmer on every token
        #[arg(long)]
        stem: bool,
    },

    /// Build a binary index from token directories and metadata tables
    Index {
        /// A token directory and its metadata TSV; repeatable
        #[arg(
            long = "add",
            num_args = 2,
            value_names = ["TOK_DIR", "META_TSV"],
            action = ArgAction::Append,
            required = true
        )]
        add: Vec<PathBuf>,

        /// Output index file
        out: PathBuf,
    },

    /// Evaluate boolean queries against an index
    Search {
        /// Path to the index file
        index: PathBuf,

        /// Skip this many results per query
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Print at most this many results per query
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Read queries from a file instead of stdin
        #[arg(long = "in", value_name = "QUERIES_TXT")]
        input: Option<PathBuf>,
    },

    /// Aggregate term frequencies from a token tree
    Freq {
        /// Root directory of .tok files
        tokens_dir: PathBuf,

        /// Zipf table to write (rank, frequency)
        out_zipf: PathBuf,

        /// Term table to write (term, count)
        out_terms: PathBuf,
    },

    /// Print the header and section layout of an index file
    Inspect {
        /// Path to the index file
        index: PathBuf,
    },
}
