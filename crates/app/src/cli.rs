//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "huffzip",
    version,
    about = "Compress and decompress files using Huffman coding",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file
    Compress(FileArgs),
    /// Decompress a file
    Decompress(FileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Input file path
    pub input: PathBuf,

    /// Output file path (default: derived from the input path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress and statistics output
    #[arg(short, long)]
    pub quiet: bool,
}
