//! Configuration for a huffzip run.
//!
//! Resolves parsed command-line arguments into concrete paths. Output paths
//! follow the same rules in both directions:
//! - compress: `<dir>/<stem>.huff` next to the input
//! - decompress: strip a `.huff` extension, otherwise append `.decompressed`

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command, FileArgs};

/// Extension given to compressed files.
pub const COMPRESSED_EXTENSION: &str = "huff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    /// File to read
    pub input: PathBuf,

    /// File to write
    pub output: PathBuf,

    /// Whether to print progress and statistics
    pub verbose: bool,

    /// Log verbosity from repeated -v flags
    pub log_level: u8,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    pub fn from_cli(cli: &Cli) -> Self {
        let (mode, args) = match &cli.command {
            Command::Compress(args) => (Mode::Compress, args),
            Command::Decompress(args) => (Mode::Decompress, args),
        };
        Self::from_args(mode, args, cli.verbose)
    }

    fn from_args(mode: Mode, args: &FileArgs, log_level: u8) -> Self {
        let output = match (&args.output, mode) {
            (Some(path), _) => path.clone(),
            (None, Mode::Compress) => compressed_path(&args.input),
            (None, Mode::Decompress) => decompressed_path(&args.input),
        };

        Self {
            mode,
            input: args.input.clone(),
            output,
            verbose: !args.quiet,
            log_level,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        let action = match self.mode {
            Mode::Compress => "Compressing",
            Mode::Decompress => "Decompressing",
        };
        println!("{action} {}...", self.input.display());
    }
}

/// Default output for compression: same directory, `.huff` extension.
pub fn compressed_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    input.with_file_name(name)
}

/// Default output for decompression: drop `.huff`, or append `.decompressed`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == COMPRESSED_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_os_string();
        name.push(".decompressed");
        PathBuf::from(name)
    }
}
