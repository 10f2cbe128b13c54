//! File-level compress and decompress operations.

use std::fs;

use anyhow::{Context, Result};
use huffzip_core::container::{compress_to_container, decompress_container, parse_container};
use tracing::info;

use crate::config::{Config, Mode};
use crate::report::{self, CompressionStats, StageTimer, StageTimings};

/// Outcome of a compression run.
#[derive(Debug, Clone)]
pub struct CompressReport {
    pub stats: CompressionStats,
    pub timings: StageTimings,
}

/// Outcome of a decompression run.
#[derive(Debug, Clone)]
pub struct DecompressReport {
    pub decompressed_size: u64,
    pub timings: StageTimings,
}

/// Run the configured operation.
pub fn run(config: &Config) -> Result<()> {
    if config.verbose {
        config.print();
    }

    match config.mode {
        Mode::Compress => {
            let report = compress_file(config)?;
            if config.verbose {
                report::print_compress_summary(&config.output, &report.stats, &report.timings);
            }
        }
        Mode::Decompress => {
            let report = decompress_file(config)?;
            if config.verbose {
                report::print_decompress_summary(
                    &config.output,
                    report.decompressed_size,
                    &report.timings,
                );
            }
        }
    }

    Ok(())
}

/// Compress `config.input` into a container at `config.output`.
pub fn compress_file(config: &Config) -> Result<CompressReport> {
    let mut timings = StageTimings::default();

    let timer = StageTimer::start();
    let data = fs::read(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    timings.read = timer.elapsed();

    let timer = StageTimer::start();
    let container = compress_to_container(&data)
        .with_context(|| format!("failed to compress {}", config.input.display()))?;
    timings.codec = timer.elapsed();

    let timer = StageTimer::start();
    fs::write(&config.output, &container)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    timings.write = timer.elapsed();

    let stats = CompressionStats::new(data.len() as u64, container.len() as u64);
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        original_size = stats.original_size,
        compressed_size = stats.compressed_size,
        elapsed_ms = timings.total().as_millis() as u64,
        "compressed file"
    );

    Ok(CompressReport { stats, timings })
}

/// Decompress the container at `config.input` into `config.output`.
pub fn decompress_file(config: &Config) -> Result<DecompressReport> {
    let mut timings = StageTimings::default();

    let timer = StageTimer::start();
    let bytes = fs::read(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let container = parse_container(&bytes)
        .with_context(|| format!("{} is not a valid huffzip file", config.input.display()))?;
    timings.read = timer.elapsed();

    let timer = StageTimer::start();
    let data = decompress_container(&container)
        .with_context(|| format!("failed to decompress {}", config.input.display()))?;
    timings.codec = timer.elapsed();

    let timer = StageTimer::start();
    fs::write(&config.output, &data)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    timings.write = timer.elapsed();

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        decompressed_size = data.len(),
        elapsed_ms = timings.total().as_millis() as u64,
        "decompressed file"
    );

    Ok(DecompressReport {
        decompressed_size: data.len() as u64,
        timings,
    })
}
