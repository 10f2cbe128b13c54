//! Statistics and human-readable reporting for compress/decompress runs.
//!
//! Sizes use binary steps (1024) with two decimals; durations pick the
//! largest unit that keeps the value readable.

use std::time::{Duration, Instant};

/// Size comparison between an input and its compressed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressionStats {
    pub fn new(original_size: u64, compressed_size: u64) -> Self {
        Self {
            original_size,
            compressed_size,
        }
    }

    /// original / compressed, e.g. 2.0 for a file halved in size.
    ///
    /// Returns 0.0 if there was nothing to compress.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 || self.compressed_size == 0 {
            0.0
        } else {
            self.original_size as f64 / self.compressed_size as f64
        }
    }

    /// Fraction of the original size saved (negative if the output grew).
    pub fn space_saving(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            1.0 - self.compressed_size as f64 / self.original_size as f64
        }
    }

    pub fn compression_percentage(&self) -> f64 {
        self.space_saving() * 100.0
    }
}

/// Measures one stage of a run.
#[derive(Debug, Clone, Copy)]
pub struct StageTimer {
    start: Instant,
}

impl StageTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Time each stage of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub read: Duration,
    pub codec: Duration,
    pub write: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.read + self.codec + self.write
    }
}

/// Format a byte count, e.g. `1536` -> `"1.50 KB"`.
pub fn format_bytes(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = size as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

/// Format a duration, e.g. `1.5ms` -> `"1.50 ms"`, `75s` -> `"1m 15.00s"`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1e-6 {
        format!("{:.2} ns", secs * 1e9)
    } else if secs < 1e-3 {
        format!("{:.2} µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.2} ms", secs * 1e3)
    } else if secs < 60.0 {
        format!("{secs:.2} s")
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{}m {:.2}s", minutes as u64, secs - minutes * 60.0)
    }
}

/// Print a compression summary to stdout.
pub fn print_compress_summary(
    output: &std::path::Path,
    stats: &CompressionStats,
    timings: &StageTimings,
) {
    println!("  Reading time: {}", format_duration(timings.read));
    println!("  Compression time: {}", format_duration(timings.codec));
    println!("  Writing time: {}", format_duration(timings.write));
    println!();
    println!("Compression completed successfully!");
    println!("  Output file: {}", output.display());
    println!("  Original size: {}", format_bytes(stats.original_size));
    println!("  Compressed size: {}", format_bytes(stats.compressed_size));
    println!("  Compression ratio: {:.2}:1", stats.compression_ratio());
    println!("  Space saved: {:.2}%", stats.compression_percentage());
}

/// Print a decompression summary to stdout.
pub fn print_decompress_summary(output: &std::path::Path, size: u64, timings: &StageTimings) {
    println!("  Reading time: {}", format_duration(timings.read));
    println!("  Decompression time: {}", format_duration(timings.codec));
    println!("  Writing time: {}", format_duration(timings.write));
    println!();
    println!("Decompression completed successfully!");
    println!("  Output file: {}", output.display());
    println!("  Decompressed size: {}", format_bytes(size));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_ratio() {
        let stats = CompressionStats::new(1000, 250);
        assert_eq!(stats.compression_ratio(), 4.0);
        assert_eq!(stats.space_saving(), 0.75);
        assert_eq!(stats.compression_percentage(), 75.0);
    }

    #[test]
    fn test_empty_original() {
        let stats = CompressionStats::new(0, 31);
        assert_eq!(stats.compression_ratio(), 0.0);
        assert_eq!(stats.space_saving(), 0.0);
    }

    #[test]
    fn test_output_grew() {
        let stats = CompressionStats::new(100, 125);
        assert!(stats.space_saving() < 0.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024u64.pow(5)), "3.00 PB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500.00 ns");
        assert_eq!(format_duration(Duration::from_micros(250)), "250.00 µs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50 ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50 s");
        assert_eq!(format_duration(Duration::from_secs(75)), "1m 15.00s");
    }

    #[test]
    fn test_stage_timings_total() {
        let timings = StageTimings {
            read: Duration::from_millis(1),
            codec: Duration::from_millis(2),
            write: Duration::from_millis(3),
        };
        assert_eq!(timings.total(), Duration::from_millis(6));
        assert!(StageTimer::start().elapsed() < Duration::from_secs(1));
    }
}
