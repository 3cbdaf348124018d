//! Benchmark runner: the pattern registry, calibration driver and report
//! sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};

use chrono::Local;
use log::debug;

use crate::error::SetupError;
use crate::surface::{ScreenGeometry, Surface};

pub mod constants;
pub use constants::*;

pub mod patterns;

pub mod calibrate;
pub use calibrate::{run_calibrated, scale_loops};

/// One timed traversal: elapsed nanoseconds and pixels touched.
///
/// Throughput is derived at report time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub elapsed_ns: i64,
    pub pixels: u64,
}

impl Measurement {
    /// Pixels per second; 0 when no time was observed.
    pub fn pixels_per_sec(&self) -> u64 {
        if self.elapsed_ns <= 0 {
            return 0;
        }
        (self.pixels as u128 * 1_000_000_000 / self.elapsed_ns as u128) as u64
    }
}

/// A benchmark routine: full-surface traversal repeated `loops` times.
pub type PatternFn = fn(u32, &ScreenGeometry, &mut Surface) -> Measurement;

/// A named entry of the pattern catalog.
#[derive(Clone, Copy)]
pub struct Pattern {
    pub name: &'static str,
    pub run: PatternFn,
}

/// The pattern catalog, in report order.
///
/// The order only affects report layout; no pattern depends on another's
/// result. New patterns are added by appending here.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "sequential_horiz_singlepixel_read",
        run: patterns::sequential_horiz_read,
    },
    Pattern {
        name: "sequential_horiz_singlepixel_write",
        run: patterns::sequential_horiz_write,
    },
    Pattern {
        name: "sequential_vert_singlepixel_read",
        run: patterns::sequential_vert_read,
    },
    Pattern {
        name: "sequential_vert_singlepixel_write",
        run: patterns::sequential_vert_write,
    },
    Pattern {
        name: "sequential_line_read",
        run: patterns::sequential_line_read,
    },
    Pattern {
        name: "sequential_line_write",
        run: patterns::sequential_line_write,
    },
    Pattern {
        name: "nonsequential_singlepixel_write",
        run: patterns::nonsequential_write,
    },
    Pattern {
        name: "nonsequential_singlepixel_read",
        run: patterns::nonsequential_read,
    },
];

/// The append-only report log.
pub struct ReportLog {
    file: BufWriter<File>,
}

impl ReportLog {
    /// Open `path` in append mode, creating it if needed.
    pub fn open(path: &str) -> Result<Self, SetupError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| SetupError::LogOpen {
                path: path.to_string(),
                source,
            })?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    /// Log-only marker opening a benchmark run.
    pub fn launch_marker(&mut self) -> io::Result<()> {
        writeln!(
            self.file,
            "Launch performance test {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// Log-only marker closing a benchmark run.
    pub fn finish_marker(&mut self) -> io::Result<()> {
        writeln!(self.file, "Finish performance test")
    }

    pub fn line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// One report line: pixel count, elapsed nanoseconds, throughput, name, in
/// fixed column order.
pub fn format_report_line(measurement: &Measurement, name: &str) -> String {
    format!(
        "{:>18} pix, {:>18} ns, {:>18} pix/s, {}",
        measurement.pixels,
        measurement.elapsed_ns,
        measurement.pixels_per_sec(),
        name
    )
}

/// Drive the full catalog in order, emitting one report line per pattern to
/// stdout and the log.
pub fn run_all(geometry: &ScreenGeometry, fb: &mut Surface, log: &mut ReportLog) -> io::Result<()> {
    log.launch_marker()?;

    for pattern in PATTERNS {
        // Quiesce pending I/O so background flushing does not pollute the
        // measurement. Best effort only.
        io::stdout().flush()?;
        log.flush()?;
        unsafe { libc::sync() };

        debug!("calibrating {}", pattern.name);
        let measurement = run_calibrated(pattern, geometry, fb);

        let line = format_report_line(&measurement, pattern.name);
        println!("{}", line);
        log.line(&line)?;
    }

    log.finish_marker()?;
    log.flush()
}



#[cfg(test)]
mod tests_properties;
