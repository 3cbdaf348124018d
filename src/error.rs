//! Fatal setup errors.
//!
//! Everything that can fail does so before the first measured pattern; the
//! benchmark itself has no error surface beyond the process exit status.

use std::error::Error;
use std::fmt;
use std::io;

/// A fatal failure during device or log setup.
///
/// Any variant aborts the whole run with a non-zero exit status; no partial
/// results are reported and nothing is retried.
#[derive(Debug)]
pub enum SetupError {
    DeviceOpen { path: String, source: io::Error },
    GeometryQuery(io::Error),
    UnsupportedFormat { bits_per_pixel: u32 },
    Mmap(io::Error),
    LogOpen { path: String, source: io::Error },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::DeviceOpen { path, source } => {
                write!(f, "failed to open {}: {}", path, source)
            }
            SetupError::GeometryQuery(source) => {
                write!(f, "failed to query screen geometry: {}", source)
            }
            SetupError::UnsupportedFormat { bits_per_pixel } => {
                write!(
                    f,
                    "unsupported pixel format: {} bpp (the pixel patterns need 32 bpp)",
                    bits_per_pixel
                )
            }
            SetupError::Mmap(source) => {
                write!(f, "failed to map the framebuffer: {}", source)
            }
            SetupError::LogOpen { path, source } => {
                write!(f, "failed to open logfile {}: {}", path, source)
            }
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SetupError::DeviceOpen { source, .. }
            | SetupError::GeometryQuery(source)
            | SetupError::Mmap(source)
            | SetupError::LogOpen { source, .. } => Some(source),
            SetupError::UnsupportedFormat { .. } => None,
        }
    }
}
