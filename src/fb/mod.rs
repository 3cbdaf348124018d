//! Framebuffer device setup: open, geometry query, memory mapping.
//!
//! Everything here runs once, before the first measured pattern. The rest of
//! the crate only sees the resulting [`ScreenGeometry`] and [`Surface`].

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::ptr;

use log::info;

use crate::error::SetupError;
use crate::surface::{ScreenGeometry, Surface};

pub mod ioctl;
use ioctl::{FbFixScreeninfo, FbVarScreeninfo, FBIOGET_FSCREENINFO, FBIOGET_VSCREENINFO};

/// An open framebuffer device node.
#[derive(Debug)]
pub struct FbDevice {
    file: File,
    path: String,
}

impl FbDevice {
    /// Open `/dev/fb{index}` read/write.
    pub fn open(index: usize) -> Result<Self, SetupError> {
        let path = format!("/dev/fb{}", index);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| SetupError::DeviceOpen {
                path: path.clone(),
                source,
            })?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query the virtual resolution, depth and row stride.
    pub fn geometry(&self) -> Result<ScreenGeometry, SetupError> {
        let fd = self.file.as_raw_fd();

        let mut var = FbVarScreeninfo::default();
        if unsafe { libc::ioctl(fd, FBIOGET_VSCREENINFO, &mut var as *mut FbVarScreeninfo) } != 0 {
            return Err(SetupError::GeometryQuery(io::Error::last_os_error()));
        }

        let mut fix = FbFixScreeninfo::default();
        if unsafe { libc::ioctl(fd, FBIOGET_FSCREENINFO, &mut fix as *mut FbFixScreeninfo) } != 0 {
            return Err(SetupError::GeometryQuery(io::Error::last_os_error()));
        }

        let geometry = ScreenGeometry {
            width: var.xres_virtual,
            height: var.yres_virtual,
            bits_per_pixel: var.bits_per_pixel,
            line_length: fix.line_length,
        };

        // The per-pixel patterns address the surface as 32-bit words; any
        // other depth would break their in-bounds guarantee.
        if geometry.bits_per_pixel != 32 {
            return Err(SetupError::UnsupportedFormat {
                bits_per_pixel: geometry.bits_per_pixel,
            });
        }

        // stride >= width * bytes_per_pixel is the addressing invariant
        // every pattern relies on.
        let min_stride = geometry.width as usize * geometry.bytes_per_pixel();
        if (geometry.line_length as usize) < min_stride {
            return Err(SetupError::GeometryQuery(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "stride {} shorter than a row of {} pixels",
                    geometry.line_length, geometry.width
                ),
            )));
        }

        Ok(geometry)
    }

    /// Map the full virtual surface (`stride * height` bytes) read/write.
    pub fn map(&self, geometry: &ScreenGeometry) -> Result<Surface, SetupError> {
        let len = geometry.size_in_bytes();
        let base = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.file.as_raw_fd(),
                0,
            )
        };
        if base == libc::MAP_FAILED {
            return Err(SetupError::Mmap(io::Error::last_os_error()));
        }
        info!("mapped {} bytes of {}", len, self.path);
        Ok(unsafe { Surface::from_mapping(base as *mut u8, len) })
    }
}
