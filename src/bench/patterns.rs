//! The access-pattern library.
//!
//! Each pattern traverses the full virtual surface `loops` times and reports
//! the elapsed nanoseconds together with `width * height * loops` pixels
//! touched. The patterns differ only in visit order.
//!
//! Hot loops use unchecked pointer arithmetic. Every traversal keeps
//! `0 <= x < width` and `0 <= y < height`, which together with the
//! setup-validated geometry (stride >= width * 4, 32 bpp) keeps all
//! accesses inside the mapping.

use std::mem;
use std::ptr;

use crate::surface::{ScreenGeometry, Surface};
use crate::timing::Stopwatch;

use super::constants::{
    READ_SUM_SENTINEL, READ_TILE_X_PARTS, READ_TILE_Y_PARTS, WRITE_TILE_X_PARTS,
    WRITE_TILE_Y_PARTS,
};
use super::Measurement;

const WORD_SIZE: usize = mem::size_of::<u32>();

fn full_surface_pixels(geometry: &ScreenGeometry, loops: u32) -> u64 {
    geometry.pixel_count() * loops as u64
}

/// Value written to pixel (x, y) on pass `pass` (1-based).
///
/// Depending on the pass index keeps successive passes writing distinct
/// data, so the stores cannot be hoisted or precomputed.
#[inline(always)]
fn write_value(x: u32, y: u32, pass: u32) -> u32 {
    x.wrapping_mul(y).wrapping_mul(pass)
}

/// Trap if the read accumulator hit the sentinel.
///
/// Consuming the sum keeps the loads observable. Real pixel data cannot sum
/// to the sentinel, so this trap is unreachable in practice.
#[inline]
fn check_read_sum(sum: u32) {
    if sum == READ_SUM_SENTINEL {
        unreachable!("read accumulator hit sentinel {:#010x}", READ_SUM_SENTINEL);
    }
}

/// Decompose a linear visit counter into tile-scattered coordinates.
///
/// `i` is split into tile-row index, intra-tile row offset, tile-column
/// index and intra-tile column offset, then recombined into `(x, y)`. When
/// `x_parts` divides the width and `y_parts` divides the height, this visits
/// every pixel exactly once as `i` sweeps `0..width * height`.
#[inline(always)]
pub fn tile_coords(i: u32, width: u32, height: u32, x_parts: u32, y_parts: u32) -> (u32, u32) {
    let tile_w = width / x_parts;
    let tile_h = height / y_parts;

    let y = (i % y_parts) * tile_h + (i / y_parts) % tile_h;

    let col = i / height;
    let x = (col % x_parts) * tile_w + (col / x_parts) % tile_w;

    (x, y)
}

/// Row-major word reads, one pixel at a time.
pub fn sequential_horiz_read(
    loops: u32,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let width = geometry.width as usize;
    let height = geometry.height as usize;
    let stride_words = geometry.line_length as usize / WORD_SIZE;

    let mut sum: u32 = 0;
    let watch = Stopwatch::start();

    for _ in 0..loops {
        let mut row = fb.base() as *const u32;
        for _ in 0..height {
            unsafe {
                for x in 0..width {
                    sum = sum.wrapping_add(*row.add(x));
                }
                row = row.add(stride_words);
            }
        }
    }

    let elapsed_ns = watch.stop();
    check_read_sum(sum);
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Row-major word writes, one pixel at a time.
pub fn sequential_horiz_write(
    loops: u32,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let width = geometry.width as usize;
    let height = geometry.height as usize;
    let stride_words = geometry.line_length as usize / WORD_SIZE;

    let watch = Stopwatch::start();

    for pass in 1..=loops {
        let mut row = fb.base() as *mut u32;
        for y in 0..height {
            unsafe {
                for x in 0..width {
                    *row.add(x) = write_value(x as u32, y as u32, pass);
                }
                row = row.add(stride_words);
            }
        }
    }

    let elapsed_ns = watch.stop();
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Column-major word reads: each step jumps a whole stride, deliberately
/// defeating spatial locality.
pub fn sequential_vert_read(
    loops: u32,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let width = geometry.width as usize;
    let height = geometry.height as usize;
    let stride_words = geometry.line_length as usize / WORD_SIZE;

    let mut sum: u32 = 0;
    let watch = Stopwatch::start();

    for _ in 0..loops {
        for x in 0..width {
            let mut p = unsafe { (fb.base() as *const u32).add(x) };
            for _ in 0..height {
                unsafe {
                    sum = sum.wrapping_add(*p);
                    p = p.add(stride_words);
                }
            }
        }
    }

    let elapsed_ns = watch.stop();
    check_read_sum(sum);
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Column-major word writes.
pub fn sequential_vert_write(
    loops: u32,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let width = geometry.width as usize;
    let height = geometry.height as usize;
    let stride_words = geometry.line_length as usize / WORD_SIZE;

    let watch = Stopwatch::start();

    for pass in 1..=loops {
        for x in 0..width {
            let mut p = unsafe { (fb.base() as *mut u32).add(x) };
            for y in 0..height {
                unsafe {
                    *p = write_value(x as u32, y as u32, pass);
                    p = p.add(stride_words);
                }
            }
        }
    }

    let elapsed_ns = watch.stop();
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Bulk-copy whole rows from the surface into a heap scratch line.
pub fn sequential_line_read(
    loops: u32,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let height = geometry.height as usize;
    let stride = geometry.line_length as usize;
    let row_bytes = geometry.width as usize * geometry.bytes_per_pixel();

    let mut linebuf = vec![0u8; row_bytes];

    let watch = Stopwatch::start();

    for _ in 0..loops {
        let mut row = fb.base() as *const u8;
        for _ in 0..height {
            unsafe {
                ptr::copy_nonoverlapping(row, linebuf.as_mut_ptr(), row_bytes);
                row = row.add(stride);
            }
        }
    }

    let elapsed_ns = watch.stop();
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Bulk-copy a pre-filled scratch line into every row of the surface.
///
/// The scratch buffer is filled with a deterministic byte ramp before the
/// stopwatch starts; only the copies are measured.
pub fn sequential_line_write(
    loops: u32,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let height = geometry.height as usize;
    let stride = geometry.line_length as usize;
    let row_bytes = geometry.width as usize * geometry.bytes_per_pixel();

    let mut linebuf = vec![0u8; row_bytes];
    for (i, b) in linebuf.iter_mut().enumerate() {
        *b = i as u8;
    }

    let watch = Stopwatch::start();

    for _ in 0..loops {
        let mut row = fb.base();
        for _ in 0..height {
            unsafe {
                ptr::copy_nonoverlapping(linebuf.as_ptr(), row, row_bytes);
                row = row.add(stride);
            }
        }
    }

    let elapsed_ns = watch.stop();
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Tile-scattered word writes over a 4x4 grid.
pub fn nonsequential_write(loops: u32, geometry: &ScreenGeometry, fb: &mut Surface) -> Measurement {
    let width = geometry.width;
    let height = geometry.height;
    let stride = geometry.line_length as usize;
    let total = width * height;

    let watch = Stopwatch::start();

    for pass in 1..=loops {
        for i in 0..total {
            let (x, y) = tile_coords(i, width, height, WRITE_TILE_X_PARTS, WRITE_TILE_Y_PARTS);
            unsafe {
                let row = fb.base().add(y as usize * stride) as *mut u32;
                *row.add(x as usize) = write_value(x, y, pass);
            }
        }
    }

    let elapsed_ns = watch.stop();
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}

/// Tile-scattered word reads over an 8x16 grid.
pub fn nonsequential_read(loops: u32, geometry: &ScreenGeometry, fb: &mut Surface) -> Measurement {
    let width = geometry.width;
    let height = geometry.height;
    let stride = geometry.line_length as usize;
    let total = width * height;

    let mut sum: u32 = 0;
    let watch = Stopwatch::start();

    for _ in 0..loops {
        for i in 0..total {
            let (x, y) = tile_coords(i, width, height, READ_TILE_X_PARTS, READ_TILE_Y_PARTS);
            unsafe {
                let row = fb.base().add(y as usize * stride) as *const u32;
                sum = sum.wrapping_add(*row.add(x as usize));
            }
        }
    }

    let elapsed_ns = watch.stop();
    check_read_sum(sum);
    Measurement {
        elapsed_ns,
        pixels: full_surface_pixels(geometry, loops),
    }
}
