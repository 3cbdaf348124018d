//! Property-based tests for the pattern library.
//!
//! Uses proptest to cover the traversal invariants over many geometries.

use proptest::prelude::*;

use crate::surface::{ScreenGeometry, Surface};

use super::patterns::{sequential_horiz_write, tile_coords};
use super::PATTERNS;

/// Geometry whose dimensions divide both catalog tile grids (lcm of the
/// x-parts is 8, of the y-parts 16), with optional row padding.
fn divisible_geometry(w_tiles: u32, h_tiles: u32, padding: u32) -> ScreenGeometry {
    let width = 8 * w_tiles;
    let height = 16 * h_tiles;
    ScreenGeometry {
        width,
        height,
        bits_per_pixel: 32,
        line_length: width * 4 + padding * 4,
    }
}

proptest! {
    /// The linear-counter decomposition visits every pixel exactly once
    /// whenever the grid evenly divides the surface.
    #[test]
    fn tiled_traversal_is_a_bijection(
        x_parts in 1u32..6,
        y_parts in 1u32..6,
        tile_w in 1u32..8,
        tile_h in 1u32..8,
    ) {
        let width = x_parts * tile_w;
        let height = y_parts * tile_h;

        let mut seen = vec![false; (width * height) as usize];
        for i in 0..width * height {
            let (x, y) = tile_coords(i, width, height, x_parts, y_parts);
            prop_assert!(x < width && y < height);
            let idx = (y * width + x) as usize;
            prop_assert!(!seen[idx], "pixel ({}, {}) visited twice", x, y);
            seen[idx] = true;
        }
        prop_assert!(seen.iter().all(|&v| v));
    }

    /// pixels == width * height * loops holds exactly for every pattern.
    #[test]
    fn pixel_count_scales_with_loops(
        loops in 0u32..4,
        w_tiles in 1u32..4,
        h_tiles in 1u32..3,
        padding in 0u32..5,
    ) {
        let geometry = divisible_geometry(w_tiles, h_tiles, padding);
        let mut fb = Surface::heap(&geometry);

        for pattern in PATTERNS {
            let m = (pattern.run)(loops, &geometry, &mut fb);
            prop_assert_eq!(m.pixels, geometry.pixel_count() * loops as u64);
        }
    }

    /// The written value depends only on (x, y, pass): two identical runs
    /// leave identical surfaces.
    #[test]
    fn write_patterns_are_deterministic(
        loops in 1u32..4,
        w_tiles in 1u32..3,
        h_tiles in 1u32..3,
    ) {
        let geometry = divisible_geometry(w_tiles, h_tiles, 2);

        for pattern in PATTERNS.iter().filter(|p| p.name.contains("write")) {
            let mut first = Surface::heap(&geometry);
            (pattern.run)(loops, &geometry, &mut first);

            let mut second = Surface::heap(&geometry);
            (pattern.run)(loops, &geometry, &mut second);

            prop_assert_eq!(
                first.as_bytes(),
                second.as_bytes(),
                "{} is not deterministic",
                pattern.name
            );
        }
    }

    /// A surface written by one run is read back unchanged: read patterns
    /// have no side effects on the buffer.
    #[test]
    fn read_patterns_leave_the_surface_unchanged(loops in 1u32..3) {
        let geometry = divisible_geometry(2, 1, 1);
        let mut fb = Surface::heap(&geometry);
        sequential_horiz_write(1, &geometry, &mut fb);
        let before = fb.as_bytes().to_vec();

        for pattern in PATTERNS.iter().filter(|p| p.name.contains("read")) {
            (pattern.run)(loops, &geometry, &mut fb);
            prop_assert_eq!(fb.as_bytes(), &before[..], "{} wrote to the surface", pattern.name);
        }
    }
}
