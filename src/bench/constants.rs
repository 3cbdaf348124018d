// Benchmark tuning constants.

/// Loop count for the short calibration pass.
pub const CALIBRATION_LOOPS: u32 = 5;

/// Wall-clock budget for each production pass, in seconds.
pub const TARGET_RUNTIME_SECS: u64 = 5;

/// Calibration timings below this are treated as clock-resolution artifacts.
pub const MIN_CALIBRATION_NS: i64 = 1_000;

// Tile grid for the scattered write pattern.
pub const WRITE_TILE_X_PARTS: u32 = 4;
pub const WRITE_TILE_Y_PARTS: u32 = 4;

// Tile grid for the scattered read pattern. Deliberately different from the
// write grid so the two probe different access entropies.
pub const READ_TILE_X_PARTS: u32 = 8;
pub const READ_TILE_Y_PARTS: u32 = 16;

/// A read-accumulator value treated as impossible for real pixel data.
pub const READ_SUM_SENTINEL: u32 = 0xFFFF_FFFF;
