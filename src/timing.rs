//! Monotonic timing for the measured intervals.

/// A monotonic clock reading, split into whole seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: i64,
}

/// Read `CLOCK_MONOTONIC`, which is unaffected by wall-clock adjustment.
pub fn now() -> Timestamp {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // Cannot fail for CLOCK_MONOTONIC with a valid timespec pointer.
    unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    Timestamp {
        secs: ts.tv_sec as i64,
        nanos: ts.tv_nsec as i64,
    }
}

/// Elapsed nanoseconds between two readings.
///
/// Exact even when the nanosecond subtraction borrows: the result is a
/// linear combination of both fields, so no normalization is needed.
#[inline]
pub fn elapsed_ns(start: Timestamp, end: Timestamp) -> i64 {
    (end.secs - start.secs) * 1_000_000_000 + (end.nanos - start.nanos)
}

/// A started stopwatch over the monotonic clock.
pub struct Stopwatch {
    start: Timestamp,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self { start: now() }
    }

    /// Nanoseconds elapsed since `start()`.
    pub fn stop(&self) -> i64 {
        elapsed_ns(self.start, now())
    }
}
