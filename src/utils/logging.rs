use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Traces how long a labelled section took over a collection of `bodies`.
pub struct ScopedTimer<'a> {
    label: &'a str,
    bodies: usize,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str, bodies: usize) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("{label}: {bodies} bodies");
        }
        Self {
            label,
            bodies,
            start: Instant::now(),
        }
    }

    /// Nanoseconds spent per body so far; zero for an empty collection.
    pub fn per_body_nanos(&self) -> u128 {
        match self.bodies {
            0 => 0,
            n => self.start.elapsed().as_nanos() / n as u128,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!(
                "{} done in {} µs ({} ns/body)",
                self.label,
                self.start.elapsed().as_micros(),
                self.per_body_nanos()
            );
        }
    }
}

/// Logs a warning when a frame took longer than its budget.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Frame exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}
