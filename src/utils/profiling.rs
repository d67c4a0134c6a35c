use std::time::{Duration, Instant};

use log::debug;

/// Timing and bookkeeping for one coordinator step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfile {
    pub merge_time: Duration,
    pub compute_time: Duration,
    pub collect_time: Duration,
    pub total_time: Duration,

    pub body_count: usize,
    pub purged: usize,
    pub merged: usize,
}

impl StepProfile {
    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        debug!(
            "step: {} bodies ({} purged, {} merged) in {:.2} ms \
             [merge {:.1}%, compute {:.1}%, collect {:.1}%]",
            self.body_count,
            self.purged,
            self.merged,
            self.total_time.as_secs_f32() * 1000.0,
            (self.merge_time.as_micros() as f32 / total_us) * 100.0,
            (self.compute_time.as_micros() as f32 / total_us) * 100.0,
            (self.collect_time.as_micros() as f32 / total_us) * 100.0,
        );
    }
}

/// Adds the lifetime of the timer to `output`.
pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
