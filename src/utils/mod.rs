//! Utility helpers: scoped logging timers and per-step profiling.

pub mod logging;
pub mod profiling;

pub use profiling::StepProfile;
