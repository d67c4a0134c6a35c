//! Error types for the simulator.
//!
//! The physics itself never fails: numerical blow-ups are purged silently. Errors
//! only come from invalid configuration, from the OS refusing to start a worker
//! thread, or from the worker pool having been torn down.

use std::fmt;

/// Main error type for the simulator.
#[derive(Debug)]
pub enum SimError {
    /// A configuration value is outside its allowed range.
    InvalidConfig(String),
    /// The OS refused to spawn a worker thread.
    WorkerSpawn {
        worker: usize,
        source: std::io::Error,
    },
    /// The rendezvous was shut down, either on teardown or because a worker died.
    Shutdown,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::WorkerSpawn { worker, source } => {
                write!(f, "Failed to spawn worker {worker}: {source}")
            }
            Self::Shutdown => write!(f, "Worker pool has been shut down"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WorkerSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenient Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

