//! Parallel dynamics: the gravity kernel, the two-phase rendezvous, and the worker pool.

pub mod gravity;
pub mod pool;
pub mod rendezvous;

pub use gravity::{gravitational_force, integrate_partition, owns, partition, PhysicsParams};
pub use pool::WorkerPool;
pub use rendezvous::{Arrival, Phase, Rendezvous, RendezvousState};
