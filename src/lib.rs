//! Galaxy Sim – brute-force N-body gravity on a barrier-synchronised worker pool.
//!
//! Bodies attract each other under inverse-square gravity, merge when their discs
//! overlap, and are integrated with forward Euler once per frame. A fixed pool of
//! worker threads computes all-pairs forces over a static modulo partition of the
//! body list, while a single coordinator merges collisions and edits the list
//! between compute phases. The two sides meet at a two-phase [`Rendezvous`].

pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod frame;
pub mod galaxy;
pub mod render;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use config::{FrameConfig, GalaxyConfig, SimConfig};
pub use crate::core::{
    body::Body,
    collection::{merge_collisions, purge_non_finite, BodyCollection},
    types::Rgb,
};
pub use dynamics::{
    gravity::{owns, partition, PhysicsParams},
    pool::WorkerPool,
    rendezvous::{Phase, Rendezvous},
};
pub use error::{Result, SimError};
pub use frame::{FrameDriver, FrameInput, FrameStats};
pub use galaxy::GalaxyGenerator;
pub use render::{Canvas, ViewOffset};
pub use utils::profiling::StepProfile;
pub use world::Simulation;
