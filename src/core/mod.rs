//! Core types: bodies, colours, and the shared body collection.

pub mod body;
pub mod collection;
pub mod types;

pub use body::{radius_for_mass, Body};
pub use collection::{merge_collisions, merge_until_stable, purge_non_finite, BodyCollection};
pub use types::{DVec2, Rgb};
