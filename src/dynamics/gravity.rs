use glam::DVec2;

use crate::{config::SimConfig, core::body::Body};

/// Constants each worker needs for one compute cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub gravity: f64,
    pub dt: f64,
}

impl From<&SimConfig> for PhysicsParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            gravity: config.gravity,
            dt: config.time_step,
        }
    }
}

/// Inverse-square attraction exerted on `target` by `source`.
///
/// Returns `None` for coincident bodies: a zero distance has no direction and would
/// otherwise produce an infinite or NaN force.
pub fn gravitational_force(target: &Body, source: &Body, gravity: f64) -> Option<DVec2> {
    let diff = target.position - source.position;
    let dist_sq = diff.length_squared();
    if dist_sq == 0.0 {
        return None;
    }
    let direction = diff / dist_sq.sqrt();
    Some(-direction * gravity * target.mass * source.mass / dist_sq)
}

/// Whether `worker_id` owns collection index `index` this cycle.
pub fn owns(index: usize, worker_id: usize, worker_count: usize) -> bool {
    index % worker_count == worker_id
}

/// Indices of a collection of length `len` owned by `worker_id`, ascending.
pub fn partition(
    worker_id: usize,
    worker_count: usize,
    len: usize,
) -> impl Iterator<Item = usize> {
    debug_assert!(worker_count > 0);
    (worker_id..len).step_by(worker_count.max(1))
}

/// Computes forces on and integrates every body owned by `worker_id`.
///
/// `bodies` is the frozen collection; it is only read. The integrated copies are
/// written to `out` in the order of [`partition`].
pub fn integrate_partition(
    bodies: &[Body],
    worker_id: usize,
    worker_count: usize,
    params: PhysicsParams,
    out: &mut Vec<Body>,
) {
    out.clear();
    for i in partition(worker_id, worker_count, bodies.len()) {
        let mut body = bodies[i];
        for (j, other) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(force) = gravitational_force(&bodies[i], other, params.gravity) {
                body.add_force(force);
            }
        }
        body.update(params.dt);
        out.push(body);
    }
}
