//! The shared, ordered body list and the sequential passes that edit its structure.

use std::sync::Arc;

use log::warn;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::body::Body;

/// Shared handle to the ordered body list.
///
/// The coordinator creates the collection and hands clones to the worker pool. Only
/// the coordinator takes the write guard, and only while every worker is parked at
/// the rendezvous; workers take read guards during the compute phase.
#[derive(Debug, Clone, Default)]
pub struct BodyCollection {
    inner: Arc<RwLock<Vec<Body>>>,
}

impl BodyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bodies(bodies: Vec<Body>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(bodies)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Body>> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<Body>> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the current bodies out of the collection.
    pub fn snapshot(&self) -> Vec<Body> {
        self.inner.read().clone()
    }
}

/// Drops every body whose position is no longer finite. Returns how many were removed.
pub fn purge_non_finite(bodies: &mut Vec<Body>) -> usize {
    let before = bodies.len();
    bodies.retain(Body::is_finite);
    let purged = before - bodies.len();
    if purged > 0 {
        warn!("purged {purged} bodies with non-finite positions");
    }
    purged
}

/// Merges every overlapping pair `(i, j)`, `i < j`, into slot `i` and removes `j`.
///
/// After a removal the same `j` is tested again, since the next body shifted into
/// it. Returns the number of merges performed.
pub fn merge_collisions(bodies: &mut Vec<Body>) -> usize {
    let mut merges = 0;
    let mut i = 0;
    while i < bodies.len() {
        let mut j = i + 1;
        while j < bodies.len() {
            if bodies[i].overlaps(&bodies[j]) {
                let absorbed = bodies.remove(j);
                bodies[i] = bodies[i].merge(&absorbed);
                merges += 1;
            } else {
                j += 1;
            }
        }
        i += 1;
    }
    merges
}

/// Repeats [`merge_collisions`] until a pass merges nothing.
///
/// A single pass can leave overlaps behind when a merged body grows into a
/// neighbour that was already tested against its smaller predecessor.
pub fn merge_until_stable(bodies: &mut Vec<Body>) -> usize {
    let mut total = 0;
    loop {
        let merged = merge_collisions(bodies);
        if merged == 0 {
            return total;
        }
        total += merged;
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::core::types::Rgb;

    fn body(x: f64, y: f64, radius: f64) -> Body {
        Body::new(1.0, DVec2::new(x, y), DVec2::ZERO, Rgb::WHITE).with_radius(radius)
    }

    #[test]
    fn clones_share_the_same_bodies() {
        let collection = BodyCollection::new();
        assert!(collection.is_empty());
        let handle = collection.clone();
        handle.write().push(body(0.0, 0.0, 1.0));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.snapshot(), handle.snapshot());
    }

    #[test]
    fn separated_bodies_are_left_alone() {
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(5.0, 0.0, 1.0)];
        assert_eq!(merge_collisions(&mut bodies), 0);
        assert_eq!(bodies.len(), 2);
    }

    #[test]
    fn touching_exactly_is_not_a_collision() {
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(2.0, 0.0, 1.0)];
        assert_eq!(merge_collisions(&mut bodies), 0);
    }

    #[test]
    fn shifted_neighbour_is_retested() {
        // Bodies 1 and 2 both overlap body 0; after 1 is absorbed, 2 shifts into
        // slot 1 and must still be merged.
        let mut bodies = vec![
            body(0.0, 0.0, 1.0),
            body(0.5, 0.0, 1.0),
            body(-0.5, 0.0, 1.0),
        ];
        assert_eq!(merge_collisions(&mut bodies), 2);
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].mass, 3.0);
    }

    #[test]
    fn purge_keeps_order_of_survivors() {
        let mut bodies = vec![
            body(1.0, 0.0, 1.0),
            body(f64::NAN, 0.0, 1.0),
            body(2.0, 0.0, 1.0),
        ];
        assert_eq!(purge_non_finite(&mut bodies), 1);
        assert_eq!(bodies[0].position.x, 1.0);
        assert_eq!(bodies[1].position.x, 2.0);
    }
}
