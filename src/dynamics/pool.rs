//! Fixed pool of long-lived force/integration workers.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use log::{debug, error};
use parking_lot::Mutex;

use crate::{
    core::{body::Body, collection::BodyCollection},
    dynamics::{
        gravity::{integrate_partition, partition, PhysicsParams},
        rendezvous::{Phase, Rendezvous},
    },
    error::{Result, SimError},
};

/// Integrated bodies produced by one worker during the last compute phase.
type Outbox = Arc<Mutex<Vec<Body>>>;

/// `N` persistent threads, each owning indices `i` with `i % N == worker_id`.
///
/// Workers park at the rendezvous between cycles. Each cycle they read the frozen
/// collection and write integrated copies of their own bodies to a private outbox,
/// which the coordinator copies back with [`WorkerPool::collect_into`].
pub struct WorkerPool {
    rendezvous: Arc<Rendezvous>,
    outboxes: Vec<Outbox>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `worker_count` workers sharing `rendezvous`, which must have been
    /// created for `worker_count + 1` parties.
    pub fn spawn(
        worker_count: usize,
        params: PhysicsParams,
        bodies: BodyCollection,
        rendezvous: Arc<Rendezvous>,
    ) -> Result<Self> {
        debug_assert_eq!(rendezvous.parties(), worker_count + 1);
        let mut pool = Self {
            rendezvous,
            outboxes: Vec::with_capacity(worker_count),
            handles: Vec::with_capacity(worker_count),
        };

        for worker_id in 0..worker_count {
            let outbox: Outbox = Arc::default();
            let worker = Worker {
                id: worker_id,
                count: worker_count,
                params,
                bodies: bodies.clone(),
                rendezvous: Arc::clone(&pool.rendezvous),
                outbox: Arc::clone(&outbox),
            };
            let handle = thread::Builder::new()
                .name(format!("gravity-worker-{worker_id}"))
                .spawn(move || worker.run())
                .map_err(|source| SimError::WorkerSpawn {
                    worker: worker_id,
                    source,
                })?;
            pool.outboxes.push(outbox);
            pool.handles.push(handle);
        }

        debug!("spawned {worker_count} gravity workers");
        Ok(pool)
    }

    pub fn worker_count(&self) -> usize {
        self.outboxes.len()
    }

    /// Copies every worker's output back into its slots.
    ///
    /// Must only be called between cycles, on the same collection the workers
    /// read during the cycle that just finished.
    pub fn collect_into(&self, bodies: &mut [Body]) {
        let worker_count = self.worker_count();
        for (worker_id, outbox) in self.outboxes.iter().enumerate() {
            let mut outbox = outbox.lock();
            debug_assert_eq!(
                outbox.len(),
                partition(worker_id, worker_count, bodies.len()).count()
            );
            let slots = partition(worker_id, worker_count, bodies.len());
            for (index, body) in slots.zip(outbox.drain(..)) {
                bodies[index] = body;
            }
        }
    }

    /// Releases every worker from the rendezvous and joins them.
    pub fn shutdown(&mut self) {
        self.rendezvous.shutdown();
        for handle in self.handles.drain(..) {
            let name = handle.thread().name().unwrap_or("gravity-worker").to_owned();
            if handle.join().is_err() {
                error!("{name} panicked before shutdown");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    id: usize,
    count: usize,
    params: PhysicsParams,
    bodies: BodyCollection,
    rendezvous: Arc<Rendezvous>,
    outbox: Outbox,
}

impl Worker {
    fn run(self) {
        let _guard = ShutdownOnPanic(&self.rendezvous);
        loop {
            match self.rendezvous.wait() {
                Ok(phase) => debug_assert_eq!(phase, Phase::Computing),
                Err(_) => break,
            }

            {
                let bodies = self.bodies.read();
                let mut outbox = self.outbox.lock();
                integrate_partition(&bodies, self.id, self.count, self.params, &mut outbox);
            }

            match self.rendezvous.wait() {
                Ok(phase) => debug_assert_eq!(phase, Phase::Idle),
                Err(_) => break,
            }
        }
        debug!("gravity worker {} exiting", self.id);
    }
}

/// Shuts the rendezvous down if the owning worker unwinds, so the remaining
/// parties fail fast instead of waiting for an arrival that never comes.
struct ShutdownOnPanic<'a>(&'a Rendezvous);

impl Drop for ShutdownOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            error!("gravity worker panicked; shutting down the rendezvous");
            self.0.shutdown();
        }
    }
}
