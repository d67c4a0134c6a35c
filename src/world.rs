use std::sync::Arc;

use parking_lot::RwLockReadGuard;

use crate::{
    config::SimConfig,
    core::{
        body::Body,
        collection::{merge_collisions, purge_non_finite, BodyCollection},
    },
    dynamics::{
        gravity::PhysicsParams,
        pool::WorkerPool,
        rendezvous::{Phase, Rendezvous},
    },
    error::{Result, SimError},
    utils::{logging, profiling::ScopedTimer, profiling::StepProfile},
};

/// Step coordinator: owns the body collection and drives the worker pool.
///
/// Structural edits (appending, merging, purging) happen only on this side and only
/// while every worker is parked at the rendezvous. Because [`Simulation::step`]
/// takes `&mut self` and does not return until the compute phase is over, the
/// borrow checker rules out appending bodies while workers are running.
pub struct Simulation {
    config: SimConfig,
    bodies: BodyCollection,
    rendezvous: Arc<Rendezvous>,
    pool: WorkerPool,
    cycles: u64,
    last_profile: StepProfile,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_bodies(config, Vec::new())
    }

    pub fn with_bodies(config: SimConfig, bodies: Vec<Body>) -> Result<Self> {
        config.validate()?;

        let bodies = BodyCollection::from_bodies(bodies);
        let rendezvous = Arc::new(Rendezvous::new(config.worker_count + 1));
        let pool = WorkerPool::spawn(
            config.worker_count,
            PhysicsParams::from(&config),
            bodies.clone(),
            Arc::clone(&rendezvous),
        )?;

        Ok(Self {
            config,
            bodies,
            rendezvous,
            pool,
            cycles: 0,
            last_profile: StepProfile::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of completed compute cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn last_profile(&self) -> &StepProfile {
        &self.last_profile
    }

    pub fn add_body(&mut self, body: Body) {
        self.bodies.write().push(body);
    }

    /// Appends bodies to the tail of the collection.
    pub fn add_bodies<I>(&mut self, bodies: I)
    where
        I: IntoIterator<Item = Body>,
    {
        self.bodies.write().extend(bodies);
    }

    /// Read access to the bodies as of the end of the last step.
    pub fn bodies(&self) -> RwLockReadGuard<'_, Vec<Body>> {
        self.bodies.read()
    }

    pub fn snapshot(&self) -> Vec<Body> {
        self.bodies.snapshot()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Runs one full cycle: purge, merge, then one barrier-synchronised compute phase.
    ///
    /// Fails with [`SimError::Shutdown`] without touching the collection once the
    /// worker pool is gone.
    pub fn step(&mut self) -> Result<StepProfile> {
        if self.rendezvous.is_shut_down() {
            return Err(SimError::Shutdown);
        }
        let _timer = logging::ScopedTimer::new("simulation::step", self.bodies.len());
        let mut profile = StepProfile::default();
        {
            let _total = ScopedTimer::new(&mut profile.total_time);

            {
                let _merge = ScopedTimer::new(&mut profile.merge_time);
                let mut bodies = self.bodies.write();
                profile.purged = purge_non_finite(&mut bodies);
                profile.merged = merge_collisions(&mut bodies);
                profile.body_count = bodies.len();
            }

            {
                let _compute = ScopedTimer::new(&mut profile.compute_time);
                self.enter_phase(Phase::Computing)?;
                self.enter_phase(Phase::Idle)?;
            }

            {
                let _collect = ScopedTimer::new(&mut profile.collect_time);
                let mut bodies = self.bodies.write();
                self.pool.collect_into(&mut bodies);
            }
        }

        self.cycles += 1;
        self.last_profile = profile;
        profile.report();
        Ok(profile)
    }

    fn enter_phase(&self, expected: Phase) -> Result<()> {
        let phase = self.rendezvous.wait()?;
        if phase != expected {
            log::error!("rendezvous entered {phase:?}, expected {expected:?}");
            self.rendezvous.shutdown();
            return Err(SimError::Shutdown);
        }
        Ok(())
    }

    /// Stops and joins every worker. Dropping the simulation does the same.
    pub fn shutdown(mut self) {
        self.pool.shutdown();
    }
}
