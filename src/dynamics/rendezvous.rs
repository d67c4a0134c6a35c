//! Two-phase reusable rendezvous between the coordinator and the workers.
//!
//! Every cycle all `N + 1` parties call [`Rendezvous::wait`] twice. The first
//! release enters [`Phase::Computing`]: the coordinator has finished editing the
//! collection and workers may read it. The second release returns to
//! [`Phase::Idle`]: every worker has finished its partition and the coordinator may
//! edit the collection again. Everything a party did before its call happens-before
//! everything any party does after the corresponding release.
//!
//! The counting logic lives in [`RendezvousState`], a plain state machine that can
//! be driven step by step from a single thread; [`Rendezvous`] wraps it in a mutex
//! and condition variable.

use log::trace;
use parking_lot::{Condvar, Mutex};

use crate::error::{Result, SimError};

/// Which side of the compute phase the parties are on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The coordinator owns the collection.
    #[default]
    Idle,
    /// Workers are reading the collection and integrating their partitions.
    Computing,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Phase::Idle => Phase::Computing,
            Phase::Computing => Phase::Idle,
        }
    }
}

/// Outcome of one arrival at the rendezvous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Not everyone is here yet; block until `generation` has passed.
    Wait { generation: u64 },
    /// This arrival completed the generation and entered `phase`.
    Release { phase: Phase },
    /// The rendezvous has been shut down.
    Shutdown,
}

/// Generation-counted barrier state for a fixed number of parties.
#[derive(Debug, Clone)]
pub struct RendezvousState {
    parties: usize,
    arrived: usize,
    generation: u64,
    phase: Phase,
    shut_down: bool,
}

impl RendezvousState {
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "a rendezvous needs at least one party");
        Self {
            parties,
            arrived: 0,
            generation: 0,
            phase: Phase::Idle,
            shut_down: false,
        }
    }

    pub fn arrive(&mut self) -> Arrival {
        if self.shut_down {
            return Arrival::Shutdown;
        }
        self.arrived += 1;
        if self.arrived < self.parties {
            return Arrival::Wait {
                generation: self.generation,
            };
        }
        self.arrived = 0;
        self.generation += 1;
        self.phase = self.phase.next();
        Arrival::Release { phase: self.phase }
    }

    /// Whether a party that arrived during `generation` may leave.
    pub fn is_released(&self, generation: u64) -> bool {
        self.generation != generation
    }

    pub fn shutdown(&mut self) {
        self.shut_down = true;
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    pub fn arrived(&self) -> usize {
        self.arrived
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Blocking rendezvous shared by the coordinator and the worker pool.
#[derive(Debug)]
pub struct Rendezvous {
    state: Mutex<RendezvousState>,
    released: Condvar,
}

impl Rendezvous {
    pub fn new(parties: usize) -> Self {
        Self {
            state: Mutex::new(RendezvousState::new(parties)),
            released: Condvar::new(),
        }
    }

    /// Blocks until every party has arrived, then returns the phase just entered.
    ///
    /// Returns [`SimError::Shutdown`] once [`Rendezvous::shutdown`] has been called,
    /// including for parties already blocked here.
    pub fn wait(&self) -> Result<Phase> {
        let mut state = self.state.lock();
        match state.arrive() {
            Arrival::Shutdown => Err(SimError::Shutdown),
            Arrival::Release { phase } => {
                trace!("rendezvous released into {phase:?}");
                self.released.notify_all();
                Ok(phase)
            }
            Arrival::Wait { generation } => loop {
                if state.is_released(generation) {
                    return Ok(state.phase());
                }
                if state.is_shut_down() {
                    return Err(SimError::Shutdown);
                }
                self.released.wait(&mut state);
            },
        }
    }

    /// Wakes every blocked party and makes all future waits fail.
    pub fn shutdown(&self) {
        self.state.lock().shutdown();
        self.released.notify_all();
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.lock().is_shut_down()
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase()
    }

    pub fn parties(&self) -> usize {
        self.state.lock().parties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_arrival_releases_and_flips_phase() {
        let mut state = RendezvousState::new(3);
        assert_eq!(state.arrive(), Arrival::Wait { generation: 0 });
        assert_eq!(state.arrive(), Arrival::Wait { generation: 0 });
        assert!(!state.is_released(0));
        assert_eq!(
            state.arrive(),
            Arrival::Release {
                phase: Phase::Computing
            }
        );
        assert!(state.is_released(0));
        assert_eq!(state.arrived(), 0);
    }

    #[test]
    fn two_generations_make_one_cycle() {
        let mut state = RendezvousState::new(2);
        for _ in 0..5 {
            state.arrive();
            assert_eq!(state.arrive(), Arrival::Release { phase: Phase::Computing });
            state.arrive();
            assert_eq!(state.arrive(), Arrival::Release { phase: Phase::Idle });
        }
        assert_eq!(state.generation(), 10);
    }

    #[test]
    fn shutdown_rejects_new_arrivals() {
        let mut state = RendezvousState::new(2);
        assert_eq!(state.arrive(), Arrival::Wait { generation: 0 });
        state.shutdown();
        assert_eq!(state.arrive(), Arrival::Shutdown);
        assert!(!state.is_released(0));
    }

    #[test]
    fn single_party_never_blocks() {
        let rendezvous = Rendezvous::new(1);
        assert_eq!(rendezvous.wait().unwrap(), Phase::Computing);
        assert_eq!(rendezvous.wait().unwrap(), Phase::Idle);
    }
}
