//! Simulation lifecycle and tick driver.
//!
//! Owns the machine tree, the tool path and the IK solver, and gates
//! ticking behind an explicit state machine:
//! `Uninitialized → Configured → Running`. Each tick advances the
//! cyclic path index, solves the five joint values for the current
//! step and recomputes every absolute pose; poses are then readable
//! from [`Simulation::tree`] until the next tick.

use thiserror::Error;

use crate::config::ConfigError;
use crate::kinematics::{IkSolver, KinematicTree};
use crate::path::ToolPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Tree built, no tool path yet.
    Uninitialized,
    /// Tool path set; solver not yet bound.
    Configured,
    /// Ticking.
    Running,
}

#[derive(Debug, Clone, Error)]
pub enum SimError {
    #[error("simulation cannot start from state {0:?}; set a tool path first")]
    NotConfigured(SimState),

    #[error("simulation is not running (state {0:?})")]
    NotRunning(SimState),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fixed-rate simulation context. Single-threaded and synchronous: a
/// tick runs to completion with no partial-state visibility, so hosts
/// reading poses from another thread must snapshot between ticks.
#[derive(Debug, Clone)]
pub struct Simulation {
    tree: KinematicTree,
    path: Option<ToolPath>,
    solver: Option<IkSolver>,
    step_index: usize,
    state: SimState,
}

impl Simulation {
    pub fn new(tree: KinematicTree) -> Self {
        Self {
            tree,
            path: None,
            solver: None,
            step_index: 0,
            state: SimState::Uninitialized,
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn tree(&self) -> &KinematicTree {
        &self.tree
    }

    pub fn tool_path(&self) -> Option<&ToolPath> {
        self.path.as_ref()
    }

    pub fn set_tool_path(&mut self, path: ToolPath) {
        log::info!("tool path set: {} steps", path.len());
        self.path = Some(path);
        if self.state == SimState::Uninitialized {
            self.state = SimState::Configured;
        }
    }

    /// Binds the IK solver, runs an initial forward pass and starts
    /// ticking. Fails fast on a missing tool path or unbound solver
    /// axes, before the first tick runs.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.state != SimState::Configured {
            return Err(SimError::NotConfigured(self.state));
        }
        self.solver = Some(IkSolver::new(&self.tree)?);
        self.tree.forward_kinematics();
        self.state = SimState::Running;
        log::info!("simulation running");
        Ok(())
    }

    /// One simulation tick: advance the cyclic step index, solve the
    /// joint values for that step, recompute all absolute poses.
    /// O(number of nodes), unconditionally completes.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.state != SimState::Running {
            return Err(SimError::NotRunning(self.state));
        }
        // start() guarantees both are present while Running.
        let (Some(path), Some(solver)) = (&self.path, &self.solver) else {
            return Err(SimError::NotRunning(self.state));
        };

        self.step_index = (self.step_index + 1) % path.len();
        solver.solve(&mut self.tree, path.step(self.step_index));
        self.tree.forward_kinematics();
        Ok(())
    }
}
