//! # fiveaxis
//!
//! Kinematics for a 5-axis motion machine (three linear carriages, two
//! rotary stages): offline simulation and preview of multi-axis
//! machining motion.
//!
//! ## Features
//! - Forward kinematics over an arena-based joint tree with additive
//!   Euler rotation propagation
//! - Deterministic inverse-kinematics solver: tool orientation from a
//!   surface normal, linear carriages pre-compensated for the tool's
//!   off-center rotary pivot
//! - Declarative machine topology (TOML-loadable), validated once at
//!   build time
//! - Cyclic tool-path streams with a circular reference generator
//!
//! ## Example
//! ```rust,ignore
//! use fiveaxis::{MachineConfig, Simulation, ToolPath};
//! use glam::DVec3;
//!
//! let tree = MachineConfig::load("machine.toml")?.build()?;
//! let mut sim = Simulation::new(tree);
//! sim.set_tool_path(ToolPath::circle(500, DVec3::new(1.5, 2.0, 1.0))?);
//! sim.start()?;
//!
//! loop {
//!     sim.tick()?;
//!     for node in sim.tree().nodes() {
//!         // hand absolute poses to the rendering layer, keyed by node.name
//!     }
//! }
//! ```
//!
//! Mesh loading, rendering and windowing are deliberately external:
//! the crate computes poses, a host visualizes them.

pub mod config;
pub mod kinematics;
pub mod math;
pub mod path;
pub mod sim;

pub use config::{AxisKind, AxisRole, AxisSpec, ConfigError, MachineConfig, MotionAxis, MovementSpec};
pub use kinematics::{AxisNode, IkSolver, KinematicTree, Movement, NodeId, SolverAxes};
pub use path::{ToolPath, ToolPathError, ToolPathStep};
pub use sim::{SimError, SimState, Simulation};
