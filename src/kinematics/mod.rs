//! Kinematics module
//!
//! The machine's joint tree, the forward-kinematics pass and the
//! inverse-kinematics solver for the five designated axes.

pub mod axis;
pub mod solver;
pub mod tree;

pub use axis::{AxisNode, Movement, NodeId};
pub use solver::IkSolver;
pub use tree::{KinematicTree, SolverAxes};
