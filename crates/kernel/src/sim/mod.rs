//! Simulation session and file loading.
//!
//! Provides the step driver that runs a compiled netlist, the combinational and
//! sequential engines it is built from, and utilities for loading netlist and ROM
//! files from disk.

/// Single-pass combinational settlement.
pub mod evaluator;

/// Netlist and ROM image file loading.
pub mod loader;

/// Registers, RAM and the end-of-step commit.
pub mod sequential;

/// The simulation session.
pub mod simulator;

/// Per-step input and output vectors.
pub mod vector;

pub use sequential::StateSnapshot;
pub use simulator::Simulator;
pub use vector::{InputVector, OutputVector};
