//! Netlist simulation kernel.
//!
//! This crate simulates synchronous digital circuits described as netlists. It provides:
//! 1. **Netlists:** A JSON description format, a builder, and a compiler that checks
//!    widths and drivers and fixes the evaluation order at load time.
//! 2. **Memories:** ROM blocks filled from a hexadecimal image and RAM blocks with
//!    end-of-step writes.
//! 3. **Simulation:** A session that settles combinational logic, reports outputs and
//!    latches registers once per step.
//! 4. **Support:** Configuration, error types and activity statistics.
//!
//! ```
//! use nlsim_core::{Config, NetlistGraph, RomStore, Simulator};
//! use nlsim_core::netlist::NetlistBuilder;
//! use nlsim_core::sim::InputVector;
//!
//! let desc = NetlistBuilder::new("and_gate")
//!     .input("a", 1)
//!     .input("b", 1)
//!     .and("o", 1, "a", "b")
//!     .output("o")
//!     .build();
//! let config = Config::default();
//! let graph = NetlistGraph::build(&desc, &config)?;
//! let rom = RomStore::for_graph(&graph, &config);
//! let mut sim = Simulator::new(graph, rom, &config);
//!
//! let out = sim.step(&InputVector::new().with("a", 1).with("b", 1))?;
//! assert_eq!(out.get("o"), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Common types (net identifiers, bus value helpers, errors).
pub mod common;
/// Simulator configuration.
pub mod config;
/// Netlist descriptions, builder and compiler.
pub mod netlist;
/// ROM images and storage.
pub mod rom;
/// Simulation session, engines and file loading.
pub mod sim;
/// Simulation statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Compiled netlist; build one with `NetlistGraph::build`.
pub use crate::netlist::NetlistGraph;
/// ROM contents for a compiled netlist.
pub use crate::rom::RomStore;
/// Simulation session.
pub use crate::sim::Simulator;
