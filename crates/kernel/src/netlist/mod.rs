//! Netlist descriptions and their compiled form.
//!
//! This module covers everything that happens before the first step. It provides:
//! 1. **Descriptions:** The generator-facing data shape (`NetlistDesc`) and its JSON form.
//! 2. **Providers:** The `NetlistProvider` trait the compiler reads descriptions through.
//! 3. **Builder:** A fluent API for assembling descriptions in code.
//! 4. **Compilation:** Validation, width typing and scheduling into a `NetlistGraph`.

/// Fluent builder for netlist descriptions.
pub mod builder;

/// Generator-produced netlist descriptions and their JSON form.
pub mod desc;

/// Compiled combinational gates and their evaluation.
pub mod gate;

/// Compiled, validated netlist graph.
pub mod graph;

/// Abstraction over circuit description sources.
pub mod provider;

/// Topological scheduling and cycle detection.
pub mod schedule;

pub use builder::NetlistBuilder;
pub use desc::{Equation, NetDecl, NetlistDesc, Op, Operand};
pub use gate::{Gate, GateKind, MemoryRead, Source};
pub use graph::{NetInfo, NetlistGraph, Pin, RamBlock, Register, RomBlock};
pub use provider::NetlistProvider;
