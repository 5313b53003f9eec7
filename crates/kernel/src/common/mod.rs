//! Common types shared by every part of the simulator.
//!
//! This module provides the fundamental building blocks used across the kernel:
//! 1. **Bus Values:** Width masks and bit-field helpers for values of 1 to 64 bits.
//! 2. **Identifiers:** Strong index types for nets and the blocks that own state.
//! 3. **Error Handling:** Load-time, ROM, step and configuration error types.

/// Error types for netlist compilation, ROM loading, stepping and configuration.
pub mod error;

/// Strongly typed indices into the net table.
pub mod id;

/// Bus width masks and bit-field extraction.
pub mod value;

pub use error::{ConfigError, NetlistError, RomError, StepError};
pub use id::NetId;
pub use value::{MAX_BUS_WIDTH, fits, mask};
