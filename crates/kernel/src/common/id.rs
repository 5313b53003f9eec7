//! Net identifiers.
//!
//! Nets are stored in a flat table owned by the simulation session. A `NetId` is the
//! position of a net in that table; it is assigned once when the netlist is compiled
//! and never changes afterwards.

use std::fmt;

/// Index of a net in the compiled netlist's net table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetId(pub u32);

impl NetId {
    /// Creates a net identifier from a table index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the table index of this net.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}
