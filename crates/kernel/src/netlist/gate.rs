//! Compiled combinational gates.
//!
//! This module defines the gate representation used on the evaluation hot path. It
//! provides:
//! 1. **Sources:** Pre-resolved operands, either a net index or a constant.
//! 2. **Gate kinds:** The pure functions a gate can compute, bit extraction and memory
//!    reads included.
//! 3. **Evaluation:** `Gate::eval`, a total function of the net table and memory contents.
//!
//! `select`, `slice` and `snip` all compile to [`GateKind::Bits`]; they differ only in
//! how the generator writes their bounds.

use crate::common::id::NetId;
use crate::common::value::{bits, mask};

/// A resolved gate operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Current value of a net.
    Net(NetId),
    /// Constant value, already checked against its width.
    Const(u64),
}

impl Source {
    /// Reads the operand from the net table.
    #[inline(always)]
    pub fn read(self, nets: &[u64]) -> u64 {
        match self {
            Self::Net(id) => nets[id.index()],
            Self::Const(value) => value,
        }
    }

    /// Returns the net this operand reads, if any.
    pub const fn net(self) -> Option<NetId> {
        match self {
            Self::Net(id) => Some(id),
            Self::Const(_) => None,
        }
    }
}

/// Function computed by a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Forwards input 0.
    Copy,
    /// Complement of input 0, masked to the gate width.
    Not,
    /// `in0 & in1`.
    And,
    /// `in0 | in1`.
    Or,
    /// `in0 ^ in1`.
    Xor,
    /// `!(in0 & in1)`, masked.
    Nand,
    /// `!(in0 ^ in1)`, masked.
    Nxor,
    /// `in1` when `in0` is zero, else `in2`.
    Mux,
    /// `(in0 << low_width) | in1`.
    Concat {
        /// Width of the low operand.
        low_width: u32,
    },
    /// `width` bits of input 0 starting at `low`.
    Bits {
        /// Lowest extracted bit.
        low: u32,
    },
    /// Word of ROM block `block` at address input 0.
    RomRead {
        /// Index into the graph's ROM blocks.
        block: usize,
    },
    /// Word of RAM block `block` at address input 0.
    RamRead {
        /// Index into the graph's RAM blocks.
        block: usize,
    },
}

/// Read access to addressable memories during combinational evaluation.
///
/// Reads must be pure: calling them any number of times within a step returns the
/// same value and changes nothing.
pub trait MemoryRead {
    /// Reads ROM block `block` at `address`; addresses outside the image yield a default.
    fn rom(&self, block: usize, address: u64) -> u64;

    /// Reads the current contents of RAM block `block` at `address`.
    fn ram(&self, block: usize, address: u64) -> u64;
}

/// A compiled combinational gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// Function computed.
    pub kind: GateKind,
    /// Ordered operands.
    pub inputs: Vec<Source>,
    /// Net driven by this gate.
    pub output: NetId,
    /// Output width in bits.
    pub width: u32,
}

impl Gate {
    /// Computes the gate output from the net table and memory contents.
    ///
    /// # Arguments
    ///
    /// * `nets` - Net table; every operand net must already hold its settled value.
    /// * `mem` - ROM and RAM read ports.
    ///
    /// # Returns
    ///
    /// The output value, masked to the gate width.
    #[inline]
    pub fn eval<M: MemoryRead + ?Sized>(&self, nets: &[u64], mem: &M) -> u64 {
        let arg = |i: usize| self.inputs[i].read(nets);
        let m = mask(self.width);
        match self.kind {
            GateKind::Copy => arg(0),
            GateKind::Not => !arg(0) & m,
            GateKind::And => arg(0) & arg(1),
            GateKind::Or => arg(0) | arg(1),
            GateKind::Xor => arg(0) ^ arg(1),
            GateKind::Nand => !(arg(0) & arg(1)) & m,
            GateKind::Nxor => !(arg(0) ^ arg(1)) & m,
            GateKind::Mux => {
                if arg(0) == 0 {
                    arg(1)
                } else {
                    arg(2)
                }
            }
            GateKind::Concat { low_width } => ((arg(0) << low_width) | arg(1)) & m,
            GateKind::Bits { low } => bits(arg(0), low, self.width),
            GateKind::RomRead { block } => mem.rom(block, arg(0)) & m,
            GateKind::RamRead { block } => mem.ram(block, arg(0)) & m,
        }
    }

    /// Iterates over the nets this gate reads.
    pub fn input_nets(&self) -> impl Iterator<Item = NetId> + '_ {
        self.inputs.iter().filter_map(|s| s.net())
    }
}
