//! Clocked state: registers and RAM.
//!
//! This module keeps everything that survives from one step to the next. It provides:
//! 1. **RAM storage:** Dense or sparse word storage per RAM block.
//! 2. **Sampling:** Capture of register next values and RAM write ports once the
//!    combinational logic has settled.
//! 3. **Commit:** Simultaneous update of every register, followed by the sampled RAM
//!    writes.
//!
//! Register values live in the net table (the register's own net); the updater only
//! holds the values waiting to be committed.

use std::collections::HashMap;

use crate::common::value::{address_space, mask};
use crate::netlist::graph::{NetlistGraph, RamBlock, Register};

/// Address widths up to this many bits get a flat vector; wider blocks are sparse.
const DENSE_ADDR_LIMIT: u32 = 16;

/// Word storage of one RAM block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cells {
    Dense(Vec<u64>),
    Sparse(HashMap<u64, u64>),
}

impl Cells {
    fn new(addr_width: u32) -> Self {
        if addr_width <= DENSE_ADDR_LIMIT {
            Self::Dense(vec![0; address_space(addr_width)])
        } else {
            Self::Sparse(HashMap::new())
        }
    }

    fn read(&self, address: u64) -> u64 {
        match self {
            Self::Dense(words) => usize::try_from(address)
                .ok()
                .and_then(|a| words.get(a))
                .copied()
                .unwrap_or(0),
            Self::Sparse(words) => words.get(&address).copied().unwrap_or(0),
        }
    }

    fn write(&mut self, address: u64, value: u64) {
        match self {
            Self::Dense(words) => {
                if let Some(slot) = usize::try_from(address).ok().and_then(|a| words.get_mut(a)) {
                    *slot = value;
                }
            }
            Self::Sparse(words) => {
                if value == 0 {
                    let _ = words.remove(&address);
                } else {
                    let _ = words.insert(address, value);
                }
            }
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Dense(words) => words.fill(0),
            Self::Sparse(words) => words.clear(),
        }
    }

    /// Non-zero cells, in ascending address order.
    fn non_zero(&self) -> Vec<(u64, u64)> {
        let mut cells: Vec<(u64, u64)> = match self {
            Self::Dense(words) => words
                .iter()
                .enumerate()
                .filter(|&(_, &w)| w != 0)
                .map(|(a, &w)| (a as u64, w))
                .collect(),
            Self::Sparse(words) => words.iter().map(|(&a, &w)| (a, w)).collect(),
        };
        cells.sort_unstable_by_key(|&(a, _)| a);
        cells
    }
}

/// Contents of every RAM block, all cells starting at zero.
#[derive(Debug, Clone)]
pub struct RamStore {
    blocks: Vec<Cells>,
}

impl RamStore {
    /// Allocates one cleared block per RAM of `graph`.
    pub fn for_graph(graph: &NetlistGraph) -> Self {
        Self {
            blocks: graph.rams().iter().map(|r| Cells::new(r.addr_width)).collect(),
        }
    }

    /// Reads a word of block `block`.
    #[inline]
    pub fn read(&self, block: usize, address: u64) -> u64 {
        self.blocks.get(block).map_or(0, |b| b.read(address))
    }

    /// Writes a word of block `block`.
    pub fn write(&mut self, block: usize, address: u64, value: u64) {
        if let Some(b) = self.blocks.get_mut(block) {
            b.write(address, value);
        }
    }

    /// Clears every block.
    pub fn clear(&mut self) {
        self.blocks.iter_mut().for_each(Cells::clear);
    }

    /// Non-zero cells of block `block`, in ascending address order.
    pub fn non_zero(&self, block: usize) -> Vec<(u64, u64)> {
        self.blocks.get(block).map(Cells::non_zero).unwrap_or_default()
    }
}

/// A RAM write captured after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingWrite {
    block: usize,
    address: u64,
    data: u64,
}

/// What one commit changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Registers latched.
    pub registers: usize,
    /// RAM words written.
    pub ram_writes: usize,
}

/// Two-phase update of registers and RAM at the end of a step.
#[derive(Debug, Clone)]
pub struct SequentialUpdater {
    registers: Vec<Register>,
    rams: Vec<RamBlock>,
    pending: Vec<u64>,
    writes: Vec<PendingWrite>,
}

impl SequentialUpdater {
    /// Creates an updater for the registers and RAM write ports of `graph`.
    pub fn new(graph: &NetlistGraph) -> Self {
        Self {
            registers: graph.registers().to_vec(),
            rams: graph.rams().to_vec(),
            pending: Vec::with_capacity(graph.registers().len()),
            writes: Vec::new(),
        }
    }

    /// Captures register next values and enabled RAM writes from settled nets.
    ///
    /// Nothing visible changes until [`commit`](Self::commit).
    pub fn sample(&mut self, nets: &[u64]) {
        self.pending.clear();
        self.pending
            .extend(self.registers.iter().map(|r| r.next.read(nets) & mask(r.width)));

        self.writes.clear();
        for (block, ram) in self.rams.iter().enumerate() {
            if ram.write_enable.read(nets) != 0 {
                self.writes.push(PendingWrite {
                    block,
                    address: ram.write_addr.read(nets) & mask(ram.addr_width),
                    data: ram.write_data.read(nets) & mask(ram.word_width),
                });
            }
        }
    }

    /// Latches every sampled register value at once, then applies sampled RAM writes.
    ///
    /// # Arguments
    ///
    /// * `nets` - Net table; register nets receive their new values.
    /// * `ram` - RAM contents receiving the sampled writes.
    ///
    /// # Returns
    ///
    /// How many registers and RAM words were updated.
    pub fn commit(&mut self, nets: &mut [u64], ram: &mut RamStore) -> CommitSummary {
        for (reg, &value) in self.registers.iter().zip(&self.pending) {
            nets[reg.current.index()] = value;
        }
        for w in &self.writes {
            ram.write(w.block, w.address, w.data);
        }
        let summary = CommitSummary {
            registers: self.pending.len(),
            ram_writes: self.writes.len(),
        };
        self.pending.clear();
        self.writes.clear();
        summary
    }

    /// Puts every register back to its initial value and drops anything sampled.
    pub fn reset(&mut self, nets: &mut [u64]) {
        for reg in &self.registers {
            nets[reg.current.index()] = reg.init;
        }
        self.pending.clear();
        self.writes.clear();
    }

    /// Registers handled by this updater.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }
}

/// Sequential state of a session: register values and non-zero RAM cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    /// `(register name, value)`, in description order.
    pub registers: Vec<(String, u64)>,
    /// `(RAM name, non-zero (address, word) cells)`, in description order.
    pub rams: Vec<(String, Vec<(u64, u64)>)>,
}

impl StateSnapshot {
    /// Value of the named register, if any.
    pub fn register(&self, name: &str) -> Option<u64> {
        self.registers.iter().find(|(n, _)| n == name).map(|&(_, v)| v)
    }
}
