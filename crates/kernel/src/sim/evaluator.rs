//! Combinational settlement.
//!
//! Gates run once each, in the order fixed when the netlist was compiled. Because the
//! order is topological, one pass leaves every net at its settled value; no iteration
//! to a fixed point is needed.

use crate::netlist::gate::MemoryRead;
use crate::netlist::graph::NetlistGraph;
use crate::rom::RomStore;
use crate::sim::sequential::RamStore;

/// Memory read ports seen by gates during settlement.
#[derive(Debug, Clone, Copy)]
pub struct Memories<'a> {
    rom: &'a RomStore,
    ram: &'a RamStore,
}

impl<'a> Memories<'a> {
    /// Bundles the ROM and the current RAM contents.
    pub const fn new(rom: &'a RomStore, ram: &'a RamStore) -> Self {
        Self { rom, ram }
    }
}

impl MemoryRead for Memories<'_> {
    #[inline]
    fn rom(&self, block: usize, address: u64) -> u64 {
        self.rom.read(block, address)
    }

    #[inline]
    fn ram(&self, block: usize, address: u64) -> u64 {
        self.ram.read(block, address)
    }
}

/// Evaluates every gate of `graph` in schedule order.
///
/// Input pins and register nets must already hold this step's values.
///
/// # Arguments
///
/// * `graph` - Compiled netlist.
/// * `nets` - Net table, updated in place.
/// * `mem` - Memory read ports.
///
/// # Returns
///
/// The number of gates evaluated.
pub fn settle<M: MemoryRead + ?Sized>(graph: &NetlistGraph, nets: &mut [u64], mem: &M) -> usize {
    let gates = graph.gates();
    for &index in graph.schedule() {
        let gate = &gates[index];
        let value = gate.eval(nets, mem);
        nets[gate.output.index()] = value;
    }
    graph.schedule().len()
}
