//! Simulator: owns a compiled netlist and all of its run-time state.
//!
//! A step proceeds in three phases:
//! 1. **Settling:** Input pins take the step's values and every gate runs once in
//!    schedule order. Register nets still hold the previous step's values.
//! 2. **Capture:** Output pins are read from the settled nets.
//! 3. **Committing:** Register next values and RAM write ports are sampled, then every
//!    register is latched at once and the RAM writes are applied.
//!
//! The input vector is checked before any phase starts, so a rejected step changes
//! nothing.

use tracing::{debug, trace, warn};

use crate::common::error::StepError;
use crate::common::id::NetId;
use crate::common::value::fits;
use crate::config::Config;
use crate::netlist::graph::NetlistGraph;
use crate::rom::RomStore;
use crate::sim::evaluator::{self, Memories};
use crate::sim::sequential::{RamStore, SequentialUpdater, StateSnapshot};
use crate::sim::vector::{InputVector, OutputVector};
use crate::stats::SimStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Settling,
    Committing,
}

/// One simulation session.
#[derive(Debug, Clone)]
pub struct Simulator {
    graph: NetlistGraph,
    rom: RomStore,
    ram: RamStore,
    nets: Vec<u64>,
    sequential: SequentialUpdater,
    stats: SimStats,
    trace_steps: bool,
    collect_stats: bool,
}

impl Simulator {
    /// Creates a session with every register at its initial value and RAM cleared.
    ///
    /// # Arguments
    ///
    /// * `graph` - Compiled netlist.
    /// * `rom` - ROM contents; may be left unloaded, in which case ROM reads return the
    ///   default word.
    /// * `config` - Step tracing and statistics switches.
    pub fn new(graph: NetlistGraph, rom: RomStore, config: &Config) -> Self {
        if !rom.is_empty() && !rom.is_loaded() {
            warn!(
                netlist = graph.name(),
                blocks = rom.len(),
                "netlist has ROM blocks but no ROM image is loaded; ROM reads return the default word"
            );
        }
        let mut nets = vec![0; graph.nets().len()];
        let mut sequential = SequentialUpdater::new(&graph);
        sequential.reset(&mut nets);
        let ram = RamStore::for_graph(&graph);
        Self {
            graph,
            rom,
            ram,
            nets,
            sequential,
            stats: SimStats::default(),
            trace_steps: config.general.trace_steps,
            collect_stats: config.general.collect_stats,
        }
    }

    /// Runs one step.
    ///
    /// # Arguments
    ///
    /// * `inputs` - A value for every input pin and nothing else.
    ///
    /// # Returns
    ///
    /// The output pin values, observed after settlement and before the registers latch.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if the vector does not match the input pins. No state
    /// changes in that case.
    pub fn step(&mut self, inputs: &InputVector) -> Result<OutputVector, StepError> {
        let assignments = self.check_inputs(inputs)?;

        trace!(phase = ?Phase::Settling, step = self.stats.steps);
        for (net, value) in assignments {
            self.nets[net.index()] = value;
        }
        let evaluated = evaluator::settle(&self.graph, &mut self.nets, &Memories::new(&self.rom, &self.ram));

        let outputs = OutputVector::new(
            self.graph
                .outputs()
                .iter()
                .map(|pin| (pin.name.clone(), self.nets[pin.net.index()]))
                .collect(),
        );

        trace!(phase = ?Phase::Committing, step = self.stats.steps);
        self.sequential.sample(&self.nets);
        let committed = self.sequential.commit(&mut self.nets, &mut self.ram);
        trace!(step = self.stats.steps, "step complete");

        if self.trace_steps {
            debug!(step = self.stats.steps, inputs = ?inputs, outputs = %outputs, "step");
        }
        if self.collect_stats {
            self.stats.steps += 1;
            self.stats.gate_evaluations += evaluated as u64;
            self.stats.register_commits += committed.registers as u64;
            self.stats.ram_writes += committed.ram_writes as u64;
        }
        Ok(outputs)
    }

    /// Runs one step per input vector, stopping at the first rejected vector.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepError`]; steps before it have already taken effect.
    pub fn run<I>(&mut self, inputs: I) -> Result<Vec<OutputVector>, StepError>
    where
        I: IntoIterator<Item = InputVector>,
    {
        inputs.into_iter().map(|v| self.step(&v)).collect()
    }

    /// Value of a net after the last step.
    ///
    /// Combinational nets hold their settled value; register nets hold the value
    /// latched at the end of the step, which is what the next step will see.
    pub fn peek(&self, net: &str) -> Option<u64> {
        self.graph.net(net).map(|id| self.nets[id.index()])
    }

    /// Current register values and non-zero RAM cells.
    pub fn snapshot(&self) -> StateSnapshot {
        let registers = self
            .sequential
            .registers()
            .iter()
            .map(|r| (self.graph.net_info(r.current).name.clone(), self.nets[r.current.index()]))
            .collect();
        let rams = self
            .graph
            .rams()
            .iter()
            .enumerate()
            .map(|(block, r)| (r.name.clone(), self.ram.non_zero(block)))
            .collect();
        StateSnapshot { registers, rams }
    }

    /// Returns the circuit to power-on state: registers at their initial values,
    /// RAM cleared and every other net zero. ROM contents and statistics are kept.
    pub fn reset(&mut self) {
        self.nets.fill(0);
        self.ram.clear();
        self.sequential.reset(&mut self.nets);
        debug!(netlist = self.graph.name(), "reset");
    }

    /// Compiled netlist.
    pub const fn graph(&self) -> &NetlistGraph {
        &self.graph
    }

    /// ROM contents.
    pub const fn rom(&self) -> &RomStore {
        &self.rom
    }

    /// Activity counters.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn check_inputs(&self, inputs: &InputVector) -> Result<Vec<(NetId, u64)>, StepError> {
        let pins = self.graph.inputs();
        for pin in pins {
            if inputs.get(&pin.name).is_none() {
                return Err(StepError::MissingInput(pin.name.clone()));
            }
        }
        for (name, _) in inputs.iter() {
            if !pins.iter().any(|p| p.name == name) {
                return Err(StepError::UnknownInput(name.to_owned()));
            }
        }
        pins.iter()
            .map(|pin| {
                let value = inputs.get(&pin.name).unwrap_or_default();
                if fits(value, pin.width) {
                    Ok((pin.net, value))
                } else {
                    Err(StepError::ValueOutOfRange {
                        pin: pin.name.clone(),
                        value,
                        width: pin.width,
                    })
                }
            })
            .collect()
    }
}
