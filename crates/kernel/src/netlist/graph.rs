//! Compiled netlist graph.
//!
//! This module turns a description into the immutable structure the simulator runs.
//! Compilation performs:
//! 1. **Net table:** Assigns a `NetId` to every declared net and checks bus widths.
//! 2. **Typing:** Checks operand counts and widths of every equation, inferring the
//!    width of untyped constants from their position.
//! 3. **Drivers:** Checks that every net has exactly one driver.
//! 4. **Scheduling:** Orders gates topologically and rejects combinational cycles.
//!
//! Every failure is reported here, before any step runs.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::common::error::NetlistError;
use crate::common::id::NetId;
use crate::common::value::fits;
use crate::config::Config;
use crate::netlist::desc::{Equation, Op, Operand};
use crate::netlist::gate::{Gate, GateKind, Source};
use crate::netlist::provider::NetlistProvider;
use crate::netlist::schedule;

/// A declared net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetInfo {
    /// Net name.
    pub name: String,
    /// Width in bits.
    pub width: u32,
}

/// An external input or output pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    /// Pin name (the name of the net it is attached to).
    pub name: String,
    /// Net carrying the pin value.
    pub net: NetId,
    /// Width in bits.
    pub width: u32,
}

/// A clocked storage cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    /// Net holding the value visible during the step.
    pub current: NetId,
    /// Operand sampled after settlement and latched at commit.
    pub next: Source,
    /// Width in bits.
    pub width: u32,
    /// Value before the first commit and after a reset.
    pub init: u64,
}

/// A read-only memory block addressed by a `rom` equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomBlock {
    /// Block name (the target net of its `rom` equation).
    pub name: String,
    /// Address width in bits.
    pub addr_width: u32,
    /// Word width in bits.
    pub word_width: u32,
}

/// A read/write memory block addressed by a `ram` equation.
///
/// Reads are combinational through a [`GateKind::RamRead`] gate; the write port is
/// sampled after settlement and applied at commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamBlock {
    /// Block name (the target net of its `ram` equation).
    pub name: String,
    /// Address width in bits.
    pub addr_width: u32,
    /// Word width in bits.
    pub word_width: u32,
    /// Write strobe; a write happens when non-zero.
    pub write_enable: Source,
    /// Write address.
    pub write_addr: Source,
    /// Write data.
    pub write_data: Source,
}

/// Immutable, validated representation of one circuit.
#[derive(Debug, Clone)]
pub struct NetlistGraph {
    name: String,
    nets: Vec<NetInfo>,
    by_name: HashMap<String, NetId>,
    inputs: Vec<Pin>,
    outputs: Vec<Pin>,
    gates: Vec<Gate>,
    registers: Vec<Register>,
    roms: Vec<RomBlock>,
    rams: Vec<RamBlock>,
    schedule: Vec<usize>,
}

impl NetlistGraph {
    /// Compiles a netlist description.
    ///
    /// # Arguments
    ///
    /// * `provider` - Any source of nets, pins and equations.
    /// * `config` - Supplies the bus width limit.
    ///
    /// # Errors
    ///
    /// Returns the first structural or typing problem found; see [`NetlistError`].
    pub fn build<P: NetlistProvider + ?Sized>(provider: &P, config: &Config) -> Result<Self, NetlistError> {
        let mut compiler = Compiler::new(config.netlist.max_bus_width);
        compiler.declare_nets(provider)?;
        let inputs = compiler.pins(provider.inputs(), true)?;
        let outputs = compiler.pins(provider.outputs(), false)?;
        for eq in provider.equations() {
            compiler.equation(eq)?;
        }
        compiler.check_drivers()?;

        let schedule = schedule::topological_order(&compiler.gates, &compiler.producer).map_err(|cycle| {
            let mut path: Vec<String> = cycle
                .iter()
                .map(|&g| compiler.nets[compiler.gates[g].output.index()].name.clone())
                .collect();
            if let Some(first) = path.first().cloned() {
                path.push(first);
            }
            NetlistError::CombinationalCycle { path }
        })?;

        let graph = Self {
            name: provider.name().to_owned(),
            nets: compiler.nets,
            by_name: compiler.by_name,
            inputs,
            outputs,
            gates: compiler.gates,
            registers: compiler.registers,
            roms: compiler.roms,
            rams: compiler.rams,
            schedule,
        };
        info!(
            netlist = %graph.name,
            nets = graph.nets.len(),
            gates = graph.gates.len(),
            registers = graph.registers.len(),
            roms = graph.roms.len(),
            rams = graph.rams.len(),
            "compiled netlist"
        );
        Ok(graph)
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All nets, indexed by [`NetId::index`].
    pub fn nets(&self) -> &[NetInfo] {
        &self.nets
    }

    /// Looks up a net by name.
    pub fn net(&self, name: &str) -> Option<NetId> {
        self.by_name.get(name).copied()
    }

    /// Returns the declaration of a net.
    pub fn net_info(&self, id: NetId) -> &NetInfo {
        &self.nets[id.index()]
    }

    /// Input pins, in declaration order.
    pub fn inputs(&self) -> &[Pin] {
        &self.inputs
    }

    /// Output pins, in declaration order.
    pub fn outputs(&self) -> &[Pin] {
        &self.outputs
    }

    /// Combinational gates, in description order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Registers, in description order.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// ROM blocks, in description order.
    pub fn roms(&self) -> &[RomBlock] {
        &self.roms
    }

    /// RAM blocks, in description order.
    pub fn rams(&self) -> &[RamBlock] {
        &self.rams
    }

    /// Gate indices in evaluation order.
    pub fn schedule(&self) -> &[usize] {
        &self.schedule
    }
}

/// Mutable state while compiling one description.
struct Compiler {
    max_width: u32,
    nets: Vec<NetInfo>,
    by_name: HashMap<String, NetId>,
    drivers: Vec<usize>,
    producer: Vec<Option<usize>>,
    gates: Vec<Gate>,
    registers: Vec<Register>,
    roms: Vec<RomBlock>,
    rams: Vec<RamBlock>,
}

/// Context of the equation being compiled, for error reporting.
struct Ctx<'a> {
    net: &'a str,
    op: Op,
}

impl Ctx<'_> {
    fn width_mismatch(&self, what: &'static str, expected: u32, found: u32) -> NetlistError {
        NetlistError::WidthMismatch {
            net: self.net.to_owned(),
            op: self.op.name(),
            what,
            expected,
            found,
        }
    }

    fn expect_width(&self, what: &'static str, expected: u32, found: u32) -> Result<(), NetlistError> {
        if expected == found {
            Ok(())
        } else {
            Err(self.width_mismatch(what, expected, found))
        }
    }

    fn bit_range(&self, low: u32, high: u32, width: u32) -> NetlistError {
        NetlistError::BitRange {
            net: self.net.to_owned(),
            op: self.op.name(),
            low,
            high,
            width,
        }
    }
}

impl Compiler {
    fn new(max_width: u32) -> Self {
        Self {
            max_width,
            nets: Vec::new(),
            by_name: HashMap::new(),
            drivers: Vec::new(),
            producer: Vec::new(),
            gates: Vec::new(),
            registers: Vec::new(),
            roms: Vec::new(),
            rams: Vec::new(),
        }
    }

    fn declare_nets<P: NetlistProvider + ?Sized>(&mut self, provider: &P) -> Result<(), NetlistError> {
        for decl in provider.nets() {
            if decl.width == 0 || decl.width > self.max_width {
                return Err(NetlistError::InvalidWidth {
                    net: decl.name.clone(),
                    width: decl.width,
                    max: self.max_width,
                });
            }
            if self.by_name.contains_key(&decl.name) {
                return Err(NetlistError::DuplicateNet(decl.name.clone()));
            }
            let id = NetId::new(self.nets.len());
            let _ = self.by_name.insert(decl.name.clone(), id);
            self.nets.push(NetInfo {
                name: decl.name.clone(),
                width: decl.width,
            });
        }
        self.drivers = vec![0; self.nets.len()];
        self.producer = vec![None; self.nets.len()];
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<NetId, NetlistError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NetlistError::UnknownNet(name.to_owned()))
    }

    fn width(&self, id: NetId) -> u32 {
        self.nets[id.index()].width
    }

    fn pins(&mut self, names: &[String], driving: bool) -> Result<Vec<Pin>, NetlistError> {
        let mut seen = HashSet::new();
        let mut pins = Vec::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(NetlistError::DuplicatePin(name.clone()));
            }
            let net = self.lookup(name)?;
            if driving {
                self.drivers[net.index()] += 1;
            }
            pins.push(Pin {
                name: name.clone(),
                net,
                width: self.width(net),
            });
        }
        Ok(pins)
    }

    /// Resolves an operand, inferring an untyped constant's width from `expected`.
    fn operand(&self, ctx: &Ctx<'_>, operand: &Operand, expected: Option<u32>) -> Result<(Source, u32), NetlistError> {
        match operand {
            Operand::Net(name) => {
                let id = self.lookup(name)?;
                Ok((Source::Net(id), self.width(id)))
            }
            Operand::Const { value, width } => {
                let width = width.or(expected).ok_or_else(|| NetlistError::UntypedConstant {
                    net: ctx.net.to_owned(),
                    op: ctx.op.name(),
                    value: *value,
                })?;
                if width == 0 || width > self.max_width {
                    return Err(NetlistError::InvalidWidth {
                        net: format!("{}:{:#x}", ctx.net, value),
                        width,
                        max: self.max_width,
                    });
                }
                if !fits(*value, width) {
                    return Err(NetlistError::ValueTooWide {
                        net: ctx.net.to_owned(),
                        value: *value,
                        width,
                    });
                }
                Ok((Source::Const(*value), width))
            }
        }
    }

    fn check_arity(ctx: &Ctx<'_>, eq: &Equation) -> Result<(), NetlistError> {
        let (operands, params) = eq.op.signature();
        if eq.args.len() != operands {
            return Err(NetlistError::Arity {
                net: ctx.net.to_owned(),
                op: ctx.op.name(),
                what: "operands",
                expected: operands,
                found: eq.args.len(),
            });
        }
        if eq.params.len() != params {
            return Err(NetlistError::Arity {
                net: ctx.net.to_owned(),
                op: ctx.op.name(),
                what: "parameters",
                expected: params,
                found: eq.params.len(),
            });
        }
        if eq.init.is_some() && eq.op != Op::Reg {
            return Err(NetlistError::UnexpectedInit {
                net: ctx.net.to_owned(),
                op: ctx.op.name(),
            });
        }
        Ok(())
    }

    fn push_gate(&mut self, kind: GateKind, inputs: Vec<Source>, output: NetId, width: u32) -> usize {
        let index = self.gates.len();
        self.producer[output.index()] = Some(index);
        self.gates.push(Gate {
            kind,
            inputs,
            output,
            width,
        });
        index
    }

    fn equation(&mut self, eq: &Equation) -> Result<(), NetlistError> {
        let ctx = Ctx {
            net: &eq.target,
            op: eq.op,
        };
        let target = self.lookup(&eq.target)?;
        let width = self.width(target);
        self.drivers[target.index()] += 1;
        Self::check_arity(&ctx, eq)?;

        match eq.op {
            Op::Copy | Op::Not => {
                let (a, aw) = self.operand(&ctx, &eq.args[0], Some(width))?;
                ctx.expect_width("operand", width, aw)?;
                let kind = if eq.op == Op::Copy { GateKind::Copy } else { GateKind::Not };
                let _ = self.push_gate(kind, vec![a], target, width);
            }
            Op::And | Op::Or | Op::Xor | Op::Nand | Op::Nxor => {
                let (a, aw) = self.operand(&ctx, &eq.args[0], Some(width))?;
                let (b, bw) = self.operand(&ctx, &eq.args[1], Some(width))?;
                ctx.expect_width("left operand", width, aw)?;
                ctx.expect_width("right operand", width, bw)?;
                let kind = match eq.op {
                    Op::And => GateKind::And,
                    Op::Or => GateKind::Or,
                    Op::Xor => GateKind::Xor,
                    Op::Nand => GateKind::Nand,
                    _ => GateKind::Nxor,
                };
                let _ = self.push_gate(kind, vec![a, b], target, width);
            }
            Op::Mux => {
                let (sel, sw) = self.operand(&ctx, &eq.args[0], Some(1))?;
                let (a, aw) = self.operand(&ctx, &eq.args[1], Some(width))?;
                let (b, bw) = self.operand(&ctx, &eq.args[2], Some(width))?;
                ctx.expect_width("selector", 1, sw)?;
                ctx.expect_width("first input", width, aw)?;
                ctx.expect_width("second input", width, bw)?;
                let _ = self.push_gate(GateKind::Mux, vec![sel, a, b], target, width);
            }
            Op::Concat => self.concat(&ctx, eq, target, width)?,
            Op::Select | Op::Slice | Op::Snip => self.extract(&ctx, eq, target, width)?,
            Op::Reg => {
                let (next, nw) = self.operand(&ctx, &eq.args[0], Some(width))?;
                ctx.expect_width("next value", width, nw)?;
                let init = eq.init.unwrap_or(0);
                if !fits(init, width) {
                    return Err(NetlistError::ValueTooWide {
                        net: eq.target.clone(),
                        value: init,
                        width,
                    });
                }
                self.registers.push(Register {
                    current: target,
                    next,
                    width,
                    init,
                });
            }
            Op::Rom => {
                let (addr_width, word_width) = self.memory_params(&ctx, eq, width)?;
                let (addr, aw) = self.operand(&ctx, &eq.args[0], Some(addr_width))?;
                ctx.expect_width("address", addr_width, aw)?;
                let block = self.roms.len();
                self.roms.push(RomBlock {
                    name: eq.target.clone(),
                    addr_width,
                    word_width,
                });
                let _ = self.push_gate(GateKind::RomRead { block }, vec![addr], target, width);
            }
            Op::Ram => {
                let (addr_width, word_width) = self.memory_params(&ctx, eq, width)?;
                let (read_addr, rw) = self.operand(&ctx, &eq.args[0], Some(addr_width))?;
                let (write_enable, ew) = self.operand(&ctx, &eq.args[1], Some(1))?;
                let (write_addr, ww) = self.operand(&ctx, &eq.args[2], Some(addr_width))?;
                let (write_data, dw) = self.operand(&ctx, &eq.args[3], Some(word_width))?;
                ctx.expect_width("read address", addr_width, rw)?;
                ctx.expect_width("write enable", 1, ew)?;
                ctx.expect_width("write address", addr_width, ww)?;
                ctx.expect_width("write data", word_width, dw)?;
                let block = self.rams.len();
                self.rams.push(RamBlock {
                    name: eq.target.clone(),
                    addr_width,
                    word_width,
                    write_enable,
                    write_addr,
                    write_data,
                });
                let _ = self.push_gate(GateKind::RamRead { block }, vec![read_addr], target, width);
            }
        }
        Ok(())
    }

    fn concat(&mut self, ctx: &Ctx<'_>, eq: &Equation, target: NetId, width: u32) -> Result<(), NetlistError> {
        // An untyped constant on one side takes whatever width the other side leaves.
        let known = |op: &Operand| match op {
            Operand::Net(name) => self.lookup(name).map(|id| Some(self.width(id))),
            Operand::Const { width, .. } => Ok(*width),
        };
        let hi_known = known(&eq.args[0])?;
        let lo_known = known(&eq.args[1])?;
        let rest = |other: Option<u32>| other.and_then(|w| width.checked_sub(w)).filter(|&w| w > 0);

        let (hi, hw) = self.operand(ctx, &eq.args[0], rest(lo_known))?;
        let (lo, lw) = self.operand(ctx, &eq.args[1], rest(hi_known))?;
        ctx.expect_width("result", width, hw + lw)?;
        let _ = self.push_gate(GateKind::Concat { low_width: lw }, vec![hi, lo], target, width);
        Ok(())
    }

    fn extract(&mut self, ctx: &Ctx<'_>, eq: &Equation, target: NetId, width: u32) -> Result<(), NetlistError> {
        let (a, aw) = self.operand(ctx, &eq.args[0], None)?;
        let (low, count) = match eq.op {
            Op::Select => {
                let index = eq.params[0];
                if index >= aw {
                    return Err(ctx.bit_range(index, index, aw));
                }
                (index, 1)
            }
            Op::Slice => {
                let (low, high) = (eq.params[0], eq.params[1]);
                if low > high || high >= aw {
                    return Err(ctx.bit_range(low, high, aw));
                }
                (low, high - low + 1)
            }
            _ => {
                let (low, high) = (eq.params[0], eq.params[1]);
                if low >= high || high > aw {
                    return Err(ctx.bit_range(low, high, aw));
                }
                (low, high - low)
            }
        };
        ctx.expect_width("result", width, count)?;
        let _ = self.push_gate(GateKind::Bits { low }, vec![a], target, width);
        Ok(())
    }

    fn memory_params(&self, ctx: &Ctx<'_>, eq: &Equation, width: u32) -> Result<(u32, u32), NetlistError> {
        let (addr_width, word_width) = (eq.params[0], eq.params[1]);
        for w in [addr_width, word_width] {
            if w == 0 || w > self.max_width {
                return Err(NetlistError::InvalidWidth {
                    net: eq.target.clone(),
                    width: w,
                    max: self.max_width,
                });
            }
        }
        ctx.expect_width("word", word_width, width)?;
        Ok((addr_width, word_width))
    }

    fn check_drivers(&self) -> Result<(), NetlistError> {
        for (net, &count) in self.nets.iter().zip(&self.drivers) {
            match count {
                1 => {}
                0 => return Err(NetlistError::Undriven(net.name.clone())),
                _ => {
                    return Err(NetlistError::MultipleDrivers {
                        net: net.name.clone(),
                        count,
                    });
                }
            }
        }
        debug!(nets = self.nets.len(), "every net has exactly one driver");
        Ok(())
    }
}
