//! Fluent construction of netlist descriptions in code.
//!
//! This module provides a builder that assembles a [`NetlistDesc`] one net at a time,
//! declaring each target net as its equation is added. It is the quickest way to write
//! small circuits for tests and tools that generate netlists programmatically.
//!
//! ```
//! use nlsim_core::netlist::NetlistBuilder;
//!
//! let desc = NetlistBuilder::new("half_adder")
//!     .input("a", 1)
//!     .input("b", 1)
//!     .xor("s", 1, "a", "b")
//!     .and("c", 1, "a", "b")
//!     .output("s")
//!     .output("c")
//!     .build();
//! assert_eq!(desc.equations.len(), 2);
//! ```

use crate::netlist::desc::{Equation, NetDecl, NetlistDesc, Op, Operand};

/// Fluent builder for [`NetlistDesc`].
///
/// The builder records exactly what it is told; it performs no validation. Errors
/// surface when the resulting description is compiled.
#[derive(Debug, Clone, Default)]
pub struct NetlistBuilder {
    desc: NetlistDesc,
}

impl NetlistBuilder {
    /// Starts an empty description with the given circuit name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            desc: NetlistDesc {
                name: name.into(),
                ..NetlistDesc::default()
            },
        }
    }

    /// Declares a net without giving it a driver.
    #[must_use]
    pub fn net(mut self, name: impl Into<String>, width: u32) -> Self {
        self.desc.nets.push(NetDecl::new(name, width));
        self
    }

    /// Declares an input pin and its net.
    #[must_use]
    pub fn input(mut self, name: impl Into<String>, width: u32) -> Self {
        let name = name.into();
        self.desc.inputs.push(name.clone());
        self.net(name, width)
    }

    /// Marks an already declared (or later declared) net as an output pin.
    #[must_use]
    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.desc.outputs.push(name.into());
        self
    }

    /// Declares `target` and adds a raw equation driving it.
    ///
    /// # Arguments
    ///
    /// * `target` - Net to declare and drive.
    /// * `width` - Width of `target` in bits.
    /// * `op` - Operation computing `target`.
    /// * `args` - Dynamic operands.
    /// * `params` - Static parameters.
    #[must_use]
    pub fn equation(
        mut self,
        target: impl Into<String>,
        width: u32,
        op: Op,
        args: Vec<Operand>,
        params: Vec<u32>,
    ) -> Self {
        let target = target.into();
        self.desc.nets.push(NetDecl::new(target.clone(), width));
        self.desc
            .equations
            .push(Equation::new(target, op, args).with_params(params));
        self
    }

    /// `target = copy a`.
    #[must_use]
    pub fn copy(self, target: impl Into<String>, width: u32, a: impl Into<Operand>) -> Self {
        self.equation(target, width, Op::Copy, vec![a.into()], Vec::new())
    }

    /// `target = not a`.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self, target: impl Into<String>, width: u32, a: impl Into<Operand>) -> Self {
        self.equation(target, width, Op::Not, vec![a.into()], Vec::new())
    }

    /// `target = op a b` for any two-operand bitwise operation.
    #[must_use]
    pub fn binary(
        self,
        target: impl Into<String>,
        width: u32,
        op: Op,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Self {
        self.equation(target, width, op, vec![a.into(), b.into()], Vec::new())
    }

    /// `target = and a b`.
    #[must_use]
    pub fn and(self, target: impl Into<String>, width: u32, a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        self.binary(target, width, Op::And, a, b)
    }

    /// `target = or a b`.
    #[must_use]
    pub fn or(self, target: impl Into<String>, width: u32, a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        self.binary(target, width, Op::Or, a, b)
    }

    /// `target = xor a b`.
    #[must_use]
    pub fn xor(self, target: impl Into<String>, width: u32, a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        self.binary(target, width, Op::Xor, a, b)
    }

    /// `target = mux sel a b`.
    #[must_use]
    pub fn mux(
        self,
        target: impl Into<String>,
        width: u32,
        sel: impl Into<Operand>,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Self {
        self.equation(target, width, Op::Mux, vec![sel.into(), a.into(), b.into()], Vec::new())
    }

    /// `target = reg next`, starting from zero.
    #[must_use]
    pub fn reg(self, target: impl Into<String>, width: u32, next: impl Into<Operand>) -> Self {
        self.equation(target, width, Op::Reg, vec![next.into()], Vec::new())
    }

    /// `target = reg next`, starting from `init`.
    #[must_use]
    pub fn reg_init(mut self, target: impl Into<String>, width: u32, next: impl Into<Operand>, init: u64) -> Self {
        self = self.reg(target, width, next);
        if let Some(eq) = self.desc.equations.last_mut() {
            eq.init = Some(init);
        }
        self
    }

    /// `target = rom addr_width word_width addr`.
    #[must_use]
    pub fn rom(self, target: impl Into<String>, addr_width: u32, word_width: u32, addr: impl Into<Operand>) -> Self {
        self.equation(target, word_width, Op::Rom, vec![addr.into()], vec![addr_width, word_width])
    }

    /// `target = ram addr_width word_width read_addr write_enable write_addr data`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn ram(
        self,
        target: impl Into<String>,
        addr_width: u32,
        word_width: u32,
        read_addr: impl Into<Operand>,
        write_enable: impl Into<Operand>,
        write_addr: impl Into<Operand>,
        data: impl Into<Operand>,
    ) -> Self {
        self.equation(
            target,
            word_width,
            Op::Ram,
            vec![read_addr.into(), write_enable.into(), write_addr.into(), data.into()],
            vec![addr_width, word_width],
        )
    }

    /// `target = concat hi lo`.
    #[must_use]
    pub fn concat(
        self,
        target: impl Into<String>,
        width: u32,
        hi: impl Into<Operand>,
        lo: impl Into<Operand>,
    ) -> Self {
        self.equation(target, width, Op::Concat, vec![hi.into(), lo.into()], Vec::new())
    }

    /// `target = select index a`.
    #[must_use]
    pub fn select(self, target: impl Into<String>, index: u32, a: impl Into<Operand>) -> Self {
        self.equation(target, 1, Op::Select, vec![a.into()], vec![index])
    }

    /// `target = slice low high a`: bits `low..=high`.
    #[must_use]
    pub fn slice(self, target: impl Into<String>, low: u32, high: u32, a: impl Into<Operand>) -> Self {
        let width = high.saturating_sub(low) + 1;
        self.equation(target, width, Op::Slice, vec![a.into()], vec![low, high])
    }

    /// `target = snip low high a`: bits `low..high`.
    #[must_use]
    pub fn snip(self, target: impl Into<String>, low: u32, high: u32, a: impl Into<Operand>) -> Self {
        let width = high.saturating_sub(low);
        self.equation(target, width, Op::Snip, vec![a.into()], vec![low, high])
    }

    /// Returns the assembled description.
    pub fn build(self) -> NetlistDesc {
        self.desc
    }
}
