//! Generator-produced netlist descriptions.
//!
//! A netlist description is the data shape emitted by a netlist generator: declared
//! nets with their widths, the names of the input and output pins, and one equation
//! per driven net. Descriptions are plain data; nothing here checks widths, drivers
//! or cycles. That happens when a description is compiled into a
//! [`NetlistGraph`](super::NetlistGraph).
//!
//! The JSON form looks like:
//!
//! ```json
//! {
//!   "name": "half_adder",
//!   "inputs": ["a", "b"],
//!   "outputs": ["s", "c"],
//!   "nets": [
//!     { "name": "a" }, { "name": "b" }, { "name": "s" }, { "name": "c" }
//!   ],
//!   "equations": [
//!     { "target": "s", "op": "xor", "args": ["a", "b"] },
//!     { "target": "c", "op": "and", "args": ["a", "b"] }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::NetlistError;
use crate::netlist::provider::NetlistProvider;

/// Operation computing the value of an equation's target net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// `copy a`: forwards its operand.
    Copy,
    /// `not a`: bitwise complement.
    Not,
    /// `and a b`: bitwise AND.
    And,
    /// `or a b`: bitwise OR.
    Or,
    /// `xor a b`: bitwise XOR.
    Xor,
    /// `nand a b`: complement of AND.
    Nand,
    /// `nxor a b`: complement of XOR.
    Nxor,
    /// `mux sel a b`: `a` when `sel` is zero, otherwise `b`.
    Mux,
    /// `reg d`: the value `d` had at the end of the previous step.
    Reg,
    /// `ram addr_size word_size | read_addr write_enable write_addr data`.
    Ram,
    /// `rom addr_size word_size | addr`.
    Rom,
    /// `concat hi lo`: `hi` shifted above `lo`.
    Concat,
    /// `select i | a`: bit `i` of `a`.
    Select,
    /// `slice low high | a`: bits `low..=high` of `a`.
    Slice,
    /// `snip low high | a`: bits `low..high` of `a`.
    Snip,
}

impl Op {
    /// Returns the lowercase keyword for this operation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nxor => "nxor",
            Self::Mux => "mux",
            Self::Reg => "reg",
            Self::Ram => "ram",
            Self::Rom => "rom",
            Self::Concat => "concat",
            Self::Select => "select",
            Self::Slice => "slice",
            Self::Snip => "snip",
        }
    }

    /// Returns `(operands, parameters)` expected by this operation.
    ///
    /// Operands are nets or constants evaluated every step; parameters are static
    /// integers fixed by the generator (bit positions, address and word sizes).
    pub const fn signature(self) -> (usize, usize) {
        match self {
            Self::Copy | Self::Not | Self::Reg => (1, 0),
            Self::And | Self::Or | Self::Xor | Self::Nand | Self::Nxor | Self::Concat => (2, 0),
            Self::Mux => (3, 0),
            Self::Ram => (4, 2),
            Self::Rom | Self::Slice | Self::Snip => (1, 2),
            Self::Select => (1, 1),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An equation operand: a net reference or a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Reference to a declared net by name.
    Net(String),
    /// Constant value; the width may be inferred from the operand position.
    Const {
        /// Constant value.
        value: u64,
        /// Explicit width in bits.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
    },
}

impl Operand {
    /// Creates a constant operand with an explicit width.
    pub const fn constant(value: u64, width: u32) -> Self {
        Self::Const {
            value,
            width: Some(width),
        }
    }

    /// Creates a constant operand whose width is inferred at compile time.
    pub const fn literal(value: u64) -> Self {
        Self::Const { value, width: None }
    }
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Self::Net(name.to_owned())
    }
}

impl From<String> for Operand {
    fn from(name: String) -> Self {
        Self::Net(name)
    }
}

/// A declared net (or bus).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetDecl {
    /// Unique net name.
    pub name: String,
    /// Width in bits.
    #[serde(default = "NetDecl::default_width")]
    pub width: u32,
}

impl NetDecl {
    /// Nets without an explicit width are single wires.
    const fn default_width() -> u32 {
        1
    }

    /// Creates a net declaration.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// One `target = op args` equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    /// Net driven by this equation.
    pub target: String,
    /// Operation computing the target.
    pub op: Op,
    /// Dynamic operands, in the order of [`Op::signature`].
    #[serde(default)]
    pub args: Vec<Operand>,
    /// Static parameters, in the order of [`Op::signature`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<u32>,
    /// Power-on value of a `reg` target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<u64>,
}

impl Equation {
    /// Creates an equation without parameters.
    pub fn new(target: impl Into<String>, op: Op, args: Vec<Operand>) -> Self {
        Self {
            target: target.into(),
            op,
            args,
            params: Vec::new(),
            init: None,
        }
    }

    /// Adds static parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<u32>) -> Self {
        self.params = params;
        self
    }

    /// Sets the initial value of a register equation.
    #[must_use]
    pub const fn with_init(mut self, init: u64) -> Self {
        self.init = Some(init);
        self
    }
}

/// Complete netlist description as produced by a generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlistDesc {
    /// Circuit name, used in logs.
    #[serde(default = "NetlistDesc::default_name")]
    pub name: String,
    /// Input pin names, in prompt order.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output pin names, in print order.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Every net of the circuit, pins included.
    #[serde(default)]
    pub nets: Vec<NetDecl>,
    /// One equation per net that is not an input pin.
    #[serde(default)]
    pub equations: Vec<Equation>,
}

impl NetlistDesc {
    fn default_name() -> String {
        "netlist".to_owned()
    }

    /// Parses a description from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Parse`] if the JSON does not match the description shape.
    pub fn from_json(json: &str) -> Result<Self, NetlistError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises the description to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Parse`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, NetlistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl NetlistProvider for NetlistDesc {
    fn name(&self) -> &str {
        &self.name
    }

    fn nets(&self) -> &[NetDecl] {
        &self.nets
    }

    fn inputs(&self) -> &[String] {
        &self.inputs
    }

    fn outputs(&self) -> &[String] {
        &self.outputs
    }

    fn equations(&self) -> &[Equation] {
        &self.equations
    }
}
