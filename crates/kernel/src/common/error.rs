//! Error taxonomy for the simulation kernel.
//!
//! This module defines every failure the kernel can report. It provides:
//! 1. **Load-time errors:** Structural and typing problems found while compiling a netlist.
//! 2. **ROM errors:** Problems reading or applying a ROM image.
//! 3. **Step errors:** Input vectors that do not match the netlist's input pins.
//! 4. **Configuration errors:** Unreadable or malformed configuration files.
//!
//! Out-of-range ROM addresses never produce an error; they read a default word.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling a netlist description into a [`NetlistGraph`].
///
/// All of these are fatal: a graph that fails to build is never simulated.
///
/// [`NetlistGraph`]: crate::netlist::NetlistGraph
#[derive(Debug, Error)]
pub enum NetlistError {
    /// The netlist description file could not be read.
    #[error("cannot read netlist `{}`: {source}", .path.display())]
    Io {
        /// Path of the description file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The netlist description is not valid JSON for the expected shape.
    #[error("malformed netlist description: {0}")]
    Parse(#[from] serde_json::Error),

    /// A net was declared twice.
    #[error("net `{0}` is declared more than once")]
    DuplicateNet(String),

    /// A net was declared with a width of zero or wider than the supported maximum.
    #[error("net `{net}` is {width} bits wide; buses must be 1 to {max} bits")]
    InvalidWidth {
        /// Offending net.
        net: String,
        /// Declared width.
        width: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// An equation, pin or register references a net that was never declared.
    #[error("net `{0}` is used but never declared")]
    UnknownNet(String),

    /// The same name appears twice in the input or output pin list.
    #[error("pin `{0}` is listed more than once")]
    DuplicatePin(String),

    /// A net is driven by more than one source.
    #[error("net `{net}` has {count} drivers; every net needs exactly one")]
    MultipleDrivers {
        /// Offending net.
        net: String,
        /// Number of drivers found.
        count: usize,
    },

    /// A net has no driver at all.
    #[error("net `{0}` has no value; add it to the inputs or give it an equation")]
    Undriven(String),

    /// An equation has the wrong number of operands or parameters for its operation.
    #[error("`{net} = {op} ...` takes {expected} {what}, {found} given")]
    Arity {
        /// Target net of the equation.
        net: String,
        /// Operation name.
        op: &'static str,
        /// `"operands"` or `"parameters"`.
        what: &'static str,
        /// Count required by the operation.
        expected: usize,
        /// Count actually supplied.
        found: usize,
    },

    /// A `reg` initial value was given on an equation that is not a register.
    #[error("`{net} = {op} ...`: only registers take an initial value")]
    UnexpectedInit {
        /// Target net of the equation.
        net: String,
        /// Operation name.
        op: &'static str,
    },

    /// An operand width does not match what the operation requires.
    #[error("`{net} = {op} ...`: {what} is {found} bits wide, expected {expected}")]
    WidthMismatch {
        /// Target net of the equation.
        net: String,
        /// Operation name.
        op: &'static str,
        /// Which operand or result was checked.
        what: &'static str,
        /// Width required by the operation.
        expected: u32,
        /// Width actually found.
        found: u32,
    },

    /// A bit index or bit range falls outside its operand.
    #[error("`{net} = {op} ...`: bit range {low}..{high} is invalid for a {width}-bit bus")]
    BitRange {
        /// Target net of the equation.
        net: String,
        /// Operation name.
        op: &'static str,
        /// Low bound of the range.
        low: u32,
        /// High bound of the range, as written in the equation.
        high: u32,
        /// Width of the operand being indexed.
        width: u32,
    },

    /// A constant has no explicit width and none can be inferred from its position.
    #[error("`{net} = {op} ...`: cannot infer the width of constant {value:#x}")]
    UntypedConstant {
        /// Target net of the equation.
        net: String,
        /// Operation name.
        op: &'static str,
        /// Constant value.
        value: u64,
    },

    /// A constant or initial value does not fit in its width.
    #[error("`{net}`: value {value:#x} does not fit in {width} bits")]
    ValueTooWide {
        /// Net the value belongs to.
        net: String,
        /// Offending value.
        value: u64,
        /// Available width.
        width: u32,
    },

    /// A cycle passes only through combinational gates.
    #[error("combinational cycle: {}", .path.join(" -> "))]
    CombinationalCycle {
        /// Nets on the cycle, in dependency order, first net repeated at the end.
        path: Vec<String>,
    },
}

/// Errors raised while reading or applying a ROM image.
#[derive(Debug, Error)]
pub enum RomError {
    /// The image file could not be opened or read.
    #[error("cannot read ROM image `{}`: {source}", .path.display())]
    Io {
        /// Path of the image file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The image stream failed mid-read.
    #[error("error while reading ROM image: {0}")]
    Read(#[from] io::Error),

    /// A token in the image is not a hexadecimal word.
    #[error("line {line}: `{token}` is not a hexadecimal word")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A word is wider than the block it is loaded into.
    #[error("ROM `{block}` word {index} ({value:#x}) does not fit in {width} bits")]
    WordTooWide {
        /// Target block.
        block: String,
        /// Index of the word within the block.
        index: usize,
        /// Offending value.
        value: u64,
        /// Word width of the block.
        width: u32,
    },

    /// The image holds fewer words than the ROM blocks require (strict mode only).
    #[error("ROM image holds {found} words, {expected} required")]
    ImageTooShort {
        /// Total capacity of all ROM blocks.
        expected: usize,
        /// Number of words in the image.
        found: usize,
    },

    /// No ROM block with the given name exists in the netlist.
    #[error("netlist has no ROM block named `{0}`")]
    UnknownBlock(String),
}

/// Errors raised by a single simulation step.
///
/// A step that fails leaves every net, register and RAM untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    /// The input vector has no value for a declared input pin.
    #[error("input vector is missing pin `{0}`")]
    MissingInput(String),

    /// The input vector names a pin the netlist does not declare.
    #[error("input vector names unknown pin `{0}`")]
    UnknownInput(String),

    /// An input value does not fit in its pin width.
    #[error("input `{pin}` = {value:#x} does not fit in {width} bits")]
    ValueOutOfRange {
        /// Offending pin.
        pin: String,
        /// Supplied value.
        value: u64,
        /// Pin width.
        width: u32,
    },
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration `{}`: {source}", .path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for the expected shape.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
