//! Graph-provider abstraction.
//!
//! The kernel is not tied to one description format. Anything that can list its
//! nets, pins and equations can be compiled into a [`NetlistGraph`](super::NetlistGraph):
//! the JSON [`NetlistDesc`](super::NetlistDesc), a description assembled in code with
//! [`NetlistBuilder`](super::NetlistBuilder), or a caller's own circuit model.

use crate::netlist::desc::{Equation, NetDecl};

/// Capability set a circuit description must offer to be compiled.
///
/// Implementors only expose data. Structural rules (one driver per net, matching
/// widths, no combinational cycles) are enforced by the compiler, not the provider.
pub trait NetlistProvider {
    /// Circuit name, used in logs.
    fn name(&self) -> &str;

    /// Every declared net, with its width.
    fn nets(&self) -> &[NetDecl];

    /// Input pin names, in the order a harness should prompt for them.
    fn inputs(&self) -> &[String];

    /// Output pin names, in the order output vectors list them.
    fn outputs(&self) -> &[String];

    /// One equation per driven net.
    fn equations(&self) -> &[Equation];
}
