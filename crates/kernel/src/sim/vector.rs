//! Per-step input and output vectors.

use std::collections::BTreeMap;
use std::fmt;

/// Values for the input pins of one step, keyed by pin name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputVector {
    values: BTreeMap<String, u64>,
}

impl InputVector {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a pin value, builder style.
    #[must_use]
    pub fn with(mut self, pin: impl Into<String>, value: u64) -> Self {
        self.set(pin, value);
        self
    }

    /// Adds or replaces a pin value.
    pub fn set(&mut self, pin: impl Into<String>, value: u64) {
        let _ = self.values.insert(pin.into(), value);
    }

    /// Value supplied for `pin`, if any.
    pub fn get(&self, pin: &str) -> Option<u64> {
        self.values.get(pin).copied()
    }

    /// Iterates over `(pin, value)` pairs in pin-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of pins supplied.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no pin is supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for InputVector {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Values of the output pins after one step, in output declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputVector {
    values: Vec<(String, u64)>,
}

impl OutputVector {
    pub(crate) const fn new(values: Vec<(String, u64)>) -> Self {
        Self { values }
    }

    /// Value of output `pin`, if the netlist declares it.
    pub fn get(&self, pin: &str) -> Option<u64> {
        self.values.iter().find(|(n, _)| n == pin).map(|&(_, v)| v)
    }

    /// Iterates over `(pin, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of output pins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a netlist without outputs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for OutputVector {
    /// Formats as `name=hex, ` per pin, the harness print format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.values {
            write!(f, "{name}={value:x}, ")?;
        }
        Ok(())
    }
}
