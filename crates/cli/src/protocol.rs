//! Interactive step protocol.
//!
//! Each step prompts `name[width]:=` for every input pin and reads one hexadecimal
//! value per prompt. Values are whitespace-separated tokens, so several may be typed
//! on one line. After the step every output pin is printed as `name=hex, ` and the
//! line is terminated.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use nlsim_core::common::fits;
use nlsim_core::netlist::Pin;
use nlsim_core::sim::{InputVector, OutputVector};
use tracing::warn;

/// Whitespace-separated tokens read lazily from a line-oriented source.
#[derive(Debug)]
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    /// Wraps a reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// Parses a hexadecimal value with an optional `0x` prefix.
pub fn parse_hex(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).ok()
}

/// Prompts for every input pin and collects one step's input vector.
///
/// Tokens that are not hexadecimal, or do not fit their pin, are reported and the
/// same pin is prompted again.
///
/// # Returns
///
/// `None` when input ends before every pin has a value.
///
/// # Errors
///
/// Propagates read and write failures.
pub fn prompt_inputs<R: BufRead, W: Write>(
    pins: &[Pin],
    tokens: &mut Tokens<R>,
    out: &mut W,
) -> io::Result<Option<InputVector>> {
    let mut inputs = InputVector::new();
    for pin in pins {
        loop {
            write!(out, "{}[{}]:=", pin.name, pin.width)?;
            out.flush()?;
            let Some(token) = tokens.next_token()? else {
                return Ok(None);
            };
            match parse_hex(&token) {
                Some(value) if fits(value, pin.width) => {
                    inputs.set(pin.name.clone(), value);
                    break;
                }
                Some(value) => {
                    warn!(pin = %pin.name, value, width = pin.width, "value too wide for pin");
                }
                None => warn!(pin = %pin.name, token = %token, "not a hexadecimal value"),
            }
        }
    }
    Ok(Some(inputs))
}

/// Prints one step's outputs as `name=hex, ` per pin, then a newline.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_outputs<W: Write>(outputs: &OutputVector, out: &mut W) -> io::Result<()> {
    writeln!(out, "{outputs}")?;
    out.flush()
}
