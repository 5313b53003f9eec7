//! Simulation statistics collection and reporting.
//!
//! This module tracks activity counters for a simulation session. It provides:
//! 1. **Steps:** Number of completed steps and host time elapsed.
//! 2. **Combinational work:** Gate evaluations across all steps.
//! 3. **Sequential work:** Register commits and RAM writes.

use std::fmt;
use std::time::{Duration, Instant};

/// Activity counters for one simulation session.
///
/// Only successful steps are counted; a step rejected for a bad input vector leaves
/// the counters unchanged.
#[derive(Debug, Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Completed steps.
    pub steps: u64,
    /// Gate evaluations summed over all steps.
    pub gate_evaluations: u64,
    /// Register latches summed over all steps.
    pub register_commits: u64,
    /// RAM words written.
    pub ram_writes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            gate_evaluations: 0,
            register_commits: 0,
            ram_writes: 0,
        }
    }
}

impl SimStats {
    /// Host time since the counters were created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Steps per host second, or zero before any time has passed.
    #[allow(clippy::cast_precision_loss)]
    pub fn steps_per_second(&self) -> f64 {
        let seconds = self.elapsed().as_secs_f64();
        if seconds > 0.0 {
            self.steps as f64 / seconds
        } else {
            0.0
        }
    }

    /// Gate evaluations per step, or zero before the first step.
    #[allow(clippy::cast_precision_loss)]
    pub fn gates_per_step(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.gate_evaluations as f64 / self.steps as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "NETLIST SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {:.4} s", self.elapsed().as_secs_f64())?;
        writeln!(f, "sim_steps                {}", self.steps)?;
        writeln!(f, "sim_steps_per_sec        {:.2}", self.steps_per_second())?;
        writeln!(f, "gate_evals               {}", self.gate_evaluations)?;
        writeln!(f, "gate_evals_per_step      {:.2}", self.gates_per_step())?;
        writeln!(f, "register_commits         {}", self.register_commits)?;
        writeln!(f, "ram_writes               {}", self.ram_writes)?;
        write!(f, "----------------------------------------------------------")
    }
}
