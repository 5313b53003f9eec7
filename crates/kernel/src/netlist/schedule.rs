//! Load-time evaluation order.
//!
//! Gates are ordered once, when the netlist is compiled, so that every gate runs after
//! the gates driving its inputs. Register outputs and input pins are roots: they are
//! stable for the whole step and never create ordering edges. A cycle that passes only
//! through gates cannot be ordered and is rejected with the gates forming it.
//!
//! Ordering uses Kahn's algorithm seeded in gate index order, which makes the schedule
//! a deterministic function of the description.

use std::collections::{HashMap, VecDeque};

use crate::netlist::gate::Gate;

/// Computes a topological order of `gates`.
///
/// # Arguments
///
/// * `gates` - Every combinational gate of the netlist.
/// * `producer` - For each net index, the gate driving it, if the driver is a gate.
///
/// # Errors
///
/// Returns the indices of gates forming a combinational cycle, in dependency order
/// (each gate feeds the next; the last feeds the first).
pub fn topological_order(gates: &[Gate], producer: &[Option<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let mut indegree = vec![0usize; gates.len()];
    let mut fanout: Vec<Vec<usize>> = vec![Vec::new(); gates.len()];

    for (consumer, gate) in gates.iter().enumerate() {
        for net in gate.input_nets() {
            if let Some(p) = producer[net.index()] {
                fanout[p].push(consumer);
                indegree[consumer] += 1;
            }
        }
    }

    let mut ready: VecDeque<usize> = (0..gates.len()).filter(|&g| indegree[g] == 0).collect();
    let mut order = Vec::with_capacity(gates.len());
    let mut scheduled = vec![false; gates.len()];

    while let Some(g) = ready.pop_front() {
        order.push(g);
        scheduled[g] = true;
        for &next in &fanout[g] {
            indegree[next] -= 1;
            if indegree[next] == 0 {
                ready.push_back(next);
            }
        }
    }

    if order.len() == gates.len() {
        Ok(order)
    } else {
        Err(find_cycle(gates, producer, &scheduled))
    }
}

/// Walks from an unscheduled gate towards its unscheduled producers until a gate
/// repeats. Every unscheduled gate has at least one unscheduled producer, so the walk
/// always closes a loop.
fn find_cycle(gates: &[Gate], producer: &[Option<usize>], scheduled: &[bool]) -> Vec<usize> {
    let Some(start) = scheduled.iter().position(|&s| !s) else {
        return Vec::new();
    };

    let mut walk = Vec::new();
    let mut seen: HashMap<usize, usize> = HashMap::new();
    let mut current = start;

    loop {
        if let Some(&pos) = seen.get(&current) {
            let mut cycle = walk.split_off(pos);
            cycle.reverse();
            return cycle;
        }
        let _ = seen.insert(current, walk.len());
        walk.push(current);

        let next = gates[current]
            .input_nets()
            .filter_map(|net| producer[net.index()])
            .find(|&p| !scheduled[p]);
        match next {
            Some(p) => current = p,
            None => return walk,
        }
    }
}
