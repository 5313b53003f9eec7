use crate::common::fixtures;
use crate::common::harness::{TestContext, capture_logs, inputs};
use nlsim_core::common::StepError;
use nlsim_core::netlist::NetlistBuilder;
use pretty_assertions::assert_eq;

#[test]
fn test_and_gate_truth_table() {
    let mut ctx = TestContext::new(&fixtures::and_gate());
    assert_eq!(ctx.out(&[("a", 1), ("b", 1)], "y"), 1);
    assert_eq!(ctx.out(&[("a", 1), ("b", 0)], "y"), 0);
    assert_eq!(ctx.out(&[("a", 0), ("b", 1)], "y"), 0);
    assert_eq!(ctx.out(&[("a", 0), ("b", 0)], "y"), 0);
}

#[test]
fn test_outputs_in_declaration_order() {
    let desc = NetlistBuilder::new("order")
        .input("a", 1)
        .copy("z", 1, "a")
        .not("y", 1, "a")
        .output("z")
        .output("y")
        .build();
    let mut ctx = TestContext::new(&desc);
    let out = ctx.step(&[("a", 1)]);
    let names: Vec<&str> = out.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["z", "y"]);
    assert_eq!(out.to_string(), "z=1, y=0, ");
}

#[test]
fn test_missing_input() {
    let mut ctx = TestContext::new(&fixtures::and_gate());
    let err = ctx.sim.step(&inputs(&[("a", 1)])).unwrap_err();
    assert_eq!(err, StepError::MissingInput("b".to_owned()));
}

#[test]
fn test_unknown_input() {
    let mut ctx = TestContext::new(&fixtures::and_gate());
    let err = ctx.sim.step(&inputs(&[("a", 1), ("b", 1), ("c", 0)])).unwrap_err();
    assert_eq!(err, StepError::UnknownInput("c".to_owned()));
}

#[test]
fn test_value_out_of_range() {
    let mut ctx = TestContext::new(&fixtures::and_gate());
    let err = ctx.sim.step(&inputs(&[("a", 2), ("b", 1)])).unwrap_err();
    assert_eq!(
        err,
        StepError::ValueOutOfRange {
            pin: "a".to_owned(),
            value: 2,
            width: 1
        }
    );
}

#[test]
fn test_rejected_step_changes_nothing() {
    let mut ctx = TestContext::new(&fixtures::counter2());
    assert_eq!(ctx.out(&[("en", 1)], "count"), 0);
    let before = ctx.sim.snapshot();
    assert!(ctx.sim.step(&inputs(&[("en", 2)])).is_err());
    assert_eq!(ctx.sim.snapshot(), before);
    assert_eq!(ctx.out(&[("en", 1)], "count"), 1);
}

#[test]
fn test_peek_internal_nets() {
    let mut ctx = TestContext::new(&fixtures::counter2());
    let _ = ctx.step(&[("en", 1)]);
    assert_eq!(ctx.sim.peek("inc"), Some(1));
    assert_eq!(ctx.sim.peek("count"), Some(1));
    assert_eq!(ctx.sim.peek("missing"), None);
}

#[test]
fn test_run_collects_outputs() {
    let mut ctx = TestContext::new(&fixtures::register_delay());
    let outs = ctx
        .sim
        .run([1, 0, 1, 1].map(|d| inputs(&[("d", d)])))
        .unwrap();
    let seen: Vec<u64> = outs.iter().map(|o| o.get("q").unwrap()).collect();
    assert_eq!(seen, vec![0, 1, 0, 1]);
}

#[test]
fn test_run_stops_at_first_error() {
    let mut ctx = TestContext::new(&fixtures::register_delay());
    let err = ctx
        .sim
        .run(vec![inputs(&[("d", 1)]), inputs(&[]), inputs(&[("d", 1)])])
        .unwrap_err();
    assert_eq!(err, StepError::MissingInput("d".to_owned()));
    assert_eq!(ctx.sim.stats().steps, 1);
}

#[test]
fn test_rom_without_image_reads_zero() {
    let mut ctx = TestContext::new(&fixtures::rom_reader(3, 16));
    assert_eq!(ctx.out(&[("addr", 5)], "o"), 0);
}

#[test]
fn test_netlist_without_inputs() {
    let desc = NetlistBuilder::new("blink")
        .reg("q", 1, "nq")
        .not("nq", 1, "q")
        .output("q")
        .build();
    let mut ctx = TestContext::new(&desc);
    let seen: Vec<u64> = (0..4).map(|_| ctx.out(&[], "q")).collect();
    assert_eq!(seen, vec![0, 1, 0, 1]);
}

#[test]
fn test_step_traces_settling_then_committing() {
    let mut ctx = TestContext::new(&fixtures::register_delay());
    let logs = capture_logs("nlsim_core=trace", || {
        let _ = ctx.step(&[("d", 1)]);
        let _ = ctx.step(&[("d", 0)]);
    });
    let phases: Vec<&str> = logs
        .lines()
        .filter_map(|line| line.split("phase=").nth(1))
        .filter_map(|rest| rest.split_whitespace().next())
        .collect();
    assert_eq!(phases, ["Settling", "Committing", "Settling", "Committing"]);
    assert_eq!(logs.matches("step complete").count(), 2);
}
