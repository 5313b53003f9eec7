use crate::common::fixtures;
use crate::common::harness::TestContext;
use nlsim_core::Config;
use nlsim_core::stats::SimStats;

#[test]
fn test_counts_steps_and_gates() {
    let mut ctx = TestContext::new(&fixtures::counter2());
    for _ in 0..3 {
        let _ = ctx.step(&[("en", 1)]);
    }
    let stats = ctx.sim.stats();
    assert_eq!(stats.steps, 3);
    assert_eq!(stats.gate_evaluations, 3 * ctx.sim.graph().gates().len() as u64);
    assert_eq!(stats.register_commits, 3);
    assert_eq!(stats.ram_writes, 0);
}

#[test]
fn test_rejected_step_not_counted() {
    let mut ctx = TestContext::new(&fixtures::and_gate());
    let _ = ctx.step(&[("a", 1), ("b", 1)]);
    assert!(ctx.sim.step(&crate::common::harness::inputs(&[("a", 1)])).is_err());
    assert_eq!(ctx.sim.stats().steps, 1);
}

#[test]
fn test_collection_can_be_disabled() {
    let config = Config::from_json(r#"{ "general": { "collect_stats": false } }"#).unwrap();
    let mut ctx = TestContext::with_config(&fixtures::and_gate(), &config);
    let _ = ctx.step(&[("a", 1), ("b", 0)]);
    assert_eq!(ctx.sim.stats().steps, 0);
}

#[test]
fn test_ram_writes_counted() {
    let mut ctx = TestContext::new(&fixtures::ram_cell());
    let _ = ctx.step(&[("ra", 0), ("we", 1), ("wa", 2), ("data", 9)]);
    let _ = ctx.step(&[("ra", 0), ("we", 0), ("wa", 2), ("data", 9)]);
    assert_eq!(ctx.sim.stats().ram_writes, 1);
}

#[test]
fn test_report_format() {
    let stats = SimStats::default();
    let report = stats.to_string();
    assert!(report.contains("sim_steps                0"));
    assert!(report.contains("gate_evals_per_step      0.00"));
}
