use crate::common::fixtures;
use crate::common::harness::compile;
use nlsim_core::Config;
use nlsim_core::common::NetlistError;
use nlsim_core::netlist::{Equation, NetDecl, NetlistBuilder, NetlistDesc, NetlistGraph, Op};
use pretty_assertions::assert_eq;

#[test]
fn test_compiles_fixtures() {
    for desc in [
        fixtures::and_gate(),
        fixtures::register_delay(),
        fixtures::rom_reader(2, 8),
        fixtures::counter2(),
        fixtures::ram_cell(),
        fixtures::bitwise_alu(),
    ] {
        let graph = compile(&desc).unwrap();
        assert_eq!(graph.schedule().len(), graph.gates().len());
    }
}

#[test]
fn test_pins_and_blocks() {
    let graph = compile(&fixtures::ram_cell()).unwrap();
    let inputs: Vec<&str> = graph.inputs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(inputs, vec!["ra", "we", "wa", "data"]);
    assert_eq!(graph.outputs()[0].width, 8);
    assert_eq!(graph.rams().len(), 1);
    assert_eq!(graph.rams()[0].addr_width, 4);
    assert!(graph.net("q").is_some());
    assert!(graph.net("nope").is_none());
}

#[test]
fn test_registers_are_not_gates() {
    let graph = compile(&fixtures::register_delay()).unwrap();
    assert_eq!(graph.registers().len(), 1);
    assert!(graph.gates().is_empty());
}

#[test]
fn test_schedule_respects_dependencies() {
    // Equations listed consumer first.
    let desc = NetlistBuilder::new("reversed")
        .input("a", 1)
        .not("c", 1, "b")
        .not("b", 1, "a")
        .output("c")
        .build();
    let graph = compile(&desc).unwrap();
    let position = |net: &str| {
        let id = graph.net(net).unwrap();
        graph
            .schedule()
            .iter()
            .position(|&g| graph.gates()[g].output == id)
            .unwrap()
    };
    assert!(position("b") < position("c"));
}

#[test]
fn test_duplicate_net() {
    let desc = NetlistBuilder::new("dup").input("a", 1).net("a", 1).build();
    assert!(matches!(compile(&desc), Err(NetlistError::DuplicateNet(n)) if n == "a"));
}

#[test]
fn test_unknown_net_in_equation() {
    let desc = NetlistBuilder::new("unknown").input("a", 1).and("o", 1, "a", "ghost").build();
    assert!(matches!(compile(&desc), Err(NetlistError::UnknownNet(n)) if n == "ghost"));
}

#[test]
fn test_unknown_output_pin() {
    let desc = NetlistBuilder::new("unknown").input("a", 1).output("ghost").build();
    assert!(matches!(compile(&desc), Err(NetlistError::UnknownNet(n)) if n == "ghost"));
}

#[test]
fn test_duplicate_pin() {
    let desc = NetlistBuilder::new("dup").input("a", 1).copy("o", 1, "a").output("o").output("o").build();
    assert!(matches!(compile(&desc), Err(NetlistError::DuplicatePin(n)) if n == "o"));
}

#[test]
fn test_undriven_net() {
    let desc = NetlistBuilder::new("floating").input("a", 1).net("w", 1).build();
    assert!(matches!(compile(&desc), Err(NetlistError::Undriven(n)) if n == "w"));
}

#[test]
fn test_input_with_equation_has_two_drivers() {
    let mut desc = NetlistBuilder::new("clash").input("a", 1).input("b", 1).build();
    desc.equations.push(Equation::new("a", Op::Not, vec!["b".into()]));
    assert!(matches!(
        compile(&desc),
        Err(NetlistError::MultipleDrivers { net, count: 2 }) if net == "a"
    ));
}

#[test]
fn test_arity() {
    let desc = NetlistBuilder::new("arity")
        .input("a", 1)
        .equation("o", 1, Op::And, vec!["a".into()], Vec::new())
        .build();
    assert!(matches!(
        compile(&desc),
        Err(NetlistError::Arity { what: "operands", expected: 2, found: 1, .. })
    ));
}

#[test]
fn test_missing_parameters() {
    let desc = NetlistBuilder::new("params")
        .input("a", 4)
        .equation("o", 1, Op::Select, vec!["a".into()], Vec::new())
        .build();
    assert!(matches!(
        compile(&desc),
        Err(NetlistError::Arity { what: "parameters", expected: 1, found: 0, .. })
    ));
}

#[test]
fn test_init_only_on_registers() {
    let mut desc = fixtures::and_gate();
    desc.equations[0].init = Some(1);
    assert!(matches!(compile(&desc), Err(NetlistError::UnexpectedInit { .. })));
}

#[test]
fn test_register_init_must_fit() {
    let desc = NetlistBuilder::new("init").reg_init("r", 2, "r", 4).build();
    assert!(matches!(compile(&desc), Err(NetlistError::ValueTooWide { value: 4, width: 2, .. })));
}

#[test]
fn test_combinational_cycle_is_reported() {
    let desc = NetlistBuilder::new("loop")
        .input("a", 1)
        .and("x", 1, "a", "y")
        .not("y", 1, "x")
        .output("x")
        .build();
    match compile(&desc) {
        Err(NetlistError::CombinationalCycle { path }) => {
            assert_eq!(path.len(), 3);
            assert_eq!(path.first(), path.last());
            assert!(path.contains(&"x".to_owned()));
            assert!(path.contains(&"y".to_owned()));
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_self_loop_cycle() {
    let desc = NetlistBuilder::new("self").not("x", 1, "x").build();
    match compile(&desc) {
        Err(NetlistError::CombinationalCycle { path }) => assert_eq!(path, vec!["x", "x"]),
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_loop_through_register_is_legal() {
    let desc = NetlistBuilder::new("toggle").reg("q", 1, "nq").not("nq", 1, "q").output("q").build();
    assert!(compile(&desc).is_ok());
}

#[test]
fn test_loop_through_ram_write_port_is_legal() {
    // The RAM read output feeds its own write data.
    let desc = NetlistBuilder::new("ram_loop")
        .input("a", 2)
        .input("we", 1)
        .ram("q", 2, 4, "a", "we", "a", "qn")
        .not("qn", 4, "q")
        .output("q")
        .build();
    assert!(compile(&desc).is_ok());
}

#[test]
fn test_max_bus_width_from_config() {
    let config = Config::from_json(r#"{ "netlist": { "max_bus_width": 8 } }"#).unwrap();
    let desc = NetlistBuilder::new("wide").input("a", 16).build();
    assert!(matches!(
        NetlistGraph::build(&desc, &config),
        Err(NetlistError::InvalidWidth { width: 16, max: 8, .. })
    ));
}

#[test]
fn test_zero_and_oversized_widths() {
    let zero = NetlistBuilder::new("zero").input("a", 0).build();
    assert!(matches!(compile(&zero), Err(NetlistError::InvalidWidth { width: 0, .. })));
    let wide = NetlistBuilder::new("wide").input("a", 65).build();
    assert!(matches!(compile(&wide), Err(NetlistError::InvalidWidth { width: 65, .. })));
}

#[test]
fn test_custom_provider() {
    use nlsim_core::netlist::NetlistProvider;

    struct Inverter {
        nets: Vec<NetDecl>,
        inputs: Vec<String>,
        outputs: Vec<String>,
        equations: Vec<Equation>,
    }

    impl NetlistProvider for Inverter {
        fn name(&self) -> &str {
            "inverter"
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

    let provider = Inverter {
        nets: vec![NetDecl::new("i", 1), NetDecl::new("o", 1)],
        inputs: vec!["i".to_owned()],
        outputs: vec!["o".to_owned()],
        equations: vec![Equation::new("o", Op::Not, vec!["i".into()])],
    };
    let graph = NetlistGraph::build(&provider, &Config::default()).unwrap();
    assert_eq!(graph.name(), "inverter");
    assert_eq!(graph.gates().len(), 1);

    let desc: &dyn NetlistProvider = &NetlistDesc::default();
    assert!(NetlistGraph::build(desc, &Config::default()).is_ok());
}
