use crate::common::fixtures;
use crate::common::harness::TestContext;
use nlsim_core::netlist::{NetlistBuilder, Operand};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0b1100, 0b1010)]
#[case(0b0000, 0b1111)]
#[case(0b1111, 0b1111)]
#[case(0b0000, 0b0000)]
fn test_bitwise_ops(#[case] a: u64, #[case] b: u64) {
    let mut ctx = TestContext::new(&fixtures::bitwise_alu());
    let out = ctx.step(&[("a", a), ("b", b)]);
    assert_eq!(out.get("and"), Some(a & b));
    assert_eq!(out.get("or"), Some(a | b));
    assert_eq!(out.get("xor"), Some(a ^ b));
    assert_eq!(out.get("nand"), Some(!(a & b) & 0xF));
    assert_eq!(out.get("nxor"), Some(!(a ^ b) & 0xF));
    assert_eq!(out.get("not"), Some(!a & 0xF));
    assert_eq!(out.get("masked"), Some(a & 0b0110));
}

#[test]
fn test_not_is_masked_to_width() {
    let desc = NetlistBuilder::new("not4").input("a", 4).not("o", 4, "a").output("o").build();
    let mut ctx = TestContext::new(&desc);
    assert_eq!(ctx.out(&[("a", 0)], "o"), 0xF);
}

#[test]
fn test_not_on_64_bits() {
    let desc = NetlistBuilder::new("not64").input("a", 64).not("o", 64, "a").output("o").build();
    let mut ctx = TestContext::new(&desc);
    assert_eq!(ctx.out(&[("a", 0)], "o"), u64::MAX);
}

#[rstest]
#[case(0, 0xA)]
#[case(1, 0xB)]
fn test_mux(#[case] sel: u64, #[case] expected: u64) {
    let desc = NetlistBuilder::new("mux")
        .input("s", 1)
        .mux("o", 4, "s", Operand::literal(0xA), Operand::literal(0xB))
        .output("o")
        .build();
    let mut ctx = TestContext::new(&desc);
    assert_eq!(ctx.out(&[("s", sel)], "o"), expected);
}

#[test]
fn test_bit_extraction() {
    let desc = NetlistBuilder::new("bits")
        .input("a", 8)
        .select("bit5", 5, "a")
        .slice("mid", 2, 5, "a")
        .snip("low", 0, 3, "a")
        .concat("swapped", 8, "lo4", "hi4")
        .slice("lo4", 0, 3, "a")
        .slice("hi4", 4, 7, "a")
        .output("bit5")
        .output("mid")
        .output("low")
        .output("swapped")
        .build();
    let mut ctx = TestContext::new(&desc);
    let out = ctx.step(&[("a", 0b1011_0110)]);
    assert_eq!(out.get("bit5"), Some(1));
    assert_eq!(out.get("mid"), Some(0b1101));
    assert_eq!(out.get("low"), Some(0b110));
    assert_eq!(out.get("swapped"), Some(0b0110_1011));
}

#[test]
fn test_copy_and_constant_driver() {
    let desc = NetlistBuilder::new("consts")
        .copy("k", 8, Operand::literal(0x5A))
        .copy("o", 8, "k")
        .output("o")
        .build();
    let mut ctx = TestContext::new(&desc);
    assert_eq!(ctx.out(&[], "o"), 0x5A);
}
