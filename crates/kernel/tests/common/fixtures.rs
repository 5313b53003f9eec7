use nlsim_core::netlist::{NetlistBuilder, NetlistDesc, Operand};

/// `y = and a b`.
pub fn and_gate() -> NetlistDesc {
    NetlistBuilder::new("and_gate")
        .input("a", 1)
        .input("b", 1)
        .and("y", 1, "a", "b")
        .output("y")
        .build()
}

/// `q = reg d`, with the register net itself as the output pin.
pub fn register_delay() -> NetlistDesc {
    NetlistBuilder::new("register_delay")
        .input("d", 1)
        .reg("q", 1, "d")
        .output("q")
        .build()
}

/// `o = rom addr_width word_width addr`.
pub fn rom_reader(addr_width: u32, word_width: u32) -> NetlistDesc {
    NetlistBuilder::new("rom_reader")
        .input("addr", addr_width)
        .rom("o", addr_width, word_width, "addr")
        .output("o")
        .build()
}

/// Free-running counter with enable, built from a ripple incrementer.
///
/// `count` is a 2-bit register; `next = en ? count + 1 : count`.
pub fn counter2() -> NetlistDesc {
    NetlistBuilder::new("counter2")
        .input("en", 1)
        .reg("count", 2, "next")
        .select("c0", 0, "count")
        .select("c1", 1, "count")
        .not("n0", 1, "c0")
        .xor("n1", 1, "c1", "c0")
        .concat("inc", 2, "n1", "n0")
        .mux("next", 2, "en", "count", "inc")
        .output("count")
        .build()
}

/// Single-port RAM with 4-bit addresses and 8-bit words.
pub fn ram_cell() -> NetlistDesc {
    NetlistBuilder::new("ram_cell")
        .input("ra", 4)
        .input("we", 1)
        .input("wa", 4)
        .input("data", 8)
        .ram("q", 4, 8, "ra", "we", "wa", "data")
        .output("q")
        .build()
}

/// A gate for every bitwise operation, over 4-bit operands.
pub fn bitwise_alu() -> NetlistDesc {
    NetlistBuilder::new("bitwise_alu")
        .input("a", 4)
        .input("b", 4)
        .and("and", 4, "a", "b")
        .or("or", 4, "a", "b")
        .xor("xor", 4, "a", "b")
        .binary("nand", 4, nlsim_core::netlist::Op::Nand, "a", "b")
        .binary("nxor", 4, nlsim_core::netlist::Op::Nxor, "a", "b")
        .not("not", 4, "a")
        .and("masked", 4, "a", Operand::literal(0b0110))
        .output("and")
        .output("or")
        .output("xor")
        .output("nand")
        .output("nxor")
        .output("not")
        .output("masked")
        .build()
}
