//! Human-oriented formatting for instructions (or parts of instructions).
use std::fmt::{self, Display, Formatter};

use super::{Format, Opcode};

/// Convert an opcode to its assembly-language mnemonic (without the
/// `+` which selects format 4).
impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        use Opcode::*;
        f.write_str(match self {
            Lda => "LDA",
            Ldx => "LDX",
            Ldl => "LDL",
            Sta => "STA",
            Stx => "STX",
            Stl => "STL",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Comp => "COMP",
            Tix => "TIX",
            Jeq => "JEQ",
            Jgt => "JGT",
            Jlt => "JLT",
            J => "J",
            And => "AND",
            Or => "OR",
            Jsub => "JSUB",
            Rsub => "RSUB",
            Ldch => "LDCH",
            Stch => "STCH",
            Addf => "ADDF",
            Subf => "SUBF",
            Mulf => "MULF",
            Divf => "DIVF",
            Ldb => "LDB",
            Lds => "LDS",
            Ldf => "LDF",
            Ldt => "LDT",
            Stb => "STB",
            Sts => "STS",
            Stf => "STF",
            Stt => "STT",
            Compf => "COMPF",
            Addr => "ADDR",
            Subr => "SUBR",
            Mulr => "MULR",
            Divr => "DIVR",
            Compr => "COMPR",
            Shiftl => "SHIFTL",
            Shiftr => "SHIFTR",
            Rmo => "RMO",
            Svc => "SVC",
            Clear => "CLEAR",
            Tixr => "TIXR",
            Float => "FLOAT",
            Fix => "FIX",
            Norm => "NORM",
            Lps => "LPS",
            Sti => "STI",
            Rd => "RD",
            Wd => "WD",
            Td => "TD",
            Stsw => "STSW",
            Ssk => "SSK",
            Sio => "SIO",
            Hio => "HIO",
            Tio => "TIO",
        })
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Format::One => "format 1",
            Format::Two => "format 2",
            Format::ThreeOrFour => "format 3/4",
        })
    }
}

#[test]
fn test_opcode_display() {
    assert_eq!(Opcode::Lda.to_string(), "LDA");
    assert_eq!(Opcode::Shiftl.to_string(), "SHIFTL");
    assert_eq!(Opcode::J.to_string(), "J");
    assert_eq!(Opcode::Stsw.to_string(), "STSW");
}
