//! Binary and symbolic representations of SIC/XE instructions.
//!
//! SIC/XE instructions come in four formats:
//!
//! |Format|Length |Layout                                  |
//! |------|-------|----------------------------------------|
//! |1     |1 byte |opcode (8)                              |
//! |2     |2 bytes|opcode (8), r1 (4), r2 (4)              |
//! |3     |3 bytes|opcode (6), n i x b p e, disp (12)      |
//! |4     |4 bytes|opcode (6), n i x b p e, address (20)   |
//!
//! Formats 3 and 4 share their opcodes; the `e` bit selects format
//! 4.  Because the bottom two bits of the first byte of a format 3/4
//! instruction hold the `n` and `i` addressing flags, all opcodes are
//! multiples of 4.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

#[cfg(test)]
use test_strategy::{proptest, Arbitrary};

mod format;

/// The instruction formats.  Formats 3 and 4 are not distinguished
/// here because every opcode which can be used in format 3 can also
/// be used in format 4.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Format {
    One,
    Two,
    ThreeOrFour,
}

impl Format {
    /// The length in bytes of an instruction of this format.  For
    /// formats 3/4 the choice is made by the `extended` flag.
    #[must_use]
    pub fn length(&self, extended: bool) -> usize {
        match (self, extended) {
            (Format::One, _) => 1,
            (Format::Two, _) => 2,
            (Format::ThreeOrFour, false) => 3,
            (Format::ThreeOrFour, true) => 4,
        }
    }
}

/// `Opcode` enumerates all the SIC/XE machine instructions.
#[repr(u8)]
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Opcode {
    Lda = 0x00,
    Ldx = 0x04,
    Ldl = 0x08,
    Sta = 0x0C,
    Stx = 0x10,
    Stl = 0x14,
    Add = 0x18,
    Sub = 0x1C,
    Mul = 0x20,
    Div = 0x24,
    Comp = 0x28,
    Tix = 0x2C,
    Jeq = 0x30,
    Jgt = 0x34,
    Jlt = 0x38,
    J = 0x3C,
    And = 0x40,
    Or = 0x44,
    Jsub = 0x48,
    Rsub = 0x4C,
    Ldch = 0x50,
    Stch = 0x54,
    Addf = 0x58,
    Subf = 0x5C,
    Mulf = 0x60,
    Divf = 0x64,
    Ldb = 0x68,
    Lds = 0x6C,
    Ldf = 0x70,
    Ldt = 0x74,
    Stb = 0x78,
    Sts = 0x7C,
    Stf = 0x80,
    Stt = 0x84,
    Compf = 0x88,
    Addr = 0x90,
    Subr = 0x94,
    Mulr = 0x98,
    Divr = 0x9C,
    Compr = 0xA0,
    Shiftl = 0xA4,
    Shiftr = 0xA8,
    Rmo = 0xAC,
    Svc = 0xB0,
    Clear = 0xB4,
    Tixr = 0xB8,
    Float = 0xC0,
    Fix = 0xC4,
    Norm = 0xC8,
    Lps = 0xD0,
    Sti = 0xD4,
    Rd = 0xD8,
    Wd = 0xDC,
    Td = 0xE0,
    Stsw = 0xE8,
    Ssk = 0xEC,
    Sio = 0xF0,
    Hio = 0xF4,
    Tio = 0xF8,
}

impl Opcode {
    #[must_use]
    pub fn number(&self) -> u8 {
        *self as u8
    }

    #[must_use]
    pub fn format(&self) -> Format {
        use Opcode::*;
        match self {
            Float | Fix | Norm | Sio | Hio | Tio => Format::One,
            Addr | Subr | Mulr | Divr | Compr | Shiftl | Shiftr | Rmo | Svc | Clear | Tixr => {
                Format::Two
            }
            _ => Format::ThreeOrFour,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = DisassemblyFailure;
    fn try_from(opcode: u8) -> Result<Opcode, DisassemblyFailure> {
        use Opcode::*;
        match opcode {
            0x00 => Ok(Lda),
            0x04 => Ok(Ldx),
            0x08 => Ok(Ldl),
            0x0C => Ok(Sta),
            0x10 => Ok(Stx),
            0x14 => Ok(Stl),
            0x18 => Ok(Add),
            0x1C => Ok(Sub),
            0x20 => Ok(Mul),
            0x24 => Ok(Div),
            0x28 => Ok(Comp),
            0x2C => Ok(Tix),
            0x30 => Ok(Jeq),
            0x34 => Ok(Jgt),
            0x38 => Ok(Jlt),
            0x3C => Ok(J),
            0x40 => Ok(And),
            0x44 => Ok(Or),
            0x48 => Ok(Jsub),
            0x4C => Ok(Rsub),
            0x50 => Ok(Ldch),
            0x54 => Ok(Stch),
            0x58 => Ok(Addf),
            0x5C => Ok(Subf),
            0x60 => Ok(Mulf),
            0x64 => Ok(Divf),
            0x68 => Ok(Ldb),
            0x6C => Ok(Lds),
            0x70 => Ok(Ldf),
            0x74 => Ok(Ldt),
            0x78 => Ok(Stb),
            0x7C => Ok(Sts),
            0x80 => Ok(Stf),
            0x84 => Ok(Stt),
            0x88 => Ok(Compf),
            // 0x8C is unused.
            0x90 => Ok(Addr),
            0x94 => Ok(Subr),
            0x98 => Ok(Mulr),
            0x9C => Ok(Divr),
            0xA0 => Ok(Compr),
            0xA4 => Ok(Shiftl),
            0xA8 => Ok(Shiftr),
            0xAC => Ok(Rmo),
            0xB0 => Ok(Svc),
            0xB4 => Ok(Clear),
            0xB8 => Ok(Tixr),
            // 0xBC is unused.
            0xC0 => Ok(Float),
            0xC4 => Ok(Fix),
            0xC8 => Ok(Norm),
            // 0xCC is unused.
            0xD0 => Ok(Lps),
            0xD4 => Ok(Sti),
            0xD8 => Ok(Rd),
            0xDC => Ok(Wd),
            0xE0 => Ok(Td),
            // 0xE4 is unused.
            0xE8 => Ok(Stsw),
            0xEC => Ok(Ssk),
            0xF0 => Ok(Sio),
            0xF4 => Ok(Hio),
            0xF8 => Ok(Tio),
            _ => Err(DisassemblyFailure::InvalidOpcode(opcode)),
        }
    }
}

/// Signals that a byte could not be converted to an [`Opcode`].
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum DisassemblyFailure {
    /// The byte does not correspond to a known opcode.
    InvalidOpcode(u8),
}

impl Debug for DisassemblyFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DisassemblyFailure::InvalidOpcode(n) => write!(f, "InvalidOpcode({n:#04X})"),
        }
    }
}

impl Display for DisassemblyFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DisassemblyFailure::InvalidOpcode(n) => write!(f, "invalid opcode {n:02X}"),
        }
    }
}

impl Error for DisassemblyFailure {}

#[cfg(test)]
#[proptest]
fn opcode_number_round_trip(opcode: Opcode) {
    assert_eq!(Opcode::try_from(opcode.number()), Ok(opcode));
}

#[cfg(test)]
#[proptest]
fn opcodes_leave_room_for_addressing_flags(opcode: Opcode) {
    assert_eq!(opcode.number() & 0b11, 0);
}

#[test]
fn test_unused_opcodes() {
    for n in [0x8C_u8, 0xBC, 0xCC, 0xE4, 0xFC, 0x01] {
        assert_eq!(
            Opcode::try_from(n),
            Err(DisassemblyFailure::InvalidOpcode(n))
        );
    }
}

#[test]
fn test_format_lengths() {
    assert_eq!(Opcode::Fix.format().length(false), 1);
    assert_eq!(Opcode::Clear.format().length(false), 2);
    assert_eq!(Opcode::Lda.format().length(false), 3);
    assert_eq!(Opcode::Lda.format().length(true), 4);
    assert_eq!(Opcode::Rsub.format(), Format::ThreeOrFour);
}
