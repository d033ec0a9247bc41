//! The SIC/XE register file, as seen by a programmer.
//!
//! Registers are identified by number in format 2 instructions.  The
//! numbering has a gap: 7 is unused, PC is 8 and SW is 9.  PC and SW
//! cannot be named as operands in assembly language; only the
//! registers in [`OPERAND_REGISTER_LETTERS`] can.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[cfg(test)]
use test_strategy::{proptest, Arbitrary};

/// The letters which name registers in assembly language.  The
/// position of each letter is the number of the register.
pub const OPERAND_REGISTER_LETTERS: &str = "AXLBSTF";

#[repr(u8)]
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Register {
    /// Accumulator.
    A = 0,
    /// Index register.
    X = 1,
    /// Linkage register (return address of JSUB).
    L = 2,
    /// Base register.
    B = 3,
    S = 4,
    T = 5,
    /// Floating-point accumulator (48 bits).
    F = 6,
    /// Program counter.
    PC = 8,
    /// Status word, including the condition code.
    SW = 9,
}

impl Register {
    #[must_use]
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Look up the register named by `letter` in assembly language.
    /// Matching is case-sensitive.
    #[must_use]
    pub fn from_operand_letter(letter: char) -> Option<Register> {
        let pos = OPERAND_REGISTER_LETTERS.find(letter)?;
        u8::try_from(pos)
            .ok()
            .and_then(|n| Register::try_from(n).ok())
    }
}

/// Signals that a number does not identify a register.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NoSuchRegister(pub u8);

impl Display for NoSuchRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "there is no register number {}", self.0)
    }
}

impl Error for NoSuchRegister {}

impl TryFrom<u8> for Register {
    type Error = NoSuchRegister;
    fn try_from(n: u8) -> Result<Register, NoSuchRegister> {
        use Register::*;
        match n {
            0 => Ok(A),
            1 => Ok(X),
            2 => Ok(L),
            3 => Ok(B),
            4 => Ok(S),
            5 => Ok(T),
            6 => Ok(F),
            // 7 is unused.
            8 => Ok(PC),
            9 => Ok(SW),
            _ => Err(NoSuchRegister(n)),
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Register::*;
        f.write_str(match self {
            A => "A",
            X => "X",
            L => "L",
            B => "B",
            S => "S",
            T => "T",
            F => "F",
            PC => "PC",
            SW => "SW",
        })
    }
}

#[test]
fn test_operand_letters_follow_register_numbers() {
    for (expected, letter) in (0_u8..).zip(OPERAND_REGISTER_LETTERS.chars()) {
        let reg = Register::from_operand_letter(letter)
            .unwrap_or_else(|| panic!("{letter} should name a register"));
        assert_eq!(reg.number(), expected);
        assert_eq!(reg.to_string(), letter.to_string());
    }
}

#[test]
fn test_operand_letters_are_case_sensitive() {
    assert_eq!(Register::from_operand_letter('a'), None);
    assert_eq!(Register::from_operand_letter('Z'), None);
    assert_eq!(Register::from_operand_letter('P'), None);
}

#[test]
fn test_unused_register_number() {
    assert_eq!(Register::try_from(7), Err(NoSuchRegister(7)));
    assert_eq!(Register::try_from(10), Err(NoSuchRegister(10)));
}

#[cfg(test)]
#[proptest]
fn register_number_round_trip(reg: Register) {
    assert_eq!(Register::try_from(reg.number()), Ok(reg));
}
