//! The `base` crate defines the SIC/XE-related things which are
//! useful in both a simulator and other associated tools.  The idea
//! is that if you want to write an assembler, it would depend on the
//! base crate but would not need to depend on a simulator library.
//!
//! The assembler only encodes.  The decoding side (`Opcode`'s
//! `TryFrom<u8>`, [`instruction::DisassemblyFailure`],
//! [`instruction::Format::length`] and `Unsigned24Bit::from_be_bytes`)
//! is kept for a future disassembler or simulator.

mod error;
mod word;

pub mod instruction;
pub mod prelude;
pub mod register;
