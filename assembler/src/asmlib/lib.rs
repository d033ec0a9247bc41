//! Front end of an assembler for the SIC/XE computer.
//!
//! [`parse`] turns assembly source into a [`Code`], a sequence of
//! instruction records.  Symbols are not resolved and no addresses
//! are assigned; that is the job of later passes.
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::module_name_repetitions)]

mod ast;
mod driver;
mod lexer;
mod mnemonic;
mod parser;
mod source;
mod symbol;
mod types;

pub use ast::{Addressing, Code, MemoryOperand, Node, NodeKind, Operand, Target, Value};
pub use driver::*;
pub use mnemonic::{Directive, Mnemonic, Mnemonics, Operation, Storage, Syntax};
pub use parser::parse;
pub use source::LineAndColumn;
pub use symbol::SymbolName;
pub use types::{AssemblerFailure, SyntaxError};
