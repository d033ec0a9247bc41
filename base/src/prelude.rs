//! The prelude exports a number of structs which are useful in
//! representing things to do with SIC/XE.  Providing this prelude
//! is the main purpose of the base crate.
pub use super::error::*;
pub use super::instruction::*;
pub use super::register::*;
pub use super::word::*;
