//! The prelude exports the types which are useful in representing
//! 8085 instructions.  Providing this prelude is the main purpose of
//! the base crate.
pub use super::instruction::*;
pub use super::opcodes::{opcode_table, OpcodeTable};
pub use super::register::Register;
pub use super::subword::{high_byte, join_word, low_byte, split_word};
pub use super::types::*;
