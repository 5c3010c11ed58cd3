//! The `base` crate defines the Intel 8085 instruction set as an
//! assembler needs to see it: register names, mnemonics, the shapes
//! of instruction operands, and the table mapping each instruction
//! form to its opcode byte and length.  The idea is that anything
//! which needs to know about 8085 instructions (an assembler, a
//! disassembler, a simulator) can depend on this crate without
//! depending on the assembler's handling of source text.

mod types;

pub mod instruction;
pub mod opcodes;
pub mod prelude;
pub mod register;
pub mod subword;
