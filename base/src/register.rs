//! Register names as they appear in 8085 instruction operands.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[cfg(test)]
use test_strategy::Arbitrary;

/// A register named by an instruction operand.
///
/// This covers the accumulator and the six general-purpose 8-bit
/// registers, the `M` pseudo-register (the memory byte addressed by
/// the H/L pair), and the two names which only appear in register-pair
/// instructions: `SP` (stack pointer, for `LXI`, `INX`, `DCX` and
/// `DAD`) and `PSW` (accumulator plus flags, for `PUSH` and `POP`).
/// Register-pair instructions name the pairs BC, DE and HL by their
/// first register (`B`, `D`, `H`).
///
/// Names are matched without regard to case.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    SP,
    PSW,
}

impl Register {
    /// The registers which can appear in the 3-bit register fields
    /// of an opcode, in order of their field value.
    pub const EIGHT_BIT: [Register; 8] = [
        Register::B,
        Register::C,
        Register::D,
        Register::E,
        Register::H,
        Register::L,
        Register::M,
        Register::A,
    ];

    /// The value this register takes in the 3-bit register field of
    /// an opcode (`B`=0 through `A`=7), or `None` for `SP` and `PSW`
    /// which never appear in such a field.
    pub fn code(self) -> Option<u8> {
        Register::EIGHT_BIT
            .iter()
            .position(|r| *r == self)
            .and_then(|pos| u8::try_from(pos).ok())
    }

    /// Returns true for `A`, `B`, `C`, `D`, `E`, `H`, `L` and `M`.
    pub fn is_eight_bit(self) -> bool {
        self.code().is_some()
    }
}
