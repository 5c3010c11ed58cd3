use std::fmt::{self, Display, Formatter, UpperHex};

#[cfg(test)]
use test_strategy::Arbitrary;

use super::subword::{join_word, split_word};

/// An 8085 memory address.  The address bus is 16 bits wide.
///
/// Address arithmetic wraps from 0xFFFF to 0, as the program counter
/// of the real processor does.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u16);

impl Address {
    pub const ZERO: Address = Address(0);
    pub const MAX: Address = Address(u16::MAX);

    pub const fn new(a: u16) -> Address {
        Address(a)
    }

    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Computes the address `delta` bytes beyond this one, wrapping
    /// at the top of memory.
    #[must_use]
    pub fn wrapping_add(&self, delta: u16) -> Address {
        Address(self.0.wrapping_add(delta))
    }

    /// Split an address into the (low, high) byte pair in the order
    /// in which those bytes follow an opcode.  The `split` method is
    /// the opposite of `join`.
    pub fn split(&self) -> (u8, u8) {
        split_word(self.0)
    }

    pub fn join(low: u8, high: u8) -> Address {
        Address(join_word(low, high))
    }
}

impl From<u16> for Address {
    fn from(a: u16) -> Address {
        Address(a)
    }
}

impl From<Address> for u16 {
    fn from(addr: Address) -> u16 {
        addr.0
    }
}

impl From<Address> for u32 {
    fn from(addr: Address) -> u32 {
        u32::from(addr.0)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl UpperHex for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        UpperHex::fmt(&self.0, f)
    }
}
