use base::prelude::Address;

/// The number of bytes pass 1 assumes each instruction occupies,
/// under [`AddressAdvance::Fixed`].
pub const DEFAULT_ADDRESS_ADVANCE: u8 = 3;

/// How pass 1 moves the location counter past an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressAdvance {
    /// Every instruction is assumed to be this many bytes long,
    /// whatever its real length.  Label addresses computed this way
    /// only agree with the emitted code when every instruction in the
    /// program has this length.
    Fixed(u8),
    /// Each instruction advances the counter by its encoded length.
    EncodedSize,
}

impl Default for AddressAdvance {
    fn default() -> AddressAdvance {
        AddressAdvance::Fixed(DEFAULT_ADDRESS_ADVANCE)
    }
}

/// How a label's address is written out when it is substituted for
/// an operand.  The substituted text is then read as a hexadecimal
/// numeral, like any other operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelRendering {
    /// Decimal digits.  Because the result is read back as
    /// hexadecimal, an address of 12 (decimal) is encoded as 0x12.
    #[default]
    Decimal,
    Hexadecimal,
}

impl LabelRendering {
    pub fn render(&self, address: Address) -> String {
        match self {
            LabelRendering::Decimal => address.value().to_string(),
            LabelRendering::Hexadecimal => format!("{address:X}"),
        }
    }
}

/// Settings which change what code the assembler generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerOptions {
    pub address_advance: AddressAdvance,
    pub label_rendering: LabelRendering,
}
