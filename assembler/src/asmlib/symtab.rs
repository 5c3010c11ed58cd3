//! The label table, and pass 1 which builds it.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use tracing::{event, span, Level};

use base::prelude::Address;

use super::options::{AddressAdvance, AssemblerOptions, DEFAULT_ADDRESS_ADVANCE};
use super::resolver;
use super::tokenizer::{tokenize, InstructionText};

/// Maps label names (which are case-sensitive) to addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: BTreeMap<String, Address>,
}

impl LabelTable {
    #[must_use]
    pub fn new() -> LabelTable {
        LabelTable::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Address> {
        self.labels.get(name).copied()
    }

    /// Record the address of a label, returning its previous address
    /// if it was already defined.
    pub fn define(&mut self, name: &str, address: Address) -> Option<Address> {
        self.labels.insert(name.to_string(), address)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over the labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> {
        self.labels.iter().map(|(name, address)| (name.as_str(), *address))
    }
}

impl Display for LabelTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, address) in self.iter() {
            writeln!(f, "{name:<16} {address}")?;
        }
        Ok(())
    }
}

fn advance(instruction: &InstructionText<'_>, policy: AddressAdvance) -> u16 {
    match policy {
        AddressAdvance::Fixed(n) => u16::from(n),
        AddressAdvance::EncodedSize => {
            match resolver::lookup(instruction.mnemonic, &instruction.operands) {
                Ok((_, descriptor)) => u16::from(descriptor.size),
                Err(_) => u16::from(DEFAULT_ADDRESS_ADVANCE),
            }
        }
    }
}

/// Pass 1: work out the address of every label.
///
/// The location counter starts at zero and is moved on past each
/// instruction according to `options.address_advance`.  Lines
/// without an instruction do not move it.  If a label is defined more
/// than once, the last definition wins.
pub fn build_label_table<'a, I>(lines: I, options: &AssemblerOptions) -> LabelTable
where
    I: IntoIterator<Item = &'a str>,
{
    let span = span!(Level::DEBUG, "pass 1");
    let _enter = span.enter();

    let mut labels = LabelTable::new();
    let mut here = Address::ZERO;
    for (line_number, line) in (1..).zip(lines) {
        let tokenized = tokenize(line);
        if let Some(label) = tokenized.label {
            if let Some(previous) = labels.define(label, here) {
                event!(
                    Level::WARN,
                    "line {line_number}: label {label} redefined (was {previous}, now {here})"
                );
            }
        }
        if let Some(instruction) = tokenized.instruction {
            here = here.wrapping_add(advance(&instruction, options.address_advance));
        }
    }
    event!(
        Level::DEBUG,
        "pass 1 defined {} labels; final location counter is {here}",
        labels.len()
    );
    labels
}
