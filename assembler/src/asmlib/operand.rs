use std::num::IntErrorKind;

use super::options::LabelRendering;
use super::symtab::LabelTable;
use super::types::LineErrorKind;

const RADIX_SUFFIXES: [char; 2] = ['H', 'h'];

fn strip_radix_suffix(text: &str) -> &str {
    text.strip_suffix(RADIX_SUFFIXES).unwrap_or(text)
}

fn out_of_range(operand: &str, limit: u16) -> LineErrorKind {
    LineErrorKind::OperandOutOfRange {
        operand: operand.to_string(),
        limit,
    }
}

fn parse_hex(text: &str, operand: &str, limit: u16) -> Result<u32, LineErrorKind> {
    let malformed = || LineErrorKind::MalformedNumericOperand {
        operand: operand.to_string(),
    };
    // from_str_radix would also accept a leading sign.
    if !text.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    u32::from_str_radix(text, 16).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => out_of_range(operand, limit),
        _ => malformed(),
    })
}

/// Work out the value of a value operand, which is either a label or
/// a hexadecimal numeral with an optional `H` suffix.
///
/// A label's address is rendered as text according to `rendering`
/// and then read as hexadecimal, just as if it had been written in
/// place of the label.  Only the bits which fit in the operand field
/// are kept, so under decimal rendering a label at 10002 yields
/// `0x10002 & 0xFFFF`, which is 2.
///
/// Operands which are not labels are literals, so `JMP BEEF` jumps to
/// `BEEF` unless a label of that name exists.  A literal which does
/// not fit in the operand field is an error.
pub(crate) fn operand_value(
    operand: &str,
    limit: u16,
    labels: &LabelTable,
    rendering: LabelRendering,
) -> Result<u16, LineErrorKind> {
    let stripped = strip_radix_suffix(operand);
    match labels.get(operand).or_else(|| labels.get(stripped)) {
        Some(address) => {
            let n = parse_hex(&rendering.render(address), operand, limit)?;
            u16::try_from(n & u32::from(limit)).map_err(|_| out_of_range(operand, limit))
        }
        None => {
            let n = parse_hex(stripped, operand, limit)?;
            u16::try_from(n)
                .ok()
                .filter(|value| *value <= limit)
                .ok_or_else(|| out_of_range(operand, limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use base::prelude::Address;

    use super::*;

    fn table(entries: &[(&str, u16)]) -> LabelTable {
        let mut labels = LabelTable::new();
        for (name, address) in entries {
            labels.define(name, Address::new(*address));
        }
        labels
    }

    fn value(operand: &str, limit: u16, labels: &LabelTable) -> Result<u16, LineErrorKind> {
        operand_value(operand, limit, labels, LabelRendering::Decimal)
    }

    #[test]
    fn test_literals() {
        let labels = LabelTable::new();
        assert_eq!(value("10H", 0xFF, &labels), Ok(0x10));
        assert_eq!(value("10h", 0xFF, &labels), Ok(0x10));
        assert_eq!(value("10", 0xFF, &labels), Ok(0x10));
        assert_eq!(value("0FFH", 0xFF, &labels), Ok(0xFF));
        assert_eq!(value("2050H", 0xFFFF, &labels), Ok(0x2050));
        assert_eq!(value("beef", 0xFFFF, &labels), Ok(0xBEEF));
    }

    #[test]
    fn test_malformed() {
        let labels = LabelTable::new();
        for operand in ["", "H", "XYZ", "+10", "-1", "1 0", "10HH", "0x10"] {
            assert_eq!(
                value(operand, 0xFFFF, &labels),
                Err(LineErrorKind::MalformedNumericOperand {
                    operand: operand.to_string()
                }),
                "operand {operand:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range() {
        let labels = LabelTable::new();
        assert_eq!(
            value("100H", 0xFF, &labels),
            Err(LineErrorKind::OperandOutOfRange {
                operand: "100H".to_string(),
                limit: 0xFF,
            })
        );
        assert_eq!(
            value("10000", 0xFFFF, &labels),
            Err(LineErrorKind::OperandOutOfRange {
                operand: "10000".to_string(),
                limit: 0xFFFF,
            })
        );
        assert_eq!(
            value("123456789ABCDEF", 0xFFFF, &labels),
            Err(LineErrorKind::OperandOutOfRange {
                operand: "123456789ABCDEF".to_string(),
                limit: 0xFFFF,
            })
        );
    }

    #[test]
    fn test_label_substitution_is_decimal_read_as_hex() {
        let labels = table(&[("LOOP", 12), ("START", 0)]);
        assert_eq!(value("START", 0xFFFF, &labels), Ok(0));
        assert_eq!(value("LOOP", 0xFFFF, &labels), Ok(0x12));
        assert_eq!(
            operand_value("LOOP", 0xFFFF, &labels, LabelRendering::Hexadecimal),
            Ok(12)
        );
    }

    #[test]
    fn test_label_lookup_with_suffix() {
        let labels = table(&[("LOOP", 3), ("BEEF", 6)]);
        // The suffix is ignored when the rest is a label.
        assert_eq!(value("LOOPH", 0xFFFF, &labels), Ok(3));
        // A label shadows the literal of the same spelling.
        assert_eq!(value("BEEF", 0xFFFF, &labels), Ok(6));
        // The full text is tried first.
        let labels = table(&[("PATH", 9), ("PAT", 1)]);
        assert_eq!(value("PATH", 0xFFFF, &labels), Ok(9));
    }

    #[test]
    fn test_label_values_are_masked_to_operand_width() {
        // Decimal 256 is read back as 0x256.
        let labels = table(&[("FAR", 256), ("FARTHER", 10002)]);
        assert_eq!(value("FAR", 0xFF, &labels), Ok(0x56));
        assert_eq!(value("FAR", 0xFFFF, &labels), Ok(0x256));
        assert_eq!(value("FARTHER", 0xFFFF, &labels), Ok(0x0002));
        assert_eq!(value("FARTHER", 0xFF, &labels), Ok(0x02));
        assert_eq!(
            operand_value("FARTHER", 0xFFFF, &labels, LabelRendering::Hexadecimal),
            Ok(10002)
        );
    }

    #[test]
    fn test_undefined_label_is_malformed() {
        let labels = table(&[("LOOP", 3)]);
        assert_eq!(
            value("NOWHERE", 0xFFFF, &labels),
            Err(LineErrorKind::MalformedNumericOperand {
                operand: "NOWHERE".to_string()
            })
        );
    }
}
