use std::fmt::{self, Display, Formatter};

use super::driver::{Assembly, LineOutcome};

const EMPTY: &str = "";

/// A human-readable account of an [`Assembly`]: the code generated
/// for each instruction line, followed by the label table.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    assembly: &'a Assembly,
}

impl<'a> Listing<'a> {
    pub(crate) fn new(assembly: &'a Assembly) -> Listing<'a> {
        Listing { assembly }
    }
}

struct ListingLine<'a>(&'a LineOutcome);

impl Display for ListingLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let source = outcome.source.trim_end();
        match &outcome.result {
            Ok(encoded) => {
                let bytes = encoded.to_string();
                write!(f, "{:>5}  {bytes:<8}  {source}", outcome.line_number)
            }
            Err(e) => write!(
                f,
                "{:>5}  {EMPTY:<8}  {source}\n{EMPTY:>5}  ** {e}",
                outcome.line_number
            ),
        }
    }
}

impl Display for Listing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Code:")?;
        for outcome in self.assembly.outcomes() {
            writeln!(f, "{}", ListingLine(outcome))?;
        }
        writeln!(f)?;
        writeln!(f, "Labels:")?;
        write!(f, "{}", self.assembly.labels())
    }
}
