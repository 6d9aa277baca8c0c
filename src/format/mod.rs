//! Compiled format representations: the public `Format` type, and the
//! scanner/machine/plumbing modules it is built from.

mod fop;
mod machine;
mod parser;
pub mod syntax;
mod write;

pub use syntax::SyntaxKind;

use crate::error::Error;
use crate::value::Value;
use fop::Fop;
use write::Write as _;

/// A compiled format representation: a sequence of format operations that
/// can render a [`Value`] to a string (`format`) or parse a string back
/// into one (`read`).
///
/// Compilation happens once, in [`Format::compile`]; the resulting fop
/// list is immutable and can be reused (and shared across threads) for
/// any number of `format`/`read` calls.
#[derive(Debug, Clone)]
pub struct Format {
    fops: Vec<Fop>,
}

impl Format {
    /// Compiles a format representation string.
    ///
    /// `initial_syntax` selects the table that resolves the first
    /// character's ambiguous digit letters and designators (most
    /// representations open with an unambiguous prefix like `P` or `R`
    /// and can pass [`SyntaxKind::Date`]; a bare time-of-day or UTC-offset
    /// representation with no leading designator needs
    /// [`SyntaxKind::Time`] or [`SyntaxKind::UtcOffset`] respectively).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StopFormat`] if `repr` contains a character that
    /// is not part of the format-representation alphabet in the given
    /// context.
    pub fn compile(repr: &str, initial_syntax: SyntaxKind) -> Result<Self, Error> {
        Ok(Self {
            fops: parser::compile(repr, initial_syntax)?,
        })
    }

    /// Renders `value` into a freshly allocated `String`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormattedStringTooLarge`] if the string cannot be
    /// allocated, or a format-machine error for a malformed `value`.
    pub fn format(&self, value: &Value) -> Result<String, Error> {
        let mut sink = String::new();
        self.write_formatted(&mut sink, value)?;
        Ok(sink)
    }

    /// Renders `value` into a freshly allocated byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormattedStringTooLarge`] if the buffer cannot be
    /// allocated, or a format-machine error for a malformed `value`.
    pub fn format_bytes(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut sink = Vec::new();
        self.write_formatted(&mut sink, value)?;
        Ok(sink)
    }

    /// Renders `value` into `buf`, a fixed-size byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteZero`] if `buf` is too small to hold the
    /// formatted output, or a format-machine error for a malformed
    /// `value`.
    pub fn format_buf(&self, buf: &mut [u8], value: &Value) -> Result<(), Error> {
        let mut cursor = buf;
        self.write_formatted(&mut cursor, value)
    }

    fn write_formatted<W: write::Write>(&self, sink: &mut W, value: &Value) -> Result<(), Error> {
        let rendered = machine::format(&self.fops, value)?;
        sink.write_all(&rendered)
    }

    /// Parses `input` back into a [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StopFormat`] if `input` does not match this
    /// representation, or if the matched fragments cannot be merged into
    /// a single value.
    pub fn read(&self, input: &str) -> Result<Value, Error> {
        machine::read(&self.fops, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Unit, UnitKind};

    fn u(kind: UnitKind, value: i64) -> Unit {
        Unit::new(kind, value).unwrap()
    }

    #[test]
    fn test_format_then_read_round_trips() {
        let format = Format::compile("YYYY-MM-DD", SyntaxKind::Date).unwrap();
        let value =
            Value::calendar_date(u(UnitKind::Year, 1985), u(UnitKind::Month, 4), u(UnitKind::DayOfMonth, 12))
                .unwrap();
        let rendered = format.format(&value).unwrap();
        assert_eq!(rendered, "1985-04-12");
        assert_eq!(format.read(&rendered).unwrap(), value);
    }

    #[test]
    fn test_format_buf_reports_write_zero_on_overflow() {
        let format = Format::compile("YYYY", SyntaxKind::Date).unwrap();
        let value = Value::Unit(u(UnitKind::Year, 1985));
        let mut buf = [0u8; 2];
        assert_eq!(format.format_buf(&mut buf, &value), Err(Error::WriteZero));
    }

    #[test]
    fn test_compile_rejects_unrecognized_digit_letter() {
        assert!(Format::compile("YYYYxMM", SyntaxKind::Date).is_err());
    }
}
