//! Error type returned by fallible operations throughout this crate.

use core::fmt;

use crate::units::UnitKind;

/// Error type returned by constructors, arithmetic, and the format machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A time unit's value fell outside the inclusive range for its kind.
    InvalidTimeUnit {
        /// The kind of unit that was out of range.
        kind: UnitKind,
        /// The rejected value, formatted for display.
        value: String,
    },
    /// A representation was constructed with an absent element to the left
    /// of a present one (accuracy-reduction invariant violation), or a
    /// cardinal unit was constructed with a negative value.
    ValueError(String),
    /// Time arithmetic carried past its most significant component.
    ///
    /// Carries the partial result (with the overflowing component wrapped)
    /// and the signed number of whole units carried into the next-coarser
    /// unit. `DateTime` arithmetic is the only internal consumer; it folds
    /// the carry into a day adjustment and retries on the date side.
    TimeUnitOverflow {
        /// The wrapped partial value.
        partial: Box<crate::value::Value>,
        /// Signed carry count into the next-coarser unit.
        carry: i64,
    },
    /// A format operation could not consume the remaining input, or a
    /// required merge failed while reading.
    StopFormat(String),
    /// The output sink could not accept the whole formatted string.
    FormattedStringTooLarge,
    /// The output buffer was too small to hold the formatted string.
    WriteZero,
    /// Formatting error, corresponding to [`core::fmt::Error`].
    FmtError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTimeUnit { kind, value } => {
                write!(f, "invalid value {value:?} for unit {kind:?}")
            }
            Error::ValueError(msg) => write!(f, "{msg}"),
            Error::TimeUnitOverflow { carry, .. } => {
                write!(f, "time arithmetic overflowed by {carry} unit(s)")
            }
            Error::StopFormat(msg) => write!(f, "format error: {msg}"),
            Error::FormattedStringTooLarge => write!(f, "formatted string too large"),
            Error::WriteZero => write!(f, "failed to write the whole buffer"),
            Error::FmtError => write!(f, "formatter error"),
        }
    }
}

impl std::error::Error for Error {}
