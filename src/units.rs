//! Time units: tagged numeric scalars with range validation.

use core::fmt;

use rust_decimal::Decimal;

use crate::error::Error;

/// The kind of a [`Unit`].
///
/// Ordinal kinds (`Year`, `Month`, ...) carry an inclusive range on their
/// absolute value. Cardinal kinds (`Years`, `Months`, ...) are the
/// unbounded, non-negative quantities used inside a `Duration`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Calendar year.
    Year,
    /// Month of the year, `1..=12`.
    Month,
    /// ISO week number, `1..=53`.
    Week,
    /// Day of the month, `1..=31`.
    DayOfMonth,
    /// Day of the year, `1..=366`.
    DayOfYear,
    /// Day of the week, `1..=7` with Monday as `1`.
    DayOfWeek,
    /// Hour of the day, `0..=24`.
    Hour,
    /// Minute of the hour, `0..=59`.
    Minute,
    /// Second of the minute, `0..=60` (60 to allow a leap second).
    Second,
    /// Recurrence count of a recurring time interval.
    Recurrences,
    /// Cardinal years in a duration.
    Years,
    /// Cardinal months in a duration.
    Months,
    /// Cardinal weeks in a `WeeksDuration`.
    Weeks,
    /// Cardinal days in a duration.
    Days,
    /// Cardinal hours in a duration.
    Hours,
    /// Cardinal minutes in a duration.
    Minutes,
    /// Cardinal seconds in a duration.
    Seconds,
}

impl UnitKind {
    /// Returns the inclusive `(min, max)` range for ordinal kinds, or
    /// `None` for cardinal kinds (which are only bounded below by zero).
    #[must_use]
    pub const fn range(self) -> Option<(i64, i64)> {
        match self {
            UnitKind::Year => Some((0, 9999)),
            UnitKind::Month => Some((1, 12)),
            UnitKind::Week => Some((1, 53)),
            UnitKind::DayOfMonth => Some((1, 31)),
            UnitKind::DayOfYear => Some((1, 366)),
            UnitKind::DayOfWeek => Some((1, 7)),
            UnitKind::Hour => Some((0, 24)),
            UnitKind::Minute => Some((0, 59)),
            UnitKind::Second => Some((0, 60)),
            UnitKind::Recurrences => None,
            UnitKind::Years
            | UnitKind::Months
            | UnitKind::Weeks
            | UnitKind::Days
            | UnitKind::Hours
            | UnitKind::Minutes
            | UnitKind::Seconds => None,
        }
    }

    /// Returns `true` for the unbounded, non-negative duration-component
    /// kinds (`Years`, `Months`, `Weeks`, `Days`, `Hours`, `Minutes`,
    /// `Seconds`).
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            UnitKind::Years
                | UnitKind::Months
                | UnitKind::Weeks
                | UnitKind::Days
                | UnitKind::Hours
                | UnitKind::Minutes
                | UnitKind::Seconds
        )
    }

    /// Returns the cardinal kind that corresponds to this ordinal kind's
    /// "count of" interpretation, if any (e.g. `Month -> Months`).
    #[must_use]
    pub const fn to_cardinal(self) -> Option<UnitKind> {
        match self {
            UnitKind::Year => Some(UnitKind::Years),
            UnitKind::Month => Some(UnitKind::Months),
            UnitKind::Week => Some(UnitKind::Weeks),
            UnitKind::DayOfMonth | UnitKind::DayOfYear => Some(UnitKind::Days),
            UnitKind::Hour => Some(UnitKind::Hours),
            UnitKind::Minute => Some(UnitKind::Minutes),
            UnitKind::Second => Some(UnitKind::Seconds),
            _ => None,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A time unit: a kind, an optional value, and whether the source text
/// carried an explicit sign.
///
/// The "absent" state (`value: None`) is distinct from zero: it represents
/// an elided component of a reduced-accuracy representation and is what
/// drives the accuracy-reduction invariant on [`crate::value::Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    kind: UnitKind,
    value: Option<Decimal>,
    signed: bool,
}

impl Unit {
    /// Constructs an unsigned unit with the given value, validating its
    /// range.
    ///
    /// `signed` is a flag distinct from the sign of `value` itself (an
    /// unsigned `00` differs from a signed `+00`); this constructor always
    /// leaves it unset. Use [`Unit::new_signed`] to construct a unit that
    /// carries an explicit sign.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeUnit`] if `value` is outside the kind's
    /// range, and [`Error::ValueError`] if a cardinal kind is constructed
    /// with a negative value.
    pub fn new(kind: UnitKind, value: impl Into<Decimal>) -> Result<Self, Error> {
        Self::new_signed(kind, value, false)
    }

    /// Constructs a unit with the given value and an explicit `signed`
    /// flag, validating its range.
    ///
    /// `signed` is independent of `value`'s own sign: a unit can be
    /// numerically negative without `signed` being set only if `value`
    /// itself carries the sign (e.g. a cardinal rejects negative values
    /// outright), but a non-negative `value` can still be marked `signed`
    /// to distinguish a `+00` from a bare `00`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeUnit`] if `value` is outside the kind's
    /// range, and [`Error::ValueError`] if a cardinal kind is constructed
    /// with a negative value.
    pub fn new_signed(kind: UnitKind, value: impl Into<Decimal>, signed: bool) -> Result<Self, Error> {
        let value = value.into();
        Self::validate(kind, value)?;
        Ok(Self {
            kind,
            value: Some(value),
            signed,
        })
    }

    /// Constructs a unit from a decimal string such as `"23.3"` or `"-05"`.
    ///
    /// The leading `signed` flag is set iff `text` begins with `+` or `-`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if `text` is not a valid decimal, or
    /// [`Error::InvalidTimeUnit`] if the parsed value is out of range.
    pub fn parse(kind: UnitKind, text: &str) -> Result<Self, Error> {
        let signed = text.starts_with('+') || text.starts_with('-');
        let value: Decimal = text
            .parse()
            .map_err(|_| Error::ValueError(format!("{text:?} is not a valid unit value")))?;
        Self::new_signed(kind, value, signed)
    }

    /// Constructs an absent unit of the given kind.
    #[must_use]
    pub const fn absent(kind: UnitKind) -> Self {
        Self {
            kind,
            value: None,
            signed: false,
        }
    }

    fn validate(kind: UnitKind, value: Decimal) -> Result<(), Error> {
        if kind.is_cardinal() {
            if value.is_sign_negative() {
                return Err(Error::ValueError(format!(
                    "cardinal unit {kind:?} cannot be negative"
                )));
            }
            return Ok(());
        }
        if let Some((min, max)) = kind.range() {
            let abs = value.abs();
            if abs < Decimal::from(min) || abs > Decimal::from(max) {
                return Err(Error::InvalidTimeUnit {
                    kind,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// This unit's kind.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// This unit's value, or `None` if absent.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Whether the source text carried an explicit leading sign.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Whether this unit is absent (carries no value).
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// This unit's value coerced to an integer, or `0` if absent.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.value
            .map(|v| v.trunc().try_into().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Re-tags this unit with a new kind, keeping its value and sign.
    ///
    /// Used by the format machine's `Coerce` fop, which reinterprets a
    /// generic duration placeholder (`n`) as a concrete kind once the
    /// postfix designator (`Y`, `M`, `D`, `H`, `M`, `S`) is seen.
    #[must_use]
    pub fn with_kind(&self, kind: UnitKind) -> Self {
        Self {
            kind,
            value: self.value,
            signed: self.signed,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "(absent {:?})", self.kind),
        }
    }
}
