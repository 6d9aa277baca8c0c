//! The syntax stack: classifies characters of a format representation
//! string according to which representation kind is currently active.
//!
//! Unlike a flat designator table, several digit letters and designator
//! characters mean different things depending on context (`M` is months
//! before a duration's `T` switch and minutes after it; `T` itself is a
//! date/time separator outside a duration but a syntax switch inside
//! one). The active [`SyntaxKind`] at the top of the parser's stack is
//! what resolves the ambiguity.

use crate::units::UnitKind;

/// The representation kind currently being scanned.
///
/// Exposed publicly so a caller compiling a format representation that
/// doesn't open with an unambiguous prefix (e.g. a bare `"hh:mm:ss"` with
/// no leading `T`) can say which table should resolve its first
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    /// `CalendarDate`/`OrdinalDate`: `Y`, `M`, `D` (day-of-month once a
    /// month has been seen in this scope, day-of-year otherwise).
    Date,
    /// `WeekDate`: `Y`, `w`, `D` (day-of-week).
    WeekDate,
    /// `Time`: `h`, `m`, `s`.
    Time,
    /// `UtcOffset`: `h` (signed), `m`.
    UtcOffset,
    /// `Duration`'s calendar half: `Y`, `M`, `D`, with `T` switching to
    /// [`SyntaxKind::TimeDuration`].
    Duration,
    /// `Duration`'s clock half, entered after `T`: `H`, `M`, `S`.
    TimeDuration,
    /// `WeeksDuration`: `W` (cardinal weeks).
    WeeksDuration,
    /// `RecurringTimeInterval`'s recurrence count, entered after `R`.
    Recurring,
}

/// What a designator character does when the given syntax frame is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Designator {
    /// Opens a nested scope of the given kind (e.g. `P` opens a
    /// duration).
    Push(SyntaxKind),
    /// Switches the current frame in place, without pushing a new scope
    /// (the duration `T` switch).
    Switch(SyntaxKind),
    /// Re-tags the preceding generic element with a concrete kind.
    Coerce(UnitKind),
    /// The `Z` UTC designator.
    Utc,
}

/// Classifies a designator character for the given active frame.
///
/// Frame-specific rules are tried before the generic fallbacks: `W` is a
/// `Weeks` coercion inside an open `Duration` (`P3W`) or `WeeksDuration`
/// frame, and only switches to week-date syntax outside of one.
pub(crate) fn designator(frame: SyntaxKind, ch: char) -> Option<Designator> {
    match (frame, ch) {
        (SyntaxKind::Duration, 'T') => Some(Designator::Switch(SyntaxKind::TimeDuration)),
        (SyntaxKind::Duration, 'Y') => Some(Designator::Coerce(UnitKind::Years)),
        (SyntaxKind::Duration, 'M') => Some(Designator::Coerce(UnitKind::Months)),
        (SyntaxKind::Duration, 'D') => Some(Designator::Coerce(UnitKind::Days)),
        (SyntaxKind::Duration, 'W') => Some(Designator::Coerce(UnitKind::Weeks)),
        (SyntaxKind::TimeDuration, 'H') => Some(Designator::Coerce(UnitKind::Hours)),
        (SyntaxKind::TimeDuration, 'M') => Some(Designator::Coerce(UnitKind::Minutes)),
        (SyntaxKind::TimeDuration, 'S') => Some(Designator::Coerce(UnitKind::Seconds)),
        (SyntaxKind::WeeksDuration, 'W') => Some(Designator::Coerce(UnitKind::Weeks)),
        (_, 'P') => Some(Designator::Push(SyntaxKind::Duration)),
        (_, 'R') => Some(Designator::Push(SyntaxKind::Recurring)),
        (_, 'Z') => Some(Designator::Utc),
        (_, 'W') => Some(Designator::Switch(SyntaxKind::WeekDate)),
        _ => None,
    }
}

/// Classifies a digit-letter character for the given active frame.
///
/// `month_seen` disambiguates a `Date` frame's `D` (day-of-month once a
/// month has been scanned in this scope, day-of-year otherwise).
pub(crate) fn digit_kind(frame: SyntaxKind, ch: char, month_seen: bool) -> Option<UnitKind> {
    match (frame, ch) {
        (SyntaxKind::Date, 'Y') => Some(UnitKind::Year),
        (SyntaxKind::Date, 'M') => Some(UnitKind::Month),
        (SyntaxKind::Date, 'D') if month_seen => Some(UnitKind::DayOfMonth),
        (SyntaxKind::Date, 'D') => Some(UnitKind::DayOfYear),
        (SyntaxKind::WeekDate, 'Y') => Some(UnitKind::Year),
        (SyntaxKind::WeekDate, 'w') => Some(UnitKind::Week),
        (SyntaxKind::WeekDate, 'D') => Some(UnitKind::DayOfWeek),
        (SyntaxKind::Time, 'h') => Some(UnitKind::Hour),
        (SyntaxKind::Time, 'm') => Some(UnitKind::Minute),
        (SyntaxKind::Time, 's') => Some(UnitKind::Second),
        (SyntaxKind::UtcOffset, 'h') => Some(UnitKind::Hour),
        (SyntaxKind::UtcOffset, 'm') => Some(UnitKind::Minute),
        // `n` is the generic duration placeholder: its concrete kind is
        // assigned later by the `Coerce` fop for the designator that
        // follows it. `Years` is an arbitrary placeholder kind, never
        // observed by a caller.
        (SyntaxKind::Duration | SyntaxKind::TimeDuration, 'n') => Some(UnitKind::Years),
        (SyntaxKind::WeeksDuration, 'n') => Some(UnitKind::Weeks),
        (SyntaxKind::Recurring, 'n') => Some(UnitKind::Recurrences),
        _ => None,
    }
}

/// Characters that separate elements within `frame`, and whether they are
/// "hard" (block merges across them, used for the interval `/`).
pub(crate) fn separator(frame: SyntaxKind, ch: char) -> Option<bool> {
    match (frame, ch) {
        (_, '/') => Some(true),
        (SyntaxKind::Date | SyntaxKind::WeekDate, '-') => Some(false),
        (SyntaxKind::Time | SyntaxKind::UtcOffset, ':') => Some(false),
        (_, 'T') if frame != SyntaxKind::Duration && frame != SyntaxKind::TimeDuration => {
            Some(false)
        }
        _ => None,
    }
}

/// The default (standard rendering) template string for each
/// representation kind named by [`crate::value::Value`]'s variants.
pub(crate) mod default_template {
    pub(crate) const CALENDAR_DATE: &str = "YYYY-MM-DD";
    pub(crate) const ORDINAL_DATE: &str = "YYYY-DDD";
    pub(crate) const WEEK_DATE: &str = "YYYY-Www-D";
    pub(crate) const TIME: &str = "hh:mm:ss";
    pub(crate) const TIME_WITH_OFFSET: &str = "hh:mm:ss±hh:mm";
    pub(crate) const UTC_OFFSET: &str = "±hh:mm";
    pub(crate) const DATE_TIME: &str = "YYYY-MM-DDThh:mm:ss";
    pub(crate) const WEEKS_DURATION: &str = "Pnn̲W";

    /// The six leading-zero-eliding duration templates, ordered from most
    /// to least precise, used by [`crate::standard`] to pick the shortest
    /// template that still names every non-zero (or, for the first
    /// component, every at-least-present) component.
    pub(crate) const DURATION_FULL: &str = "Pnn̲Ynn̲Mnn̲DTnn̲Hnn̲Mnn̲S";
    pub(crate) const DURATION_FROM_MONTHS: &str = "Pnn̲Mnn̲DTnn̲Hnn̲Mnn̲S";
    pub(crate) const DURATION_FROM_DAYS: &str = "Pnn̲DTnn̲Hnn̲Mnn̲S";
    pub(crate) const DURATION_FROM_HOURS: &str = "PTnn̲Hnn̲Mnn̲S";
    pub(crate) const DURATION_FROM_MINUTES: &str = "PTnn̲Mnn̲S";
    pub(crate) const DURATION_FROM_SECONDS: &str = "PTnn̲S";
}
