//! The time-representation value model and its merge algebra.

use core::fmt;

use crate::error::Error;
use crate::units::{Unit, UnitKind};

/// A time representation or a bare time unit.
///
/// Representations are immutable once constructed: every operation here
/// (`merge`, the arithmetic in [`crate::arithmetic`]) produces a new value
/// rather than mutating one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A bare scalar, not yet folded into a representation.
    Unit(Unit),
    /// The neutral element of the merge algebra: absorbs into anything on
    /// its right, and blocks anything merging into it from the left.
    ///
    /// Produced by a hard separator (the `/` between interval endpoints)
    /// so that a bottom-up fold cannot merge fragments across it.
    Identity,
    /// A proleptic Gregorian calendar date.
    CalendarDate {
        /// Calendar year.
        year: Unit,
        /// Month of the year, or absent for a year-only date.
        month: Unit,
        /// Day of the month, or absent for a year/month-only date.
        day: Unit,
    },
    /// A date given by year and day-of-year.
    OrdinalDate {
        /// Calendar year.
        year: Unit,
        /// Day of the year.
        day_of_year: Unit,
    },
    /// A date given by ISO week-numbering year, week, and weekday.
    WeekDate {
        /// ISO week-numbering year.
        year: Unit,
        /// ISO week number.
        week: Unit,
        /// Day of the week, or absent for a year/week-only date.
        day_of_week: Unit,
    },
    /// A UTC offset, or the distinguished `utc` constant (renders as `Z`).
    UtcOffset {
        /// Signed hour component.
        hour: Unit,
        /// Minute component, or absent for an hour-only offset.
        minute: Unit,
        /// Whether this is the distinguished `utc` constant.
        utc: bool,
    },
    /// A time of day, with an optional UTC offset.
    Time {
        /// Hour of the day.
        hour: Unit,
        /// Minute of the hour, or absent for an hour-only time.
        minute: Unit,
        /// Second of the minute, or absent for an hour/minute-only time.
        second: Unit,
        /// UTC offset, independent of the accuracy-reduction invariant on
        /// `hour`/`minute`/`second`.
        offset: Option<Box<Value>>,
    },
    /// A calendar date combined with a time of day.
    DateTime {
        /// The date component; a `CalendarDate`, `OrdinalDate`, or
        /// `WeekDate`.
        date: Box<Value>,
        /// The time-of-day component.
        time: Box<Value>,
    },
    /// A duration expressed as calendar and clock components.
    Duration {
        /// Cardinal years.
        years: Unit,
        /// Cardinal months.
        months: Unit,
        /// Cardinal days.
        days: Unit,
        /// Cardinal hours.
        hours: Unit,
        /// Cardinal minutes.
        minutes: Unit,
        /// Cardinal seconds.
        seconds: Unit,
    },
    /// A duration expressed purely in weeks. Weeks never mix with any
    /// other duration component.
    WeeksDuration {
        /// Cardinal weeks.
        weeks: Unit,
    },
    /// A span between two endpoints, each a `DateTime` or a `Duration`.
    TimeInterval {
        /// The start endpoint, if known.
        start: Option<Box<Value>>,
        /// The end endpoint, if known.
        end: Option<Box<Value>>,
    },
    /// A `TimeInterval` repeated some number of times (or indefinitely, if
    /// `recurrences` is absent).
    RecurringTimeInterval {
        /// Number of recurrences, or absent for an unbounded recurrence.
        recurrences: Unit,
        /// The start endpoint, if known.
        start: Option<Box<Value>>,
        /// The end endpoint, if known.
        end: Option<Box<Value>>,
    },
}

/// Checks the accuracy-reduction invariant: once an element is absent,
/// every element after it in `units` must also be absent.
fn check_accuracy_reduction(units: &[Unit]) -> Result<(), Error> {
    let mut seen_absent = false;
    for unit in units {
        if unit.is_absent() {
            seen_absent = true;
        } else if seen_absent {
            return Err(Error::ValueError(format!(
                "{:?} is present after an absent element of a less precise kind",
                unit.kind()
            )));
        }
    }
    Ok(())
}

impl Value {
    /// Constructs a calendar date. `month` and `day` may be absent
    /// (`Unit::absent`), but `day` present requires `month` present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if the accuracy-reduction invariant is
    /// violated.
    pub fn calendar_date(year: Unit, month: Unit, day: Unit) -> Result<Self, Error> {
        check_accuracy_reduction(&[year, month, day])?;
        Ok(Value::CalendarDate { year, month, day })
    }

    /// Constructs an ordinal (year + day-of-year) date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if the accuracy-reduction invariant is
    /// violated.
    pub fn ordinal_date(year: Unit, day_of_year: Unit) -> Result<Self, Error> {
        check_accuracy_reduction(&[year, day_of_year])?;
        Ok(Value::OrdinalDate { year, day_of_year })
    }

    /// Constructs a week date (year + ISO week + weekday).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if the accuracy-reduction invariant is
    /// violated.
    pub fn week_date(year: Unit, week: Unit, day_of_week: Unit) -> Result<Self, Error> {
        check_accuracy_reduction(&[year, week, day_of_week])?;
        Ok(Value::WeekDate {
            year,
            week,
            day_of_week,
        })
    }

    /// Constructs a UTC offset from a signed hour and optional minute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if the accuracy-reduction invariant is
    /// violated.
    pub fn utc_offset(hour: Unit, minute: Unit) -> Result<Self, Error> {
        check_accuracy_reduction(&[hour, minute])?;
        Ok(Value::UtcOffset {
            hour,
            minute,
            utc: false,
        })
    }

    /// The distinguished `utc` constant, rendered as `Z`.
    #[must_use]
    pub fn utc() -> Self {
        Value::UtcOffset {
            hour: Unit::absent(UnitKind::Hour),
            minute: Unit::absent(UnitKind::Minute),
            utc: true,
        }
    }

    /// Constructs a time of day with an optional UTC offset.
    ///
    /// The offset slot is excluded from the accuracy-reduction check on
    /// `hour`/`minute`/`second`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if the accuracy-reduction invariant is
    /// violated.
    pub fn time(hour: Unit, minute: Unit, second: Unit, offset: Option<Value>) -> Result<Self, Error> {
        check_accuracy_reduction(&[hour, minute, second])?;
        Ok(Value::Time {
            hour,
            minute,
            second,
            offset: offset.map(Box::new),
        })
    }

    /// Combines a date and a time into a `DateTime`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if `date` is not one of `CalendarDate`,
    /// `OrdinalDate`, `WeekDate`, or if `time` is not a `Time`.
    pub fn date_time(date: Value, time: Value) -> Result<Self, Error> {
        if !matches!(
            date,
            Value::CalendarDate { .. } | Value::OrdinalDate { .. } | Value::WeekDate { .. }
        ) {
            return Err(Error::ValueError("date_time requires a date value".into()));
        }
        if !matches!(time, Value::Time { .. }) {
            return Err(Error::ValueError("date_time requires a time value".into()));
        }
        Ok(Value::DateTime {
            date: Box::new(date),
            time: Box::new(time),
        })
    }

    /// Constructs a duration from its six cardinal components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueError`] if the accuracy-reduction invariant is
    /// violated.
    pub fn duration(
        years: Unit,
        months: Unit,
        days: Unit,
        hours: Unit,
        minutes: Unit,
        seconds: Unit,
    ) -> Result<Self, Error> {
        check_accuracy_reduction(&[years, months, days, hours, minutes, seconds])?;
        Ok(Value::Duration {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        })
    }

    /// A duration with every component present and zero.
    #[must_use]
    pub fn zero_duration() -> Self {
        Value::Duration {
            years: Unit::new(UnitKind::Years, 0).expect("0 is in range"),
            months: Unit::new(UnitKind::Months, 0).expect("0 is in range"),
            days: Unit::new(UnitKind::Days, 0).expect("0 is in range"),
            hours: Unit::new(UnitKind::Hours, 0).expect("0 is in range"),
            minutes: Unit::new(UnitKind::Minutes, 0).expect("0 is in range"),
            seconds: Unit::new(UnitKind::Seconds, 0).expect("0 is in range"),
        }
    }

    /// Constructs a weeks-only duration.
    #[must_use]
    pub fn weeks_duration(weeks: Unit) -> Self {
        Value::WeeksDuration { weeks }
    }

    /// Constructs a time interval from two optional endpoints (each a
    /// `DateTime` or `Duration`).
    #[must_use]
    pub fn time_interval(start: Option<Value>, end: Option<Value>) -> Self {
        Value::TimeInterval {
            start: start.map(Box::new),
            end: end.map(Box::new),
        }
    }

    /// Constructs a recurring time interval.
    #[must_use]
    pub fn recurring_time_interval(
        recurrences: Unit,
        start: Option<Value>,
        end: Option<Value>,
    ) -> Self {
        Value::RecurringTimeInterval {
            recurrences,
            start: start.map(Box::new),
            end: end.map(Box::new),
        }
    }

    /// The year element, for `CalendarDate`, `OrdinalDate`, `WeekDate`, and
    /// `DateTime` (delegating to its date).
    #[must_use]
    pub fn year(&self) -> Option<Unit> {
        match self {
            Value::CalendarDate { year, .. }
            | Value::OrdinalDate { year, .. }
            | Value::WeekDate { year, .. } => Some(*year),
            Value::DateTime { date, .. } => date.year(),
            _ => None,
        }
    }

    /// The month element, for `CalendarDate` and `DateTime` (delegating to
    /// its date).
    #[must_use]
    pub fn month(&self) -> Option<Unit> {
        match self {
            Value::CalendarDate { month, .. } => Some(*month),
            Value::DateTime { date, .. } => date.month(),
            _ => None,
        }
    }

    /// The day-of-month element, for `CalendarDate` and `DateTime`
    /// (delegating to its date).
    #[must_use]
    pub fn day(&self) -> Option<Unit> {
        match self {
            Value::CalendarDate { day, .. } => Some(*day),
            Value::DateTime { date, .. } => date.day(),
            _ => None,
        }
    }

    /// The hour element, for `Time` and `DateTime` (delegating to its
    /// time).
    #[must_use]
    pub fn hour(&self) -> Option<Unit> {
        match self {
            Value::Time { hour, .. } => Some(*hour),
            Value::DateTime { time, .. } => time.hour(),
            _ => None,
        }
    }

    /// The minute element, for `Time` and `DateTime` (delegating to its
    /// time).
    #[must_use]
    pub fn minute(&self) -> Option<Unit> {
        match self {
            Value::Time { minute, .. } => Some(*minute),
            Value::DateTime { time, .. } => time.minute(),
            _ => None,
        }
    }

    /// The second element, for `Time` and `DateTime` (delegating to its
    /// time).
    #[must_use]
    pub fn second(&self) -> Option<Unit> {
        match self {
            Value::Time { second, .. } => Some(*second),
            Value::DateTime { time, .. } => time.second(),
            _ => None,
        }
    }

    /// The UTC offset, for `Time` and `DateTime` (delegating to its time).
    #[must_use]
    pub fn offset(&self) -> Option<&Value> {
        match self {
            Value::Time { offset, .. } => offset.as_deref(),
            Value::DateTime { time, .. } => time.offset(),
            _ => None,
        }
    }

    /// The date component of a `DateTime`.
    #[must_use]
    pub fn date_part(&self) -> Option<&Value> {
        match self {
            Value::DateTime { date, .. } => Some(date),
            _ => None,
        }
    }

    /// The time component of a `DateTime`.
    #[must_use]
    pub fn time_part(&self) -> Option<&Value> {
        match self {
            Value::DateTime { time, .. } => Some(time),
            _ => None,
        }
    }

    fn duration_slot_mut(slots: &mut [Unit; 6], kind: UnitKind) -> Option<&mut Unit> {
        let index = match kind {
            UnitKind::Years => 0,
            UnitKind::Months => 1,
            UnitKind::Days => 2,
            UnitKind::Hours => 3,
            UnitKind::Minutes => 4,
            UnitKind::Seconds => 5,
            _ => return None,
        };
        Some(&mut slots[index])
    }

    /// Places cardinal unit `u` into the matching slot of a `Duration`,
    /// zero-filling any earlier absent slot. This is the single generic
    /// rule that accounts for scattered `Years`/`Months`/`Days`/`Hours`/
    /// `Minutes`/`Seconds` fragments folding into one `Duration`, and for
    /// two bare cardinals merging into a `Duration` seeded with both.
    fn place_in_duration(duration: &Value, u: Unit) -> Option<Value> {
        let Value::Duration {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        } = duration
        else {
            return None;
        };
        let mut slots = [*years, *months, *days, *hours, *minutes, *seconds];
        let target = Self::duration_slot_mut(&mut slots, u.kind())?;
        if !target.is_absent() {
            return None;
        }
        *target = u;
        let target_index = match u.kind() {
            UnitKind::Years => 0,
            UnitKind::Months => 1,
            UnitKind::Days => 2,
            UnitKind::Hours => 3,
            UnitKind::Minutes => 4,
            UnitKind::Seconds => 5,
            _ => unreachable!("validated above"),
        };
        for slot in slots.iter_mut().take(target_index) {
            if slot.is_absent() {
                *slot = Unit::new(slot.kind(), 0).expect("0 is always in range");
            }
        }
        Some(Value::Duration {
            years: slots[0],
            months: slots[1],
            days: slots[2],
            hours: slots[3],
            minutes: slots[4],
            seconds: slots[5],
        })
    }

    /// Merges two values per the algebra: combines compatible fragments
    /// into a more specific value, or returns `None` if no rule applies.
    #[must_use]
    pub fn merge(left: &Value, right: &Value) -> Option<Value> {
        if matches!(left, Value::Identity) {
            return Some(right.clone());
        }
        if matches!(right, Value::Identity) {
            return None;
        }

        match (left, right) {
            // Year | Month -> CalendarDate
            (Value::Unit(y), Value::Unit(m))
                if y.kind() == UnitKind::Year && m.kind() == UnitKind::Month =>
            {
                Value::calendar_date(*y, *m, Unit::absent(UnitKind::DayOfMonth)).ok()
            }
            // Year | Week -> WeekDate
            (Value::Unit(y), Value::Unit(w))
                if y.kind() == UnitKind::Year && w.kind() == UnitKind::Week =>
            {
                Value::week_date(*y, *w, Unit::absent(UnitKind::DayOfWeek)).ok()
            }
            // Year | DayOfYear -> OrdinalDate
            (Value::Unit(y), Value::Unit(d))
                if y.kind() == UnitKind::Year && d.kind() == UnitKind::DayOfYear =>
            {
                Value::ordinal_date(*y, *d).ok()
            }
            // Hour | Minute -> Time (unsigned) or UtcOffset (signed)
            (Value::Unit(h), Value::Unit(m))
                if h.kind() == UnitKind::Hour && m.kind() == UnitKind::Minute =>
            {
                if h.is_signed() {
                    Value::utc_offset(*h, *m).ok()
                } else {
                    Value::time(*h, *m, Unit::absent(UnitKind::Second), None).ok()
                }
            }
            // Weeks | anything else -> WeeksDuration (weeks stand alone,
            // checked before the general cardinal-pair rule below)
            (Value::Unit(w), _) if w.kind() == UnitKind::Weeks => {
                Some(Value::weeks_duration(*w))
            }
            // Cardinal | Cardinal -> Duration seeded with both
            (Value::Unit(a), Value::Unit(b)) if a.kind().is_cardinal() && b.kind().is_cardinal() => {
                let seeded = Self::place_in_duration(&Value::zero_absent_duration(), *a)?;
                Self::place_in_duration(&seeded, *b)
            }
            // Representation | Unit -> place in matching slot
            (rep, Value::Unit(u)) if !matches!(rep, Value::Unit(_)) => {
                Self::merge_representation_unit(rep, *u)
            }
            // CalendarDate/OrdinalDate/WeekDate | Time -> DateTime
            (
                Value::CalendarDate { .. } | Value::OrdinalDate { .. } | Value::WeekDate { .. },
                Value::Time { .. },
            ) => Value::date_time(left.clone(), right.clone()).ok(),
            // Time | UtcOffset -> Time with offset set
            (Value::Time { hour, minute, second, .. }, Value::UtcOffset { .. }) => {
                Some(Value::Time {
                    hour: *hour,
                    minute: *minute,
                    second: *second,
                    offset: Some(Box::new(right.clone())),
                })
            }
            // DateTime | UtcOffset -> DateTime with its time's offset set
            (Value::DateTime { date, time }, Value::UtcOffset { .. }) => {
                let new_time = Value::merge(time, right)?;
                Some(Value::DateTime {
                    date: date.clone(),
                    time: Box::new(new_time),
                })
            }
            // DateTime | DateTime or Duration -> TimeInterval
            (Value::DateTime { .. }, Value::DateTime { .. } | Value::Duration { .. }) => {
                Some(Value::time_interval(Some(left.clone()), Some(right.clone())))
            }
            // Duration | DateTime -> TimeInterval
            (Value::Duration { .. }, Value::DateTime { .. }) => {
                Some(Value::time_interval(Some(left.clone()), Some(right.clone())))
            }
            // Recurrences | anything -> RecurringTimeInterval seeded with first endpoint
            (Value::Unit(r), _) if r.kind() == UnitKind::Recurrences => Some(
                Value::recurring_time_interval(*r, Some(right.clone()), None),
            ),
            (Value::RecurringTimeInterval { recurrences, start, end }, other) => {
                if start.is_none() {
                    Some(Value::recurring_time_interval(
                        *recurrences,
                        Some(other.clone()),
                        end.as_deref().cloned(),
                    ))
                } else if end.is_none() {
                    Some(Value::recurring_time_interval(
                        *recurrences,
                        start.as_deref().cloned(),
                        Some(other.clone()),
                    ))
                } else {
                    None
                }
            }
            // Same representation kind on both sides: component-wise fill,
            // left where present, right where absent.
            _ if core::mem::discriminant(left) == core::mem::discriminant(right) => {
                Self::fill(left, right)
            }
            _ => None,
        }
    }

    fn zero_absent_duration() -> Value {
        Value::Duration {
            years: Unit::absent(UnitKind::Years),
            months: Unit::absent(UnitKind::Months),
            days: Unit::absent(UnitKind::Days),
            hours: Unit::absent(UnitKind::Hours),
            minutes: Unit::absent(UnitKind::Minutes),
            seconds: Unit::absent(UnitKind::Seconds),
        }
    }

    fn merge_representation_unit(rep: &Value, u: Unit) -> Option<Value> {
        match rep {
            Value::Duration { .. } if u.kind().is_cardinal() => Self::place_in_duration(rep, u),
            Value::WeeksDuration { weeks } if u.kind() == UnitKind::Weeks && weeks.is_absent() => {
                Some(Value::weeks_duration(u))
            }
            Value::CalendarDate { year, month, day } => match u.kind() {
                UnitKind::Month if month.is_absent() => {
                    Value::calendar_date(*year, u, *day).ok()
                }
                UnitKind::DayOfMonth if day.is_absent() && !month.is_absent() => {
                    Value::calendar_date(*year, *month, u).ok()
                }
                _ => None,
            },
            Value::OrdinalDate { year, day_of_year } => match u.kind() {
                UnitKind::DayOfYear if day_of_year.is_absent() => {
                    Value::ordinal_date(*year, u).ok()
                }
                _ => None,
            },
            Value::WeekDate { year, week, day_of_week } => match u.kind() {
                UnitKind::Week if week.is_absent() => {
                    Value::week_date(*year, u, *day_of_week).ok()
                }
                UnitKind::DayOfWeek if day_of_week.is_absent() && !week.is_absent() => {
                    Value::week_date(*year, *week, u).ok()
                }
                _ => None,
            },
            Value::Time { hour, minute, second, offset } => match u.kind() {
                UnitKind::Minute if minute.is_absent() => {
                    Value::time(*hour, u, *second, offset.as_deref().cloned()).ok()
                }
                UnitKind::Second if second.is_absent() && !minute.is_absent() => {
                    Value::time(*hour, *minute, u, offset.as_deref().cloned()).ok()
                }
                _ => None,
            },
            Value::UtcOffset { hour, minute, utc } if !*utc => match u.kind() {
                UnitKind::Minute if minute.is_absent() => {
                    Value::utc_offset(*hour, u).ok()
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Wraps a bare unit left over after folding a format-machine read
    /// group into the representation it implicitly belongs to (e.g. a
    /// lone `Year` is really a year-only `CalendarDate`). Units with no
    /// such owning representation pass through unchanged.
    pub(crate) fn normalize_standalone(u: Unit) -> Value {
        match u.kind() {
            UnitKind::Year => Value::CalendarDate {
                year: u,
                month: Unit::absent(UnitKind::Month),
                day: Unit::absent(UnitKind::DayOfMonth),
            },
            UnitKind::Hour => Value::Time {
                hour: u,
                minute: Unit::absent(UnitKind::Minute),
                second: Unit::absent(UnitKind::Second),
                offset: None,
            },
            UnitKind::Weeks => Value::weeks_duration(u),
            UnitKind::Recurrences => Value::recurring_time_interval(u, None, None),
            kind if kind.is_cardinal() => {
                Self::place_in_duration(&Value::zero_absent_duration(), u)
                    .unwrap_or(Value::Unit(u))
            }
            _ => Value::Unit(u),
        }
    }

    fn fill(left: &Value, right: &Value) -> Option<Value> {
        fn pick(a: Unit, b: Unit) -> Unit {
            if a.is_absent() {
                b
            } else {
                a
            }
        }

        match (left, right) {
            (
                Value::CalendarDate { year: y1, month: m1, day: d1 },
                Value::CalendarDate { year: y2, month: m2, day: d2 },
            ) => Value::calendar_date(pick(*y1, *y2), pick(*m1, *m2), pick(*d1, *d2)).ok(),
            (
                Value::OrdinalDate { year: y1, day_of_year: d1 },
                Value::OrdinalDate { year: y2, day_of_year: d2 },
            ) => Value::ordinal_date(pick(*y1, *y2), pick(*d1, *d2)).ok(),
            (
                Value::WeekDate { year: y1, week: w1, day_of_week: d1 },
                Value::WeekDate { year: y2, week: w2, day_of_week: d2 },
            ) => Value::week_date(pick(*y1, *y2), pick(*w1, *w2), pick(*d1, *d2)).ok(),
            (
                Value::Time { hour: h1, minute: m1, second: s1, offset: o1 },
                Value::Time { hour: h2, minute: m2, second: s2, offset: o2 },
            ) => Value::time(
                pick(*h1, *h2),
                pick(*m1, *m2),
                pick(*s1, *s2),
                o1.as_deref().or(o2.as_deref()).cloned(),
            )
            .ok(),
            (
                Value::Duration {
                    years: y1, months: mo1, days: d1, hours: h1, minutes: mi1, seconds: s1,
                },
                Value::Duration {
                    years: y2, months: mo2, days: d2, hours: h2, minutes: mi2, seconds: s2,
                },
            ) => Value::duration(
                pick(*y1, *y2),
                pick(*mo1, *mo2),
                pick(*d1, *d2),
                pick(*h1, *h2),
                pick(*mi1, *mi2),
                pick(*s1, *s2),
            )
            .ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::standard::format_default(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(kind: UnitKind, value: i64) -> Unit {
        Unit::new(kind, value).unwrap()
    }

    #[test]
    fn test_accuracy_reduction_rejects_gap() {
        let result = Value::time(
            u(UnitKind::Hour, 23),
            Unit::absent(UnitKind::Minute),
            u(UnitKind::Second, 50),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_year_month() {
        let merged = Value::merge(
            &Value::Unit(u(UnitKind::Year, 1985)),
            &Value::Unit(u(UnitKind::Month, 4)),
        )
        .unwrap();
        assert_eq!(merged.year(), Some(u(UnitKind::Year, 1985)));
        assert_eq!(merged.month(), Some(u(UnitKind::Month, 4)));
    }

    #[test]
    fn test_merge_cardinal_pair_builds_duration_with_zero_fill() {
        let merged = Value::merge(
            &Value::Unit(u(UnitKind::Months, 2)),
            &Value::Unit(u(UnitKind::Days, 15)),
        )
        .unwrap();
        let Value::Duration { years, months, days, hours, minutes, seconds } = merged else {
            panic!("expected duration");
        };
        assert_eq!(years, u(UnitKind::Years, 0));
        assert_eq!(months, u(UnitKind::Months, 2));
        assert_eq!(days, u(UnitKind::Days, 15));
        assert_eq!(hours, u(UnitKind::Hours, 0));
        assert_eq!(minutes, u(UnitKind::Minutes, 0));
        assert_eq!(seconds, u(UnitKind::Seconds, 0));
    }

    #[test]
    fn test_identity_absorbs_from_left_and_blocks_from_right() {
        let v = Value::Unit(u(UnitKind::Year, 1985));
        assert_eq!(Value::merge(&Value::Identity, &v), Some(v.clone()));
        assert_eq!(Value::merge(&v, &Value::Identity), None);
    }

    #[test]
    fn test_weeks_duration_isolation() {
        let weeks = Value::merge(
            &Value::Unit(u(UnitKind::Weeks, 4)),
            &Value::Unit(u(UnitKind::Days, 3)),
        );
        assert_eq!(weeks, Some(Value::weeks_duration(u(UnitKind::Weeks, 4))));
        // Days is absorbed by the Weeks-stands-alone rule, not merged into
        // the WeeksDuration: the duration half of the pair is discarded.
        let rep = Value::weeks_duration(u(UnitKind::Weeks, 4));
        assert_eq!(
            Value::merge_representation_unit(&rep, u(UnitKind::Days, 3)),
            None
        );
    }

    #[test]
    fn test_merge_positive_signed_hour_with_minute_builds_utc_offset() {
        let hour = Unit::new_signed(UnitKind::Hour, 4, true).unwrap();
        let merged = Value::merge(&Value::Unit(hour), &Value::Unit(u(UnitKind::Minute, 0))).unwrap();
        assert_eq!(
            merged,
            Value::utc_offset(Unit::new_signed(UnitKind::Hour, 4, true).unwrap(), u(UnitKind::Minute, 0))
                .unwrap()
        );
        assert!(!matches!(merged, Value::Time { .. }));
    }
}
