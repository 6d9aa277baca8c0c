//! Lazily-compiled default format representations, one per representation
//! kind, used by each `Value` variant's `Display` impl.

use core::fmt;

use once_cell::sync::Lazy;

use crate::format::syntax::{default_template, SyntaxKind};
use crate::format::Format;
use crate::value::Value;

fn compiled(repr: &str, initial: SyntaxKind) -> Format {
    Format::compile(repr, initial).unwrap_or_else(|e| {
        panic!("built-in format representation {repr:?} failed to compile: {e}")
    })
}

static CALENDAR_DATE: Lazy<Format> =
    Lazy::new(|| compiled(default_template::CALENDAR_DATE, SyntaxKind::Date));
static ORDINAL_DATE: Lazy<Format> =
    Lazy::new(|| compiled(default_template::ORDINAL_DATE, SyntaxKind::Date));
static WEEK_DATE: Lazy<Format> =
    Lazy::new(|| compiled(default_template::WEEK_DATE, SyntaxKind::WeekDate));
static TIME: Lazy<Format> = Lazy::new(|| compiled(default_template::TIME, SyntaxKind::Time));
static TIME_WITH_OFFSET: Lazy<Format> =
    Lazy::new(|| compiled(default_template::TIME_WITH_OFFSET, SyntaxKind::Time));
static UTC_OFFSET: Lazy<Format> =
    Lazy::new(|| compiled(default_template::UTC_OFFSET, SyntaxKind::UtcOffset));
static DATE_TIME: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DATE_TIME, SyntaxKind::Date));
static WEEKS_DURATION: Lazy<Format> =
    Lazy::new(|| compiled(default_template::WEEKS_DURATION, SyntaxKind::Duration));

static DURATION_FULL: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DURATION_FULL, SyntaxKind::Duration));
static DURATION_FROM_MONTHS: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DURATION_FROM_MONTHS, SyntaxKind::Duration));
static DURATION_FROM_DAYS: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DURATION_FROM_DAYS, SyntaxKind::Duration));
static DURATION_FROM_HOURS: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DURATION_FROM_HOURS, SyntaxKind::TimeDuration));
static DURATION_FROM_MINUTES: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DURATION_FROM_MINUTES, SyntaxKind::TimeDuration));
static DURATION_FROM_SECONDS: Lazy<Format> =
    Lazy::new(|| compiled(default_template::DURATION_FROM_SECONDS, SyntaxKind::TimeDuration));

/// Picks the shortest of the six leading-zero-eliding duration templates
/// that still names the first non-absent-or-nonzero component, per the
/// first component (in years-to-seconds order) that isn't zero.
fn duration_format(years: i64, months: i64, days: i64, hours: i64, minutes: i64) -> &'static Format {
    if years != 0 {
        &DURATION_FULL
    } else if months != 0 {
        &DURATION_FROM_MONTHS
    } else if days != 0 {
        &DURATION_FROM_DAYS
    } else if hours != 0 {
        &DURATION_FROM_HOURS
    } else if minutes != 0 {
        &DURATION_FROM_MINUTES
    } else {
        &DURATION_FROM_SECONDS
    }
}

/// Renders `value` with its representation kind's default format
/// representation, backing every `Value`'s `Display` impl.
pub(crate) fn format_default(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let format = match value {
        Value::Unit(_) | Value::Identity => None,
        Value::CalendarDate { .. } => Some(&*CALENDAR_DATE),
        Value::OrdinalDate { .. } => Some(&*ORDINAL_DATE),
        Value::WeekDate { .. } => Some(&*WEEK_DATE),
        Value::UtcOffset { .. } => Some(&*UTC_OFFSET),
        Value::Time { offset: Some(_), .. } => Some(&*TIME_WITH_OFFSET),
        Value::Time { offset: None, .. } => Some(&*TIME),
        Value::DateTime { .. } => Some(&*DATE_TIME),
        Value::WeeksDuration { .. } => Some(&*WEEKS_DURATION),
        Value::Duration {
            years,
            months,
            days,
            hours,
            minutes,
            ..
        } => Some(duration_format(
            years.as_i64(),
            months.as_i64(),
            days.as_i64(),
            hours.as_i64(),
            minutes.as_i64(),
        )),
        Value::TimeInterval { start, end } => return format_interval(None, start, end, f),
        Value::RecurringTimeInterval {
            recurrences,
            start,
            end,
        } => return format_interval(Some(recurrences), start, end, f),
    };

    match format {
        Some(format) => match format.format(value) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        },
        None => write!(f, "{value:?}"),
    }
}

/// Renders a `TimeInterval`/`RecurringTimeInterval`: each present endpoint
/// in its own default representation, joined by `/`, with a leading
/// `Rn/` (or `R/` for an unbounded recurrence count) when `recurrences`
/// is given.
fn format_interval(
    recurrences: Option<&crate::units::Unit>,
    start: &Option<Box<Value>>,
    end: &Option<Box<Value>>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    if let Some(recurrences) = recurrences {
        if recurrences.is_absent() {
            write!(f, "R/")?;
        } else {
            write!(f, "R{}/", recurrences.as_i64())?;
        }
    }
    match start {
        Some(start) => write!(f, "{start}")?,
        None => write!(f, "")?,
    }
    write!(f, "/")?;
    match end {
        Some(end) => write!(f, "{end}")?,
        None => write!(f, "")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Unit, UnitKind};

    fn u(kind: UnitKind, value: i64) -> Unit {
        Unit::new(kind, value).unwrap()
    }

    #[test]
    fn test_display_calendar_date() {
        let value =
            Value::calendar_date(u(UnitKind::Year, 1985), u(UnitKind::Month, 4), u(UnitKind::DayOfMonth, 12))
                .unwrap();
        assert_eq!(value.to_string(), "1985-04-12");
    }

    #[test]
    fn test_display_all_zero_duration_is_pt0s() {
        assert_eq!(Value::zero_duration().to_string(), "PT0S");
    }

    #[test]
    fn test_display_duration_elides_leading_zero_components() {
        let value = Value::duration(
            u(UnitKind::Years, 0),
            u(UnitKind::Months, 2),
            u(UnitKind::Days, 15),
            u(UnitKind::Hours, 12),
            u(UnitKind::Minutes, 30),
            u(UnitKind::Seconds, 0),
        )
        .unwrap();
        assert_eq!(value.to_string(), "P2M15DT12H30M0S");
    }

    #[test]
    fn test_display_time_interval_joins_endpoints_with_slash() {
        let start = Value::date_time(
            Value::calendar_date(u(UnitKind::Year, 1985), u(UnitKind::Month, 4), u(UnitKind::DayOfMonth, 12))
                .unwrap(),
            Value::time(u(UnitKind::Hour, 23), u(UnitKind::Minute, 20), u(UnitKind::Second, 50), None).unwrap(),
        )
        .unwrap();
        let duration = Value::duration(
            u(UnitKind::Years, 1),
            u(UnitKind::Months, 2),
            u(UnitKind::Days, 15),
            u(UnitKind::Hours, 12),
            u(UnitKind::Minutes, 30),
            u(UnitKind::Seconds, 0),
        )
        .unwrap();
        let interval = Value::time_interval(Some(start), Some(duration));
        assert_eq!(
            interval.to_string(),
            "1985-04-12T23:20:50/P1Y2M15DT12H30M0S"
        );
    }

    #[test]
    fn test_display_recurring_time_interval_has_r_prefix() {
        let value = Value::recurring_time_interval(
            u(UnitKind::Recurrences, 12),
            None,
            None,
        );
        assert_eq!(value.to_string(), "R12//");
    }
}
