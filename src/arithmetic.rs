//! Arithmetic on calendar dates, times, date-times, and durations.

use core::ops::{Add, Sub};

use crate::calendar::{days_in_month, divmod1};
use crate::error::Error;
use crate::units::{Unit, UnitKind};
use crate::value::Value;

fn unit(kind: UnitKind, value: i64) -> Unit {
    Unit::new(kind, value).expect("carried arithmetic result out of range")
}

/// `CalendarDate op Duration`, per the month-length-clipping algorithm:
/// add years, carry months into years, clip the day to the new month's
/// length before applying the day delta, then renormalize across the
/// (possibly different-length) adjacent month.
fn add_calendar_date(date: &Value, dur: &Value, sign: i64) -> Result<Value, Error> {
    let Value::CalendarDate { year, month, day } = date else {
        return Err(Error::ValueError("expected a calendar date".into()));
    };
    let Value::Duration { years, months, days, .. } = dur else {
        return Err(Error::ValueError("expected a duration".into()));
    };

    let mut new_year = year.as_i64() + sign * years.as_i64();

    if month.is_absent() {
        return Ok(Value::CalendarDate {
            year: unit(UnitKind::Year, new_year),
            month: Unit::absent(UnitKind::Month),
            day: Unit::absent(UnitKind::DayOfMonth),
        });
    }

    let (carry, new_month) = divmod1(month.as_i64() + sign * months.as_i64(), 12);
    new_year += carry;

    if day.is_absent() {
        return Ok(Value::CalendarDate {
            year: unit(UnitKind::Year, new_year),
            month: unit(UnitKind::Month, new_month),
            day: Unit::absent(UnitKind::DayOfMonth),
        });
    }

    let clipped_day = day.as_i64().min(days_in_month(new_year, new_month));
    let mut target_day = clipped_day + sign * days.as_i64();
    let mut target_year = new_year;
    let mut target_month = new_month;

    while target_day < 1 {
        let (carry, prev_month) = divmod1(target_month - 1, 12);
        target_year += carry;
        target_month = prev_month;
        target_day += days_in_month(target_year, target_month);
    }
    loop {
        let len = days_in_month(target_year, target_month);
        if target_day <= len {
            break;
        }
        target_day -= len;
        let (carry, next_month) = divmod1(target_month + 1, 12);
        target_year += carry;
        target_month = next_month;
    }

    Ok(Value::CalendarDate {
        year: unit(UnitKind::Year, target_year),
        month: unit(UnitKind::Month, target_month),
        day: unit(UnitKind::DayOfMonth, target_day),
    })
}

/// `Time op Duration`, propagating carry bottom-up across seconds,
/// minutes, and hours. Returns the wrapped time and the signed number of
/// whole days carried past the hour field (`0` if no overflow).
fn add_time_with_carry(time: &Value, dur: &Value, sign: i64) -> Result<(Value, i64), Error> {
    let Value::Time { hour, minute, second, offset } = time else {
        return Err(Error::ValueError("expected a time".into()));
    };
    let Value::Duration { hours, minutes, seconds, .. } = dur else {
        return Err(Error::ValueError("expected a duration".into()));
    };

    let mut total_seconds = second.as_i64() + sign * seconds.as_i64();
    let (carry, new_second) = (total_seconds.div_euclid(60), total_seconds.rem_euclid(60));
    total_seconds = carry;

    let mut total_minutes = minute.as_i64() + sign * minutes.as_i64() + total_seconds;
    let (carry, new_minute) = (total_minutes.div_euclid(60), total_minutes.rem_euclid(60));
    total_minutes = carry;

    let total_hours = hour.as_i64() + sign * hours.as_i64() + total_minutes;
    let (day_carry, new_hour) = (total_hours.div_euclid(24), total_hours.rem_euclid(24));

    let wrapped = Value::Time {
        hour: unit(UnitKind::Hour, new_hour),
        minute: unit(UnitKind::Minute, new_minute),
        second: unit(UnitKind::Second, new_second),
        offset: offset.clone(),
    };
    Ok((wrapped, day_carry))
}

/// `Time op Duration`, surfacing day overflow as [`Error::TimeUnitOverflow`]
/// rather than silently wrapping (scenario 5 in the testable properties:
/// `Time(23,20,50) + TimeDuration(0,39,10)` overflows with carry `1`).
fn add_time(time: &Value, dur: &Value, sign: i64) -> Result<Value, Error> {
    let (wrapped, carry) = add_time_with_carry(time, dur, sign)?;
    if carry == 0 {
        Ok(wrapped)
    } else {
        Err(Error::TimeUnitOverflow {
            partial: Box::new(wrapped),
            carry,
        })
    }
}

fn days_only_duration(days: i64) -> Value {
    Value::Duration {
        years: unit(UnitKind::Years, 0),
        months: unit(UnitKind::Months, 0),
        days: unit(UnitKind::Days, days.unsigned_abs() as i64),
        hours: unit(UnitKind::Hours, 0),
        minutes: unit(UnitKind::Minutes, 0),
        seconds: unit(UnitKind::Seconds, 0),
    }
}

fn date_only_duration(dur: &Value) -> Result<Value, Error> {
    let Value::Duration { years, months, days, .. } = dur else {
        return Err(Error::ValueError("expected a duration".into()));
    };
    Ok(Value::Duration {
        years: *years,
        months: *months,
        days: *days,
        hours: unit(UnitKind::Hours, 0),
        minutes: unit(UnitKind::Minutes, 0),
        seconds: unit(UnitKind::Seconds, 0),
    })
}

/// `DateTime op Duration`: applies the clock part first, folding any day
/// carry into an extra day added to (or subtracted from) the date side
/// before the remaining calendar components are applied.
fn add_date_time(dt: &Value, dur: &Value, sign: i64) -> Result<Value, Error> {
    let Value::DateTime { date, time } = dt else {
        return Err(Error::ValueError("expected a date-time".into()));
    };
    let (new_time, day_carry) = add_time_with_carry(time, dur, sign)?;
    let date_side_duration = date_only_duration(dur)?;
    let mut new_date = add_calendar_date(date, &date_side_duration, sign)?;
    if day_carry != 0 {
        let carry_duration = days_only_duration(day_carry);
        let carry_sign = if day_carry.is_negative() { -1 } else { 1 };
        new_date = add_calendar_date(&new_date, &carry_duration, carry_sign)?;
    }
    Value::date_time(new_date, new_time)
}

/// `Duration op Duration`, component-wise. An absent component stays
/// absent only when both sides are absent; otherwise the absent side
/// contributes zero.
fn add_duration(a: &Value, b: &Value, sign: i64) -> Result<Value, Error> {
    let Value::Duration {
        years: y1, months: m1, days: d1, hours: h1, minutes: mi1, seconds: s1,
    } = a
    else {
        return Err(Error::ValueError("expected a duration".into()));
    };
    let Value::Duration {
        years: y2, months: m2, days: d2, hours: h2, minutes: mi2, seconds: s2,
    } = b
    else {
        return Err(Error::ValueError("expected a duration".into()));
    };

    fn combine(sign: i64, a: &Unit, b: &Unit) -> Unit {
        if a.is_absent() && b.is_absent() {
            Unit::absent(a.kind())
        } else {
            unit(a.kind(), a.as_i64() + sign * b.as_i64())
        }
    }

    Ok(Value::Duration {
        years: combine(sign, y1, y2),
        months: combine(sign, m1, m2),
        days: combine(sign, d1, d2),
        hours: combine(sign, h1, h2),
        minutes: combine(sign, mi1, mi2),
        seconds: combine(sign, s1, s2),
    })
}

/// `WeeksDuration op WeeksDuration`. Weeks never combine with any other
/// duration component.
fn add_weeks_duration(a: &Value, b: &Value, sign: i64) -> Result<Value, Error> {
    let Value::WeeksDuration { weeks: w1 } = a else {
        return Err(Error::ValueError("expected a weeks duration".into()));
    };
    let Value::WeeksDuration { weeks: w2 } = b else {
        return Err(Error::ValueError(
            "a WeeksDuration can only combine with another WeeksDuration".into(),
        ));
    };
    Ok(Value::WeeksDuration {
        weeks: unit(UnitKind::Weeks, w1.as_i64() + sign * w2.as_i64()),
    })
}

fn apply(a: &Value, b: &Value, sign: i64) -> Result<Value, Error> {
    match (a, b) {
        (Value::CalendarDate { .. }, Value::Duration { .. }) => add_calendar_date(a, b, sign),
        (Value::Time { .. }, Value::Duration { .. }) => add_time(a, b, sign),
        (Value::DateTime { .. }, Value::Duration { .. }) => add_date_time(a, b, sign),
        (Value::Duration { .. }, Value::Duration { .. }) => add_duration(a, b, sign),
        (Value::WeeksDuration { .. }, Value::WeeksDuration { .. }) => {
            add_weeks_duration(a, b, sign)
        }
        _ => Err(Error::ValueError(
            "no arithmetic rule for this combination of values".to_string(),
        )),
    }
}

impl Add<&Value> for &Value {
    type Output = Result<Value, Error>;

    fn add(self, rhs: &Value) -> Self::Output {
        apply(self, rhs, 1)
    }
}

impl Sub<&Value> for &Value {
    type Output = Result<Value, Error>;

    fn sub(self, rhs: &Value) -> Self::Output {
        apply(self, rhs, -1)
    }
}

/// Reads the named component off `value` via `accessor`, failing if it is
/// missing or present-but-absent (a reduced-accuracy `DateTime`).
fn component(value: &Value, accessor: impl Fn(&Value) -> Option<Unit>, name: &str) -> Result<i64, Error> {
    match accessor(value) {
        Some(u) if !u.is_absent() => Ok(u.as_i64()),
        _ => Err(Error::ValueError(format!(
            "interval duration requires a full-precision DateTime ({name} is absent)"
        ))),
    }
}

/// Component-wise difference between two `DateTime` endpoints, per
/// §4.4.6: year/month/day/hour/minute/second differences, each negative
/// remainder borrowed from the next-coarser unit in the same direction
/// `add_calendar_date` carries overflow.
fn date_time_diff(start: &Value, end: &Value) -> Result<Value, Error> {
    let mut year = component(end, Value::year, "year")? - component(start, Value::year, "year")?;
    let mut month = component(end, Value::month, "month")? - component(start, Value::month, "month")?;
    let mut day = component(end, Value::day, "day")? - component(start, Value::day, "day")?;
    let mut hour = component(end, Value::hour, "hour")? - component(start, Value::hour, "hour")?;
    let mut minute = component(end, Value::minute, "minute")? - component(start, Value::minute, "minute")?;
    let mut second = component(end, Value::second, "second")? - component(start, Value::second, "second")?;

    if second < 0 {
        second += 60;
        minute -= 1;
    }
    if minute < 0 {
        minute += 60;
        hour -= 1;
    }
    if hour < 0 {
        hour += 24;
        day -= 1;
    }
    let mut ref_year = end.year().expect("checked above").as_i64();
    let mut ref_month = end.month().expect("checked above").as_i64();
    while day < 0 {
        let (carry, borrow_month) = divmod1(ref_month - 1, 12);
        ref_year += carry;
        ref_month = borrow_month;
        day += days_in_month(ref_year, ref_month);
        month -= 1;
    }
    if month < 0 {
        month += 12;
        year -= 1;
    }

    Value::duration(
        unit(UnitKind::Years, year),
        unit(UnitKind::Months, month),
        unit(UnitKind::Days, day),
        unit(UnitKind::Hours, hour),
        unit(UnitKind::Minutes, minute),
        unit(UnitKind::Seconds, second),
    )
}

/// A `TimeInterval`'s `duration()`, per §4.4.6: only defined for an
/// interval with two `DateTime` endpoints.
///
/// # Errors
///
/// Returns [`Error::ValueError`] if `interval` is not a `TimeInterval`
/// with two present `DateTime` endpoints, or if either endpoint has a
/// reduced-accuracy date or time.
pub fn interval_duration(interval: &Value) -> Result<Value, Error> {
    match interval {
        Value::TimeInterval {
            start: Some(start),
            end: Some(end),
        } => match (start.as_ref(), end.as_ref()) {
            (Value::DateTime { .. }, Value::DateTime { .. }) => date_time_diff(start, end),
            _ => Err(Error::ValueError(
                "interval duration requires two DateTime endpoints".into(),
            )),
        },
        _ => Err(Error::ValueError(
            "interval duration requires both endpoints to be present".into(),
        )),
    }
}

/// A `TimeInterval`'s missing endpoint, per §4.4.6: for a `DateTime` and
/// `Duration` pair, applies `Duration` arithmetic in whichever direction
/// resolves the missing side (the duration added to the start, or
/// subtracted from the end).
///
/// # Errors
///
/// Returns [`Error::ValueError`] if `interval` is not a `TimeInterval`
/// with one `DateTime` endpoint and one `Duration` endpoint, or a
/// [`Error::TimeUnitOverflow`]/other arithmetic error from the
/// underlying `DateTime ± Duration` operation.
pub fn interval_other_endpoint(interval: &Value) -> Result<Value, Error> {
    match interval {
        Value::TimeInterval {
            start: Some(start),
            end: Some(end),
        } => match (start.as_ref(), end.as_ref()) {
            (Value::DateTime { .. }, Value::Duration { .. }) => apply(start, end, 1),
            (Value::Duration { .. }, Value::DateTime { .. }) => apply(end, start, -1),
            _ => Err(Error::ValueError(
                "interval's other endpoint requires one DateTime and one Duration endpoint".into(),
            )),
        },
        _ => Err(Error::ValueError(
            "interval's other endpoint requires both endpoints to be present".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i64, month: i64, day: i64) -> Value {
        Value::calendar_date(
            unit(UnitKind::Year, year),
            unit(UnitKind::Month, month),
            unit(UnitKind::DayOfMonth, day),
        )
        .unwrap()
    }

    fn duration(years: i64, months: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Value {
        Value::duration(
            unit(UnitKind::Years, years),
            unit(UnitKind::Months, months),
            unit(UnitKind::Days, days),
            unit(UnitKind::Hours, hours),
            unit(UnitKind::Minutes, minutes),
            unit(UnitKind::Seconds, seconds),
        )
        .unwrap()
    }

    fn time(hour: i64, minute: i64, second: i64) -> Value {
        Value::time(
            unit(UnitKind::Hour, hour),
            unit(UnitKind::Minute, minute),
            unit(UnitKind::Second, second),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_month_end_clipping() {
        let d = date(1984, 1, 31);
        let result = (&d + &duration(0, 1, 0, 0, 0, 0)).unwrap();
        assert_eq!(result, date(1984, 2, 29));
    }

    #[test]
    fn test_time_overflow_reports_carry() {
        let t = time(23, 20, 50);
        let err = (&t + &duration(0, 0, 0, 0, 39, 10)).unwrap_err();
        match err {
            Error::TimeUnitOverflow { partial, carry } => {
                assert_eq!(carry, 1);
                assert_eq!(*partial, time(0, 0, 0));
            }
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_add_then_sub_is_identity_without_clipping() {
        let d = date(1985, 4, 12);
        let delta = duration(1, 2, 3, 0, 0, 0);
        let forward = (&d + &delta).unwrap();
        let back = (&forward - &delta).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_weeks_duration_rejects_mixed_operand() {
        let weeks = Value::weeks_duration(unit(UnitKind::Weeks, 4));
        let days = duration(0, 0, 3, 0, 0, 0);
        assert!((&weeks + &days).is_err());
    }

    fn date_time(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Value {
        Value::date_time(date(year, month, day), time(hour, minute, second)).unwrap()
    }

    #[test]
    fn test_interval_duration_between_two_date_times() {
        let interval = Value::time_interval(
            Some(date_time(1985, 4, 12, 10, 0, 0)),
            Some(date_time(1985, 6, 25, 8, 30, 0)),
        );
        let result = interval_duration(&interval).unwrap();
        assert_eq!(result, duration(0, 2, 12, 22, 30, 0));
    }

    #[test]
    fn test_interval_duration_borrows_across_month_and_day() {
        let interval = Value::time_interval(
            Some(date_time(2000, 1, 31, 23, 0, 0)),
            Some(date_time(2000, 3, 1, 1, 0, 0)),
        );
        let result = interval_duration(&interval).unwrap();
        // hour borrows a day (23:00 -> +2h, -1 day), then the day borrows
        // twice (through February's 29 days in this leap year, then
        // January's 31) before the remaining month/day counts go positive.
        assert_eq!(result, duration(0, 0, 29, 2, 0, 0));
    }

    #[test]
    fn test_interval_other_endpoint_from_start_and_duration() {
        let interval = Value::time_interval(
            Some(date_time(1985, 4, 12, 10, 0, 0)),
            Some(duration(0, 0, 1, 0, 0, 0)),
        );
        let end = interval_other_endpoint(&interval).unwrap();
        assert_eq!(end, date_time(1985, 4, 13, 10, 0, 0));
    }

    #[test]
    fn test_interval_other_endpoint_from_duration_and_end() {
        let interval = Value::time_interval(
            Some(duration(0, 0, 1, 0, 0, 0)),
            Some(date_time(1985, 4, 13, 10, 0, 0)),
        );
        let start = interval_other_endpoint(&interval).unwrap();
        assert_eq!(start, date_time(1985, 4, 12, 10, 0, 0));
    }

    #[test]
    fn test_interval_duration_rejects_reduced_accuracy_endpoint() {
        let month_only = Value::date_time(
            Value::calendar_date(
                unit(UnitKind::Year, 1985),
                unit(UnitKind::Month, 4),
                Unit::absent(UnitKind::DayOfMonth),
            )
            .unwrap(),
            time(0, 0, 0),
        )
        .unwrap();
        let interval = Value::time_interval(Some(month_only), Some(date_time(1985, 6, 1, 0, 0, 0)));
        assert!(interval_duration(&interval).is_err());
    }
}
