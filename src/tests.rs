//! End-to-end scenarios and property tests that span more than one
//! module: format compilation, the merge algebra, and arithmetic working
//! together, rather than a single unit in isolation.

use quickcheck_macros::quickcheck;

use crate::arithmetic::{interval_duration, interval_other_endpoint};
use crate::calendar::{days_in_month, leap_year};
use crate::format::{Format, SyntaxKind};
use crate::units::{Unit, UnitKind};
use crate::value::Value;

fn u(kind: UnitKind, value: i64) -> Unit {
    Unit::new(kind, value).unwrap()
}

fn calendar_date(year: i64, month: i64, day: i64) -> Value {
    Value::calendar_date(
        u(UnitKind::Year, year),
        u(UnitKind::Month, month),
        u(UnitKind::DayOfMonth, day),
    )
    .unwrap()
}

fn time(hour: i64, minute: i64, second: i64) -> Value {
    Value::time(
        u(UnitKind::Hour, hour),
        u(UnitKind::Minute, minute),
        u(UnitKind::Second, second),
        None,
    )
    .unwrap()
}

fn duration(years: i64, months: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Value {
    Value::duration(
        u(UnitKind::Years, years),
        u(UnitKind::Months, months),
        u(UnitKind::Days, days),
        u(UnitKind::Hours, hours),
        u(UnitKind::Minutes, minutes),
        u(UnitKind::Seconds, seconds),
    )
    .unwrap()
}

/// Scenario 1: `Format("YYYY-MM-DD").format(CalendarDate(1985,4,12))` and
/// its inverse read.
#[test]
fn scenario_calendar_date_round_trip() {
    let format = Format::compile("YYYY-MM-DD", SyntaxKind::Date).unwrap();
    let date = calendar_date(1985, 4, 12);
    assert_eq!(format.format(&date).unwrap(), "1985-04-12");
    assert_eq!(format.read("1985-04-12").unwrap(), date);
}

/// Scenario 2: `Format("YYYYMMDDThhmmss±hhmm").read(...)` assembles a
/// `DateTime` with a UTC offset via the merge algebra.
#[test]
fn scenario_date_time_with_offset_read() {
    let format = Format::compile("YYYYMMDDThhmmss\u{b1}hhmm", SyntaxKind::Date).unwrap();
    let expected = Value::date_time(
        calendar_date(1985, 4, 12),
        Value::merge(
            &time(10, 15, 30),
            &Value::utc_offset(Unit::parse(UnitKind::Hour, "+04").unwrap(), u(UnitKind::Minute, 0))
                .unwrap(),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(format.read("19850412T101530+0400").unwrap(), expected);
}

/// Scenario 3: a recurring time interval formats and round-trips through
/// its own compiled representation.
#[test]
fn scenario_recurring_time_interval_round_trip() {
    let format = Format::compile(
        "Rn\u{332}/YYYYMMDDThhmmss/Pnn\u{332}Ynn\u{332}Mnn\u{332}DTnn\u{332}Hnn\u{332}Mnn\u{332}S",
        SyntaxKind::Recurring,
    )
    .unwrap();
    let start = Value::date_time(calendar_date(1985, 4, 12), time(23, 20, 50)).unwrap();
    let value = Value::recurring_time_interval(
        u(UnitKind::Recurrences, 12),
        Some(start),
        Some(duration(1, 2, 15, 12, 30, 0)),
    );
    let rendered = format.format(&value).unwrap();
    assert_eq!(rendered, "R12/19850412T232050/P1Y2M15DT12H30M0S");
    assert_eq!(format.read(&rendered).unwrap(), value);
}

/// Scenario 4: `CalendarDate(1984,1,31) + Duration(0,1)` clips into
/// February's shorter length in a leap year.
#[test]
fn scenario_month_end_clipping_into_leap_february() {
    let date = calendar_date(1984, 1, 31);
    let delta = duration(0, 1, 0, 0, 0, 0);
    let result = (&date + &delta).unwrap();
    assert_eq!(result, calendar_date(1984, 2, 29));
}

/// Scenario 5: `Time(23,20,50) + TimeDuration(0,39,10)` overflows into the
/// next day with carry 1.
#[test]
fn scenario_time_overflow_carries_a_day() {
    let t = time(23, 20, 50);
    let delta = duration(0, 0, 0, 0, 39, 10);
    let err = (&t + &delta).unwrap_err();
    match err {
        crate::Error::TimeUnitOverflow { partial, carry } => {
            assert_eq!(carry, 1);
            assert_eq!(*partial, time(0, 0, 0));
        }
        other => panic!("expected overflow, got {other:?}"),
    }
}

/// Scenario 6: the default `Duration` rendering elides leading zero
/// components but a wholly-zero duration still renders `PT0S`.
#[test]
fn scenario_duration_default_rendering() {
    assert_eq!(Value::zero_duration().to_string(), "PT0S");
    assert_eq!(duration(0, 2, 15, 12, 30, 0).to_string(), "P2M15DT12H30M0S");
}

/// §4.4.6: a `TimeInterval`'s `duration()` is derived component-wise from
/// its two `DateTime` endpoints, and its missing endpoint is recovered
/// from a `DateTime`/`Duration` pair.
#[test]
fn scenario_time_interval_duration_and_other_endpoint() {
    let start = Value::date_time(calendar_date(1985, 4, 12), time(10, 0, 0)).unwrap();
    let end = Value::date_time(calendar_date(1985, 6, 25), time(8, 30, 0)).unwrap();
    let interval = Value::time_interval(Some(start.clone()), Some(end.clone()));
    let computed = interval_duration(&interval).unwrap();
    assert_eq!(computed, duration(0, 2, 12, 22, 30, 0));

    let open_ended = Value::time_interval(Some(start.clone()), Some(computed));
    assert_eq!(interval_other_endpoint(&open_ended).unwrap(), end);
}

/// *Merge algebra*: any two distinct cardinals from the quantified set
/// merge into a `Duration` with exactly those two slots filled and every
/// other slot zero-filled.
#[test]
fn property_cardinal_pair_merge_builds_zero_filled_duration() {
    let cardinals = [
        (UnitKind::Years, 1),
        (UnitKind::Months, 2),
        (UnitKind::Days, 15),
        (UnitKind::Hours, 12),
        (UnitKind::Minutes, 30),
        (UnitKind::Seconds, 15),
    ];
    for (i, &(kind_a, val_a)) in cardinals.iter().enumerate() {
        for &(kind_b, val_b) in cardinals.iter().skip(i + 1) {
            let merged = Value::merge(&Value::Unit(u(kind_a, val_a)), &Value::Unit(u(kind_b, val_b)))
                .unwrap_or_else(|| panic!("{kind_a:?} | {kind_b:?} should merge"));
            let Value::Duration { years, months, days, hours, minutes, seconds } = merged else {
                panic!("expected a Duration");
            };
            let slots = [
                (UnitKind::Years, years),
                (UnitKind::Months, months),
                (UnitKind::Days, days),
                (UnitKind::Hours, hours),
                (UnitKind::Minutes, minutes),
                (UnitKind::Seconds, seconds),
            ];
            for (kind, slot) in slots {
                if kind == kind_a {
                    assert_eq!(slot.as_i64(), val_a);
                } else if kind == kind_b {
                    assert_eq!(slot.as_i64(), val_b);
                } else {
                    assert_eq!(slot.as_i64(), 0);
                }
            }
        }
    }
}

/// *WeeksDuration isolation*: `WeeksDuration(4) + Days(3)` fails.
#[test]
fn property_weeks_duration_does_not_arithmetically_combine_with_days() {
    let weeks = Value::weeks_duration(u(UnitKind::Weeks, 4));
    let days = duration(0, 0, 3, 0, 0, 0);
    assert!((&weeks + &days).is_err());
}

/// *Leap year* quantified invariant.
#[quickcheck]
fn property_leap_year_matches_gregorian_rule(year: u16) -> bool {
    let year = i64::from(year);
    leap_year(year) == (year % 400 == 0 || (year % 4 == 0 && year % 100 != 0))
}

/// *Days-in-month* quantified invariant: every month in `1..=12` returns a
/// length consistent with the leap-year test, and February alone varies
/// with it.
#[quickcheck]
fn property_days_in_month_consistent_with_leap_year(year: u16, month_index: u8) -> bool {
    let year = i64::from(year);
    let month = i64::from(month_index % 12) + 1;
    let len = days_in_month(year, month);
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => len == 31,
        4 | 6 | 9 | 11 => len == 30,
        2 => len == if leap_year(year) { 29 } else { 28 },
        _ => unreachable!(),
    }
}

/// *Range* quantified invariant: an ordinal kind's constructor accepts a
/// value iff it falls within the kind's inclusive range.
#[quickcheck]
fn property_month_range_matches_construction_success(value: i16) -> bool {
    let in_range = (1..=12).contains(&value);
    Unit::new(UnitKind::Month, i64::from(value)).is_ok() == in_range
}

/// *Accuracy reduction* quantified invariant: a calendar date with a
/// present day but absent month is always rejected.
#[quickcheck]
fn property_accuracy_reduction_rejects_day_without_month(year: u16, day: u8) -> bool {
    let day = i64::from(day % 31) + 1;
    Value::calendar_date(
        u(UnitKind::Year, i64::from(year)),
        Unit::absent(UnitKind::Month),
        u(UnitKind::DayOfMonth, day),
    )
    .is_err()
}

/// *Arithmetic identity*: `(d + Δ) - Δ = d` for every (date, duration)
/// pair that never traverses day-of-month clipping (months/days kept
/// small enough that the intermediate date always falls within the
/// target month's length).
#[quickcheck]
fn property_add_then_subtract_is_identity_without_clipping(year: u16, years: u8, months: u8) -> bool {
    let date = calendar_date(i64::from(year) % 9000 + 1, 6, 15);
    let delta = duration(i64::from(years % 50), i64::from(months % 11), 0, 0, 0, 0);
    let Ok(forward) = &date + &delta else {
        return true;
    };
    let Ok(back) = &forward - &delta else {
        return true;
    };
    back == date
}
