//! The format machine: a stack-based interpreter that runs a compiled
//! [`Fop`] list in `format` mode (value to string) or `read` mode (string
//! to value), sharing the same merge algebra that backs the `|` operator.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::error::Error;
use crate::format::fop::{Fop, FractionSpec, Width};
use crate::units::{Unit, UnitKind};
use crate::value::Value;

/// One slot of the flattened element stream consulted by `format` mode.
///
/// Representations are flattened into this stream in the same
/// most-significant-first order their own constructors take, matching the
/// order a format representation's fops visit them in. `Boundary` marks a
/// hard-separator crossing (an interval endpoint, or the gap between a
/// recurrence count and its first endpoint); `Utc` marks a `UtcOffset`
/// that is the distinguished `utc` constant, which a `UTCDesignator` fop
/// renders as `Z` instead of formatting hour/minute elements.
enum Item {
    U(Unit),
    Utc,
    Boundary,
}

fn flatten(value: &Value, out: &mut VecDeque<Item>) {
    match value {
        Value::Unit(u) => out.push_back(Item::U(*u)),
        Value::Identity => {}
        Value::CalendarDate { year, month, day } => {
            out.push_back(Item::U(*year));
            out.push_back(Item::U(*month));
            out.push_back(Item::U(*day));
        }
        Value::OrdinalDate { year, day_of_year } => {
            out.push_back(Item::U(*year));
            out.push_back(Item::U(*day_of_year));
        }
        Value::WeekDate { year, week, day_of_week } => {
            out.push_back(Item::U(*year));
            out.push_back(Item::U(*week));
            out.push_back(Item::U(*day_of_week));
        }
        Value::UtcOffset { hour, minute, utc } => {
            if *utc {
                out.push_back(Item::Utc);
            } else {
                out.push_back(Item::U(*hour));
                out.push_back(Item::U(*minute));
            }
        }
        Value::Time { hour, minute, second, offset } => {
            out.push_back(Item::U(*hour));
            out.push_back(Item::U(*minute));
            out.push_back(Item::U(*second));
            if let Some(offset) = offset {
                flatten(offset, out);
            }
        }
        Value::DateTime { date, time } => {
            flatten(date, out);
            flatten(time, out);
        }
        Value::Duration { years, months, days, hours, minutes, seconds } => {
            out.push_back(Item::U(*years));
            out.push_back(Item::U(*months));
            out.push_back(Item::U(*days));
            out.push_back(Item::U(*hours));
            out.push_back(Item::U(*minutes));
            out.push_back(Item::U(*seconds));
        }
        Value::WeeksDuration { weeks } => out.push_back(Item::U(*weeks)),
        Value::TimeInterval { start, end } => {
            if let Some(start) = start {
                flatten(start, out);
            }
            out.push_back(Item::Boundary);
            if let Some(end) = end {
                flatten(end, out);
            }
        }
        Value::RecurringTimeInterval { recurrences, start, end } => {
            out.push_back(Item::U(*recurrences));
            out.push_back(Item::Boundary);
            if let Some(start) = start {
                flatten(start, out);
            }
            out.push_back(Item::Boundary);
            if let Some(end) = end {
                flatten(end, out);
            }
        }
    }
}

fn flush_pending(out: &mut String, pending: &mut Option<char>) {
    if let Some(ch) = pending.take() {
        out.push(ch);
    }
}

/// Formats `value` against a compiled fop list: the stack-machine's
/// `format` mode.
pub(crate) fn format(fops: &[Fop], value: &Value) -> Result<String, Error> {
    let mut items = VecDeque::new();
    flatten(value, &mut items);

    let mut out = String::new();
    let mut pending_sep: Option<char> = None;
    let mut last_kind: Option<UnitKind> = None;

    for fop in fops {
        match fop {
            Fop::Literal(s) => {
                flush_pending(&mut out, &mut pending_sep);
                out.push_str(s);
            }
            Fop::Separator(ch) => pending_sep = Some(*ch),
            Fop::HardSeparator(ch) => {
                if matches!(items.front(), Some(Item::Boundary)) {
                    items.pop_front();
                }
                pending_sep = Some(*ch);
                last_kind = None;
            }
            Fop::PrefixDesignator { literal } => {
                let an_element_follows = items
                    .iter()
                    .take_while(|item| !matches!(item, Item::Boundary))
                    .any(|item| match item {
                        Item::Utc => true,
                        Item::U(u) => !u.is_absent(),
                        Item::Boundary => false,
                    });
                if an_element_follows {
                    flush_pending(&mut out, &mut pending_sep);
                    out.push(*literal);
                }
            }
            Fop::Coerce { literal, kind } => {
                if last_kind == Some(*kind) {
                    flush_pending(&mut out, &mut pending_sep);
                    out.push(*literal);
                }
            }
            Fop::UtcDesignator => {
                if matches!(items.front(), Some(Item::Utc)) {
                    items.pop_front();
                    flush_pending(&mut out, &mut pending_sep);
                    out.push('Z');
                }
            }
            Fop::Element { kind: _, width, signed, fraction } => {
                if matches!(items.front(), Some(Item::U(_))) {
                    let Some(Item::U(unit)) = items.pop_front() else {
                        unreachable!("just matched Item::U above")
                    };
                    last_kind = Some(unit.kind());
                    if !unit.is_absent() {
                        flush_pending(&mut out, &mut pending_sep);
                        out.push_str(&format_unit(&unit, *width, *signed, *fraction));
                    }
                }
            }
        }
    }

    Ok(out)
}

fn format_unit(unit: &Unit, width: Width, signed: bool, fraction: Option<FractionSpec>) -> String {
    let value = unit.value().unwrap_or(Decimal::ZERO);
    let mut out = String::new();

    if signed {
        out.push(if value.is_sign_negative() && !value.is_zero() { '-' } else { '+' });
    }

    let abs = value.abs();
    let mut digits = abs.trunc().to_string();
    let min = width.min as usize;
    if digits.len() < min {
        let padding = min - digits.len();
        digits.insert_str(0, &"0".repeat(padding));
    }
    if let Some(max) = width.max {
        let max = max as usize;
        if digits.len() > max {
            let excess = digits.len() - max;
            digits.drain(..excess);
        }
    }
    out.push_str(&digits);

    if let Some(frac) = fraction {
        let max_frac = frac.width.max.unwrap_or(frac.width.min);
        let quantized = abs.fract().round_dp(max_frac);
        let rendered = format!("{:.*}", max_frac as usize, quantized);
        let mut frac_digits = rendered
            .split_once('.')
            .map_or_else(String::new, |(_, d)| d.to_string());
        let min_frac = frac.width.min as usize;
        if frac_digits.len() < min_frac {
            frac_digits.push_str(&"0".repeat(min_frac - frac_digits.len()));
        }
        out.push(frac.separator);
        out.push_str(&frac_digits);
    }

    out
}

/// Reads `input` against a compiled fop list: the stack-machine's `read`
/// mode.
///
/// Each endpoint of a `TimeInterval`/`RecurringTimeInterval` (and the
/// recurrence count itself) assembles in its own group, isolated from its
/// neighbours by the hard separator between them; a group finalizes (and
/// merges into the running result) only when its closing hard separator is
/// reached, mirroring the identity unit's asymmetric absorb/block rule
/// without needing a literal sentinel on this side of the machine.
pub(crate) fn read(fops: &[Fop], input: &str) -> Result<Value, Error> {
    let chars: Vec<char> = input.to_uppercase().chars().collect();
    let mut pos = 0usize;
    let mut outer: Option<Value> = None;
    let mut current: Vec<Value> = Vec::new();

    for fop in fops {
        match fop {
            Fop::Literal(s) => {
                for ch in s.chars() {
                    expect_char(&chars, &mut pos, ch)?;
                }
            }
            Fop::Separator(ch) => expect_char(&chars, &mut pos, *ch)?,
            Fop::HardSeparator(ch) => {
                expect_char(&chars, &mut pos, *ch)?;
                finalize_group(&mut outer, &mut current)?;
            }
            Fop::PrefixDesignator { literal } => expect_char(&chars, &mut pos, *literal)?,
            Fop::Coerce { literal, kind } => {
                expect_char(&chars, &mut pos, *literal)?;
                let top = current
                    .pop()
                    .ok_or_else(|| Error::StopFormat("nothing to coerce".to_string()))?;
                let Value::Unit(unit) = top else {
                    return Err(Error::StopFormat(
                        "coerce target is not a bare unit".to_string(),
                    ));
                };
                current.push(Value::Unit(unit.with_kind(*kind)));
                try_merge_top_two(&mut current);
            }
            Fop::UtcDesignator => {
                if chars.get(pos) == Some(&'Z') {
                    pos += 1;
                    current.push(Value::utc());
                    try_merge_top_two(&mut current);
                }
            }
            Fop::Element { kind, width, signed, fraction } => {
                let unit = scan_element(&chars, &mut pos, *kind, *width, *signed, *fraction)?;
                current.push(Value::Unit(unit));
                try_merge_top_two(&mut current);
            }
        }
    }

    finalize_group(&mut outer, &mut current)?;
    outer.ok_or_else(|| Error::StopFormat("empty format representation".to_string()))
}

fn expect_char(chars: &[char], pos: &mut usize, want: char) -> Result<(), Error> {
    let want = want.to_uppercase().next().unwrap_or(want);
    if chars.get(*pos) == Some(&want) {
        *pos += 1;
        Ok(())
    } else {
        Err(Error::StopFormat(format!(
            "expected {want:?} at position {pos}"
        )))
    }
}

/// Scans one `Element`'s worth of input: an optional sign (required if
/// `signed`), a run of digits bounded by `width`, and an optional
/// fractional part.
fn scan_element(
    chars: &[char],
    pos: &mut usize,
    kind: UnitKind,
    width: Width,
    signed: bool,
    fraction: Option<FractionSpec>,
) -> Result<Unit, Error> {
    let mut text = String::new();

    if signed {
        match chars.get(*pos) {
            Some('+') => {
                text.push('+');
                *pos += 1;
            }
            Some('-') => {
                text.push('-');
                *pos += 1;
            }
            _ => {
                return Err(Error::StopFormat(format!(
                    "expected a sign for {kind:?} at position {pos}"
                )))
            }
        }
    }

    let mut digit_count = 0u32;
    while let Some(&ch) = chars.get(*pos) {
        if !ch.is_ascii_digit() {
            break;
        }
        if let Some(max) = width.max {
            if digit_count >= max {
                break;
            }
        }
        text.push(ch);
        *pos += 1;
        digit_count += 1;
    }
    if digit_count < width.min {
        return Err(Error::StopFormat(format!(
            "expected at least {} digit(s) for {kind:?} at position {pos}",
            width.min
        )));
    }

    if let Some(frac) = fraction {
        if chars.get(*pos) == Some(&frac.separator) {
            *pos += 1;
            text.push('.');
            let mut frac_count = 0u32;
            while let Some(&ch) = chars.get(*pos) {
                if !ch.is_ascii_digit() {
                    break;
                }
                if let Some(max) = frac.width.max {
                    if frac_count >= max {
                        break;
                    }
                }
                text.push(ch);
                *pos += 1;
                frac_count += 1;
            }
        }
    }

    Unit::parse(kind, &text)
}

/// Attempts to merge the top two values of `stack`, replacing them with
/// the merged result on success and leaving both untouched otherwise.
fn try_merge_top_two(stack: &mut Vec<Value>) {
    if stack.len() < 2 {
        return;
    }
    let b = stack.pop().expect("len >= 2");
    let a = stack.pop().expect("len >= 2");
    match Value::merge(&a, &b) {
        Some(merged) => stack.push(merged),
        None => {
            stack.push(a);
            stack.push(b);
        }
    }
}

/// Folds `current` (the in-progress group, built up by [`try_merge_top_two`]
/// as fops ran) down to a single value via a left-to-right merge fold, then
/// merges that value into the running `outer` result. A group that
/// produced nothing (an entirely absent endpoint) leaves `outer` untouched.
fn finalize_group(outer: &mut Option<Value>, current: &mut Vec<Value>) -> Result<(), Error> {
    if current.is_empty() {
        return Ok(());
    }
    let mut values = current.drain(..);
    let mut acc = values.next().expect("checked non-empty above");
    for next in values {
        acc = Value::merge(&acc, &next)
            .ok_or_else(|| Error::StopFormat("could not merge parsed fragments".to_string()))?;
    }
    if let Value::Unit(u) = acc {
        acc = Value::normalize_standalone(u);
    }
    *outer = Some(match outer.take() {
        None => acc,
        Some(prev) => Value::merge(&prev, &acc)
            .ok_or_else(|| Error::StopFormat("could not merge endpoint groups".to_string()))?,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parser::compile;
    use crate::format::syntax::SyntaxKind;

    fn u(kind: UnitKind, value: i64) -> Unit {
        Unit::new(kind, value).unwrap()
    }

    #[test]
    fn test_format_calendar_date() {
        let fops = compile("YYYY-MM-DD", SyntaxKind::Date).unwrap();
        let value =
            Value::calendar_date(u(UnitKind::Year, 1985), u(UnitKind::Month, 4), u(UnitKind::DayOfMonth, 12))
                .unwrap();
        assert_eq!(format(&fops, &value).unwrap(), "1985-04-12");
    }

    #[test]
    fn test_read_calendar_date() {
        let fops = compile("YYYY-MM-DD", SyntaxKind::Date).unwrap();
        let value = read(&fops, "1985-04-12").unwrap();
        assert_eq!(value.year(), Some(u(UnitKind::Year, 1985)));
        assert_eq!(value.month(), Some(u(UnitKind::Month, 4)));
        assert_eq!(value.day(), Some(u(UnitKind::DayOfMonth, 12)));
    }

    #[test]
    fn test_read_date_time_with_offset() {
        let fops = compile("YYYYMMDDThhmmss\u{b1}hhmm", SyntaxKind::Date).unwrap();
        let value = read(&fops, "19850412T101530+0400").unwrap();
        assert_eq!(value.hour(), Some(u(UnitKind::Hour, 10)));
        assert_eq!(value.minute(), Some(u(UnitKind::Minute, 15)));
        assert_eq!(value.second(), Some(u(UnitKind::Second, 30)));
        let offset = value.offset().expect("offset present");
        assert_eq!(offset.hour(), Some(Unit::parse(UnitKind::Hour, "+04").unwrap()));
        assert_eq!(offset.minute(), Some(u(UnitKind::Minute, 0)));
    }

    #[test]
    fn test_format_negative_zero_utc_offset_renders_plus() {
        let fops = compile("\u{b1}hh:mm", SyntaxKind::UtcOffset).unwrap();
        let value = Value::utc_offset(
            Unit::parse(UnitKind::Hour, "-00").unwrap(),
            u(UnitKind::Minute, 0),
        )
        .unwrap();
        assert_eq!(format(&fops, &value).unwrap(), "+00:00");
    }

    #[test]
    fn test_format_duration_elides_leading_designator_gap() {
        let fops = compile("Pnn\u{332}Ynn\u{332}Mnn\u{332}DTnn\u{332}Hnn\u{332}Mnn\u{332}S", SyntaxKind::Date).unwrap();
        let value = Value::duration(
            u(UnitKind::Years, 1),
            u(UnitKind::Months, 2),
            u(UnitKind::Days, 15),
            u(UnitKind::Hours, 12),
            u(UnitKind::Minutes, 30),
            u(UnitKind::Seconds, 0),
        )
        .unwrap();
        assert_eq!(format(&fops, &value).unwrap(), "P1Y2M15DT12H30M0S");
    }

    #[test]
    fn test_round_trip_recurring_interval() {
        let fops = compile(
            "Rn\u{332}/YYYYMMDDThhmmss/Pnn\u{332}Ynn\u{332}Mnn\u{332}DTnn\u{332}Hnn\u{332}Mnn\u{332}S",
            SyntaxKind::Recurring,
        )
        .unwrap();
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
        let value = Value::recurring_time_interval(u(UnitKind::Recurrences, 12), Some(start), Some(duration));

        let formatted = format(&fops, &value).unwrap();
        assert_eq!(formatted, "R12/19850412T232050/P1Y2M15DT12H30M0S");

        let reread = read(&fops, &formatted).unwrap();
        assert_eq!(reread, value);
    }

    #[test]
    fn test_read_lone_cardinal_becomes_duration() {
        let fops = compile("Pnn\u{332}Y", SyntaxKind::Date).unwrap();
        let value = read(&fops, "P5Y").unwrap();
        let Value::Duration { years, months, .. } = value else {
            panic!("expected duration");
        };
        assert_eq!(years, u(UnitKind::Years, 5));
        assert!(months.is_absent());
    }
}
