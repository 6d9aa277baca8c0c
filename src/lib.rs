#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(unknown_lints)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
// Enable feature callouts in generated documentation:
// https://doc.rust-lang.org/beta/unstable-book/language-features/doc-cfg.html
//
// This approach is borrowed from tokio.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_alias))]

/*!
This crate is an implementation of ISO 8601:2004(E), the international
standard for representing dates, times, durations, and intervals.

It models every representation the standard defines — calendar dates,
ordinal dates, week dates, times of day, UTC offsets, durations (both
the calendar/clock kind and the week-only kind), time intervals, and
recurring time intervals — as a single [`Value`] enum, and compiles the
standard's format strings (`YYYY-MM-DD`, `±hh:mm`,
`Pnn̲Ynn̲Mnn̲DTnn̲Hnn̲Mnn̲S`, and so on) into a small instruction list that a
shared stack machine runs in either direction: [`Format::format`] renders
a value to a string, and [`Format::read`] parses a string back into one.

## Values and the merge algebra

A [`Value`] is either a bare [`Unit`] — a single year, month, hour, and so
on, not yet folded into anything — or one of the standard's composite
representations. [`Value::merge`] is the algebra that combines two
partial fragments into a more specific value; it is the same rule the
read direction of the format machine uses internally to assemble a parsed
representation one element at a time.

```
use iso8601::units::{Unit, UnitKind};
use iso8601::value::Value;

let year = Value::Unit(Unit::new(UnitKind::Year, 1985)?);
let month = Value::Unit(Unit::new(UnitKind::Month, 4)?);
let date = Value::merge(&year, &month).unwrap();
assert_eq!(date.year(), Some(Unit::new(UnitKind::Year, 1985)?));
assert_eq!(date.month(), Some(Unit::new(UnitKind::Month, 4)?));
# Ok::<(), iso8601::Error>(())
```

## Format representations

A format representation compiles once and can be reused across any
number of calls:

```
use iso8601::format::{Format, SyntaxKind};
use iso8601::units::{Unit, UnitKind};
use iso8601::value::Value;

let format = Format::compile("YYYY-MM-DD", SyntaxKind::Date)?;
let date = Value::calendar_date(
    Unit::new(UnitKind::Year, 1985)?,
    Unit::new(UnitKind::Month, 4)?,
    Unit::new(UnitKind::DayOfMonth, 12)?,
)?;
assert_eq!(format.format(&date)?, "1985-04-12");
assert_eq!(format.read("1985-04-12")?, date);
# Ok::<(), iso8601::Error>(())
```

## Arithmetic

[`arithmetic`] implements `CalendarDate ± Duration`, `Time ± TimeDuration`,
and `DateTime ± Duration`, with month-length clipping on the date side and
carry propagation (surfaced as [`Error::TimeUnitOverflow`]) on the time
side.
*/

pub mod arithmetic;
pub mod calendar;
pub mod error;
pub mod format;
mod standard;
#[cfg(test)]
mod tests;
pub mod units;
pub mod value;

pub use error::Error;
pub use format::Format;
pub use units::{Unit, UnitKind};
pub use value::Value;
