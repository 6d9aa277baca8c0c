//! Format operations: the instruction set executed by the format machine.

use crate::units::UnitKind;

/// Width constraint on a run of digits: `max` is `None` for an unbounded
/// (underlined) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Width {
    pub(crate) min: u32,
    pub(crate) max: Option<u32>,
}

/// The optional fractional part of an `Element` (e.g. `,ss̲` in `ss,ss̲`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FractionSpec {
    pub(crate) separator: char,
    pub(crate) width: Width,
}

/// One operation of a compiled format representation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fop {
    /// A fixed literal substring that must appear verbatim.
    Literal(String),
    /// A separator character. Elided in format mode if the element that
    /// follows turns out to be absent.
    Separator(char),
    /// A hard separator (the `/` between interval endpoints). In read
    /// mode, pushes the identity unit after consuming the character, so
    /// that a later merge cannot reach across it.
    HardSeparator(char),
    /// A designator that precedes an element and, in read mode, opens a
    /// nested empty value of the given kind if an element follows
    /// (`P` opens a `Duration`, `R` opens a `RecurringTimeInterval`).
    PrefixDesignator { literal: char },
    /// A designator that follows an element and re-tags it with a
    /// concrete kind (e.g. the `Y`/`M`/`D`/`H`/`M`/`S` suffixes of a
    /// duration coercing the preceding generic digit run).
    Coerce { literal: char, kind: UnitKind },
    /// The `Z` UTC designator.
    UtcDesignator,
    /// A run of digits (and optional fractional part) denoting one value
    /// of the given kind.
    Element {
        kind: UnitKind,
        width: Width,
        signed: bool,
        fraction: Option<FractionSpec>,
    },
}
