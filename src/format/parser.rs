//! Scans a format representation string into a sequence of [`Fop`]s.

use crate::error::Error;
use crate::format::fop::{Fop, FractionSpec, Width};
use crate::format::syntax::{self, Designator, SyntaxKind};

/// Rewrites a leading-underscore shorthand (`_X`) to `X` followed by a
/// combining low line (U+0332), matching the written grammar where the
/// combining mark itself denotes "unbounded width".
fn normalize(repr: &str) -> String {
    let mut out = String::with_capacity(repr.len());
    let mut chars = repr.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                out.push(next);
                out.push('\u{332}');
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

const COMBINING_LOW_LINE: char = '\u{332}';

struct Parser {
    chars: Vec<char>,
    pos: usize,
    frame: SyntaxKind,
    month_seen: bool,
}

impl Parser {
    fn new(initial: SyntaxKind) -> Self {
        Self {
            chars: Vec::new(),
            pos: 0,
            frame: initial,
            month_seen: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Scans a run of the same digit-letter, returning its width.
    ///
    /// A combining low line anywhere in the run marks it "repeat
    /// indefinitely": the run's literal length stops being a width
    /// requirement and the element accepts any number of digits, at
    /// least one (e.g. `nn̲`, doubled purely for visual emphasis in a
    /// template, still parses and renders single-digit values with no
    /// padding).
    fn scan_width(&mut self, letter: char) -> Width {
        let mut min = 0u32;
        let mut max = Some(0u32);
        let mut unbounded = false;
        while self.peek() == Some(letter) {
            self.pos += 1;
            min += 1;
            if let Some(m) = max.as_mut() {
                *m += 1;
            }
            if self.peek() == Some(COMBINING_LOW_LINE) {
                self.pos += 1;
                unbounded = true;
            }
        }
        if unbounded {
            Width { min: 1, max: None }
        } else {
            Width { min, max }
        }
    }

    fn scan_fraction(&mut self) -> Option<FractionSpec> {
        let sep = self.peek()?;
        if sep != ',' && sep != '.' {
            return None;
        }
        let save = self.pos;
        self.pos += 1;
        let Some(letter) = self.peek() else {
            self.pos = save;
            return None;
        };
        if !letter.is_ascii_alphabetic() {
            self.pos = save;
            return None;
        }
        let width = self.scan_width(letter);
        Some(FractionSpec {
            separator: sep,
            width,
        })
    }

    fn parse(&mut self) -> Result<Vec<Fop>, Error> {
        let mut fops = Vec::new();
        let mut pending_sign = false;

        while let Some(ch) = self.peek() {
            if ch == '\u{00b1}' {
                self.pos += 1;
                pending_sign = true;
                continue;
            }

            if let Some(action) = syntax::designator(self.frame, ch) {
                self.pos += 1;
                match action {
                    Designator::Push(kind) => {
                        fops.push(Fop::PrefixDesignator { literal: ch });
                        self.frame = kind;
                        self.month_seen = false;
                    }
                    Designator::Switch(kind) => {
                        // A pure compile-time syntax switch (the duration
                        // `T`, or `W` entering week-date mode): the
                        // literal character is still matched/emitted at
                        // runtime, but no value is pushed for it.
                        match fops.last_mut() {
                            Some(Fop::Literal(s)) => s.push(ch),
                            _ => fops.push(Fop::Literal(ch.to_string())),
                        }
                        self.frame = kind;
                    }
                    Designator::Coerce(kind) => {
                        fops.push(Fop::Coerce { literal: ch, kind });
                    }
                    Designator::Utc => {
                        fops.push(Fop::UtcDesignator);
                    }
                }
                continue;
            }

            if let Some(hard) = syntax::separator(self.frame, ch) {
                self.pos += 1;
                if hard {
                    fops.push(Fop::HardSeparator(ch));
                    self.month_seen = false;
                } else {
                    fops.push(Fop::Separator(ch));
                    if ch == 'T' && self.frame == SyntaxKind::Date {
                        self.frame = SyntaxKind::Time;
                    }
                }
                continue;
            }

            if ch.is_ascii_alphabetic() {
                if let Some(kind) = syntax::digit_kind(self.frame, ch, self.month_seen) {
                    let width = self.scan_width(ch);
                    let fraction = self.scan_fraction();
                    if kind == crate::units::UnitKind::Month {
                        self.month_seen = true;
                    }
                    let signed = pending_sign;
                    pending_sign = false;
                    fops.push(Fop::Element {
                        kind,
                        width,
                        signed,
                        fraction,
                    });
                    continue;
                }
                return Err(Error::StopFormat(format!(
                    "unrecognized format character {ch:?} in this context"
                )));
            }

            // Any other character is a plain literal; merge consecutive
            // literal characters into one Literal fop.
            self.pos += 1;
            match fops.last_mut() {
                Some(Fop::Literal(s)) => s.push(ch),
                _ => fops.push(Fop::Literal(ch.to_string())),
            }
        }

        Ok(fops)
    }
}

/// Compiles a format representation string into its fop sequence.
///
/// `initial_syntax` seeds the disambiguation context for the first
/// character (the `Date` frame, unless the representation is known to
/// open on a duration, time, or week date).
pub(crate) fn compile(repr: &str, initial_syntax: SyntaxKind) -> Result<Vec<Fop>, Error> {
    let normalized = normalize(repr);
    let mut parser = Parser::new(initial_syntax);
    parser.chars = normalized.chars().collect();
    parser.parse()
}
