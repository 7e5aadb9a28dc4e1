// Copyright 2025 The ulog Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

//! `ulog_format` parses the subset of `printf` conversion specifiers
//! understood by the `ulog` logging facility.
//!
//! The crate has two faces:
//!
//! * [`SpecifierParser`] — an incremental, one-byte-at-a-time state machine
//!   used by the renderer on embedded targets.  It allocates nothing and is
//!   `no_std`.
//! * [`parsed`] (`std` feature) — a whole-string parser that exposes the
//!   format string's syntax tree for host-side syntax checking and
//!   argument-arity validation.
//!
//! # Example
//!
//! ```
//! use ulog_format::{Specifier, SpecifierParser};
//!
//! // Incrementally parse the "08x" of "%08x".
//! let mut parser = SpecifierParser::new();
//! assert!(parser.accept_flag(b'0'));
//! assert!(!parser.accept_flag(b'8'));
//! assert!(parser.accept_width_precision(b'8'));
//! assert!(!parser.accept_specifier(b'x'));
//!
//! assert_eq!(parser.fill, b'0');
//! assert_eq!(parser.width, 8);
//! assert_eq!(parser.specifier, Some(Specifier::Hex));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(feature = "std")]
pub mod parsed;

/// A numeric base supported by the integer conversions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Base {
    /// `%b`
    Binary = 2,

    /// `%o`
    Octal = 8,

    /// `%d`, `%i`, `%u`
    Decimal = 10,

    /// `%x`, `%X`
    Hex = 16,
}

impl Base {
    /// Returns the base's radix as a plain integer.
    pub const fn radix(self) -> u64 {
        self as u64
    }

    /// Returns the bit shift equivalent to dividing by the radix, or `None`
    /// for base 10.
    pub const fn shift(self) -> Option<u32> {
        match self {
            Base::Binary => Some(1),
            Base::Octal => Some(3),
            Base::Hex => Some(4),
            Base::Decimal => None,
        }
    }
}

/// A datatype specifier (the `d` in `%d`).
///
/// This is the grammar accepted by the renderer, not full `printf`: it adds
/// binary output (`%b`), read-only-segment strings (`%S`), and spells double
/// as `%D`/`%F`, while dropping the conversions the logging facility never
/// uses (`%e`, `%g`, `%p`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Specifier {
    /// `%s`
    Str,

    /// `%S` — read-only/flash-resident string
    RomStr,

    /// `%c`
    Char,

    /// `%d`
    Decimal,

    /// `%i`
    Integer,

    /// `%u`
    Unsigned,

    /// `%x`
    Hex,

    /// `%X`
    UpperHex,

    /// `%o`
    Octal,

    /// `%b`
    Binary,

    /// `%D`
    Double,

    /// `%F`
    UpperDouble,
}

impl Specifier {
    /// Returns the specifier's character as it appears in a format string.
    pub const fn as_char(self) -> char {
        match self {
            Self::Str => 's',
            Self::RomStr => 'S',
            Self::Char => 'c',
            Self::Decimal => 'd',
            Self::Integer => 'i',
            Self::Unsigned => 'u',
            Self::Hex => 'x',
            Self::UpperHex => 'X',
            Self::Octal => 'o',
            Self::Binary => 'b',
            Self::Double => 'D',
            Self::UpperDouble => 'F',
        }
    }

    /// Returns true for the conversions that render their argument as an
    /// unsigned integer.
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Unsigned | Self::Hex | Self::UpperHex | Self::Octal | Self::Binary
        )
    }

    /// Returns the numeric base for integer conversions, `None` otherwise.
    pub const fn base(self) -> Option<Base> {
        match self {
            Self::Decimal | Self::Integer | Self::Unsigned => Some(Base::Decimal),
            Self::Hex | Self::UpperHex => Some(Base::Hex),
            Self::Octal => Some(Base::Octal),
            Self::Binary => Some(Base::Binary),
            _ => None,
        }
    }
}

impl TryFrom<char> for Specifier {
    type Error = char;

    fn try_from(value: char) -> Result<Self, char> {
        match value {
            's' => Ok(Self::Str),
            'S' => Ok(Self::RomStr),
            'c' => Ok(Self::Char),
            'd' => Ok(Self::Decimal),
            'i' => Ok(Self::Integer),
            'u' => Ok(Self::Unsigned),
            'x' => Ok(Self::Hex),
            'X' => Ok(Self::UpperHex),
            'o' => Ok(Self::Octal),
            'b' => Ok(Self::Binary),
            'D' => Ok(Self::Double),
            'F' => Ok(Self::UpperDouble),
            _ => Err(value),
        }
    }
}

/// Returns the number of characters needed to print `value` in `base`,
/// including a leading `-` for negative values.
///
/// The zero/sign compensation lives here and nowhere else: a value of zero
/// still needs one printed character, and a negative value needs one extra
/// column for the sign.
///
/// ```
/// use ulog_format::{num_width, Base};
///
/// assert_eq!(num_width(0, Base::Decimal), 1);
/// assert_eq!(num_width(-1, Base::Decimal), 2);
/// assert_eq!(num_width(255, Base::Hex), 2);
/// ```
pub fn num_width(value: i64, base: Base) -> u16 {
    let mut width = num_width_unsigned(value.unsigned_abs(), base);
    if value < 0 {
        width += 1; // sign column
    }
    width
}

/// [`num_width`] for values rendered as unsigned, covering the full `u64`
/// range.
pub fn num_width_unsigned(value: u64, base: Base) -> u16 {
    if value == 0 {
        return 1;
    }
    let mut mask = value;
    let mut width = 0u16;
    while mask != 0 {
        mask = match base.shift() {
            Some(shift) => mask >> shift,
            None => mask / 10,
        };
        width += 1;
    }
    width
}

/// An incremental parser for one conversion specifier.
///
/// The caller feeds bytes through the three probe methods in order, looping
/// each until it declines a byte:
///
/// 1. [`accept_flag`](Self::accept_flag) — `-`, `+`, space, `0`
/// 2. [`accept_width_precision`](Self::accept_width_precision) — digits and `.`
/// 3. [`accept_specifier`](Self::accept_specifier) — the datatype specifier
///    and `h`/`l` length modifiers
///
/// The byte that stops a probe is *not* consumed by the parser; the caller
/// re-offers it to the next probe (or, after the last probe, decides whether
/// to reprocess it as ordinary text — see the renderer's rewind rule).
#[derive(Debug, PartialEq, Eq)]
pub struct SpecifierParser {
    /// Padding fill character.  Space unless a `0` flag was seen.
    pub fill: u8,

    /// Minimum field width.  Zero means no padding was requested.
    pub width: u16,

    /// Precision.  `None` until a `.` is seen; `Some(0)` is an explicit zero
    /// precision, which is meaningful to the double conversion.
    pub precision: Option<u16>,

    /// Set by the `u`, `x`, `X`, `o` and `b` conversions.
    pub unsigned: bool,

    /// The resolved datatype specifier, once one has been seen.
    pub specifier: Option<Specifier>,
}

impl SpecifierParser {
    /// Creates a parser in its default state.
    pub const fn new() -> Self {
        Self {
            fill: b' ',
            width: 0,
            precision: None,
            unsigned: false,
            specifier: None,
        }
    }

    /// Probe 1: consumes `c` if it is a flag character.
    ///
    /// A `0` flag switches the fill character to `'0'`.
    pub fn accept_flag(&mut self, c: u8) -> bool {
        if c == b'0' {
            self.fill = b'0';
        }
        matches!(c, b'-' | b'+' | b' ' | b'0')
    }

    /// Probe 2: consumes `c` if it is a width/precision digit or the `.`
    /// separator.
    ///
    /// A `.` switches accumulation from width to precision; until then digits
    /// build the width.  Both accumulators saturate rather than wrap.
    pub fn accept_width_precision(&mut self, c: u8) -> bool {
        if c == b'.' {
            // Precision parsing has started; its default is now an explicit 0.
            self.precision = Some(0);
            true
        } else if c.is_ascii_digit() {
            let digit = u16::from(c - b'0');
            match self.precision {
                Some(precision) => {
                    self.precision = Some(precision.saturating_mul(10).saturating_add(digit));
                }
                None => {
                    self.width = self.width.saturating_mul(10).saturating_add(digit);
                }
            }
            true
        } else {
            false
        }
    }

    /// Probe 3: classifies `c` as a datatype specifier or length modifier.
    ///
    /// Returns `true` if the parser may accept one more byte: `d`, `i`, `l`
    /// and `h` can be followed by a trailing `u` that retroactively selects
    /// the unsigned conversion.  Terminal specifiers (`s`, `c`, `x`, ...)
    /// return `false`; no further bytes belong to this conversion.
    pub fn accept_specifier(&mut self, c: u8) -> bool {
        match c {
            b's' | b'S' | b'c' | b'D' | b'F' | b'x' | b'X' | b'o' | b'u' | b'b' => {
                if matches!(c, b'u' | b'x' | b'X' | b'o' | b'b') {
                    self.unsigned = true;
                }
                if let Ok(specifier) = Specifier::try_from(c as char) {
                    self.specifier = Some(specifier);
                }
                false
            }
            b'd' | b'i' | b'l' | b'h' => {
                // 'l' and 'h' are length modifiers; they are not recorded.
                if let (b'd' | b'i', Ok(specifier)) = (c, Specifier::try_from(c as char)) {
                    self.specifier = Some(specifier);
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for SpecifierParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the probes the way the renderer does and returns the index of
    /// the first unconsumed byte.
    fn parse(input: &[u8]) -> (SpecifierParser, usize) {
        let mut parser = SpecifierParser::new();
        let mut i = 0;
        let get = |i: usize| if i < input.len() { input[i] } else { 0 };
        while get(i) != 0 && parser.accept_flag(get(i)) {
            i += 1;
        }
        while get(i) != 0 && parser.accept_width_precision(get(i)) {
            i += 1;
        }
        while get(i) != 0 && parser.accept_specifier(get(i)) {
            i += 1;
        }
        (parser, i)
    }

    #[test]
    fn plain_decimal() {
        let (parser, stop) = parse(b"d ");
        assert_eq!(parser.specifier, Some(Specifier::Decimal));
        assert_eq!(parser.width, 0);
        assert_eq!(parser.precision, None);
        assert!(!parser.unsigned);
        // 'd' grants one lookahead byte; the parser stops on the space.
        assert_eq!(stop, 1);
    }

    #[test]
    fn zero_flag_sets_fill() {
        let (parser, _) = parse(b"08x");
        assert_eq!(parser.fill, b'0');
        assert_eq!(parser.width, 8);
        assert_eq!(parser.specifier, Some(Specifier::Hex));
        assert!(parser.unsigned);
    }

    #[test]
    fn width_and_precision() {
        let (parser, _) = parse(b"-5.2D");
        assert_eq!(parser.fill, b' ');
        assert_eq!(parser.width, 5);
        assert_eq!(parser.precision, Some(2));
        assert_eq!(parser.specifier, Some(Specifier::Double));
    }

    #[test]
    fn bare_dot_is_explicit_zero_precision() {
        let (parser, _) = parse(b".D");
        assert_eq!(parser.precision, Some(0));
    }

    #[test]
    fn trailing_u_flips_unsigned() {
        let (parser, stop) = parse(b"du");
        // The 'u' is terminal, so it both sets the unsigned flag and becomes
        // the recorded specifier.
        assert_eq!(parser.specifier, Some(Specifier::Unsigned));
        assert!(parser.unsigned);
        assert_eq!(stop, 1);
    }

    #[test]
    fn length_modifiers_are_not_recorded() {
        let (parser, _) = parse(b"ld");
        assert_eq!(parser.specifier, Some(Specifier::Decimal));
        let (parser, _) = parse(b"lu");
        assert_eq!(parser.specifier, Some(Specifier::Unsigned));
        assert!(parser.unsigned);
        let (parser, _) = parse(b"hi");
        assert_eq!(parser.specifier, Some(Specifier::Integer));
    }

    #[test]
    fn terminal_specifier_grants_no_lookahead() {
        let (parser, stop) = parse(b"ux");
        assert_eq!(parser.specifier, Some(Specifier::Unsigned));
        // Stopped on (and did not consume) the 'u' itself.
        assert_eq!(stop, 0);
    }

    #[test]
    fn unrecognized_byte_resolves_nothing() {
        let (parser, stop) = parse(b"5z");
        assert_eq!(parser.specifier, None);
        assert_eq!(parser.width, 5);
        assert_eq!(stop, 1);
    }

    #[test]
    fn width_saturates() {
        let (parser, _) = parse(b"99999999999999999999d");
        assert_eq!(parser.width, u16::MAX);
    }

    #[test]
    fn num_width_boundary_values() {
        for base in [Base::Binary, Base::Octal, Base::Decimal, Base::Hex] {
            assert_eq!(num_width(0, base), 1, "zero in {base:?}");
            assert_eq!(num_width(1, base), 1, "one in {base:?}");
            assert_eq!(num_width(-1, base), 2, "minus one in {base:?}");
        }

        assert_eq!(num_width(i64::MAX, Base::Decimal), 19);
        assert_eq!(num_width(i64::MIN, Base::Decimal), 20);
        assert_eq!(num_width(i64::MAX, Base::Hex), 16);
        assert_eq!(num_width(i64::MIN, Base::Hex), 17);
        assert_eq!(num_width(i64::MAX, Base::Octal), 21);
        assert_eq!(num_width(i64::MIN, Base::Octal), 23);
        assert_eq!(num_width(i64::MAX, Base::Binary), 63);
        assert_eq!(num_width(i64::MIN, Base::Binary), 65);
    }

    #[test]
    fn num_width_typical_values() {
        assert_eq!(num_width(42, Base::Decimal), 2);
        assert_eq!(num_width(-42, Base::Decimal), 3);
        assert_eq!(num_width(255, Base::Hex), 2);
        assert_eq!(num_width(255, Base::Octal), 3);
        assert_eq!(num_width(5, Base::Binary), 3);
        assert_eq!(num_width_unsigned(u64::MAX, Base::Decimal), 20);
        assert_eq!(num_width_unsigned(u64::MAX, Base::Hex), 16);
    }
}
