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

//! `ulog_sink` defines the output contract between the `ulog` renderer and
//! concrete transports, along with the transports themselves.
//!
//! The renderer only ever talks to the [`Sink`] trait.  A transport
//! implements one required primitive, [`Sink::put_char`], plus a
//! transport-specific [`Sink::append_timestamp`]; everything else
//! (strings, integers in bases 2/8/10/16, fixed-point doubles) is provided
//! by default methods so that every transport renders numerals identically.
//!
//! Provided transports:
//!
//! * [`BufferSink`] — in-memory capture over a `&mut [u8]`; `no_std`.
//! * [`WriteSink`] — host console or file stream over [`std::io::Write`]
//!   (`std` feature).
//! * [`SerialSink`] — embedded transport over [`embedded_io::Write`].
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

pub use ulog_format::Base;

mod buffer;
#[cfg(feature = "std")]
mod host;
mod serial;

pub use buffer::BufferSink;
#[cfg(feature = "std")]
pub use host::WriteSink;
pub use serial::SerialSink;

/// Errors reported by sink primitives.
///
/// Logging is best-effort: callers above the handler layer discard these,
/// but transports report them so a full buffer or a dead link is visible
/// where it matters.
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The sink ran out of space (e.g. a full [`BufferSink`]).
    ResourceExhausted,

    /// The underlying transport failed to accept bytes.
    Unavailable,

    /// A value could not be rendered as requested.
    InvalidArgument,
}

/// Alias for results produced by sink operations.
pub type Result<T> = core::result::Result<T, Error>;

/// A read-only-segment string reference.
///
/// On memory-segmented microcontrollers, strings placed in program memory
/// must be read through a dedicated access path rather than ordinary loads.
/// `RomStr` models that distinction: the renderer consumes it byte-by-byte
/// through [`RomStr::byte`], which is the single seam where a platform's
/// special read primitive belongs.  On hosts it is a plain byte slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RomStr {
    bytes: &'static [u8],
}

impl RomStr {
    /// Wraps a string constant.
    pub const fn new(s: &'static str) -> Self {
        Self { bytes: s.as_bytes() }
    }

    /// Returns the length in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the string is empty.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads one byte, returning `0` past the end (NUL sentinel semantics,
    /// which the renderer's walk loops rely on).
    pub fn byte(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }
}

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

// Cap on fractional digits for double rendering.  Past this the digit loop
// only manufactures noise from representation error.
const MAX_DOUBLE_PRECISION: u16 = 9;

/// The primitive output operations the renderer is written against.
///
/// Implementors supply [`put_char`](Self::put_char) and
/// [`append_timestamp`](Self::append_timestamp); the remaining operations
/// have default implementations in terms of `put_char` and should only be
/// overridden for efficiency (e.g. a buffered writer batching
/// [`append_str`](Self::append_str)), never to change rendering.
pub trait Sink {
    /// Emits a single byte.  The one required primitive.
    fn put_char(&mut self, ch: u8) -> Result<()>;

    /// Emits a transport-specific time representation: milliseconds since
    /// boot for embedded transports, a wall-clock date-time for hosts.
    /// In-memory sinks may emit nothing.
    ///
    /// The field delimiter that follows a timestamp is the renderer's
    /// responsibility, not the sink's.
    fn append_timestamp(&mut self) -> Result<()>;

    /// Commits buffered bytes to the underlying transport, where that
    /// distinction exists.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Emits `ch` `repeat` times.
    fn append_char(&mut self, ch: u8, repeat: u16) -> Result<()> {
        for _ in 0..repeat {
            self.put_char(ch)?;
        }
        Ok(())
    }

    /// Emits a string.
    fn append_str(&mut self, s: &str) -> Result<()> {
        for b in s.bytes() {
            self.put_char(b)?;
        }
        Ok(())
    }

    /// Emits a read-only-segment string.
    fn append_rom_str(&mut self, s: RomStr) -> Result<()> {
        for index in 0..s.len() {
            self.put_char(s.byte(index))?;
        }
        Ok(())
    }

    /// Emits an unsigned integer in the given base, uppercase hex digits.
    fn append_uint(&mut self, value: u64, base: Base) -> Result<()> {
        if value == 0 {
            return self.put_char(b'0');
        }
        // Digits are generated in reverse and replayed.
        let mut buf = [0u8; 64];
        let mut len = 0;
        let mut value = value;
        while value != 0 {
            let digit = match base.shift() {
                Some(shift) => {
                    let digit = value & ((1u64 << shift) - 1);
                    value >>= shift;
                    digit
                }
                None => {
                    let digit = value % 10;
                    value /= 10;
                    digit
                }
            };
            buf[len] = DIGITS[digit as usize];
            len += 1;
        }
        while len > 0 {
            len -= 1;
            self.put_char(buf[len])?;
        }
        Ok(())
    }

    /// Emits a signed integer in the given base.
    fn append_int(&mut self, value: i64, base: Base) -> Result<()> {
        if value < 0 {
            self.put_char(b'-')?;
        }
        self.append_uint(value.unsigned_abs(), base)
    }

    /// Emits a fixed-point decimal rendering of `value` with `precision`
    /// fractional digits (capped at 9).
    fn append_double(&mut self, value: f64, precision: u16) -> Result<()> {
        if value.is_nan() {
            return self.append_str("nan");
        }
        let mut value = value;
        if value.is_sign_negative() {
            self.put_char(b'-')?;
            value = -value;
        }
        if value.is_infinite() {
            return self.append_str("inf");
        }

        let precision = precision.min(MAX_DOUBLE_PRECISION) as u32;

        // Round at the last kept fractional digit.
        let mut rounding = 0.5;
        for _ in 0..precision {
            rounding /= 10.0;
        }
        value += rounding;

        let int_part = value as u64;
        self.append_uint(int_part, Base::Decimal)?;

        if precision > 0 {
            self.put_char(b'.')?;
            let mut remainder = value - (int_part as f64);
            for _ in 0..precision {
                remainder *= 10.0;
                let digit = remainder as u8;
                self.put_char(b'0' + digit)?;
                remainder -= f64::from(digit);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut BufferSink<'_>) -> Result<()>>(f: F) -> Vec<u8> {
        let mut storage = [0u8; 128];
        let mut sink = BufferSink::new(&mut storage);
        f(&mut sink).unwrap();
        sink.as_bytes().to_vec()
    }

    #[test]
    fn append_uint_all_bases() {
        assert_eq!(render(|s| s.append_uint(5, Base::Binary)), b"101");
        assert_eq!(render(|s| s.append_uint(255, Base::Octal)), b"377");
        assert_eq!(render(|s| s.append_uint(255, Base::Decimal)), b"255");
        assert_eq!(render(|s| s.append_uint(255, Base::Hex)), b"FF");
        assert_eq!(render(|s| s.append_uint(0, Base::Hex)), b"0");
        assert_eq!(
            render(|s| s.append_uint(u64::MAX, Base::Hex)),
            b"FFFFFFFFFFFFFFFF"
        );
    }

    #[test]
    fn append_int_signs() {
        assert_eq!(render(|s| s.append_int(-42, Base::Decimal)), b"-42");
        assert_eq!(render(|s| s.append_int(42, Base::Decimal)), b"42");
        assert_eq!(render(|s| s.append_int(0, Base::Decimal)), b"0");
        assert_eq!(render(|s| s.append_int(-5, Base::Binary)), b"-101");
        assert_eq!(
            render(|s| s.append_int(i64::MIN, Base::Hex)),
            b"-8000000000000000"
        );
    }

    #[test]
    fn append_double_basics() {
        assert_eq!(render(|s| s.append_double(3.14159, 2)), b"3.14");
        assert_eq!(render(|s| s.append_double(3.14159, 4)), b"3.1416");
        assert_eq!(render(|s| s.append_double(0.0, 2)), b"0.00");
        assert_eq!(render(|s| s.append_double(-2.5, 1)), b"-2.5");
        assert_eq!(render(|s| s.append_double(9.999, 2)), b"10.00");
        assert_eq!(render(|s| s.append_double(42.0, 0)), b"42");
    }

    #[test]
    fn append_double_non_finite() {
        assert_eq!(render(|s| s.append_double(f64::NAN, 2)), b"nan");
        assert_eq!(render(|s| s.append_double(f64::INFINITY, 2)), b"inf");
        assert_eq!(render(|s| s.append_double(f64::NEG_INFINITY, 2)), b"-inf");
    }

    #[test]
    fn append_char_repeats() {
        assert_eq!(render(|s| s.append_char(b'*', 4)), b"****");
        assert_eq!(render(|s| s.append_char(b'*', 0)), b"");
    }

    #[test]
    fn rom_str_round_trip() {
        const GREETING: RomStr = RomStr::new("hello");
        assert_eq!(GREETING.len(), 5);
        assert_eq!(GREETING.byte(0), b'h');
        // Past-the-end reads yield the NUL sentinel.
        assert_eq!(GREETING.byte(5), 0);
        assert_eq!(render(|s| s.append_rom_str(GREETING)), b"hello");
    }
}
