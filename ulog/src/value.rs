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

use ulog_sink::RomStr;

/// A single argument to a format string.
///
/// Integers are widened to 64 bits at the call site; the conversion
/// specifier decides how they are rendered, so a `Value::Int` can still be
/// printed through `%x` or `%u`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    /// Signed integer, for `%d`/`%i` (and coercible to the others).
    Int(i64),

    /// Unsigned integer, for `%u`/`%x`/`%X`/`%o`/`%b`.
    UInt(u64),

    /// Floating point, for `%D`/`%F`.
    Double(f64),

    /// Single character, for `%c`.
    Char(u8),

    /// RAM-resident string, for `%s`.
    Str(&'a str),

    /// Read-only-segment string, for `%S`.
    RomStr(RomStr),
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value<'_> {
            fn from(v: $ty) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! value_from_uint {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value<'_> {
            fn from(v: $ty) -> Self {
                Value::UInt(u64::from(v))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64);
value_from_uint!(u16, u32, u64);

impl From<u8> for Value<'_> {
    fn from(v: u8) -> Self {
        Value::Char(v)
    }
}

impl From<char> for Value<'_> {
    fn from(v: char) -> Self {
        Value::Char(v as u8)
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Str(v)
    }
}

impl From<RomStr> for Value<'_> {
    fn from(v: RomStr) -> Self {
        Value::RomStr(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::UInt(u64::from(v))
    }
}

/// The argument list for one log record.
///
/// Conversions consume arguments left to right through [`Arguments::next`].
/// The cursor is part of the state, so a handler that fans a record out to
/// several destinations must [`Clone`] the list before consuming it; the
/// clone restarts from the first unconsumed argument.
#[derive(Clone, Debug)]
pub struct Arguments<'a> {
    values: &'a [Value<'a>],
    index: usize,
}

impl<'a> Arguments<'a> {
    /// An empty argument list.
    pub const NONE: Arguments<'static> = Arguments {
        values: &[],
        index: 0,
    };

    /// Creates an argument list over `values`.
    pub const fn new(values: &'a [Value<'a>]) -> Self {
        Self { values, index: 0 }
    }

    /// Takes the next unconsumed argument, or `None` when the list is
    /// exhausted.
    pub fn next(&mut self) -> Option<Value<'a>> {
        let value = self.values.get(self.index).copied();
        if value.is_some() {
            self.index += 1;
        }
        value
    }

    /// Number of arguments not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.index
    }
}

impl Default for Arguments<'_> {
    fn default() -> Self {
        Self::NONE
    }
}

/// A format or message string in either address space.
///
/// Embedded call sites keep their format strings in the read-only segment
/// and pass [`MsgStr::Rom`]; host call sites pass ordinary `&str`.  The
/// renderer walks both through the same byte-at-a-time loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MsgStr<'a> {
    /// RAM-resident string.
    Ram(&'a str),

    /// Read-only-segment string.
    Rom(RomStr),
}

impl MsgStr<'_> {
    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        match self {
            MsgStr::Ram(s) => s.len(),
            MsgStr::Rom(s) => s.len(),
        }
    }

    /// Returns true if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one byte, returning `0` past the end.
    pub fn byte(&self, index: usize) -> u8 {
        match self {
            MsgStr::Ram(s) => s.as_bytes().get(index).copied().unwrap_or(0),
            MsgStr::Rom(s) => s.byte(index),
        }
    }
}

impl<'a> From<&'a str> for MsgStr<'a> {
    fn from(s: &'a str) -> Self {
        MsgStr::Ram(s)
    }
}

impl From<RomStr> for MsgStr<'_> {
    fn from(s: RomStr) -> Self {
        MsgStr::Rom(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_pick_the_right_variant() {
        assert_eq!(Value::from(-3i32), Value::Int(-3));
        assert_eq!(Value::from(3u32), Value::UInt(3));
        assert_eq!(Value::from(b'x'), Value::Char(b'x'));
        assert_eq!(Value::from('x'), Value::Char(b'x'));
        assert_eq!(Value::from(2.5f32), Value::Double(2.5));
        assert_eq!(Value::from("hi"), Value::Str("hi"));
        assert_eq!(Value::from(true), Value::UInt(1));
    }

    #[test]
    fn cursor_consumes_left_to_right() {
        let values = [Value::Int(1), Value::Int(2)];
        let mut args = Arguments::new(&values);
        assert_eq!(args.remaining(), 2);
        assert_eq!(args.next(), Some(Value::Int(1)));
        assert_eq!(args.next(), Some(Value::Int(2)));
        assert_eq!(args.next(), None);
        assert_eq!(args.remaining(), 0);
    }

    #[test]
    fn clone_restarts_from_unconsumed_tail() {
        let values = [Value::Int(1), Value::Int(2), Value::Int(3)];
        let mut args = Arguments::new(&values);
        args.next();
        let mut replay = args.clone();
        assert_eq!(args.next(), Some(Value::Int(2)));
        assert_eq!(replay.next(), Some(Value::Int(2)));
    }

    #[test]
    fn msg_str_walks_both_address_spaces() {
        let ram = MsgStr::from("ab");
        let rom = MsgStr::from(RomStr::new("ab"));
        for s in [ram, rom] {
            assert_eq!(s.len(), 2);
            assert_eq!(s.byte(0), b'a');
            assert_eq!(s.byte(1), b'b');
            assert_eq!(s.byte(2), 0);
        }
        assert!(MsgStr::from("").is_empty());
    }
}
