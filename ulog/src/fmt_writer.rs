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

use ulog_format::{num_width, num_width_unsigned, Base, Specifier, SpecifierParser};
use ulog_sink::{Result, Sink};

use crate::config::{Config, LevelDesc};
use crate::value::{Arguments, MsgStr, Value};
use crate::Level;

// Cap on fill repetition so a runaway width cannot spin the sink.
const MAX_PADDING: u16 = 256;

/// Renders one log record at a time into a [`Sink`].
///
/// A record is: optional header (timestamp, level description), optional
/// origin tag, then the format string interpreted against its argument
/// list.  A format string with embedded newlines produces one record per
/// line, each with its own header.
///
/// Rendering quirks preserved deliberately:
///
/// * `%D`/`%F` with an explicit `.0` precision and a value of exactly `0.0`
///   emits nothing for that field, in the tradition of printf reserving
///   zero precision to elide zero values.
/// * A `%` that never resolves to a known conversion echoes the `%` and
///   the byte that stopped the parse, rather than dropping either.
pub struct Formatter<'a, S: Sink + ?Sized> {
    sink: &'a mut S,
    config: Config,
}

impl<'a, S: Sink + ?Sized> Formatter<'a, S> {
    /// Creates a formatter rendering into `sink` under `config`.
    pub fn new(sink: &'a mut S, config: Config) -> Self {
        Self { sink, config }
    }

    /// Renders one record (or several, if `fmt` contains newlines).
    ///
    /// `level` selects the header; [`Level::OFF`] suppresses it entirely,
    /// producing a header-less continuation line.  An empty `tag` elides
    /// the tag field and its delimiter.  Conversions consume `args` left
    /// to right; surplus arguments are ignored and a missing argument
    /// degrades to echoing the conversion character.
    pub fn render(
        &mut self,
        level: Level,
        tag: MsgStr<'_>,
        fmt: MsgStr<'_>,
        args: &mut Arguments<'_>,
    ) -> Result<()> {
        let mut i = 0;
        let mut c = fmt.byte(i);
        i += 1;
        loop {
            // Without per-record newlines, a leading delimiter separates
            // consecutive records instead.
            if !self.config.eol {
                self.sink.put_char(self.config.delimiter)?;
            }
            self.append_header(level)?;
            if !tag.is_empty() {
                self.append_msg_str(tag)?;
                self.sink.put_char(self.config.delimiter)?;
            }

            // One line's worth of message text.
            while c != 0 && !(self.config.eol && c == b'\n') {
                if c == b'%' {
                    let mut parser = SpecifierParser::new();
                    c = fmt.byte(i);
                    i += 1;
                    while c != 0 && parser.accept_flag(c) {
                        c = fmt.byte(i);
                        i += 1;
                    }
                    while c != 0 && parser.accept_width_precision(c) {
                        c = fmt.byte(i);
                        i += 1;
                    }
                    while c != 0 && parser.accept_specifier(c) {
                        c = fmt.byte(i);
                        i += 1;
                    }
                    match parser.specifier {
                        Some(specifier) => {
                            self.append_value(&parser, args)?;
                            // A two-stage parse can stop one byte past the
                            // conversion; hand that byte back to this loop.
                            if specifier.as_char() as u8 != c {
                                i -= 1;
                            }
                        }
                        None => {
                            self.sink.put_char(b'%')?;
                            if c != 0 && c != b'%' {
                                self.sink.put_char(c)?;
                            }
                        }
                    }
                } else if c == b'\t' && self.config.tab_size.is_some() {
                    if let Some(tab_size) = self.config.tab_size {
                        self.sink.append_char(b' ', u16::from(tab_size))?;
                    }
                } else if self.config.eol || c != b'\n' {
                    // In no-newline mode embedded newlines are disposed of.
                    self.sink.put_char(c)?;
                }
                c = fmt.byte(i);
                i += 1;
            }

            if self.config.eol {
                if c == b'\n' {
                    // Dispose of it; the line terminator below is ours.
                    c = fmt.byte(i);
                    i += 1;
                }
                self.sink.put_char(b'\n')?;
            }
            if c == 0 {
                return Ok(());
            }
        }
    }

    fn append_msg_str(&mut self, s: MsgStr<'_>) -> Result<()> {
        match s {
            MsgStr::Ram(s) => self.sink.append_str(s),
            MsgStr::Rom(s) => self.sink.append_rom_str(s),
        }
    }

    /// Emits the record header: timestamp, then level description, each
    /// followed by the field delimiter.  [`Level::OFF`] emits nothing.
    fn append_header(&mut self, level: Level) -> Result<()> {
        if level == Level::OFF {
            return Ok(());
        }
        if self.config.timestamp {
            self.sink.append_timestamp()?;
            self.sink.put_char(self.config.delimiter)?;
        }
        self.append_level(level)
    }

    /// Emits the level description.  Named bands print their description
    /// plus either alignment spaces (sub-level 0) or the sub-level digit;
    /// anything else prints a generic prefix and the raw level in octal,
    /// space-aligned to three octal digits.
    fn append_level(&mut self, level: Level) -> Result<()> {
        let desc = self.config.level_desc;
        if level.in_named_band() {
            if let Some(name) = desc.describe_band(level) {
                self.sink.append_str(name)?;
            }
            let sub = level.sub_level();
            if sub == 0 {
                let spaces = if desc == LevelDesc::Long { 2 } else { 1 };
                self.sink.append_char(b' ', spaces)?;
            } else {
                if desc == LevelDesc::Long {
                    self.sink.put_char(b'+')?;
                }
                self.sink.append_uint(u64::from(sub), Base::Octal)?;
            }
        } else {
            self.sink.append_str(desc.numeric_prefix())?;
            let spaces = if level.raw() < 0o10 {
                2
            } else {
                u16::from(level.raw() < 0o100)
            };
            self.sink.append_char(b' ', spaces)?;
            self.sink.append_uint(u64::from(level.raw()), Base::Octal)?;
        }
        self.sink.put_char(self.config.delimiter)
    }

    /// Emits one conversion's argument per the resolved specifier state.
    fn append_value(&mut self, parser: &SpecifierParser, args: &mut Arguments<'_>) -> Result<()> {
        let specifier = match parser.specifier {
            Some(specifier) => specifier,
            None => return Ok(()),
        };
        match specifier {
            Specifier::Str | Specifier::RomStr => match args.next() {
                Some(Value::Str(s)) => self.sink.append_str(s),
                Some(Value::RomStr(s)) => self.sink.append_rom_str(s),
                _ => self.sink.put_char(specifier.as_char() as u8),
            },
            Specifier::Char => {
                if parser.width > 0 {
                    self.sink
                        .append_char(parser.fill, (parser.width - 1).min(MAX_PADDING))?;
                }
                match args.next() {
                    Some(Value::Char(ch)) => self.sink.put_char(ch),
                    Some(Value::Int(v)) => self.sink.put_char(v as u8),
                    Some(Value::UInt(v)) => self.sink.put_char(v as u8),
                    _ => self.sink.put_char(specifier.as_char() as u8),
                }
            }
            Specifier::Double | Specifier::UpperDouble => {
                let value = match args.next() {
                    Some(Value::Double(v)) => v,
                    Some(Value::Int(v)) => v as f64,
                    Some(Value::UInt(v)) => v as f64,
                    Some(Value::Char(ch)) => f64::from(ch),
                    _ => return self.sink.put_char(specifier.as_char() as u8),
                };
                if parser.precision == Some(0) && value == 0.0 {
                    // Zero precision elides a zero value; the argument is
                    // still consumed.
                    return Ok(());
                }
                self.sink.append_double(value, parser.precision.unwrap_or(2))
            }
            Specifier::Decimal
            | Specifier::Integer
            | Specifier::Unsigned
            | Specifier::Hex
            | Specifier::UpperHex
            | Specifier::Octal
            | Specifier::Binary => {
                let base = match specifier.base() {
                    Some(base) => base,
                    None => return Ok(()),
                };
                let value = match args.next() {
                    Some(Value::Int(v)) => v,
                    Some(Value::UInt(v)) => v as i64,
                    Some(Value::Char(ch)) => i64::from(ch),
                    Some(Value::Double(v)) => v as i64,
                    _ => return self.sink.put_char(specifier.as_char() as u8),
                };
                if parser.width > 0 {
                    let needed = if parser.unsigned {
                        num_width_unsigned(value as u64, base)
                    } else {
                        num_width(value, base)
                    };
                    if parser.width > needed {
                        self.sink
                            .append_char(parser.fill, (parser.width - needed).min(MAX_PADDING))?;
                    }
                }
                if parser.unsigned {
                    self.sink.append_uint(value as u64, base)
                } else {
                    self.sink.append_int(value, base)
                }
            }
        }
    }
}
