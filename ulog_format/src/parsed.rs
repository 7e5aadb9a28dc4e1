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

//! Whole-string format parsing for host builds.
//!
//! Unlike [`SpecifierParser`](crate::SpecifierParser), which renders one byte
//! at a time with no allocation, this module parses a complete format string
//! into a syntax tree.  It exists for host-side tooling and tests: syntax
//! checking a format string ahead of time and validating that a call site
//! passes the right number of arguments.
//!
//! # Example
//!
//! ```
//! use ulog_format::parsed::{FormatFragment, FormatString};
//!
//! let format_string = FormatString::parse("count: %05d").unwrap();
//! assert_eq!(format_string.fragments.len(), 2);
//! assert_eq!(format_string.arg_count(), 1);
//! assert!(matches!(format_string.fragments[0], FormatFragment::Literal("count: ")));
//! ```

use std::collections::HashSet;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{anychar, digit1, one_of};
use nom::combinator::{map, map_res, opt};
use nom::multi::{many0, many0_count};
use nom::IResult;

use crate::Specifier;

/// A conversion flag (the `0` in `%08x`).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Flag {
    /// `-`
    LeftJustify,

    /// `+`
    ForceSign,

    /// ` `
    SpaceSign,

    /// `0`
    LeadingZeros,
}

impl TryFrom<char> for Flag {
    type Error = char;

    fn try_from(value: char) -> Result<Self, char> {
        match value {
            '-' => Ok(Self::LeftJustify),
            '+' => Ok(Self::ForceSign),
            ' ' => Ok(Self::SpaceSign),
            '0' => Ok(Self::LeadingZeros),
            _ => Err(value),
        }
    }
}

/// A complete `%` conversion specification.
#[derive(Debug, PartialEq, Eq)]
pub struct ConversionSpec {
    /// The conversion's set of [`Flag`]s.
    pub flags: HashSet<Flag>,

    /// Minimum field width, if one was given.
    pub width: Option<u16>,

    /// Precision, if one was given (`Some(0)` for a bare `.`).
    pub precision: Option<u16>,

    /// The datatype specifier.
    pub specifier: Specifier,
}

/// A fragment of a format string.
#[derive(Debug, PartialEq, Eq)]
pub enum FormatFragment<'a> {
    /// A span of literal text.
    Literal(&'a str),

    /// A `%` conversion.
    Conversion(ConversionSpec),

    /// An escaped `%%`.
    Percent,
}

/// A parsed format string.
#[derive(Debug, PartialEq, Eq)]
pub struct FormatString<'a> {
    /// The [`FormatFragment`]s that comprise the string.
    pub fragments: Vec<FormatFragment<'a>>,
}

fn flags(input: &str) -> IResult<&str, HashSet<Flag>> {
    let (input, flags) = many0(map_res(anychar, Flag::try_from))(input)?;

    Ok((input, flags.into_iter().collect()))
}

fn width(input: &str) -> IResult<&str, Option<u16>> {
    opt(map_res(digit1, str::parse::<u16>))(input)
}

fn precision(input: &str) -> IResult<&str, Option<u16>> {
    let Ok((input, _)) = tag::<_, _, nom::error::Error<&str>>(".")(input) else {
        return Ok((input, None));
    };
    let (input, digits) = opt(map_res(digit1, str::parse::<u16>))(input)?;

    // A bare `.` is an explicit zero precision.
    Ok((input, Some(digits.unwrap_or(0))))
}

fn specifier(input: &str) -> IResult<&str, Specifier> {
    // Length modifiers (`h`, `l`) select C integer widths the tagged argument
    // values make irrelevant; they are consumed and dropped.
    let (input, _) = many0_count(one_of("hl"))(input)?;
    let (input, specifier) = map_res(anychar, Specifier::try_from)(input)?;

    // `%du`/`%iu` (and `%lu` et al. via the modifier path) retroactively
    // select the unsigned conversion.
    if matches!(specifier, Specifier::Decimal | Specifier::Integer) {
        if let (input, Some(_)) = opt(tag("u"))(input)? {
            return Ok((input, Specifier::Unsigned));
        }
    }

    Ok((input, specifier))
}

fn conversion_spec(input: &str) -> IResult<&str, ConversionSpec> {
    let (input, _) = tag("%")(input)?;
    let (input, flags) = flags(input)?;
    let (input, width) = width(input)?;
    let (input, precision) = precision(input)?;
    let (input, specifier) = specifier(input)?;

    Ok((
        input,
        ConversionSpec {
            flags,
            width,
            precision,
            specifier,
        },
    ))
}

fn literal_fragment(input: &str) -> IResult<&str, FormatFragment<'_>> {
    map(take_till1(|c| c == '%'), FormatFragment::Literal)(input)
}

fn percent_fragment(input: &str) -> IResult<&str, FormatFragment<'_>> {
    map(tag("%%"), |_| FormatFragment::Percent)(input)
}

fn conversion_fragment(input: &str) -> IResult<&str, FormatFragment<'_>> {
    map(conversion_spec, FormatFragment::Conversion)(input)
}

fn fragment(input: &str) -> IResult<&str, FormatFragment<'_>> {
    alt((percent_fragment, conversion_fragment, literal_fragment))(input)
}

fn format_string(input: &str) -> IResult<&str, FormatString<'_>> {
    let (input, fragments) = many0(fragment)(input)?;

    Ok((input, FormatString { fragments }))
}

impl<'a> FormatString<'a> {
    /// Parses a format string.
    ///
    /// Returns an error if any `%` conversion is malformed; the embedded
    /// renderer would degrade on such input rather than fail, but tooling
    /// wants the hard error.
    pub fn parse(s: &'a str) -> Result<Self, String> {
        let (rest, result) =
            format_string(s).map_err(|e| format!("failed to parse format string {s:?}: {e}"))?;

        if !rest.is_empty() {
            return Err(format!("failed to parse format string fragment: {rest:?}"));
        }

        Ok(result)
    }

    /// Returns the number of arguments the format string consumes.
    pub fn arg_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| matches!(f, FormatFragment::Conversion(_)))
            .count()
    }
}
