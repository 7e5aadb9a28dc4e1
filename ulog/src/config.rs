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

use crate::Level;

/// How verbosely level descriptions are rendered in the record header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelDesc {
    /// `"ERROR"`, `" WARN"`, `" INFO"`, `"DEBUG"`; `"Lvl "` plus the octal
    /// byte for out-of-band levels.
    #[default]
    Long,

    /// `" ERR"`, `"WARN"`, `"INFO"`, `" DBG"`; `"L "` plus the octal byte
    /// for out-of-band levels.
    Short,

    /// `" E"`, `" W"`, `" I"`, `"DB"`; the bare octal byte for out-of-band
    /// levels.
    Terse,
}

impl LevelDesc {
    const LONG: [&'static str; 4] = ["ERROR", " WARN", " INFO", "DEBUG"];
    const SHORT: [&'static str; 4] = [" ERR", "WARN", "INFO", " DBG"];
    const TERSE: [&'static str; 4] = [" E", " W", " I", "DB"];

    /// Returns the description for a named-band level, `None` for
    /// out-of-band levels.
    pub fn describe(self, level: Level) -> Option<&'static str> {
        if !level.in_named_band() || level.sub_level() != 0 {
            return None;
        }
        let table = match self {
            LevelDesc::Long => &Self::LONG,
            LevelDesc::Short => &Self::SHORT,
            LevelDesc::Terse => &Self::TERSE,
        };
        Some(table[level.band_index()])
    }

    /// Returns the description for the band of a sub-leveled named level.
    pub(crate) fn describe_band(self, level: Level) -> Option<&'static str> {
        self.describe(Level::new(level.band()))
    }

    /// Prefix printed before the raw octal byte of an out-of-band or
    /// sub-leveled level.
    pub(crate) fn numeric_prefix(self) -> &'static str {
        match self {
            LevelDesc::Long => "Lvl ",
            LevelDesc::Short => "L ",
            LevelDesc::Terse => "",
        }
    }
}

/// Rendering options shared by all records a handler emits.
///
/// The defaults reproduce the classic console layout: a timestamp, a level
/// description, a tag, then the message, with `;` between the fields and a
/// newline after each record.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Byte printed between header fields.
    pub delimiter: u8,

    /// Whether each record ends with a `\n`.  With this off, a leading
    /// delimiter separates consecutive records instead.
    pub eol: bool,

    /// Whether the header starts with the sink's timestamp.
    pub timestamp: bool,

    /// When set, `\t` in message text expands to this many spaces (a
    /// value of 0 discards tabs).  When unset, tabs pass through.
    pub tab_size: Option<u8>,

    /// Level description verbosity.
    pub level_desc: LevelDesc,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b';',
            eol: true,
            timestamp: true,
            tab_size: None,
            level_desc: LevelDesc::Long,
        }
    }
}
