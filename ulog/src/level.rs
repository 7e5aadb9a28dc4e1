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

/// A severity level encoded as an octal-banded byte.
///
/// The high five bits select the severity band, the low three bits a
/// sub-level within it:
///
/// ```text
/// OFF = 0  <  ERROR = 0o10  <  WARN = 0o20  <  INFO = 0o30  <  DEBUG = 0o40  <  ALL = 0o377
/// ```
///
/// Levels are totally ordered; a handler keeps a record iff
/// `level <= threshold`.  [`Level::OFF`] doubles as the "no header"
/// sentinel for blank or continuation lines.
///
/// ```
/// use ulog::Level;
///
/// assert!(Level::ERROR < Level::DEBUG);
/// assert_eq!(Level::INFO.with_sub(3).sub_level(), 3);
/// assert_eq!(Level::INFO.with_sub(3).band(), Level::INFO.band());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    /// The "no header" sentinel; as a threshold, silences everything but
    /// blank lines.
    pub const OFF: Level = Level(0);

    /// Errors only.
    pub const ERROR: Level = Level(0o10);

    /// Warnings and errors.
    pub const WARN: Level = Level(0o20);

    /// Informational messages and above.  The default threshold.
    pub const INFO: Level = Level(0o30);

    /// Debugging output and above.
    pub const DEBUG: Level = Level(0o40);

    /// Everything, including out-of-band levels.
    pub const ALL: Level = Level(0o377);

    /// Creates a level from its raw byte encoding.
    pub const fn new(raw: u8) -> Self {
        Level(raw)
    }

    /// Returns the raw byte encoding.
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the sub-level within the band, in `0..=7`.
    pub const fn sub_level(self) -> u8 {
        self.0 & 0x07
    }

    /// Returns the band (the level with its sub-level cleared).
    pub const fn band(self) -> u8 {
        self.0 & 0xF8
    }

    /// Returns this level's band at sub-level `sub` (masked to `0..=7`).
    pub const fn with_sub(self, sub: u8) -> Level {
        Level(self.band() | (sub & 0x07))
    }

    /// Returns true if the level falls in one of the four named bands
    /// (ERROR through DEBUG, including their sub-levels).
    pub const fn in_named_band(self) -> bool {
        self.0 >= Self::ERROR.0 && self.0 <= Self::DEBUG.0 + 7
    }

    /// Index into the band-description tables, for named-band levels.
    pub(crate) const fn band_index(self) -> usize {
        (((self.0 & 0x38) >> 3) - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_totally_ordered() {
        assert!(Level::OFF < Level::ERROR);
        assert!(Level::ERROR < Level::WARN);
        assert!(Level::WARN < Level::INFO);
        assert!(Level::INFO < Level::DEBUG);
        assert!(Level::DEBUG < Level::ALL);
    }

    #[test]
    fn sub_level_encoding() {
        let level = Level::WARN.with_sub(5);
        assert_eq!(level.sub_level(), 5);
        assert_eq!(level.band(), Level::WARN.raw());
        assert_eq!(level.raw(), 0o25);

        // Sub-levels sort within their band.
        assert!(Level::WARN < level);
        assert!(level < Level::INFO);
    }

    #[test]
    fn with_sub_masks_overflow() {
        assert_eq!(Level::INFO.with_sub(9).sub_level(), 1);
    }

    #[test]
    fn named_band_boundaries() {
        assert!(!Level::OFF.in_named_band());
        assert!(!Level::new(0o07).in_named_band());
        assert!(Level::ERROR.in_named_band());
        assert!(Level::DEBUG.with_sub(7).in_named_band());
        assert!(!Level::new(0o50).in_named_band());
        assert!(!Level::ALL.in_named_band());
    }

    #[test]
    fn band_indices_match_description_order() {
        assert_eq!(Level::ERROR.band_index(), 0);
        assert_eq!(Level::WARN.band_index(), 1);
        assert_eq!(Level::INFO.band_index(), 2);
        assert_eq!(Level::DEBUG.band_index(), 3);
        assert_eq!(Level::DEBUG.with_sub(7).band_index(), 3);
    }
}
