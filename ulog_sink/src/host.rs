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

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{Error, Result, Sink};

/// A host sink over any [`std::io::Write`]: stdout, stderr, a file, or a
/// `Vec<u8>`.
///
/// Timestamps are wall-clock UTC in `YYYY-MM-DD:HH:MM:SS` form.
pub struct WriteSink<W: Write> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    /// Creates a sink over `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl WriteSink<io::Stdout> {
    /// Creates a sink over standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn put_char(&mut self, ch: u8) -> Result<()> {
        self.writer.write_all(&[ch]).map_err(|_| Error::Unavailable)
    }

    fn append_str(&mut self, s: &str) -> Result<()> {
        self.writer
            .write_all(s.as_bytes())
            .map_err(|_| Error::Unavailable)
    }

    fn append_timestamp(&mut self) -> Result<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let (year, month, day, hour, minute, second) = civil_from_unix(now.as_secs());
        write!(
            self.writer,
            "{year:04}-{month:02}-{day:02}:{hour:02}:{minute:02}:{second:02}"
        )
        .map_err(|_| Error::Unavailable)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|_| Error::Unavailable)
    }
}

/// Converts seconds since the Unix epoch to UTC civil date and time.
///
/// Days-to-civil conversion per Howard Hinnant's `civil_from_days`.
fn civil_from_unix(secs: u64) -> (i64, u32, u32, u32, u32, u32) {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = if month <= 2 { year + 1 } else { year };

    (
        year,
        month,
        day,
        (rem / 3_600) as u32,
        (rem % 3_600 / 60) as u32,
        (rem % 60) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civil_conversion_known_epochs() {
        assert_eq!(civil_from_unix(0), (1970, 1, 1, 0, 0, 0));
        assert_eq!(civil_from_unix(86_399), (1970, 1, 1, 23, 59, 59));
        assert_eq!(civil_from_unix(86_400), (1970, 1, 2, 0, 0, 0));
        assert_eq!(civil_from_unix(1_000_000_000), (2001, 9, 9, 1, 46, 40));
        assert_eq!(civil_from_unix(1_234_567_890), (2009, 2, 13, 23, 31, 30));
    }

    #[test]
    fn civil_conversion_leap_day() {
        // 2000-02-29T12:00:00Z
        assert_eq!(civil_from_unix(951_825_600), (2000, 2, 29, 12, 0, 0));
    }

    #[test]
    fn writes_through_to_writer() {
        let mut sink = WriteSink::new(Vec::new());
        sink.append_str("via write_all").unwrap();
        sink.put_char(b'!').unwrap();
        assert_eq!(sink.into_inner(), b"via write_all!");
    }

    #[test]
    fn timestamp_shape() {
        let mut sink = WriteSink::new(Vec::new());
        sink.append_timestamp().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        // YYYY-MM-DD:HH:MM:SS
        assert_eq!(out.len(), 19);
        assert_eq!(&out[4..5], "-");
        assert_eq!(&out[7..8], "-");
        assert_eq!(&out[10..11], ":");
    }
}
