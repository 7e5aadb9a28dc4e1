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

use ulog_format::{num_width_unsigned, Base};

use super::{Error, Result, Sink};

/// An embedded transport sink over any [`embedded_io::Write`] (a UART
/// driver, an RTT channel, ...).
///
/// The caller supplies a milliseconds-since-boot clock; timestamps are the
/// raw millisecond count right-aligned in a ten column field so successive
/// records line up on a serial console.
pub struct SerialSink<W: embedded_io::Write> {
    writer: W,
    millis: fn() -> u32,
}

impl<W: embedded_io::Write> SerialSink<W> {
    /// Creates a sink over `writer` with the given boot-time clock.
    pub fn new(writer: W, millis: fn() -> u32) -> Self {
        Self { writer, millis }
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: embedded_io::Write> Sink for SerialSink<W> {
    fn put_char(&mut self, ch: u8) -> Result<()> {
        self.writer
            .write_all(&[ch])
            .map_err(|_| Error::Unavailable)
    }

    fn append_str(&mut self, s: &str) -> Result<()> {
        self.writer
            .write_all(s.as_bytes())
            .map_err(|_| Error::Unavailable)
    }

    fn append_timestamp(&mut self) -> Result<()> {
        let now = (self.millis)();
        let width = num_width_unsigned(u64::from(now), Base::Decimal);
        self.append_char(b' ', 10u16.saturating_sub(width))?;
        self.append_uint(u64::from(now), Base::Decimal)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|_| Error::Unavailable)
    }
}
