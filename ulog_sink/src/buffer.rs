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

use super::{Error, Result, Sink};

/// An in-memory sink over a caller-provided byte buffer.
///
/// Writes past the end of the buffer return [`Error::ResourceExhausted`];
/// nothing is silently truncated.  Timestamps emit nothing — an in-memory
/// capture has no clock — which also makes this the sink of choice for
/// byte-exact tests.
pub struct BufferSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufferSink<'a> {
    /// Creates a sink writing to the front of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Returns the bytes written so far as a string, if they are valid
    /// UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Discards everything written so far.
    pub fn clear(&mut self) {
        self.pos = 0;
    }
}

impl Sink for BufferSink<'_> {
    fn put_char(&mut self, ch: u8) -> Result<()> {
        let slot = self.buf.get_mut(self.pos).ok_or(Error::ResourceExhausted)?;
        *slot = ch;
        self.pos += 1;
        Ok(())
    }

    fn append_timestamp(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_bytes_in_order() {
        let mut storage = [0u8; 8];
        let mut sink = BufferSink::new(&mut storage);
        sink.append_str("ab").unwrap();
        sink.put_char(b'c').unwrap();
        assert_eq!(sink.as_bytes(), b"abc");
        assert_eq!(sink.as_str(), Some("abc"));
    }

    #[test]
    fn reports_exhaustion_when_full() {
        let mut storage = [0u8; 2];
        let mut sink = BufferSink::new(&mut storage);
        sink.append_str("ab").unwrap();
        assert_eq!(sink.put_char(b'c'), Err(Error::ResourceExhausted));
        // The successfully written prefix is intact.
        assert_eq!(sink.as_bytes(), b"ab");
    }

    #[test]
    fn clear_resets_position() {
        let mut storage = [0u8; 8];
        let mut sink = BufferSink::new(&mut storage);
        sink.append_str("junk").unwrap();
        sink.clear();
        sink.append_str("ok").unwrap();
        assert_eq!(sink.as_bytes(), b"ok");
    }
}
