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

use ulog_sink::{Result, Sink};

use crate::config::Config;
use crate::fmt_writer::Formatter;
use crate::value::{Arguments, MsgStr};
use crate::Level;

/// Raw levels above this (other than [`Level::ALL`]) are clamped by
/// [`Handler::set_level`] implementations.
const MAX_THRESHOLD: u8 = 0o47;

/// A destination for log records.
///
/// Implementations decide whether a record passes their verbosity filter
/// and, if so, render it.  The `args` cursor is consumed by rendering;
/// an implementation that renders the same record more than once must
/// clone the cursor before the first pass.
pub trait Handler {
    /// Filters and renders one record.
    fn log(
        &mut self,
        level: Level,
        tag: MsgStr<'_>,
        fmt: MsgStr<'_>,
        args: &mut Arguments<'_>,
    ) -> Result<()>;

    /// Sets the verbosity threshold: records are kept iff
    /// `level <= threshold`.
    fn set_level(&mut self, level: Level);
}

/// The standard handler: a verbosity gate in front of a [`Formatter`]
/// rendering into an owned sink.
///
/// The default threshold is [`Level::INFO`].
pub struct SinkHandler<S: Sink> {
    sink: S,
    config: Config,
    threshold: Level,
}

impl<S: Sink> SinkHandler<S> {
    /// Creates a handler over `sink` with the default [`Config`].
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, Config::default())
    }

    /// Creates a handler over `sink` with explicit rendering options.
    pub fn with_config(sink: S, config: Config) -> Self {
        Self {
            sink,
            config,
            threshold: Level::INFO,
        }
    }

    /// Returns true if a record at `level` would pass the filter.
    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.threshold
    }

    /// Returns the current threshold.
    pub fn level(&self) -> Level {
        self.threshold
    }

    /// Returns a reference to the owned sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the handler and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: Sink> Handler for SinkHandler<S> {
    fn log(
        &mut self,
        level: Level,
        tag: MsgStr<'_>,
        fmt: MsgStr<'_>,
        args: &mut Arguments<'_>,
    ) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        Formatter::new(&mut self.sink, self.config).render(level, tag, fmt, args)?;
        self.sink.flush()
    }

    fn set_level(&mut self, level: Level) {
        // Thresholds past DEBUG+7 select nothing extra; only ALL is let
        // through verbatim.
        self.threshold = if level.raw() > MAX_THRESHOLD && level != Level::ALL {
            Level::new(MAX_THRESHOLD)
        } else {
            level
        };
    }
}

/// Fans each record out to two handlers.
///
/// The argument cursor is single-pass, so it is cloned before the first
/// handler consumes it; both handlers see the full argument list and
/// produce identical text (filtering aside).
pub struct DualHandler<'a> {
    first: &'a mut dyn Handler,
    second: &'a mut dyn Handler,
}

impl<'a> DualHandler<'a> {
    /// Creates a fan-out over two handlers.
    pub fn new(first: &'a mut dyn Handler, second: &'a mut dyn Handler) -> Self {
        Self { first, second }
    }
}

impl Handler for DualHandler<'_> {
    fn log(
        &mut self,
        level: Level,
        tag: MsgStr<'_>,
        fmt: MsgStr<'_>,
        args: &mut Arguments<'_>,
    ) -> Result<()> {
        let mut replay = args.clone();
        let first = self.first.log(level, tag, fmt, args);
        let second = self.second.log(level, tag, fmt, &mut replay);
        first.and(second)
    }

    fn set_level(&mut self, level: Level) {
        self.first.set_level(level);
        self.second.set_level(level);
    }
}

/// The caller-facing entry point: a handler slot that no-ops when empty.
///
/// Libraries take a `&mut Logger` (or construct one over a handler they
/// are given); only the application's entry point decides which handler,
/// if any, is connected.  Sink errors are swallowed here: logging is
/// best-effort and must never become the caller's failure.
pub struct Logger<'a> {
    handler: Option<&'a mut dyn Handler>,
}

impl<'a> Logger<'a> {
    /// Creates a logger over `handler`.
    pub fn new(handler: &'a mut dyn Handler) -> Self {
        Self {
            handler: Some(handler),
        }
    }

    /// Creates a logger with no handler; every call is a no-op.
    pub const fn disconnected() -> Self {
        Self { handler: None }
    }

    /// Connects (or replaces) the handler.
    pub fn set_handler(&mut self, handler: &'a mut dyn Handler) {
        self.handler = Some(handler);
    }

    /// Logs one record, if a handler is connected.
    pub fn log(&mut self, level: Level, tag: MsgStr<'_>, fmt: MsgStr<'_>, args: &mut Arguments<'_>) {
        if let Some(handler) = self.handler.as_mut() {
            let _ = handler.log(level, tag, fmt, args);
        }
    }

    /// Sets the verbosity threshold, if a handler is connected.
    pub fn set_level(&mut self, level: Level) {
        if let Some(handler) = self.handler.as_mut() {
            handler.set_level(level);
        }
    }
}

impl Default for Logger<'_> {
    fn default() -> Self {
        Self::disconnected()
    }
}
