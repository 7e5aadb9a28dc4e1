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

//! Bridges the ecosystem-standard [`log`] facade into a [`Handler`].
//!
//! `log` pre-renders its message with `core::fmt`, so the record arrives
//! here as finished text; it is re-escaped (`%` becomes `%%`) and passed
//! through as a format string with no arguments.  The record's target
//! becomes the origin tag.

use std::sync::Mutex;

use crate::handler::Handler;
use crate::value::{Arguments, MsgStr};
use crate::Level;

/// Implements [`log::Log`] over any [`Handler`].
///
/// `log::Log` takes `&self` from any thread, so the handler lives behind
/// a [`Mutex`].
///
/// ```no_run
/// use ulog::{LogAdapter, SinkHandler};
/// use ulog_sink::WriteSink;
///
/// let adapter = LogAdapter::new(SinkHandler::new(WriteSink::stdout()));
/// adapter.install().unwrap();
/// log::info!("plain log records now land on the ulog handler");
/// ```
pub struct LogAdapter<H: Handler + Send> {
    handler: Mutex<H>,
}

impl<H: Handler + Send> LogAdapter<H> {
    /// Wraps `handler`.
    pub fn new(handler: H) -> Self {
        Self {
            handler: Mutex::new(handler),
        }
    }

    /// Registers this adapter as the process-wide `log` logger and opens
    /// the facade's own filter fully; filtering is the handler's job.
    pub fn install(self) -> Result<(), log::SetLoggerError>
    where
        H: 'static,
    {
        log::set_max_level(log::LevelFilter::Trace);
        log::set_boxed_logger(Box::new(self))
    }
}

fn severity(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::ERROR,
        log::Level::Warn => Level::WARN,
        log::Level::Info => Level::INFO,
        log::Level::Debug => Level::DEBUG,
        // No fifth band; trace rides in DEBUG's sub-levels.
        log::Level::Trace => Level::DEBUG.with_sub(1),
    }
}

impl<H: Handler + Send> log::Log for LogAdapter<H> {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let text = record.args().to_string().replace('%', "%%");
        let mut handler = match self.handler.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = handler.log(
            severity(record.level()),
            MsgStr::from(record.target()),
            MsgStr::from(text.as_str()),
            &mut Arguments::NONE,
        );
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handler::SinkHandler;
    use log::Log;
    use ulog_sink::BufferSink;

    fn record<'a>(args: std::fmt::Arguments<'a>) -> log::Record<'a> {
        log::Record::builder()
            .args(args)
            .level(log::Level::Info)
            .target("compat")
            .build()
    }

    #[test]
    fn forwards_pre_rendered_text() {
        let mut storage = [0u8; 128];
        let config = Config {
            timestamp: false,
            ..Config::default()
        };
        let adapter = LogAdapter::new(SinkHandler::with_config(
            BufferSink::new(&mut storage),
            config,
        ));
        adapter.log(&record(format_args!("loaded {} modules", 3)));
        let handler = adapter.handler.into_inner().unwrap();
        assert_eq!(
            handler.sink().as_str(),
            Some(" INFO  ;compat;loaded 3 modules\n")
        );
    }

    #[test]
    fn escapes_percent_signs() {
        let mut storage = [0u8; 128];
        let config = Config {
            timestamp: false,
            ..Config::default()
        };
        let adapter = LogAdapter::new(SinkHandler::with_config(
            BufferSink::new(&mut storage),
            config,
        ));
        adapter.log(&record(format_args!("at 75% capacity")));
        let handler = adapter.handler.into_inner().unwrap();
        assert_eq!(handler.sink().as_str(), Some(" INFO  ;compat;at 75% capacity\n"));
    }

    #[test]
    fn severity_mapping() {
        assert_eq!(severity(log::Level::Error), Level::ERROR);
        assert_eq!(severity(log::Level::Trace), Level::DEBUG.with_sub(1));
    }
}
