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

//! `ulog` is a printf-style, severity-filtered logging facility for
//! embedded and host targets.
//!
//! A log record is a severity [`Level`], an origin tag, a format string,
//! and a list of [`Value`] arguments.  Records flow through a [`Handler`]
//! (which applies the verbosity filter) into a [`ulog_sink::Sink`]
//! transport.  The format string understands a printf subset — flags,
//! width, precision, `h`/`l` length modifiers, and the conversions
//! `s S c d i u x X o b D F` — extended with binary output (`%b`) and
//! read-only-segment strings (`%S`), interpreted entirely through the
//! sink's primitive operations with no allocation.
//!
//! # Example
//!
//! ```
//! use ulog::{info, Logger, SinkHandler};
//! use ulog_sink::BufferSink;
//!
//! let mut storage = [0u8; 128];
//! let mut handler = SinkHandler::with_config(
//!     BufferSink::new(&mut storage),
//!     ulog::Config {
//!         timestamp: false,
//!         ..ulog::Config::default()
//!     },
//! );
//! let mut logger = Logger::new(&mut handler);
//!
//! info!(logger, "App", "Hello %s, you are %d", "World", 42);
//!
//! assert_eq!(
//!     handler.sink().as_str(),
//!     Some(" INFO  ;App;Hello World, you are 42\n")
//! );
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod config;
mod fmt_writer;
mod handler;
mod level;
#[cfg(feature = "log-compat")]
mod log_compat;
mod value;

pub use config::{Config, LevelDesc};
pub use fmt_writer::Formatter;
pub use handler::{DualHandler, Handler, Logger, SinkHandler};
pub use level::Level;
#[cfg(feature = "log-compat")]
pub use log_compat::LogAdapter;
pub use value::{Arguments, MsgStr, Value};

/// Logs one record at an arbitrary [`Level`] through a [`Logger`].
///
/// Arguments after the format string are converted through
/// [`Value::from`]; their types must match the conversions positionally.
///
/// ```
/// # use ulog::{log, Level, Logger};
/// # let mut logger = Logger::disconnected();
/// log!(logger, Level::WARN, "Radio", "channel %d rssi %d", 11, -67);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let values = [$($crate::Value::from($arg)),*];
        $logger.log(
            $level,
            $crate::MsgStr::from($tag),
            $crate::MsgStr::from($fmt),
            &mut $crate::Arguments::new(&values),
        );
    }};
}

/// Logs at [`Level::ERROR`].
#[macro_export]
macro_rules! error {
    ($logger:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::ERROR, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::WARN`].
#[macro_export]
macro_rules! warn {
    ($logger:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::WARN, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::INFO`].
#[macro_export]
macro_rules! info {
    ($logger:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::INFO, $tag, $fmt $(, $arg)*)
    };
}

/// Logs at [`Level::DEBUG`].
#[macro_export]
macro_rules! debug {
    ($logger:expr, $tag:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::DEBUG, $tag, $fmt $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulog_sink::BufferSink;

    fn quiet_handler(storage: &mut [u8]) -> SinkHandler<BufferSink<'_>> {
        SinkHandler::with_config(
            BufferSink::new(storage),
            Config {
                timestamp: false,
                ..Config::default()
            },
        )
    }

    #[test]
    fn leveled_macros_tag_their_band() {
        let mut storage = [0u8; 256];
        let mut handler = quiet_handler(&mut storage);
        handler.set_level(Level::ALL);
        {
            let mut logger = Logger::new(&mut handler);
            error!(logger, "App", "e");
            warn!(logger, "App", "w");
            info!(logger, "App", "i");
            debug!(logger, "App", "d");
        }
        assert_eq!(
            handler.sink().as_str(),
            Some("ERROR  ;App;e\n WARN  ;App;w\n INFO  ;App;i\nDEBUG  ;App;d\n")
        );
    }

    #[test]
    fn log_macro_accepts_mixed_argument_types() {
        let mut storage = [0u8; 256];
        let mut handler = quiet_handler(&mut storage);
        {
            let mut logger = Logger::new(&mut handler);
            log!(
                logger,
                Level::INFO,
                "Sensor",
                "%s: %d.%d V (%x raw, %D C)",
                "vbat",
                3,
                7,
                0xBEEFu32,
                21.5,
            );
        }
        assert_eq!(
            handler.sink().as_str(),
            Some(" INFO  ;Sensor;vbat: 3.7 V (BEEF raw, 21.50 C)\n")
        );
    }

    #[test]
    fn macros_borrow_the_logger_repeatedly() {
        let mut storage = [0u8; 256];
        let mut handler = quiet_handler(&mut storage);
        let mut logger = Logger::new(&mut handler);
        for i in 0..3 {
            info!(logger, "Loop", "pass %d", i);
        }
    }
}
