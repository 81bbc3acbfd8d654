// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bridge from the log crate's macros to a [`Logger`].

use crate::CallSite;
use crate::Level;
use crate::Logger;

struct LogCrateBridge(Logger);

fn level_of(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

impl log::Log for LogCrateBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        level_of(metadata.level()) >= self.0.level()
    }

    fn log(&self, record: &log::Record) {
        let callsite = match (record.file_static(), record.line()) {
            (Some(file), Some(line)) => CallSite::new(file, line),
            _ => CallSite::here(),
        };
        self.0.log_at(level_of(record.level()), callsite, *record.args());
    }

    fn flush(&self) {}
}

/// Set up the log crate global logger to forward into `logger`.
///
/// All records produced by `log::info!` and friends are written through
/// `logger`, carrying the record's own file and line as the call site.
/// `log::Level::Trace` maps to [`Level::Debug`]; this logger's own threshold
/// still applies on top of [`log::max_level`].
///
/// This should be called early in the execution of a Rust program. Any log
/// events that occur before initialization will be ignored.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
pub fn try_setup_log_crate(logger: Logger) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogCrateBridge(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger to forward into `logger`.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(logger: Logger) {
    try_setup_log_crate(logger).expect(
        "logwheel::bridge::setup_log_crate must be called before the log crate global logger initialized",
    );
}
