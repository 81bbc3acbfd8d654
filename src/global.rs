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

//! The process-wide default logger.
//!
//! A convenience façade over one [`Logger`]: the free functions here forward
//! to it, lazily constructing a default instance (directory `logs`, name
//! `default`, level `All`, no auto-rotation) on first use if [`init`] was
//! never called.
//!
//! # Examples
//!
//! ```no_run
//! let logger = logwheel::Logger::builder("logs", "app")
//!     .create_dir(true)
//!     .build()
//!     .unwrap();
//! logwheel::global::init(logger);
//!
//! logwheel::global::info("service started");
//! ```

use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Level;
use crate::Logger;

static DEFAULT: Mutex<Option<Logger>> = Mutex::new(None);

fn lock_default() -> MutexGuard<'static, Option<Logger>> {
    DEFAULT.lock().unwrap_or_else(|e| e.into_inner())
}

/// Install `logger` as the process-wide default.
///
/// Any previously installed default is fully closed (file released,
/// background worker stopped) before the replacement is visible, so
/// re-initialization never leaks an open handle.
pub fn init(logger: Logger) {
    let mut slot = lock_default();
    if let Some(old) = slot.take() {
        old.close();
    }
    *slot = Some(logger);
}

/// The current default logger, constructing the lazy fallback on first use.
///
/// Returns `None` only when the fallback cannot be constructed (e.g. the
/// `logs` directory cannot be created); the failure is reported to stderr.
pub fn logger() -> Option<Logger> {
    let mut slot = lock_default();
    if let Some(logger) = slot.as_ref() {
        return Some(logger.clone());
    }
    match Logger::builder("logs", "default").create_dir(true).build() {
        Ok(logger) => {
            *slot = Some(logger.clone());
            Some(logger)
        }
        Err(err) => {
            eprintln!("failed to construct the default logger: {err}");
            None
        }
    }
}

/// Close and remove the default logger, if one is installed.
pub fn close() {
    if let Some(logger) = lock_default().take() {
        logger.close();
    }
}

/// Emit at `Debug` through the default logger.
#[track_caller]
pub fn debug(msg: impl fmt::Display) {
    if let Some(logger) = logger() {
        logger.log(Level::Debug, format_args!("{msg}"));
    }
}

/// Emit at `Info` through the default logger.
#[track_caller]
pub fn info(msg: impl fmt::Display) {
    if let Some(logger) = logger() {
        logger.log(Level::Info, format_args!("{msg}"));
    }
}

/// Emit at `Warn` through the default logger.
#[track_caller]
pub fn warn(msg: impl fmt::Display) {
    if let Some(logger) = logger() {
        logger.log(Level::Warn, format_args!("{msg}"));
    }
}

/// Emit at `Error` through the default logger.
#[track_caller]
pub fn error(msg: impl fmt::Display) {
    if let Some(logger) = logger() {
        logger.log(Level::Error, format_args!("{msg}"));
    }
}

/// Emit at `Fatal` through the default logger; exits once emitted.
#[track_caller]
pub fn fatal(msg: impl fmt::Display) {
    if let Some(logger) = logger() {
        logger.log(Level::Fatal, format_args!("{msg}"));
    }
}

/// Emit at `Panic` through the default logger; panics once emitted.
#[track_caller]
pub fn panic(msg: impl fmt::Display) {
    if let Some(logger) = logger() {
        logger.log(Level::Panic, format_args!("{msg}"));
    }
}
