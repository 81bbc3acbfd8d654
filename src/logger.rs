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

//! The leveled write path and the logger façade.

use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;
use std::time::Duration;

use jiff::Zoned;

use crate::CallSite;
use crate::Error;
use crate::Level;
use crate::Rotation;
use crate::clock::Clock;
use crate::rolling::ActiveTarget;
use crate::rolling::RollingState;
use crate::rolling::Rotated;
use crate::worker::WorkerHandle;

const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A leveled, rotating file logger.
///
/// Cloning is cheap and every clone writes through the same file. All methods
/// take `&self` and are safe to call from any number of threads: the threshold
/// is read atomically before any formatting, and the format-and-write step is
/// serialized per logger so concurrent emits never interleave within a line.
///
/// # Examples
///
/// ```no_run
/// use logwheel::Level;
/// use logwheel::Logger;
///
/// let logger = Logger::builder("logs", "app")
///     .create_dir(true)
///     .level(Level::Info)
///     .build()
///     .unwrap();
///
/// logger.info("service started");
/// logwheel::warn!(logger, "queue depth {} above watermark", 128);
/// logger.close();
/// ```
#[derive(Clone, Debug)]
pub struct Logger {
    inner: Arc<Inner>,
}

#[derive(Debug)]
pub(crate) struct Inner {
    level: AtomicU8,
    core: Mutex<Core>,
    worker: Mutex<Option<WorkerHandle>>,
}

#[derive(Debug)]
struct Core {
    state: RollingState,
    // None once the logger is closed; emits become no-ops.
    target: Option<ActiveTarget>,
}

impl Logger {
    /// Create a builder for a logger writing `<dir>/<name>_<bucketKey>` files.
    pub fn builder(dir: impl Into<PathBuf>, name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(dir, name)
    }

    /// The current minimum severity.
    pub fn level(&self) -> Level {
        self.inner.threshold()
    }

    /// Change the minimum severity for all subsequent emits, from any thread.
    pub fn set_level(&self, level: Level) {
        self.inner.level.store(level as u8, Ordering::Relaxed);
    }

    /// Emit a message at `level`.
    ///
    /// Returns without any formatting or I/O when `level` is below the
    /// configured threshold. `Level::All` and `Level::Off` are not emittable
    /// and are ignored. For `Level::Fatal` and `Level::Panic` see [`fatal`]
    /// and [`panic`].
    ///
    /// [`fatal`]: Logger::fatal
    /// [`panic`]: Logger::panic
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log_at(level, CallSite::here(), args);
    }

    /// Emit a message with an explicitly supplied call site.
    ///
    /// This is the entry point for callers that carry their own location
    /// metadata, such as the log crate bridge.
    pub fn log_at(&self, level: Level, callsite: CallSite, args: fmt::Arguments<'_>) {
        if !self.inner.enabled(level) {
            return;
        }
        self.inner.write_record(level, callsite, args);
        match level {
            Level::Fatal => std::process::exit(1),
            Level::Panic => panic!("{args}"),
            _ => {}
        }
    }

    /// Emit at `Debug`.
    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Level::Debug, format_args!("{msg}"));
    }

    /// Emit at `Info`.
    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::Info, format_args!("{msg}"));
    }

    /// Emit at `Warn`.
    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Level::Warn, format_args!("{msg}"));
    }

    /// Emit at `Error`.
    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::Error, format_args!("{msg}"));
    }

    /// Emit at `Fatal`, then exit the process with status 1.
    ///
    /// The exit happens only if the message clears the threshold; a gated-out
    /// fatal returns normally without side effects.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) {
        self.log(Level::Fatal, format_args!("{msg}"));
    }

    /// Emit at `Panic`, then panic with the same message.
    ///
    /// As with [`Logger::fatal`], a gated-out call returns normally.
    #[track_caller]
    pub fn panic(&self, msg: impl fmt::Display) {
        self.log(Level::Panic, format_args!("{msg}"));
    }

    /// Force a rotation check, on the same code path the background worker
    /// uses.
    ///
    /// Returns `Ok(true)` if a new file was opened and swapped in, `Ok(false)`
    /// if the bucket key is unchanged (or the logger is closed) and nothing
    /// was done. Callers blocked on concurrent emits wait only for the normal
    /// per-line lock hold.
    pub fn rotate_now(&self) -> Result<bool, Error> {
        self.inner.rotate(CallSite::here())
    }

    /// Release the log file and stop the background worker, if any.
    ///
    /// Idempotent: repeated calls return immediately. Emits after close are
    /// no-ops.
    pub fn close(&self) {
        self.inner.close();
    }
}

impl Inner {
    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn threshold(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn enabled(&self, level: Level) -> bool {
        level.emittable() && level >= self.threshold()
    }

    fn write_record(&self, level: Level, callsite: CallSite, args: fmt::Arguments<'_>) {
        let mut core = self.lock_core();
        let Core { state, target } = &mut *core;
        let Some(target) = target.as_mut() else {
            return;
        };
        let line = format_line(&state.clock.now(), callsite, level, args);
        if let Err(err) = target.write_line(line.as_bytes()) {
            let path = target.path().display().to_string();
            drop(core);
            eprintln!("failed to write log line to {path}: {err}");
        }
    }

    /// Rotate if the bucket key changed. A close failure of the superseded
    /// file is written through the new target rather than propagated.
    pub(crate) fn rotate(&self, callsite: CallSite) -> Result<bool, Error> {
        let mut core = self.lock_core();
        let Core { state, target } = &mut *core;
        let Some(target) = target.as_mut() else {
            return Ok(false);
        };
        match state.rotate(target)? {
            Rotated::Unchanged => Ok(false),
            Rotated::Swapped { close_failure } => {
                if let Some(err) = close_failure {
                    report_close_failure(state, target, callsite, &err);
                }
                Ok(true)
            }
        }
    }

    /// The background worker's rotation path: a failed attempt is logged
    /// through the still-active target and the worker keeps ticking.
    pub(crate) fn rotate_or_report(&self) {
        let callsite = CallSite::here();
        if let Err(err) = self.rotate(callsite)
            && self.enabled(Level::Error)
        {
            self.write_record(
                Level::Error,
                callsite,
                format_args!("background rotation failed: {err}"),
            );
        }
    }

    fn close(&self) {
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(worker) = worker {
            worker.stop();
        }

        let target = self.lock_core().target.take();
        if let Some(target) = target
            && let Err(err) = target.close()
        {
            eprintln!("failed to close log file: {err}");
        }
    }
}

/// Report a failed close of the superseded target through its replacement,
/// falling back to stderr if that write fails too.
fn report_close_failure(
    state: &RollingState,
    target: &mut ActiveTarget,
    callsite: CallSite,
    err: &Error,
) {
    let line = format_line(
        &state.clock.now(),
        callsite,
        Level::Error,
        format_args!("failed to close rotated log file: {err}"),
    );
    if let Err(write_err) = target.write_line(line.as_bytes()) {
        eprintln!(
            "failed to write log line to {}: {write_err}",
            target.path().display()
        );
    }
}

fn format_line(
    now: &Zoned,
    callsite: CallSite,
    level: Level,
    args: fmt::Arguments<'_>,
) -> String {
    let ts = now.strftime(LINE_TIMESTAMP_FORMAT);
    let mut line = String::with_capacity(64);
    // writing to a String cannot fail
    write!(&mut line, "{ts} {callsite}: [{level}] {args}").unwrap();
    line.push('\n');
    line
}

/// A builder for configuring a [`Logger`].
#[derive(Debug)]
pub struct LoggerBuilder {
    // required
    dir: PathBuf,
    name: String,

    // has default
    rotation: Rotation,
    level: Level,
    auto_rotate: bool,
    rotate_interval: Duration,
    create_dir: bool,
    clock: Clock,
}

impl LoggerBuilder {
    const DEFAULT_ROTATE_INTERVAL: Duration = Duration::from_secs(10 * 60);

    fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            dir: dir.into(),
            name: name.into(),
            rotation: Rotation::Daily,
            level: Level::All,
            auto_rotate: false,
            rotate_interval: Self::DEFAULT_ROTATE_INTERVAL,
            create_dir: false,
            clock: Clock::System,
        }
    }

    /// Set the rotation granularity. Default to [`Rotation::Daily`].
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the initial minimum severity. Default to [`Level::All`].
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Run a background thread that checks for rotation periodically.
    ///
    /// Without it, rotation happens only through [`Logger::rotate_now`].
    #[must_use]
    pub fn auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    /// Set the background rotation check interval. Default to 10 minutes.
    #[must_use]
    pub fn rotate_interval(mut self, interval: Duration) -> Self {
        self.rotate_interval = interval;
        self
    }

    /// Create the log directory if it does not exist.
    ///
    /// Default to `false`: construction fails on a missing directory.
    #[must_use]
    pub fn create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }

    /// Set the time source, usually a [`ManualClock`](crate::ManualClock)
    /// driving rotation deterministically in tests.
    ///
    /// Default to [`Clock::System`].
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`Logger`], opening the current bucket's file.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The configured name is empty or contains a path separator.
    /// * The log directory does not exist (and `create_dir` is off) or cannot
    ///   be created.
    /// * The current log file cannot be opened.
    pub fn build(self) -> Result<Logger, Error> {
        let LoggerBuilder {
            dir,
            name,
            rotation,
            level,
            auto_rotate,
            rotate_interval,
            create_dir,
            clock,
        } = self;

        if name.is_empty() {
            return Err(Error::InvalidConfig("name must not be empty".to_string()));
        }
        if name.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "name must not contain path separators: {name}"
            )));
        }

        if create_dir {
            fs::create_dir_all(&dir).map_err(|source| Error::OpenTarget {
                path: dir.clone(),
                source,
            })?;
        } else if !dir.is_dir() {
            return Err(Error::InvalidConfig(format!(
                "log directory does not exist: {}",
                dir.display()
            )));
        }

        let state = RollingState::new(dir, name, rotation, clock);
        let target = state.open_target()?;

        let inner = Arc::new(Inner {
            level: AtomicU8::new(level as u8),
            core: Mutex::new(Core {
                state,
                target: Some(target),
            }),
            worker: Mutex::new(None),
        });

        if auto_rotate {
            let handle = crate::worker::spawn(Arc::downgrade(&inner), rotate_interval);
            *inner.worker.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
        }

        Ok(Logger { inner })
    }
}
