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

//! Logwheel is a leveled file logger that rotates its output file on
//! wall-clock boundaries while concurrent writers keep emitting.
//!
//! Each log line carries a timestamp, the caller's `file:line`, and a level
//! tag. Log files are named `<dir>/<name>_<bucketKey>`, where the bucket key
//! is derived from the current time at the configured [`Rotation`]
//! granularity; the file rotates exactly when the key changes, either through
//! an optional background worker or an explicit [`Logger::rotate_now`]. The
//! swap installs the new file before the old handle is closed, so no emit
//! ever lands on a closed target and no line is torn or lost across a
//! rotation.
//!
//! # Examples
//!
//! ```no_run
//! use logwheel::Level;
//! use logwheel::Logger;
//! use logwheel::Rotation;
//!
//! let logger = Logger::builder("logs", "app")
//!     .create_dir(true)
//!     .rotation(Rotation::Daily)
//!     .level(Level::Info)
//!     .auto_rotate(true)
//!     .build()
//!     .unwrap();
//!
//! logger.info("service started");
//! logwheel::error!(logger, "lost connection to {}", "upstream");
//! logger.close();
//! ```
//!
//! A process-wide default instance lives in [`global`], and [`bridge`] routes
//! the log crate's macros into a [`Logger`].

pub mod bridge;
pub mod global;

mod callsite;
mod clock;
mod error;
mod level;
mod logger;
mod macros;
mod rolling;
mod rotation;
mod worker;

pub use callsite::CallSite;
pub use clock::Clock;
pub use clock::ManualClock;
pub use error::Error;
pub use level::Level;
pub use level::ParseLevelError;
pub use logger::Logger;
pub use logger::LoggerBuilder;
pub use rotation::Rotation;
