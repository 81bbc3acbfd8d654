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

//! Log severity levels.

use std::fmt;
use std::str::FromStr;

/// An ordered severity level.
///
/// `All` and `Off` are threshold-only sentinels: a logger configured with
/// `All` emits everything and one configured with `Off` emits nothing. A
/// message at level `L` is written iff `L >= threshold` and `L` is one of the
/// six message levels `Debug..=Panic`.
///
/// `Fatal` and `Panic` messages additionally terminate the process after the
/// line is written; see [`Logger::fatal`](crate::Logger::fatal) and
/// [`Logger::panic`](crate::Logger::panic).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Level {
    /// Threshold sentinel that lets every message through.
    All = 0,
    /// Verbose diagnostics.
    Debug = 1,
    /// Routine operational messages.
    Info = 2,
    /// Something unexpected but recoverable.
    Warn = 3,
    /// An operation failed.
    Error = 4,
    /// Unrecoverable; the process exits after the line is written.
    Fatal = 5,
    /// Unrecoverable; the thread unwinds after the line is written.
    Panic = 6,
    /// Threshold sentinel that suppresses every message.
    Off = 7,
}

impl Level {
    /// The uppercase tag used in log lines and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::All => "ALL",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
            Level::Off => "OFF",
        }
    }

    /// Whether messages may carry this level. `All` and `Off` may not.
    pub(crate) fn emittable(&self) -> bool {
        matches!(
            self,
            Level::Debug | Level::Info | Level::Warn | Level::Error | Level::Fatal | Level::Panic
        )
    }

    pub(crate) fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::All,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            5 => Level::Fatal,
            6 => Level::Panic,
            _ => Level::Off,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unrecognized level name.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_ascii_uppercase().as_str() {
            "ALL" => Level::All,
            "DEBUG" => Level::Debug,
            "INFO" => Level::Info,
            "WARN" => Level::Warn,
            "ERROR" => Level::Error,
            "FATAL" => Level::Fatal,
            "PANIC" => Level::Panic,
            "OFF" => Level::Off,
            _ => return Err(ParseLevelError(s.to_owned())),
        };
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::All < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
        assert!(Level::Panic < Level::Off);
    }

    #[test]
    fn test_level_roundtrip() {
        for level in [
            Level::All,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
            Level::Panic,
            Level::Off,
        ] {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
            assert_eq!(Level::from_u8(level as u8), level);
        }
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warn);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_sentinels_not_emittable() {
        assert!(!Level::All.emittable());
        assert!(!Level::Off.emittable());
        assert!(Level::Debug.emittable());
        assert!(Level::Panic.emittable());
    }
}
