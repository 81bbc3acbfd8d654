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

//! Formatting macros over [`Logger::log`](crate::Logger::log).
//!
//! Each macro takes a logger followed by a format string and arguments; the
//! reported call site is the macro invocation line.

/// Emit a formatted message at `Debug`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::Level::Debug, format_args!($($arg)+))
    };
}

/// Emit a formatted message at `Info`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::Level::Info, format_args!($($arg)+))
    };
}

/// Emit a formatted message at `Warn`.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::Level::Warn, format_args!($($arg)+))
    };
}

/// Emit a formatted message at `Error`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::Level::Error, format_args!($($arg)+))
    };
}

/// Emit a formatted message at `Fatal`; exits once emitted.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::Level::Fatal, format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;

    use jiff::Zoned;
    use tempfile::TempDir;

    use crate::Logger;
    use crate::clock::Clock;
    use crate::clock::ManualClock;

    #[test]
    fn test_macros_format_and_report_caller() {
        let dir = TempDir::new().unwrap();
        let now = Zoned::from_str("2024-08-10T10:00:00[UTC]").unwrap();
        let logger = Logger::builder(dir.path(), "app")
            .clock(Clock::Manual(ManualClock::new(now)))
            .build()
            .unwrap();

        crate::info!(logger, "answer is {}", 42);
        crate::warn!(&logger, "queue {name} is {pct}% full", name = "jobs", pct = 85);
        logger.close();

        let content = fs::read_to_string(dir.path().join("app_2024-08-10")).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" macros.rs:"));
        assert!(lines[0].ends_with("[INFO] answer is 42"));
        assert!(lines[1].ends_with("[WARN] queue jobs is 85% full"));
    }
}
