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

//! Call-site capture for the `file:line` prefix of each log line.

use std::fmt;
use std::panic::Location;

/// The source location that invoked a logging entry point.
///
/// Captured fresh on every emit via [`CallSite::here`]; never cached. All
/// public logging functions are `#[track_caller]`, so the captured location is
/// always the line that called the outermost public function, not an internal
/// wrapper.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Capture the caller's location.
    #[track_caller]
    pub fn here() -> CallSite {
        let loc = Location::caller();
        CallSite {
            file: loc.file(),
            line: loc.line(),
        }
    }

    /// Build a call site from an explicit file and line, for callers that
    /// carry location metadata of their own (e.g. the log crate bridge).
    pub fn new(file: &'static str, line: u32) -> CallSite {
        CallSite { file, line }
    }

    /// The full path of the source file.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// The 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The final path segment of the source file.
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}
