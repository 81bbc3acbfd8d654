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

use jiff::Zoned;

/// Defines a fixed period for rolling of a log file.
///
/// The rotation is keyed entirely off [`Rotation::bucket_key`]: the active
/// log file rotates exactly when the key computed from the current wall clock
/// differs from the key the file was created with.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Rotation {
    /// Minutely Rotation
    Minutely,
    /// Hourly Rotation
    Hourly,
    /// Daily Rotation
    Daily,
}

impl Rotation {
    /// The time-derived naming key a log file created at `now` carries.
    ///
    /// This is the single source of truth for "should rotate": pure in `now`,
    /// no I/O, so the policy is testable without touching the filesystem.
    pub fn bucket_key(&self, now: &Zoned) -> String {
        now.strftime(self.date_format()).to_string()
    }

    fn date_format(&self) -> &'static str {
        match self {
            Rotation::Minutely => "%Y-%m-%d_%H-%M",
            Rotation::Hourly => "%Y-%m-%d_%H",
            Rotation::Daily => "%Y-%m-%d",
        }
    }
}
