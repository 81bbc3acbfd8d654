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

use std::path::PathBuf;

/// Errors surfaced by logger construction and rotation.
///
/// Fatal and Panic emits terminate by contract and are not represented here;
/// everything in this enum is recoverable by the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base path or name passed at construction is unusable.
    #[error("invalid logger configuration: {0}")]
    InvalidConfig(String),
    /// A log file could not be created or opened for appending.
    #[error("failed to open log file {path}: {source}")]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A superseded log file could not be flushed and closed.
    ///
    /// Rotation treats this as non-fatal: the failure is written through the
    /// replacement target instead of being propagated.
    #[error("failed to close log file {path}: {source}")]
    CloseTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
