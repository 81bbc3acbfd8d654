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

//! Target lifecycle: opening the bucket-keyed log file and swapping it out
//! when the bucket key changes.

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::Rotation;
use crate::clock::Clock;

/// The open log file currently receiving writes, together with the bucket key
/// it was created for.
///
/// At most one target is active per logger. A superseded target receives no
/// further writes and is closed exactly once, after its replacement is live.
#[derive(Debug)]
pub(crate) struct ActiveTarget {
    file: File,
    bucket_key: String,
    path: PathBuf,
}

impl ActiveTarget {
    /// Open `<dir>/<name>_<bucket_key>`, creating it if absent and appending
    /// if it already exists.
    fn open(dir: &Path, name: &str, bucket_key: String) -> Result<ActiveTarget, Error> {
        let path = dir.join(format!("{name}_{bucket_key}"));
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| Error::OpenTarget {
                path: path.clone(),
                source,
            })?;
        Ok(ActiveTarget {
            file,
            bucket_key,
            path,
        })
    }

    /// Write one fully formatted line as a single contiguous write.
    pub(crate) fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.file.write_all(line)
    }

    pub(crate) fn bucket_key(&self) -> &str {
        &self.bucket_key
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and release the underlying handle.
    pub(crate) fn close(mut self) -> Result<(), Error> {
        self.file
            .flush()
            .and_then(|()| self.file.sync_all())
            .map_err(|source| Error::CloseTarget {
                path: self.path.clone(),
                source,
            })
    }
}

/// The outcome of a rotation attempt.
#[derive(Debug)]
pub(crate) enum Rotated {
    /// The bucket key has not changed; nothing was done.
    Unchanged,
    /// A new target is active. If closing the superseded target failed, the
    /// failure rides along so the caller can report it through the new target.
    Swapped { close_failure: Option<Error> },
}

/// The naming scheme and rotation policy backing one logger.
#[derive(Debug)]
pub(crate) struct RollingState {
    dir: PathBuf,
    name: String,
    rotation: Rotation,
    pub(crate) clock: Clock,
}

impl RollingState {
    pub(crate) fn new(dir: PathBuf, name: String, rotation: Rotation, clock: Clock) -> RollingState {
        RollingState {
            dir,
            name,
            rotation,
            clock,
        }
    }

    /// Open a target for the current bucket key.
    pub(crate) fn open_target(&self) -> Result<ActiveTarget, Error> {
        let bucket_key = self.rotation.bucket_key(&self.clock.now());
        ActiveTarget::open(&self.dir, &self.name, bucket_key)
    }

    /// Rotate `active` if the current bucket key differs from the one it was
    /// created with.
    ///
    /// The new target is installed before the old handle is closed, so a
    /// concurrent reader of `active` (under the caller's lock) never observes
    /// a closed target. Failure to open the new target leaves `active`
    /// untouched and is returned to the caller; failure to close the old
    /// handle does not fail the rotation.
    pub(crate) fn rotate(&self, active: &mut ActiveTarget) -> Result<Rotated, Error> {
        let bucket_key = self.rotation.bucket_key(&self.clock.now());
        if active.bucket_key() == bucket_key {
            return Ok(Rotated::Unchanged);
        }

        let new_target = ActiveTarget::open(&self.dir, &self.name, bucket_key)?;
        let old_target = std::mem::replace(active, new_target);
        let close_failure = old_target.close().err();
        Ok(Rotated::Swapped { close_failure })
    }
}
