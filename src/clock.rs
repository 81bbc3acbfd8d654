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

//! Time sources for line timestamps and bucket keys.

use std::sync::Arc;
use std::sync::Mutex;

use jiff::Zoned;

/// The time source a logger consults when stamping lines and computing
/// bucket keys.
///
/// Defaults to the system wall clock. A [`ManualClock`] stands in when
/// rotation has to be driven across bucket boundaries deterministically,
/// without waiting for real time to pass.
#[derive(Clone, Debug)]
pub enum Clock {
    /// The system wall clock.
    System,
    /// A manually driven clock.
    Manual(ManualClock),
}

impl Clock {
    pub(crate) fn now(&self) -> Zoned {
        match self {
            Clock::System => Zoned::now(),
            Clock::Manual(clock) => clock.now(),
        }
    }
}

/// A shared handle to a settable instant.
///
/// Clones observe the same instant: advancing any handle advances them all,
/// including the one a running [`Logger`](crate::Logger) was built with. A
/// test can therefore emit through a logger, move its clock past a bucket
/// boundary from outside, and assert on the resulting rotation.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<Zoned>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: Zoned) -> ManualClock {
        ManualClock {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// The instant the clock is frozen at.
    pub fn now(&self) -> Zoned {
        self.now.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Move the clock, for this handle and every clone of it.
    pub fn set_now(&self, now: Zoned) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_manual_clock_clones_share_one_instant() {
        let start = Zoned::from_str("2024-08-10T00:00:00[UTC]").unwrap();
        let clock = ManualClock::new(start.clone());
        let handle = clock.clone();
        assert_eq!(clock.now(), start);

        let later = Zoned::from_str("2024-08-11T00:00:00[UTC]").unwrap();
        handle.set_now(later.clone());
        assert_eq!(clock.now(), later);
        assert_eq!(Clock::Manual(clock).now(), later);
    }
}
