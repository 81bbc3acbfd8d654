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

use std::sync::Weak;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossbeam_channel::bounded;
use crossbeam_channel::select;
use crossbeam_channel::tick;

use crate::logger::Inner;

/// Handle to the background rotation thread.
///
/// The shutdown channel has capacity one and [`WorkerHandle::stop`] sends
/// without blocking, so stopping the worker can never deadlock. Dropping the
/// handle without calling `stop` disconnects the channel, which the worker
/// also treats as a stop signal.
#[derive(Debug)]
pub(crate) struct WorkerHandle {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    pub(crate) fn stop(mut self) {
        let _ = self.shutdown.try_send(());
        if let Some(handle) = self.handle.take()
            && let Err(err) = handle.join()
        {
            eprintln!("rotation worker thread panicked: {err:?}");
        }
    }
}

/// Spawn the periodic rotation thread.
///
/// The worker holds only a [`Weak`] reference to the logger internals: if the
/// last logger handle is dropped without an explicit close, the next tick
/// fails to upgrade and the thread exits instead of leaking.
pub(crate) fn spawn(inner: Weak<Inner>, interval: Duration) -> WorkerHandle {
    let (shutdown_sender, shutdown) = bounded(1);
    let ticker = tick(interval);

    let handle = std::thread::Builder::new()
        .name("logwheel-rotation".to_string())
        .spawn(move || {
            loop {
                select! {
                    recv(ticker) -> _ => {
                        let Some(inner) = inner.upgrade() else {
                            break;
                        };
                        inner.rotate_or_report();
                    }
                    recv(shutdown) -> _ => break,
                }
            }
        })
        .expect("failed to spawn the rotation worker thread");

    WorkerHandle {
        shutdown: shutdown_sender,
        handle: Some(handle),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;
    use std::time::Duration;
    use std::time::Instant;

    use jiff::Zoned;
    use tempfile::TempDir;

    use crate::Logger;
    use crate::clock::Clock;
    use crate::clock::ManualClock;

    #[test]
    fn test_worker_rotates_on_tick() {
        let dir = TempDir::new().unwrap();
        let clock = ManualClock::new(Zoned::from_str("2024-08-10T10:00:00[UTC]").unwrap());
        let logger = Logger::builder(dir.path(), "app")
            .clock(Clock::Manual(clock.clone()))
            .auto_rotate(true)
            .rotate_interval(Duration::from_millis(20))
            .build()
            .unwrap();

        logger.info("old");
        clock.set_now(Zoned::from_str("2024-08-11T10:00:00[UTC]").unwrap());

        // wait for the ticker to observe the new bucket
        let deadline = Instant::now() + Duration::from_secs(5);
        while !dir.path().join("app_2024-08-11").exists() {
            assert!(Instant::now() < deadline, "worker never rotated");
            std::thread::sleep(Duration::from_millis(10));
        }

        logger.info("new");
        logger.close();

        assert!(
            fs::read_to_string(dir.path().join("app_2024-08-10"))
                .unwrap()
                .ends_with("[INFO] old\n")
        );
        assert!(
            fs::read_to_string(dir.path().join("app_2024-08-11"))
                .unwrap()
                .ends_with("[INFO] new\n")
        );
    }

    #[test]
    fn test_close_stops_worker_promptly() {
        let dir = TempDir::new().unwrap();
        let logger = Logger::builder(dir.path(), "app")
            .auto_rotate(true)
            .rotate_interval(Duration::from_secs(3600))
            .build()
            .unwrap();

        let started = Instant::now();
        logger.close();
        logger.close();
        // joining must not wait for the hour-long tick
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
