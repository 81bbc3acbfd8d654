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

//! Clock-driven rotation, through the public manual clock.

use std::fs;
use std::str::FromStr;
use std::thread;

use jiff::Zoned;
use logwheel::Clock;
use logwheel::Logger;
use logwheel::ManualClock;
use logwheel::Rotation;
use tempfile::TempDir;

fn manual_logger(dir: &TempDir, rotation: Rotation, time: &str) -> (Logger, ManualClock) {
    let clock = ManualClock::new(Zoned::from_str(time).unwrap());
    let logger = Logger::builder(dir.path(), "app")
        .rotation(rotation)
        .clock(Clock::Manual(clock.clone()))
        .build()
        .unwrap();
    (logger, clock)
}

#[test]
fn test_rotate_now_swaps_across_bucket_boundary() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = manual_logger(&dir, Rotation::Daily, "2024-08-10T10:00:00[UTC]");

    logger.info("old");
    clock.set_now(Zoned::from_str("2024-08-11T00:00:01[UTC]").unwrap());
    assert!(logger.rotate_now().unwrap());
    assert!(!logger.rotate_now().unwrap());
    logger.info("new");
    logger.close();

    let old = fs::read_to_string(dir.path().join("app_2024-08-10")).unwrap();
    let new = fs::read_to_string(dir.path().join("app_2024-08-11")).unwrap();
    assert!(old.ends_with("[INFO] old\n"));
    assert!(new.ends_with("[INFO] new\n"));
}

#[test]
fn test_hourly_rotation_keys_files_by_hour() {
    let dir = TempDir::new().unwrap();
    let (logger, clock) = manual_logger(&dir, Rotation::Hourly, "2024-08-10T17:12:52[UTC]");

    logger.info("five o'clock");
    clock.set_now(Zoned::from_str("2024-08-10T18:00:00[UTC]").unwrap());
    assert!(logger.rotate_now().unwrap());
    logger.info("six o'clock");
    logger.close();

    assert!(
        fs::read_to_string(dir.path().join("app_2024-08-10_17"))
            .unwrap()
            .ends_with("[INFO] five o'clock\n")
    );
    assert!(
        fs::read_to_string(dir.path().join("app_2024-08-10_18"))
            .unwrap()
            .ends_with("[INFO] six o'clock\n")
    );
}

#[test]
fn test_no_lines_lost_while_rotating_under_load() {
    const WRITERS: usize = 4;
    const LINES: usize = 500;

    let dir = TempDir::new().unwrap();
    let (logger, clock) = manual_logger(&dir, Rotation::Daily, "2024-08-10T00:00:00[UTC]");

    thread::scope(|s| {
        for w in 0..WRITERS {
            let logger = logger.clone();
            s.spawn(move || {
                for i in 0..LINES {
                    logwheel::info!(logger, "w{w} line {i}");
                }
            });
        }

        // advance a day per step so every rotate_now swaps files mid-stream
        for day in 11..=20 {
            clock.set_now(Zoned::from_str(&format!("2024-08-{day}T00:00:00[UTC]")).unwrap());
            assert!(logger.rotate_now().unwrap());
        }
    });
    logger.close();

    let mut total = 0;
    for entry in fs::read_dir(dir.path()).unwrap() {
        let content = fs::read_to_string(entry.unwrap().path()).unwrap();
        for line in content.lines() {
            assert!(line.contains("[INFO] w"), "torn line: {line:?}");
            total += 1;
        }
    }
    assert_eq!(total, WRITERS * LINES);
}
