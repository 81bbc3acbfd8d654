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

use std::fs;

use logwheel::Level;
use logwheel::Logger;
use tempfile::TempDir;

// The log crate global logger can only be installed once per process.
#[test]
fn test_log_crate_records_flow_through() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::builder(dir.path(), "app").build().unwrap();
    logwheel::bridge::setup_log_crate(logger.clone());

    log::info!("from the log crate: {}", 42);
    log::trace!("trace maps to debug");

    logger.set_level(Level::Warn);
    log::info!("gated out");
    log::warn!("let through");

    logger.close();

    let mut entries = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(entries.len(), 1);
    let content = fs::read_to_string(entries.pop().unwrap()).unwrap();
    let lines = content.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" bridge.rs:"));
    assert!(lines[0].ends_with("[INFO] from the log crate: 42"));
    assert!(lines[1].ends_with("[DEBUG] trace maps to debug"));
    assert!(lines[2].ends_with("[WARN] let through"));
}
