#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use assert_cmd::{assert::Assert, Command};
use ccard_core::PurchaseBook;
use ccard_storage_json::JsonPurchaseStorage;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory to use as `CCARD_HOME`.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Purchase book backed by the JSON document inside `home`.
pub fn book_in(home: &PathBuf) -> PurchaseBook {
    let storage = JsonPurchaseStorage::new(home.clone()).expect("create json storage");
    PurchaseBook::new(Box::new(storage))
}

/// Runs the binary in script mode with `today` pinned.
pub fn run_script(home: &PathBuf, today: &str, input: &str) -> Assert {
    Command::cargo_bin("ccard")
        .expect("ccard binary")
        .env("CCARD_CLI_SCRIPT", "1")
        .env("CCARD_HOME", home)
        .env("CCARD_TODAY", today)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

pub fn stdout_of(assert: Assert) -> String {
    String::from_utf8(assert.success().get_output().stdout.clone()).expect("utf-8 stdout")
}
