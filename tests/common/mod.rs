#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn table_reader_cmd() -> Command {
    let mut cmd = Command::cargo_bin("table-reader").unwrap();
    cmd.env_remove("TABLE_READER_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `contents` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
