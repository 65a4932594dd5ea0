// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// A stand-in for the program under test. Behaviour is selected by the first argument.
const SUBJECT_SCRIPT: &str = r#"#!/bin/sh
case "$1" in
  --help)
    echo "Usage: verify_jar [options] <jar>"
    echo "  -v  verbose"
    exit 0 ;;
  --fail)
    echo "jar is not signed" >&2
    exit 1 ;;
  --sleep)
    exec sleep 30 ;;
  --echo)
    shift
    echo "$@"
    exit 0 ;;
  *)
    echo "unknown option: $1" >&2
    exit 2 ;;
esac
"#;

/// Creates a scratch directory holding the stand-in subject script.
pub fn setup_test_environment() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join("subject.sh"), SUBJECT_SCRIPT)
        .expect("Failed to write subject script");
    temp_dir
}

/// The `--subject` value that runs the stand-in script.
pub fn subject_command(temp_dir: &TempDir) -> String {
    format!("sh '{}'", temp_dir.path().join("subject.sh").display())
}

/// Writes a fixture file and returns its path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// A passing case against the stand-in subject.
pub const HELP_CASE: &str = "\
help
--help
0
.*Usage.*
^$
--
";

/// A case whose subject exits with 1 while 0 is expected.
pub const FAILING_CASE: &str = "\
unsigned
--fail
0
.*
.*
--
";
