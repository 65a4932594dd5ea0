//! # Error Handling Integration Tests / 错误处理集成测试
//!
//! This module contains integration tests for error handling scenarios:
//! malformed fixtures, unlaunchable subjects, missing files and broken
//! configuration.
//!
//! 此模块包含错误处理场景的集成测试：
//! 格式错误的 fixture、无法启动的被测程序、缺失的文件以及损坏的配置。
#![cfg(unix)]

mod common;

use assert_cmd::prelude::*;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn harness(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fixture-harness").unwrap();
    cmd.current_dir(temp_dir.path()).env("NO_COLOR", "1");
    cmd
}

/// A missing fixture file stops the harness with its own exit status.
/// 缺失的 fixture 文件会以专用的退出状态停止测试工具。
#[test]
fn test_missing_fixture_file() {
    let temp_dir = setup_test_environment();

    harness(&temp_dir)
        .arg("--fixture")
        .arg("does-not-exist.txt")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to open fixture file"));
}

/// An explicitly named configuration file must exist.
#[test]
fn test_missing_config_file() {
    let temp_dir = setup_test_environment();

    harness(&temp_dir)
        .arg("--config")
        .arg("nope.toml")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read configuration file"));
}

/// A configuration file that is not valid TOML is rejected.
/// 无效 TOML 的配置文件会被拒绝。
#[test]
fn test_invalid_config_file() {
    let temp_dir = setup_test_environment();
    fs::write(temp_dir.path().join("harness.toml"), "subject = [unclosed").unwrap();

    harness(&temp_dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

/// A subject that cannot be started fails each case but the run goes on.
/// 无法启动的被测程序会使每个用例失败，但运行会继续。
#[test]
fn test_unlaunchable_subject() {
    let temp_dir = setup_test_environment();
    let fixture = format!("{HELP_CASE}{FAILING_CASE}");
    write_fixture(temp_dir.path(), "test-cases.txt", &fixture);

    harness(&temp_dir)
        .arg("--subject")
        .arg("this_command_definitely_does_not_exist_12345")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("help: fail"))
        .stdout(predicate::str::contains("unsigned: fail"))
        .stderr(predicate::str::contains("Command could not be started"))
        .stdout(predicate::str::contains("0 of 2 tests passed"));
}

/// Malformed blocks are diagnosed individually and never counted.
/// 格式错误的块会被逐个诊断，且不会被计数。
#[test]
fn test_malformed_blocks_are_skipped() {
    let temp_dir = setup_test_environment();
    let fixture = format!(
        "bad-status\n--help\nzero\n.*\n.*\n--\n\
         bad-regex\n--help\n0\n(unclosed\n.*\n--\n\
         {HELP_CASE}"
    );
    write_fixture(temp_dir.path(), "test-cases.txt", &fixture);

    harness(&temp_dir)
        .arg("--subject")
        .arg(subject_command(&temp_dir))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "test-cases.txt:1: Invalid exit status value for test case 'bad-status'",
        ))
        .stderr(predicate::str::contains(
            "Invalid stdout regexp in test case 'bad-regex'",
        ))
        .stdout(predicate::str::contains("1 of 1 tests passed"));
}

/// An empty subject command line is a configuration error.
#[test]
fn test_empty_subject() {
    let temp_dir = setup_test_environment();
    write_fixture(temp_dir.path(), "test-cases.txt", HELP_CASE);

    harness(&temp_dir)
        .arg("--subject")
        .arg("   ")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid subject command line"));
}
