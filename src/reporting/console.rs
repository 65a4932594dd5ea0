//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the per-case progress lines, the verbose traces, the
//! fixture diagnostics and the final tally.
//!
//! 此模块打印每个用例的进度行、详细跟踪信息、fixture 诊断信息以及最终统计。

use colored::*;
use std::io::{self, Write};
use std::path::Path;

use crate::core::fixture::FixtureError;
use crate::core::models::{Tally, TestResult};
use crate::infra::t;

/// Starts the progress line of a case. The verdict is appended by
/// [`print_case_outcome`].
///
/// 开始一个用例的进度行。结论由 [`print_case_outcome`] 追加。
///
/// # Output Format / 输出格式
/// ```text
/// help: ok
/// bad-signature: fail
///   Command returned 1 instead of 0
/// ```
pub fn print_case_start(name: &str) {
    print!("{name}: ");
    let _ = io::stdout().flush();
}

/// Verbose only: the command about to be run.
pub fn print_invocation(command_line: &str) {
    println!();
    println!("  {} {:?}", t!("run.running_command"), command_line);
}

/// Finishes the progress line: verbose traces, the verdict and one line per
/// failing dimension on stderr.
///
/// 结束进度行：详细跟踪信息、结论，以及在 stderr 上为每个失败维度输出一行。
pub fn print_case_outcome(result: &TestResult, verbose: bool) {
    if verbose {
        if let Some(output) = result.output() {
            println!("  {} {:?}", t!("run.trace_stdout"), output.stdout);
            println!("  {} {:?}", t!("run.trace_stderr"), output.stderr);
            println!("  {} {}", t!("run.trace_status"), output.status);
        }
        print!("... ");
    }

    let verdict = result.verdict();
    let verdict = match result {
        TestResult::Passed { .. } => verdict.green(),
        _ if result.is_timeout() => verdict.yellow(),
        _ => verdict.red(),
    };
    println!("{verdict}");

    for line in result.diagnostics() {
        eprintln!("  {line}");
    }

    if verbose {
        println!("--");
    }
}

/// Reports a fixture block that could not be turned into a case.
///
/// 报告无法转换为用例的 fixture 块。
pub fn print_fixture_error(fixture: &Path, err: &FixtureError) {
    let location = match err.line() {
        Some(line) => format!("{}:{line}", fixture.display()),
        None => fixture.display().to_string(),
    };
    eprintln!("{}", format!("{location}: {err}").yellow());
}

/// Prints the final tally.
///
/// 打印最终统计。
///
/// # Output Format / 输出格式
/// ```text
///
/// 1 of 2 tests passed
/// FAILURE!
/// ```
pub fn print_summary(tally: &Tally) {
    println!();
    println!(
        "{}",
        t!("summary.tally", passed = tally.passed, total = tally.seen)
    );
    if tally.all_passed() {
        println!("{}", t!("summary.success").green().bold());
    } else {
        println!("{}", t!("summary.failure").red().bold());
    }
}

pub fn print_interrupted() {
    println!();
    println!("{}", t!("run.interrupted").yellow());
}
