//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module runs one test case: it invokes the subject with the case
//! arguments, bounds the wait with the configured timeout and evaluates the
//! captured output against the case expectations.
//!
//! 此模块运行单个测试用例：使用用例参数调用被测程序，
//! 以配置的超时时间限制等待，并根据用例预期评估捕获的输出。

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::{
    core::models::{CapturedOutput, FailureReason, Mismatch, TestCase, TestResult},
    infra::command::{self, Capture, CommandLine},
};

/// Everything shared by the invocations of one run.
/// 一次运行中所有调用共享的信息。
#[derive(Debug, Clone)]
pub struct RunContext {
    pub subject: CommandLine,
    pub working_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl RunContext {
    fn command_for(&self, case: &TestCase) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.subject.program);
        cmd.args(self.subject.with_args(&case.args));
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Compares captured output with the expectations of `case`.
/// Every dimension is checked independently and all failures are returned.
///
/// 将捕获的输出与 `case` 的预期进行比较。
/// 每个维度独立检查，并返回所有失败项。
pub fn evaluate(case: &TestCase, output: &CapturedOutput) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    if output.status != case.expected_status {
        mismatches.push(Mismatch::ExitCode {
            expected: case.expected_status,
            actual: output.status,
        });
    }
    if !case.expected_stdout.is_match(&output.stdout) {
        mismatches.push(Mismatch::Stdout {
            pattern: case.expected_stdout.as_str().to_string(),
            actual: output.stdout.clone(),
        });
    }
    if !case.expected_stderr.is_match(&output.stderr) {
        mismatches.push(Mismatch::Stderr {
            pattern: case.expected_stderr.as_str().to_string(),
            actual: output.stderr.clone(),
        });
    }
    mismatches
}

/// Turns a finished invocation into a result.
pub fn judge(case: TestCase, output: CapturedOutput, duration: Duration) -> TestResult {
    let mismatches = evaluate(&case, &output);
    if mismatches.is_empty() {
        TestResult::Passed {
            case,
            output,
            duration,
        }
    } else {
        TestResult::Failed {
            case,
            output: Some(output),
            reason: FailureReason::Mismatch { mismatches },
            duration,
        }
    }
}

/// The main entry point for running a single test case.
/// Launch problems and timeouts are folded into the returned result so the
/// run always continues with the next case.
///
/// # Arguments
/// * `case` - The test case to execute
/// * `ctx` - Subject command line, working directory and timeout
///
/// 运行单个测试用例的主入口。启动问题和超时都会折叠到返回的结果中，
/// 因此运行总能继续到下一个用例。
pub async fn run_test_case(case: TestCase, ctx: &RunContext) -> TestResult {
    let started = Instant::now();
    let capture = command::spawn_and_capture(ctx.command_for(&case), ctx.timeout).await;
    let duration = started.elapsed();

    match capture {
        Ok(Capture::Completed(output)) => judge(case, output, duration),
        Ok(Capture::TimedOut) => TestResult::Failed {
            case,
            output: None,
            // `TimedOut` is only produced when a limit was set.
            reason: FailureReason::Timeout {
                limit: ctx.timeout.unwrap_or(duration),
            },
            duration,
        },
        Err(err) => TestResult::Failed {
            case,
            output: None,
            reason: FailureReason::Launch {
                error: format!("{}: {err}", ctx.subject.program),
            },
            duration,
        },
    }
}
