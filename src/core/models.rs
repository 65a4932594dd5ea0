//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the harness.
//! It includes the parsed test case, the compiled output patterns, the captured
//! output of one subject invocation, the per-case result and the running tally.
//!
//! 此模块定义了整个测试工具中使用的核心数据结构。
//! 它包括解析后的测试用例、编译后的输出模式、一次被测程序调用的捕获输出、
//! 每个用例的结果以及运行计数。

use crate::infra::t;
use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A regular expression that an output stream must match.
/// Keeps the source text for diagnostics next to the compiled form.
///
/// 输出流必须匹配的正则表达式。
/// 同时保存用于诊断的源文本和编译后的形式。
#[derive(Clone)]
pub struct OutputPattern {
    source: String,
    regex: Regex,
}

impl OutputPattern {
    /// Compiles `source` so that `.` also matches newlines and the match is
    /// anchored at the start of the captured text. A `$` matches at the end of
    /// the text or just before a single trailing newline.
    ///
    /// 编译 `source`，使 `.` 也匹配换行符，并且匹配锚定在捕获文本的开头。
    /// `$` 匹配文本末尾，或紧接在末尾单个换行符之前的位置。
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        // Validate the pattern on its own first so an unbalanced `)` cannot
        // close the anchoring group.
        Regex::new(source)?;
        let body = rewrite_end_anchors(source);
        let regex = RegexBuilder::new(&format!(r"\A(?:{body})"))
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written in the fixture.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Replaces every `$` outside escapes and character classes with an anchor
/// that also accepts one trailing newline before the end of the text.
fn rewrite_end_anchors(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut class_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                out.push(c);
                class_depth += 1;
                // `]` right after `[` or `[^` is a literal member.
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if class_depth > 0 => {
                out.push(c);
                class_depth -= 1;
            }
            '$' if class_depth == 0 => out.push_str(r"(?:\n?\z)"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Debug for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

impl PartialEq for OutputPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for OutputPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Represents a single test case read from the fixture file.
/// Each `TestCase` corresponds to exactly one invocation of the subject.
///
/// 代表从 fixture 文件读取的单个测试用例。
/// 每个 `TestCase` 恰好对应一次被测程序调用。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    /// The name of the test case, used for identification in logs.
    /// 测试用例的名称，用于在日志中进行识别。
    pub name: String,
    /// Arguments appended to the subject command line.
    /// 附加到被测程序命令行的参数。
    pub args: Vec<String>,
    /// The exit code the subject must return.
    /// 被测程序必须返回的退出码。
    pub expected_status: i32,
    /// Pattern the whole captured stdout must match.
    /// 整个捕获的 stdout 必须匹配的模式。
    pub expected_stdout: OutputPattern,
    /// Pattern the whole captured stderr must match.
    /// 整个捕获的 stderr 必须匹配的模式。
    pub expected_stderr: OutputPattern,
}

/// What one subject invocation produced.
/// 一次被测程序调用的产出。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedOutput {
    /// Exit code, or the negated signal number when the process was killed by a signal.
    /// 退出码；如果进程被信号终止，则为信号编号的相反数。
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A single expectation that the captured output did not meet.
/// 捕获输出未满足的单个预期。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    ExitCode { expected: i32, actual: i32 },
    Stdout { pattern: String, actual: String },
    Stderr { pattern: String, actual: String },
}

impl Mismatch {
    /// Renders the mismatch as one diagnostic line.
    /// 将不匹配项渲染为一行诊断信息。
    pub fn describe(&self) -> String {
        match self {
            Mismatch::ExitCode { expected, actual } => {
                t!("check.exit_code", actual = actual, expected = expected).to_string()
            }
            Mismatch::Stdout { pattern, actual } => t!(
                "check.stdout",
                actual = format!("{actual:?}"),
                pattern = pattern
            )
            .to_string(),
            Mismatch::Stderr { pattern, actual } => t!(
                "check.stderr",
                actual = format!("{actual:?}"),
                pattern = pattern
            )
            .to_string(),
        }
    }
}

/// Enumerates the possible reasons for a test case failure.
/// 枚举测试用例失败的可能原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    /// The subject ran to completion but one or more expectations failed.
    /// 被测程序运行完成，但一个或多个预期未满足。
    Mismatch { mismatches: Vec<Mismatch> },
    /// The subject exceeded the configured timeout and was killed.
    /// 被测程序超出了配置的超时时间并被终止。
    Timeout { limit: Duration },
    /// The subject could not be started or waited on.
    /// 被测程序无法启动或等待。
    Launch { error: String },
}

/// Represents the final result of a single test case execution.
///
/// 表示单个测试用例执行的最终结果。
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestResult {
    /// Every expectation held.
    /// 所有预期都满足。
    Passed {
        case: TestCase,
        output: CapturedOutput,
        duration: Duration,
    },
    /// The test case failed for one of the reasons in [`FailureReason`].
    /// 测试用例因 [`FailureReason`] 中的某个原因失败。
    Failed {
        case: TestCase,
        /// Absent when the subject never finished.
        /// 当被测程序未结束时为空。
        output: Option<CapturedOutput>,
        reason: FailureReason,
        duration: Duration,
    },
}

impl TestResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, TestResult::Failed { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            TestResult::Failed {
                reason: FailureReason::Timeout { .. },
                ..
            }
        )
    }

    pub fn case(&self) -> &TestCase {
        match self {
            TestResult::Passed { case, .. } | TestResult::Failed { case, .. } => case,
        }
    }

    pub fn case_name(&self) -> &str {
        &self.case().name
    }

    pub fn duration(&self) -> Duration {
        match self {
            TestResult::Passed { duration, .. } | TestResult::Failed { duration, .. } => *duration,
        }
    }

    pub fn output(&self) -> Option<&CapturedOutput> {
        match self {
            TestResult::Passed { output, .. } => Some(output),
            TestResult::Failed { output, .. } => output.as_ref(),
        }
    }

    /// The short verdict printed after the case name.
    /// 打印在用例名称之后的简短结论。
    pub fn verdict(&self) -> String {
        match self {
            TestResult::Passed { .. } => t!("run.verdict_ok").to_string(),
            TestResult::Failed {
                reason: FailureReason::Timeout { .. },
                ..
            } => t!("run.verdict_timeout").to_string(),
            TestResult::Failed { .. } => t!("run.verdict_fail").to_string(),
        }
    }

    /// Gets the appropriate CSS class for the test status.
    pub fn status_class(&self) -> &'static str {
        match self {
            TestResult::Passed { .. } => "status-Passed",
            TestResult::Failed {
                reason: FailureReason::Timeout { .. },
                ..
            } => "status-Timeout",
            TestResult::Failed { .. } => "status-Failed",
        }
    }

    /// One line per failing dimension, empty for a passed case.
    /// 每个失败维度一行，通过的用例为空。
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            TestResult::Passed { .. } => Vec::new(),
            TestResult::Failed { reason, .. } => match reason {
                FailureReason::Mismatch { mismatches } => {
                    mismatches.iter().map(Mismatch::describe).collect()
                }
                FailureReason::Timeout { limit } => {
                    vec![t!("check.timeout", secs = limit.as_secs_f64()).to_string()]
                }
                FailureReason::Launch { error } => {
                    vec![t!("check.launch", error = error).to_string()]
                }
            },
        }
    }
}

/// Counts of cases attempted and passed, threaded through the run loop.
///
/// 尝试和通过的用例计数，在运行循环中显式传递。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub seen: usize,
    pub passed: usize,
}

impl Tally {
    /// Returns the tally with `result` accounted for.
    #[must_use]
    pub fn record(self, result: &TestResult) -> Self {
        Self {
            seen: self.seen + 1,
            passed: self.passed + usize::from(!result.is_failure()),
        }
    }

    pub fn failed(&self) -> usize {
        self.seen - self.passed
    }

    /// `true` when nothing failed. An empty run counts as a success.
    pub fn all_passed(&self) -> bool {
        self.passed == self.seen
    }
}
