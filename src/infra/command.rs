//! # Command Module / 命令模块
//!
//! Process plumbing: turning the configured subject command line into a
//! program plus arguments, and running a child to completion with its
//! streams captured.
//!
//! 进程相关的基础设施：将配置的被测程序命令行拆分为程序和参数，
//! 并运行子进程直至结束，同时捕获其输出流。

use anyhow::{Context, Result, anyhow};
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use crate::core::models::CapturedOutput;

/// A subject command line split into program and leading arguments.
/// 拆分为程序和前置参数的被测程序命令行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Expands `~` and environment variables, then splits with shell quoting rules.
    ///
    /// 展开 `~` 和环境变量，然后按照 shell 引号规则拆分。
    pub fn parse(raw: &str) -> Result<Self> {
        let expanded = shellexpand::full(raw)
            .with_context(|| format!("Failed to expand command: {raw}"))?
            .to_string();

        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow!("Failed to parse command: {expanded}"))?
            .into_iter();

        let program = parts
            .next()
            .ok_or_else(|| anyhow!("Empty command after parsing."))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The full argument vector for one case.
    pub fn with_args<'a>(&'a self, extra: &'a [String]) -> impl Iterator<Item = &'a str> {
        self.args.iter().chain(extra).map(String::as_str)
    }

    /// Human-readable rendering of the invocation, used in verbose traces.
    pub fn display_with(&self, extra: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.with_args(extra))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a captured run ended.
/// 捕获运行的结束方式。
#[derive(Debug)]
pub enum Capture {
    Completed(CapturedOutput),
    /// The limit expired and the child was killed.
    TimedOut,
}

/// Spawns a command and captures its stdout and stderr separately.
/// When `limit` is set and expires, the child is killed.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
/// * `limit` - Optional upper bound on the time spent waiting for the child.
///
/// # Returns
/// `Err` only when the child could not be spawned or waited on.
///
/// 派生一个命令并分别捕获其 stdout 和 stderr。
/// 如果设置了 `limit` 并且超时，子进程会被终止。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
    limit: Option<Duration>,
) -> io::Result<Capture> {
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    // The future owns the child, so dropping it on timeout kills the process.
    let finished = child.wait_with_output();
    let output = match limit {
        Some(limit) => match tokio::time::timeout(limit, finished).await {
            Ok(output) => output?,
            Err(_) => return Ok(Capture::TimedOut),
        },
        None => finished.await?,
    };

    Ok(Capture::Completed(CapturedOutput {
        status: status_code(output.status),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }))
}

/// Maps an exit status to a single integer: the exit code, or the negated
/// signal number on Unix when the process was killed by a signal.
pub fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
