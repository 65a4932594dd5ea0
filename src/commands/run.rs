//! # Run Command Module / 运行命令模块
//!
//! This module implements the harness run: it loads the configuration, reads
//! the fixture, executes every case strictly in order and reports the outcome.
//!
//! 此模块实现测试工具的运行：加载配置、读取 fixture、严格按顺序执行每个用例
//! 并报告结果。

use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, Overrides},
        execution::{RunContext, run_test_case},
        fixture::{FixtureError, FixtureReader},
        models::{Tally, TestCase, TestResult},
    },
    infra::{command::CommandLine, t},
    reporting::{
        console,
        html::generate_html_report,
        json::{JsonReport, generate_json_report},
    },
};

/// Options collected from the command line.
/// 从命令行收集的选项。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub verbose: bool,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// What a run produced. Decides the process exit status.
/// 一次运行的产出，决定进程的退出状态。
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<TestResult>,
    pub tally: Tally,
    /// Fixture blocks that were skipped with a diagnostic.
    pub fixture_errors: usize,
    /// Set when Ctrl-C stopped the run early.
    pub interrupted: bool,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        !self.interrupted && self.tally.all_passed()
    }
}

/// Executes the run with the provided options.
///
/// # Returns
/// The [`RunSummary`] of the run. `Err` is reserved for problems that stop the
/// harness itself, such as an unreadable fixture or configuration file.
///
/// 使用提供的选项执行运行。`Err` 仅用于使测试工具本身无法继续的问题，
/// 例如无法读取的 fixture 或配置文件。
pub async fn execute(options: RunOptions) -> Result<RunSummary> {
    let config = config::resolve_config(options.config.as_deref())?.apply(options.overrides);
    rust_i18n::set_locale(&config.language);

    let subject = CommandLine::parse(&config.subject)
        .with_context(|| t!("config.bad_subject", subject = &config.subject).to_string())?;

    let file = File::open(&config.fixture)
        .with_context(|| t!("fixture.open_failed", path = config.fixture.display()).to_string())?;
    let reader = FixtureReader::new(BufReader::new(file));

    let ctx = RunContext {
        subject,
        working_dir: config.working_dir.clone(),
        timeout: config.timeout(),
    };

    let stop_token = setup_signal_handler();
    let summary = run_cases(reader, &config.fixture, &ctx, options.verbose, &stop_token).await?;

    if summary.interrupted {
        console::print_interrupted();
    }
    console::print_summary(&summary.tally);

    if let Some(report_path) = &options.html {
        println!("\n{}", t!("report.html_generating", path = report_path.display()));
        if let Err(e) = generate_html_report(&summary.results, &summary.tally, report_path) {
            eprintln!("{} {:#}", t!("report.html_failed").red(), e);
        }
    }

    if let Some(report_path) = &options.json {
        let report = JsonReport::new(&config.subject, &summary.results, &summary.tally);
        if let Err(e) = generate_json_report(&report, report_path) {
            eprintln!("{} {:#}", t!("report.json_failed").red(), e);
        }
    }

    Ok(summary)
}

/// Runs the cases one after the other, threading the tally through the loop.
/// Malformed fixture blocks are reported and skipped; a read error aborts.
///
/// 逐个运行用例，并在循环中传递计数。
/// 格式错误的 fixture 块会被报告并跳过；读取错误会中止运行。
pub async fn run_cases<I>(
    cases: I,
    fixture: &Path,
    ctx: &RunContext,
    verbose: bool,
    stop_token: &CancellationToken,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = Result<TestCase, FixtureError>>,
{
    let mut summary = RunSummary::default();

    for item in cases {
        if stop_token.is_cancelled() {
            summary.interrupted = true;
            break;
        }

        let case = match item {
            Ok(case) => case,
            Err(err) if err.is_fatal() => {
                return Err(anyhow::Error::new(err)
                    .context(t!("fixture.read_failed", path = fixture.display()).to_string()));
            }
            Err(err) => {
                console::print_fixture_error(fixture, &err);
                summary.fixture_errors += 1;
                continue;
            }
        };

        console::print_case_start(&case.name);
        if verbose {
            console::print_invocation(&ctx.subject.display_with(&case.args));
        }

        // Dropping the case future on cancellation kills the child.
        let finished = tokio::select! {
            biased;
            _ = stop_token.cancelled() => None,
            result = run_test_case(case, ctx) => Some(result),
        };
        let Some(result) = finished else {
            summary.interrupted = true;
            break;
        };

        console::print_case_outcome(&result, verbose);
        summary.tally = summary.tally.record(&result);
        summary.results.push(result);
    }

    Ok(summary)
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            token_clone.cancel();
        }
    });

    token
}
