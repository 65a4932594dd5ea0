//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes a machine-readable record of the run for CI tooling.
//!
//! 为 CI 工具写入机器可读的运行记录。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{Tally, TestResult};

/// Top-level document of the JSON report.
/// JSON 报告的顶层文档。
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub subject: &'a str,
    pub passed: usize,
    pub total: usize,
    pub success: bool,
    pub results: &'a [TestResult],
}

impl<'a> JsonReport<'a> {
    pub fn new(subject: &'a str, results: &'a [TestResult], tally: &Tally) -> Self {
        Self {
            generated_at: Utc::now(),
            subject,
            passed: tally.passed,
            total: tally.seen,
            success: tally.all_passed(),
            results,
        }
    }
}

pub fn generate_json_report(report: &JsonReport<'_>, output_path: &Path) -> Result<()> {
    let body = serde_json::to_string_pretty(report).context("Failed to serialize JSON report")?;
    fs::write(output_path, body)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))
}
