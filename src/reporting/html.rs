//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders a standalone HTML page with the run totals and one
//! table row per executed case. Failed rows carry their diagnostics.
//!
//! 此模块生成一个独立的 HTML 页面，包含运行总计以及每个已执行用例的一行。
//! 失败的行附带其诊断信息。

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::models::{Tally, TestResult};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #222; }
h1 { font-weight: 600; }
.summary-container { display: flex; gap: 2em; margin-bottom: 1.5em; }
.summary-item { display: flex; flex-direction: column; align-items: center; }
.count { font-size: 2em; font-weight: 700; }
.passed-text { color: #2e7d32; }
.failed-text { color: #c62828; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.4em 0.6em; text-align: left; vertical-align: top; }
.status-cell { font-weight: 600; }
.status-Passed { color: #2e7d32; }
.status-Failed { color: #c62828; }
.status-Timeout { color: #ef6c00; }
.duration-cell { text-align: right; white-space: nowrap; }
pre.output-content { margin: 0; white-space: pre-wrap; font-size: 0.9em; }
"#;

/// Builds the report markup.
///
/// 构建报告的标记。
pub fn render_html_report(results: &[TestResult], tally: &Tally) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title")) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header")) }
                div class="summary-container" {
                    div class="summary-item" {
                        span class="count" { (tally.seen) }
                        span class="label" { (t!("html_report.summary.total")) }
                    }
                    div class="summary-item" {
                        span class="count passed-text" { (tally.passed) }
                        span class="label" { (t!("html_report.summary.passed")) }
                    }
                    div class="summary-item" {
                        span class="count failed-text" { (tally.failed()) }
                        span class="label" { (t!("html_report.summary.failed")) }
                    }
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.name")) }
                            th { (t!("html_report.table.arguments")) }
                            th { (t!("html_report.table.status")) }
                            th class="duration-cell" { (t!("html_report.table.duration")) }
                            th { (t!("html_report.table.details")) }
                        }
                    }
                    tbody {
                        @for result in results {
                            tr {
                                td { (result.case_name()) }
                                td { code { (result.case().args.join(" ")) } }
                                td {
                                    div class={ "status-cell " (result.status_class()) } {
                                        (result.verdict())
                                    }
                                }
                                td class="duration-cell" {
                                    (format!("{:.2}s", result.duration().as_secs_f64()))
                                }
                                td {
                                    @let diagnostics = result.diagnostics();
                                    @if !diagnostics.is_empty() {
                                        pre class="output-content" { (diagnostics.join("\n")) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Generates the HTML report and writes it to `output_path`.
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
///
/// 如果无法写入文件，则返回错误。
pub fn generate_html_report(results: &[TestResult], tally: &Tally, output_path: &Path) -> Result<()> {
    let page = render_html_report(results, tally);
    fs::write(output_path, page.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}
