//! # Reporting Module / 报告模块
//!
//! This module handles the display of the run on the console and the optional
//! HTML and JSON reports.
//!
//! 此模块处理运行过程在控制台上的显示，以及可选的 HTML 和 JSON 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::print_summary;
pub use html::generate_html_report;
pub use json::generate_json_report;
