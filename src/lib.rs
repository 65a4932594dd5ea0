//! # Fixture Harness Library / Fixture Harness 库
//!
//! This library provides the core functionality for the fixture harness,
//! a test runner that invokes an external program once per fixture case and
//! checks its exit status, stdout and stderr.
//!
//! 此库为 fixture harness 工具提供核心功能，
//! 这是一个为每个 fixture 用例调用一次外部程序，并检查其退出状态、stdout 和 stderr 的测试运行器。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, fixture reader, configuration and case execution
//! - `infra` - Infrastructure services like process execution and i18n
//! - `reporting` - Console output plus HTML and JSON reports
//! - `cli` - Command-line interface
//! - `commands` - The run loop invoked by the CLI
//!
//! - `core` - 数据模型、fixture 读取、配置和用例执行
//! - `infra` - 基础设施服务，如进程执行和国际化
//! - `reporting` - 控制台输出以及 HTML 和 JSON 报告
//! - `cli` - 命令行接口
//! - `commands` - 由 CLI 调用的运行循环

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::fixture;
pub use crate::core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
