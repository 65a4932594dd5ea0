//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the harness,
//! including data models, the fixture reader, configuration, and case execution.
//!
//! 此模块包含测试工具的核心功能，
//! 包括数据模型、fixture 读取、配置和用例执行。

pub mod config;
pub mod execution;
pub mod fixture;
pub mod models;

// Re-exports
pub use config::HarnessConfig;
pub use execution::run_test_case;
pub use fixture::{FixtureError, FixtureReader};
pub use models::{TestCase, TestResult};
