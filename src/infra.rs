//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the harness,
//! namely process execution and i18n support.
//!
//! 此模块为测试工具提供基础设施服务，
//! 即进程执行和国际化支持。

pub mod command;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
