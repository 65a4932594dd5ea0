//! # Commands Module / 命令模块
//!
//! Entry points invoked by the command-line interface.
//!
//! 命令行接口调用的入口点。

pub mod run;
