//! # Configuration Module / 配置模块
//!
//! Loads `harness.toml` and merges it with command-line overrides.
//!
//! 加载 `harness.toml` 并与命令行覆盖项合并。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::t;

/// The configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "harness.toml";

/// Harness settings as written in the TOML file. Every key is optional.
///
/// TOML 文件中的测试工具设置。所有键都是可选的。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// The language for the harness output messages (e.g., "en", "zh-CN").
    /// 测试工具输出消息的语言（例如 "en", "zh-CN"）。
    pub language: String,

    /// Path of the fixture file, relative to the current directory.
    /// fixture 文件的路径，相对于当前目录。
    pub fixture: PathBuf,

    /// Command line of the program under test; case arguments are appended.
    /// 被测程序的命令行；用例参数会追加在其后。
    pub subject: String,

    /// Working directory for every subject invocation.
    /// 每次调用被测程序时的工作目录。
    pub working_dir: Option<PathBuf>,

    /// Per-case time limit in seconds. `0` disables the limit.
    /// 每个用例的时间限制（秒）。`0` 表示不限制。
    pub timeout_secs: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            fixture: PathBuf::from("test-cases.txt"),
            subject: "java -jar ../target/verify_jar.jar".to_string(),
            working_dir: None,
            timeout_secs: 120,
        }
    }
}

impl HarnessConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Applies the values given on the command line on top of the file.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(fixture) = overrides.fixture {
            self.fixture = fixture;
        }
        if let Some(subject) = overrides.subject {
            self.subject = subject;
        }
        if let Some(dir) = overrides.working_dir {
            self.working_dir = Some(dir);
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }
}

/// Command-line values that take precedence over the configuration file.
/// 优先于配置文件的命令行值。
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub fixture: Option<PathBuf>,
    pub subject: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Parses a configuration file.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
    toml::from_str(&content)
        .with_context(|| t!("config.parse_failed", path = path.display()).to_string())
}

/// Resolves the configuration to use.
///
/// An explicitly named file must exist. Without one, `harness.toml` in the
/// current directory is used when present and the built-in defaults otherwise.
///
/// 解析要使用的配置。显式指定的文件必须存在；否则，如果当前目录中存在
/// `harness.toml` 则使用它，不存在时使用内置默认值。
pub fn resolve_config(explicit: Option<&Path>) -> Result<HarnessConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config(default_path)
            } else {
                Ok(HarnessConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: HarnessConfig = toml::from_str("").unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn zero_timeout_disables_the_limit() {
        let config: HarnessConfig = toml::from_str("timeout_secs = 0").unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<HarnessConfig>("retries = 3").is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config: HarnessConfig = toml::from_str(
            r#"
            subject = "java -jar verify.jar"
            fixture = "cases.txt"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        let merged = config.apply(Overrides {
            subject: Some("./verify".to_string()),
            timeout_secs: Some(30),
            ..Overrides::default()
        });

        assert_eq!(merged.subject, "./verify");
        assert_eq!(merged.fixture, PathBuf::from("cases.txt"));
        assert_eq!(merged.timeout_secs, 30);
        assert_eq!(merged.language, "en");
    }
}
