// 应用设置结构，放在 models 以便在库和二进制之间共享
use serde::{Deserialize, Serialize};

/// 默认更新源地址
pub const DEFAULT_UPDATE_FEED_URL: &str = "https://meetings.fundingbox.com/desktop/latest.json";

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// 解析字符串为日志级别（不区分大小写）
    pub fn parse(level: &str) -> Option<Self> {
        match level.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 日志输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Console,
    File,
    #[default]
    Both,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub output: LogOutput,
    /// 日志目录，None 时使用配置目录下的 logs
    #[serde(default)]
    pub file_path: Option<String>,
}

/// 应用设置（settings.json）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub log_config: LogConfig,
    #[serde(default)]
    pub update_feed_url: Option<String>,
    #[serde(default = "default_check_updates_on_start")]
    pub check_updates_on_start: bool,
}

fn default_check_updates_on_start() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_config: LogConfig::default(),
            update_feed_url: None,
            check_updates_on_start: default_check_updates_on_start(),
        }
    }
}

impl AppSettings {
    /// 实际使用的更新源地址
    pub fn effective_update_feed_url(&self) -> &str {
        self.update_feed_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_UPDATE_FEED_URL)
    }
}
