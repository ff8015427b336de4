//! 统一错误类型定义
//!
//! 使用 `thiserror` 定义应用层错误，Tauri 命令边界再转换为 `String`。

use std::path::PathBuf;
use thiserror::Error;

/// 应用统一错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 文件 I/O 错误
    #[error("文件 I/O 错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化/反序列化错误
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// Tauri 运行时错误
    #[error("Tauri 错误: {0}")]
    Tauri(#[from] tauri::Error),

    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 版本号解析错误
    #[error("版本号无效: {0}")]
    Version(#[from] semver::Error),

    /// 更新源返回了无法使用的数据
    #[error("更新检查失败: {reason}")]
    UpdateFeed { reason: String },

    /// URL 无效或不允许打开
    #[error("URL 无效: {0}")]
    InvalidUrl(String),

    /// 主窗口不存在
    #[error("主窗口不存在")]
    WindowNotFound,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// 从 `std::io::Error` 和路径创建 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
