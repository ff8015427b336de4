//! 主窗口位置/尺寸持久化
//!
//! 启动时读取（失败则回退到默认 800×600），窗口移动或缩放时写回。

use crate::core::error::{AppError, AppResult};
use crate::models::WindowGeometry;
use crate::utils::config::{window_state_path, write_json};
use std::fs;
use std::path::PathBuf;

pub struct WindowStateStore {
    path: PathBuf,
}

impl WindowStateStore {
    /// 使用配置目录下的 window-state.json
    pub fn new() -> AppResult<Self> {
        Ok(Self::with_path(window_state_path()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取几何信息；文件缺失或损坏时返回默认值
    pub fn load(&self) -> WindowGeometry {
        match self.try_load() {
            Ok(Some(geometry)) => geometry.sanitized(),
            Ok(None) => {
                tracing::debug!(path = ?self.path, "未找到窗口状态文件，使用默认尺寸");
                WindowGeometry::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "读取窗口状态失败，使用默认尺寸");
                WindowGeometry::default()
            }
        }
    }

    fn try_load(&self) -> AppResult<Option<WindowGeometry>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, geometry: &WindowGeometry) -> AppResult<()> {
        write_json(&self.path, geometry)?;
        tracing::trace!(
            width = geometry.width,
            height = geometry.height,
            x = ?geometry.x,
            y = ?geometry.y,
            maximized = geometry.maximized,
            "窗口状态已保存"
        );
        Ok(())
    }
}
