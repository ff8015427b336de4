use crate::core::error::{AppError, AppResult};
use crate::models::AppSettings;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".fundingbox-meetings";
const SETTINGS_FILE: &str = "settings.json";
const WINDOW_STATE_FILE: &str = "window-state.json";

/// 应用配置目录 (~/.fundingbox-meetings)，若不存在则创建
pub fn config_dir() -> AppResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow::anyhow!("无法获取用户主目录")))?;
    let config_dir = home_dir.join(CONFIG_DIR_NAME);
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).map_err(|e| AppError::io(&config_dir, e))?;
    }
    Ok(config_dir)
}

/// 设置文件路径
pub fn settings_path() -> AppResult<PathBuf> {
    Ok(config_dir()?.join(SETTINGS_FILE))
}

/// 窗口状态文件路径
pub fn window_state_path() -> AppResult<PathBuf> {
    Ok(config_dir()?.join(WINDOW_STATE_FILE))
}

/// 默认日志目录
pub fn default_log_dir() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("logs"))
}

/// 读取应用设置（文件不存在时返回默认值）
pub fn read_settings() -> AppResult<AppSettings> {
    read_settings_from(&settings_path()?)
}

pub fn read_settings_from(path: &Path) -> AppResult<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let settings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// 修改并写回应用设置，返回修改后的设置
pub fn update_settings(change: impl FnOnce(&mut AppSettings)) -> AppResult<AppSettings> {
    update_settings_at(&settings_path()?, change)
}

pub fn update_settings_at(
    path: &Path,
    change: impl FnOnce(&mut AppSettings),
) -> AppResult<AppSettings> {
    let mut settings = read_settings_from(path)?;
    change(&mut settings);
    write_json(path, &settings)?;
    Ok(settings)
}

/// 写入格式化 JSON，自动创建父目录
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| AppError::io(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(path).map_err(|e| AppError::io(path, e))?;
        let mut perms = metadata.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| AppError::io(path, e))?;
    }

    Ok(())
}
