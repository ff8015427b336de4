// 日志相关命令

use ::fundingbox_meetings::utils::config::update_settings;
use ::fundingbox_meetings::{update_log_level, LogLevel};

/// 运行时调整日志级别，并写回设置文件供下次启动使用
#[tauri::command]
pub fn set_log_level(level: String) -> Result<(), String> {
    let level = LogLevel::parse(&level).ok_or_else(|| format!("Unknown log level: {level}"))?;
    update_log_level(level).map_err(|e| e.to_string())?;
    update_settings(|settings| settings.log_config.level = level)
        .map(|_| ())
        .map_err(|e| format!("Failed to save log level: {e}"))
}
