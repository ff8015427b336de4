// 更新检查相关命令
//
// 只检查和通知，安装由外部分发渠道负责

use tauri::State;

use ::fundingbox_meetings::{ShellState, UpdateInfo, UpdateStatus};

/// 检查应用更新
#[tauri::command]
pub async fn check_for_app_updates(state: State<'_, ShellState>) -> Result<UpdateInfo, String> {
    state
        .update_service
        .check_for_updates()
        .await
        .map_err(|e| format!("Failed to check for updates: {e}"))
}

/// 获取更新检查状态
#[tauri::command]
pub async fn get_app_update_status(state: State<'_, ShellState>) -> Result<UpdateStatus, String> {
    Ok(state.update_service.status().await)
}

/// 获取当前应用版本
#[tauri::command]
pub fn get_current_app_version(state: State<'_, ShellState>) -> String {
    state.update_service.current_version().to_string()
}
