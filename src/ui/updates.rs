use crate::models::{UpdateInfo, BRANDING};
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager, Runtime};
use tauri_plugin_notification::NotificationExt;

use super::events::{UPDATE_AVAILABLE_EVENT, UPDATE_NOT_FOUND_EVENT};
use super::shell::ShellState;

/// 后台检查更新；失败只记录日志
///
/// `report_up_to_date` 为 true 时（托盘手动检查）没有更新也会通知页面。
pub fn spawn_update_check<R: Runtime>(app: AppHandle<R>, delay: Duration, report_up_to_date: bool) {
    tauri::async_runtime::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let Some(service) = app
            .try_state::<ShellState>()
            .map(|state| state.update_service.clone())
        else {
            return;
        };

        match service.check_for_updates().await {
            Ok(info) if info.has_update => notify_update_available(&app, &info),
            Ok(info) => {
                if report_up_to_date {
                    if let Err(e) = app.emit(UPDATE_NOT_FOUND_EVENT, &info) {
                        tracing::warn!(error = ?e, "发送 update-not-found 事件失败");
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "检查更新失败"),
        }
    });
}

fn notify_update_available<R: Runtime>(app: &AppHandle<R>, info: &UpdateInfo) {
    tracing::info!(latest = %info.latest_version, "发现新版本");

    if let Err(e) = app.emit(UPDATE_AVAILABLE_EVENT, info) {
        tracing::warn!(error = ?e, "发送 update-available 事件失败");
    }

    let body = format!(
        "Version {} is available (you have {}).",
        info.latest_version, info.current_version
    );
    if let Err(e) = app
        .notification()
        .builder()
        .title(BRANDING.app_name)
        .body(body)
        .show()
    {
        tracing::warn!(error = ?e, "显示更新通知失败");
    }
}
