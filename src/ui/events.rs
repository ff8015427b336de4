use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime};

pub const SINGLE_INSTANCE_EVENT: &str = "single-instance";
pub const UPDATE_AVAILABLE_EVENT: &str = "update-available";
pub const UPDATE_NOT_FOUND_EVENT: &str = "update-not-found";

#[derive(Debug, Clone, Serialize)]
pub struct SingleInstancePayload {
    pub args: Vec<String>,
    pub cwd: String,
}

/// 把第二个实例的启动参数转发给页面
pub fn emit_single_instance<R: Runtime>(app: &AppHandle<R>, payload: SingleInstancePayload) {
    if let Err(e) = app.emit(SINGLE_INSTANCE_EVENT, payload) {
        tracing::warn!(error = ?e, "发送 single-instance 事件失败");
    }
}
