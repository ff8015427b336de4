// 窗口与外部链接相关命令

use tauri::AppHandle;

use ::fundingbox_meetings::controller::deep_link;
use ::fundingbox_meetings::ui::window;
use ::fundingbox_meetings::{PopupTarget, RouteTarget, BRANDING};

/// 用系统默认浏览器打开链接（仅 http/https/mailto）
#[tauri::command]
pub fn open_external_url(app: AppHandle, url: String) -> Result<(), String> {
    window::open_in_browser(&app, &url).map_err(|e| e.to_string())
}

/// 页面脚本请求弹窗，按弹窗表决定内部窗口还是系统浏览器
#[tauri::command]
pub async fn open_popup(
    app: AppHandle,
    url: String,
    frame_name: Option<String>,
) -> Result<PopupTarget, String> {
    window::open_popup(&app, &url, frame_name.as_deref()).map_err(|e| e.to_string())
}

/// 切换主窗口置顶
#[tauri::command]
pub fn set_always_on_top(app: AppHandle, enabled: bool) -> Result<(), String> {
    window::set_always_on_top(&app, enabled).map_err(|e| e.to_string())
}

/// 页面收到深度链接后询问去向：同源地址进 iframe，其余交给系统浏览器
#[tauri::command]
pub fn resolve_deep_link(url: String) -> Result<RouteTarget, String> {
    deep_link::resolve_route(&url, BRANDING.url_scheme, BRANDING.default_server_url)
        .ok_or_else(|| format!("Unroutable deep link: {url}"))
}
