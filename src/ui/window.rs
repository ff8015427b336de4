use crate::controller::{deep_link, popup, LifecycleEvent, PopupTarget, WindowCommand, DEFAULT_POPUPS};
use crate::core::error::{AppError, AppResult};
use crate::models::{DisplayBounds, WindowGeometry, BRANDING};
use std::sync::atomic::{AtomicU64, Ordering};
use tauri::webview::NewWindowResponse;
use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, Runtime, Url, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder, WindowEvent,
};
use tauri_plugin_opener::OpenerExt;

use super::shell::{dispatch, ShellState};

pub const MAIN_WINDOW_LABEL: &str = "main";

/// 打包的入口页面（内部以 iframe 加载会议服务）
const ENTRY_PAGE: &str = "index.html";

const MIN_WIDTH: f64 = 800.0;
const MIN_HEIGHT: f64 = 600.0;

static POPUP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// 创建主窗口（隐藏状态，页面就绪后由状态机显示）
pub fn create_main_window<R: Runtime>(
    app: &AppHandle<R>,
    geometry: WindowGeometry,
) -> tauri::Result<WebviewWindow<R>> {
    let geometry = geometry.placed_on(&available_displays(app));
    tracing::info!(
        width = geometry.width,
        height = geometry.height,
        position = ?geometry.position(),
        "创建主窗口"
    );

    let popup_app = app.clone();
    let mut builder =
        WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::App(ENTRY_PAGE.into()))
            .title(BRANDING.app_name)
            .inner_size(geometry.width, geometry.height)
            .min_inner_size(MIN_WIDTH, MIN_HEIGHT)
            .visible(false)
            .on_new_window(move |url, _features| route_new_window(&popup_app, url));

    builder = match geometry.position() {
        Some((x, y)) => builder.position(x as f64, y as f64),
        None => builder.center(),
    };

    let window = builder.build()?;

    if geometry.maximized {
        if let Err(e) = window.maximize() {
            tracing::warn!(error = ?e, "恢复最大化状态失败");
        }
    }

    attach_window_events(&window);
    Ok(window)
}

/// 当前可用显示器（逻辑坐标）；读取失败时返回空列表
fn available_displays<R: Runtime>(app: &AppHandle<R>) -> Vec<DisplayBounds> {
    match app.available_monitors() {
        Ok(monitors) => monitors
            .iter()
            .map(|monitor| {
                let scale_factor = monitor.scale_factor();
                let position: LogicalPosition<f64> = monitor.position().to_logical(scale_factor);
                let size: LogicalSize<f64> = monitor.size().to_logical(scale_factor);
                DisplayBounds {
                    x: position.x,
                    y: position.y,
                    width: size.width,
                    height: size.height,
                }
            })
            .collect(),
        Err(e) => {
            tracing::warn!(error = ?e, "读取显示器列表失败");
            Vec::new()
        }
    }
}

/// 主窗口事件：关闭请求交给状态机，销毁释放句柄，移动/缩放保存几何信息
fn attach_window_events<R: Runtime>(window: &WebviewWindow<R>) {
    let window_clone = window.clone();

    window.on_window_event(move |event| match event {
        WindowEvent::CloseRequested { api, .. } => {
            let commands = dispatch(window_clone.app_handle(), LifecycleEvent::CloseRequested);
            if commands.contains(&WindowCommand::CancelClose) {
                api.prevent_close();
            }
        }
        WindowEvent::Destroyed => {
            dispatch(window_clone.app_handle(), LifecycleEvent::WindowDestroyed);
        }
        WindowEvent::Resized(_) | WindowEvent::Moved(_) => save_geometry(&window_clone),
        _ => {}
    });
}

/// 读取当前窗口几何信息并写入状态文件
fn save_geometry<R: Runtime>(window: &WebviewWindow<R>) {
    if window.is_minimized().unwrap_or(false) {
        return;
    }

    let Some(state) = window.app_handle().try_state::<ShellState>() else {
        return;
    };

    let geometry = if window.is_maximized().unwrap_or(false) {
        // 最大化时保留之前的普通尺寸
        WindowGeometry {
            maximized: true,
            ..state.window_state.load()
        }
    } else {
        match current_geometry(window) {
            Ok(geometry) => geometry,
            Err(e) => {
                tracing::debug!(error = ?e, "读取窗口几何信息失败");
                return;
            }
        }
    };

    if let Err(e) = state.window_state.save(&geometry) {
        tracing::warn!(error = %e, "保存窗口状态失败");
    }
}

fn current_geometry<R: Runtime>(window: &WebviewWindow<R>) -> tauri::Result<WindowGeometry> {
    let scale_factor = window.scale_factor()?;
    let size: LogicalSize<f64> = window.inner_size()?.to_logical(scale_factor);
    let position: LogicalPosition<i32> = window.outer_position()?.to_logical(scale_factor);

    Ok(WindowGeometry {
        width: size.width,
        height: size.height,
        x: Some(position.x),
        y: Some(position.y),
        maximized: false,
    })
}

fn main_window<R: Runtime>(app: &AppHandle<R>) -> Option<WebviewWindow<R>> {
    let window = app.get_webview_window(MAIN_WINDOW_LABEL);
    if window.is_none() {
        tracing::warn!("未找到主窗口");
    }
    window
}

pub fn show_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = main_window(app) {
        if let Err(e) = window.show() {
            tracing::error!(error = ?e, "显示窗口失败");
        }
    }
}

/// 取消最小化并聚焦主窗口
pub fn focus_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = main_window(app) {
        tracing::debug!(
            is_visible = ?window.is_visible(),
            is_minimized = ?window.is_minimized(),
            "聚焦主窗口"
        );
        if let Err(e) = window.unminimize() {
            tracing::error!(error = ?e, "取消最小化窗口失败");
        }
        if let Err(e) = window.set_focus() {
            tracing::error!(error = ?e, "设置窗口焦点失败");
        }
    }
}

pub fn hide_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = main_window(app) {
        tracing::info!("隐藏主窗口");
        if let Err(e) = window.hide() {
            tracing::error!(error = ?e, "隐藏窗口失败");
        }
    }
}

/// 在页面中调用路由入口
pub fn deliver_deep_link<R: Runtime>(app: &AppHandle<R>, url: &str) {
    if let Some(window) = main_window(app) {
        if let Err(e) = window.eval(&deep_link::route_script(url)) {
            tracing::error!(error = ?e, url = %url, "投递深度链接失败");
        }
    }
}

pub fn set_always_on_top<R: Runtime>(app: &AppHandle<R>, enabled: bool) -> AppResult<()> {
    let window = app
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or(AppError::WindowNotFound)?;
    window.set_always_on_top(enabled)?;
    tracing::info!(enabled, "置顶状态已更新");
    Ok(())
}

/// 页面请求新窗口：内部弹窗放行，其余交给系统浏览器
fn route_new_window<R: Runtime>(app: &AppHandle<R>, url: Url) -> NewWindowResponse<R> {
    match DEFAULT_POPUPS.classify(url.as_str(), None) {
        PopupTarget::Internal => {
            tracing::info!(url = %url, "允许打开内部弹窗");
            NewWindowResponse::Allow
        }
        PopupTarget::Browser => {
            if let Err(e) = open_in_browser(app, url.as_str()) {
                tracing::warn!(error = %e, "交给系统浏览器失败");
            }
            NewWindowResponse::Deny
        }
    }
}

/// 页面脚本主动请求弹窗（带窗口名）
pub fn open_popup<R: Runtime>(
    app: &AppHandle<R>,
    url: &str,
    frame_name: Option<&str>,
) -> AppResult<PopupTarget> {
    let target = DEFAULT_POPUPS.classify(url, frame_name);
    match target {
        PopupTarget::Internal => open_internal_popup(app, url)?,
        PopupTarget::Browser => open_in_browser(app, url)?,
    }
    Ok(target)
}

fn open_internal_popup<R: Runtime>(app: &AppHandle<R>, url: &str) -> AppResult<()> {
    let parsed = Url::parse(url).map_err(|_| AppError::InvalidUrl(url.to_string()))?;
    let label = format!("popup-{}", POPUP_COUNTER.fetch_add(1, Ordering::Relaxed));

    tracing::info!(label = %label, url = %url, "打开内部弹窗");
    WebviewWindowBuilder::new(app, &label, WebviewUrl::External(parsed))
        .title(BRANDING.app_name)
        .inner_size(MIN_WIDTH, MIN_HEIGHT)
        .center()
        .build()?;
    Ok(())
}

/// 使用系统默认程序打开 http/https/mailto 链接
pub fn open_in_browser<R: Runtime>(app: &AppHandle<R>, url: &str) -> AppResult<()> {
    if !popup::is_externally_openable(url) {
        tracing::warn!(url = %url, "拒绝打开不支持的链接");
        return Err(AppError::InvalidUrl(url.to_string()));
    }

    tracing::info!(url = %url, "使用系统浏览器打开链接");
    app.opener()
        .open_url(url, None::<String>)
        .map_err(|e| AppError::Other(anyhow::anyhow!("打开外部链接失败: {e}")))
}
