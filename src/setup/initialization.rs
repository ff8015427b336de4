use crate::controller::LifecycleEvent;
use crate::core::init_logger;
use crate::models::{AppSettings, BRANDING};
use crate::services::WindowStateStore;
use crate::ui::{dispatch, menu, tray, ShellState};
use crate::utils::config::read_settings;
use tauri::{App, AppHandle, Runtime};
use tauri_plugin_deep_link::DeepLinkExt;

/// 读取设置失败时使用默认设置（此时日志系统尚不可用）
fn load_settings() -> AppSettings {
    match read_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("WARNING: Failed to read settings, using defaults: {e}");
            AppSettings::default()
        }
    }
}

/// 初始化日志系统，失败时继续运行
fn init_logging(settings: &AppSettings) {
    if let Err(e) = init_logger(&settings.log_config) {
        eprintln!("WARNING: Failed to initialize logging system: {e}");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "{} 启动", BRANDING.app_name);
}

fn window_state_store() -> WindowStateStore {
    WindowStateStore::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "无法定位配置目录，窗口状态写入临时目录");
        WindowStateStore::with_path(
            std::env::temp_dir()
                .join("fundingbox-meetings")
                .join("window-state.json"),
        )
    })
}

/// 执行 Tauri 启动前的初始化：设置 → 日志 → 窗口状态
pub fn initialize_app() -> ShellState {
    let settings = load_settings();
    init_logging(&settings);
    let window_state = window_state_store();
    ShellState::new(settings, window_state)
}

/// 注册自定义 URL scheme（Windows/Linux 运行时注册，macOS 由打包信息声明）
fn register_url_scheme<R: Runtime>(app: &AppHandle<R>) {
    #[cfg(any(windows, target_os = "linux"))]
    {
        match app.deep_link().is_registered(BRANDING.url_scheme) {
            Ok(true) => tracing::debug!(scheme = BRANDING.url_scheme, "URL scheme 已注册"),
            Ok(false) => match app.deep_link().register(BRANDING.url_scheme) {
                Ok(()) => tracing::info!(scheme = BRANDING.url_scheme, "已注册 URL scheme"),
                Err(e) => tracing::warn!(error = ?e, "注册 URL scheme 失败"),
            },
            Err(e) => tracing::warn!(error = ?e, "查询 URL scheme 注册状态失败"),
        }
    }

    #[cfg(not(any(windows, target_os = "linux")))]
    let _ = app;
}

/// 系统 open-url 事件转为深度链接事件
fn listen_deep_links<R: Runtime>(app: &AppHandle<R>) {
    let handle = app.clone();
    app.deep_link().on_open_url(move |event| {
        for url in event.urls() {
            dispatch(&handle, LifecycleEvent::DeepLinkReceived(url.to_string()));
        }
    });
}

/// 启动时携带的深度链接
fn queue_launch_deep_link<R: Runtime>(app: &AppHandle<R>, launch_args: &[String]) {
    #[cfg(target_os = "macos")]
    {
        let _ = launch_args;
        match app.deep_link().get_current() {
            Ok(Some(urls)) => {
                for url in urls {
                    dispatch(app, LifecycleEvent::DeepLinkReceived(url.to_string()));
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = ?e, "读取启动深度链接失败"),
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(url) = crate::controller::deep_link::from_launch_args(launch_args) {
            tracing::info!(url = %url, "启动参数包含深度链接");
            dispatch(app, LifecycleEvent::DeepLinkReceived(url));
        }
    }
}

/// Tauri setup 阶段：菜单 → 托盘 → URL scheme → 深度链接 → 创建主窗口
pub fn setup_shell<R: Runtime>(app: &App<R>, launch_args: &[String]) -> tauri::Result<()> {
    let handle = app.handle();

    if let Err(e) = menu::setup_app_menu(handle) {
        tracing::warn!(error = ?e, "设置应用菜单失败");
    }
    if let Err(e) = tray::setup_system_tray(handle) {
        tracing::warn!(error = ?e, "创建系统托盘失败");
    }

    register_url_scheme(handle);
    listen_deep_links(handle);
    queue_launch_deep_link(handle, launch_args);

    dispatch(handle, LifecycleEvent::Started);
    Ok(())
}
