// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use fundingbox_meetings::{
    dispatch, emit_single_instance, initialize_app, setup_shell, LifecycleEvent,
    SingleInstancePayload, MAIN_WINDOW_LABEL,
};
use tauri::webview::PageLoadEvent;
use tauri::{Manager, RunEvent};

// 导入 commands 模块
mod commands;
use commands::*;

fn main() {
    // 日志、设置、窗口状态在 Tauri 启动前准备好
    let state = initialize_app();
    let launch_args: Vec<String> = std::env::args().collect();

    let builder = tauri::Builder::default()
        // 单实例插件必须最先注册：第二个进程在这里直接退出
        .plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
            tracing::info!(args = ?argv, cwd = %cwd, "检测到第二个实例");

            emit_single_instance(
                app,
                SingleInstancePayload {
                    args: argv.clone(),
                    cwd,
                },
            );
            dispatch(app, LifecycleEvent::SecondInstance { args: argv });
        }))
        .plugin(tauri_plugin_deep_link::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_notification::init())
        .manage(state)
        .on_page_load(|webview, payload| {
            if webview.label() != MAIN_WINDOW_LABEL {
                return;
            }
            let event = match payload.event() {
                PageLoadEvent::Started => LifecycleEvent::PageLoading,
                PageLoadEvent::Finished => LifecycleEvent::PageReady,
            };
            tracing::debug!(url = %payload.url(), event = ?event, "主窗口页面加载事件");
            dispatch(webview.app_handle(), event);
        })
        .setup(move |app| {
            setup_shell(app, &launch_args)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // 品牌与应用信息
            get_branding_config,
            get_app_info,
            // 窗口与外部链接
            open_external_url,
            open_popup,
            resolve_deep_link,
            set_always_on_top,
            // 更新检查
            check_for_app_updates,
            get_app_update_status,
            get_current_app_version,
            // 日志
            set_log_level,
        ]);

    // 使用自定义事件循环处理 macOS Reopen 与退出事件
    builder
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                tracing::debug!("macOS Reopen 事件");
                dispatch(app_handle, LifecycleEvent::Activated);
            }
            RunEvent::ExitRequested { code, .. } => {
                tracing::info!(code = ?code, "收到退出请求");
                dispatch(app_handle, LifecycleEvent::QuitRequested);
            }
            _ => {}
        });
}
