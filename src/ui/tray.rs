use crate::controller::LifecycleEvent;
use crate::models::BRANDING;
use std::time::Duration;
use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Runtime,
};

use super::shell::dispatch;
use super::updates::spawn_update_check;

/// 创建系统托盘菜单
pub fn create_tray_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let show_item = MenuItem::with_id(app, "show", "Show window", true, None::<&str>)?;
    let check_update_item =
        MenuItem::with_id(app, "check_update", "Check for updates", true, None::<&str>)?;
    let quit_item = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;

    Menu::with_items(
        app,
        &[
            &show_item,
            &PredefinedMenuItem::separator(app)?,
            &check_update_item,
            &PredefinedMenuItem::separator(app)?,
            &quit_item,
        ],
    )
}

/// 退出应用：先通知状态机，关闭请求不再被拦截
pub fn quit_app<R: Runtime>(app: &AppHandle<R>) {
    tracing::info!("从托盘退出应用");
    dispatch(app, LifecycleEvent::QuitRequested);
    app.exit(0);
}

/// 设置系统托盘（包含事件处理）
pub fn setup_system_tray<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<()> {
    let tray_menu = create_tray_menu(app)?;

    let mut builder = TrayIconBuilder::new()
        .tooltip(BRANDING.app_name)
        .menu(&tray_menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| {
            tracing::debug!(event_id = ?event.id, "托盘菜单事件");
            match event.id.as_ref() {
                "show" => {
                    dispatch(app, LifecycleEvent::Activated);
                }
                "check_update" => {
                    tracing::info!("从托盘请求检查更新");
                    spawn_update_check(app.clone(), Duration::ZERO, true);
                }
                "quit" => quit_app(app),
                _ => {}
            }
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                tracing::debug!("托盘图标左键点击");
                dispatch(tray.app_handle(), LifecycleEvent::Activated);
            }
        });

    match app.default_window_icon() {
        Some(icon) => builder = builder.icon(icon.clone()),
        None => tracing::warn!("未找到默认图标，托盘将不显示图标"),
    }

    builder.build(app)?;
    Ok(())
}
