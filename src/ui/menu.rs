use tauri::{AppHandle, Runtime};

/// 设置应用菜单
///
/// 仅 macOS 需要：没有 Edit 菜单时复制粘贴快捷键不可用。其他平台不显示菜单。
#[cfg(target_os = "macos")]
pub fn setup_app_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<()> {
    use crate::models::BRANDING;
    use tauri::menu::{Menu, PredefinedMenuItem, Submenu};

    let app_menu = Submenu::with_items(
        app,
        BRANDING.app_name,
        true,
        &[&PredefinedMenuItem::quit(app, Some("Quit"))?],
    )?;

    let edit_menu = Submenu::with_items(
        app,
        "Edit",
        true,
        &[
            &PredefinedMenuItem::undo(app, Some("Undo"))?,
            &PredefinedMenuItem::redo(app, Some("Redo"))?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::cut(app, Some("Cut"))?,
            &PredefinedMenuItem::copy(app, Some("Copy"))?,
            &PredefinedMenuItem::paste(app, Some("Paste"))?,
            &PredefinedMenuItem::select_all(app, Some("Select All"))?,
        ],
    )?;

    let menu = Menu::with_items(app, &[&app_menu, &edit_menu])?;
    app.set_menu(menu)?;
    Ok(())
}

#[cfg(not(target_os = "macos"))]
pub fn setup_app_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<()> {
    app.remove_menu()?;
    Ok(())
}
