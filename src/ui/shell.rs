//! 生命周期事件分发
//!
//! 宿主回调统一通过 [`dispatch`] 进入状态机。状态机的锁只在计算命令时持有，
//! 执行命令前已释放，命令触发的窗口事件可以安全地再次进入 `dispatch`。

use crate::controller::{LifecycleEvent, WindowCommand, WindowLifecycleController, WindowPhase};
use crate::models::AppSettings;
use crate::services::{UpdateService, WindowStateStore};
use std::sync::Mutex;
use std::time::Duration;
use tauri::{AppHandle, Manager, Runtime};

use super::{updates, window};

/// 启动后延迟检查更新，避免影响启动速度
const STARTUP_UPDATE_DELAY: Duration = Duration::from_secs(1);

/// Tauri 托管状态
pub struct ShellState {
    controller: Mutex<WindowLifecycleController>,
    pub settings: AppSettings,
    pub window_state: WindowStateStore,
    pub update_service: UpdateService,
}

impl ShellState {
    pub fn new(settings: AppSettings, window_state: WindowStateStore) -> Self {
        let update_service = UpdateService::new(settings.effective_update_feed_url());
        Self {
            controller: Mutex::new(WindowLifecycleController::new()),
            settings,
            window_state,
            update_service,
        }
    }

    /// 把事件交给状态机，返回需要执行的命令
    pub fn handle_event(&self, event: LifecycleEvent) -> Vec<WindowCommand> {
        let mut controller = self
            .controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        controller.handle(event)
    }

    pub fn phase(&self) -> WindowPhase {
        self.controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .phase()
    }

    pub fn is_quitting(&self) -> bool {
        self.controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_quitting()
    }
}

/// 分发一个生命周期事件并执行状态机返回的命令
///
/// 返回已处理的命令列表；`CancelClose` 需要调用方自己处理（只有关闭回调持有关闭 API）。
pub fn dispatch<R: Runtime>(app: &AppHandle<R>, event: LifecycleEvent) -> Vec<WindowCommand> {
    let Some(state) = app.try_state::<ShellState>() else {
        tracing::warn!(event = ?event, "ShellState 未注册，忽略生命周期事件");
        return Vec::new();
    };

    tracing::trace!(event = ?event, "生命周期事件");
    let commands = state.handle_event(event);

    for command in &commands {
        execute(app, &state, command);
    }

    commands
}

fn execute<R: Runtime>(app: &AppHandle<R>, state: &ShellState, command: &WindowCommand) {
    match command {
        WindowCommand::CreateWindow => {
            let geometry = state.window_state.load();
            if let Err(e) = window::create_main_window(app, geometry) {
                tracing::error!(error = ?e, "创建主窗口失败");
                dispatch(app, LifecycleEvent::WindowDestroyed);
            }
        }
        WindowCommand::CheckForUpdates => {
            if state.settings.check_updates_on_start {
                updates::spawn_update_check(app.clone(), STARTUP_UPDATE_DELAY, false);
            } else {
                tracing::debug!("已关闭启动时检查更新");
            }
        }
        WindowCommand::Show => window::show_main_window(app),
        WindowCommand::Focus => window::focus_main_window(app),
        WindowCommand::Hide => window::hide_main_window(app),
        // 由关闭回调调用 prevent_close
        WindowCommand::CancelClose => {}
        WindowCommand::DeliverDeepLink(url) => window::deliver_deep_link(app, url),
    }
}
