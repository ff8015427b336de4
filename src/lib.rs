// lib.rs - 桌面外壳的核心逻辑，main.rs 只负责装配 Tauri

pub mod controller; // 窗口生命周期状态机、深度链接、弹窗路由
pub mod core; // 错误、日志、HTTP 客户端
pub mod models;
pub mod services;
pub mod setup;
pub mod ui; // Tauri 窗口、托盘、菜单
pub mod utils;

pub use models::*;

pub use controller::{
    LifecycleEvent, PopupRegistry, PopupRule, PopupTarget, RouteTarget, WindowCommand, WindowId,
    WindowLifecycleController, WindowPhase, DEFAULT_POPUPS,
};
pub use services::{UpdateService, UpdateStatus, WindowStateStore};

// 重新导出常用类型
pub use anyhow::{Context, Result};

pub use self::core::{init_logger, update_log_level, AppError, AppResult};

pub use setup::{initialize_app, setup_shell};
pub use ui::{dispatch, emit_single_instance, ShellState, SingleInstancePayload, MAIN_WINDOW_LABEL};
