// 事件分发与托管状态
pub mod shell;

// 主窗口与弹窗
pub mod window;

// 托盘与应用菜单
pub mod menu;
pub mod tray;

// 前端事件
pub mod events;

// 后台更新检查
pub mod updates;

pub use events::{emit_single_instance, SingleInstancePayload};
pub use shell::{dispatch, ShellState};
pub use window::MAIN_WINDOW_LABEL;
