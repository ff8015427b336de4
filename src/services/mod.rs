// 服务层模块
//
// - update: 应用更新检查
// - window_state: 主窗口几何信息持久化

pub mod update;
pub mod window_state;

pub use update::*;
pub use window_state::WindowStateStore;
