pub mod config_commands;
pub mod log_commands;
pub mod update_commands;
pub mod window_commands;

// 重新导出所有命令函数
pub use config_commands::*;
pub use log_commands::*;
pub use update_commands::*;
pub use window_commands::*;
