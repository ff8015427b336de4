// 窗口生命周期状态机
pub mod lifecycle;

// 深度链接解析
pub mod deep_link;

// 弹窗分类
pub mod popup;

pub use lifecycle::{
    LifecycleEvent, WindowCommand, WindowId, WindowLifecycleController, WindowPhase,
};
pub use deep_link::RouteTarget;
pub use popup::{PopupRegistry, PopupRule, PopupTarget, DEFAULT_POPUPS};
