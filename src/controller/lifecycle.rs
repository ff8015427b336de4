//! 主窗口生命周期状态机
//!
//! 宿主（Tauri）把每个系统/窗口事件转换为一个 [`LifecycleEvent`]，
//! 状态机返回按顺序执行的 [`WindowCommand`] 列表。状态机本身不接触原生窗口，
//! 也不做任何阻塞操作。
//!
//! 状态：
//! - `NoWindow`：没有窗口
//! - `WindowLoading`：窗口已创建，页面尚未就绪（不可见）
//! - `WindowReady`：窗口可见
//! - `WindowHidden`：用户关闭窗口后被隐藏（窗口仍然存在）

use super::deep_link;

/// 主窗口句柄（每次创建窗口递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPhase {
    #[default]
    NoWindow,
    WindowLoading,
    WindowReady,
    WindowHidden,
}

/// 宿主投递给状态机的事件（每种系统事件对应一个变体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// 应用启动完成
    Started,
    /// 重新激活（点击 Dock / 托盘图标）
    Activated,
    /// 主页面开始加载（首次加载、刷新或跳转）
    PageLoading,
    /// 主页面加载完成
    PageReady,
    /// 用户请求关闭窗口
    CloseRequested,
    /// 应用明确要求退出
    QuitRequested,
    /// 主窗口已销毁
    WindowDestroyed,
    /// 系统投递的深度链接
    DeepLinkReceived(String),
    /// 第二个实例启动时的完整命令行参数
    SecondInstance { args: Vec<String> },
}

/// 状态机要求宿主执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    /// 按持久化的几何信息创建窗口并加载入口页面（创建时保持隐藏）
    CreateWindow,
    /// 通知更新服务检查更新
    CheckForUpdates,
    Show,
    /// 取消最小化并获取焦点
    Focus,
    Hide,
    /// 阻止本次关闭
    CancelClose,
    /// 把 URL 交给页面的路由入口
    DeliverDeepLink(String),
}

#[derive(Debug, Default)]
pub struct WindowLifecycleController {
    phase: WindowPhase,
    window: Option<WindowId>,
    next_window_id: u64,
    page_loaded: bool,
    quitting: bool,
    pending_deep_link: Option<String>,
}

impl WindowLifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    /// 当前窗口句柄（只读）
    pub fn window_id(&self) -> Option<WindowId> {
        self.window
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn pending_deep_link(&self) -> Option<&str> {
        self.pending_deep_link.as_deref()
    }

    /// 处理一个事件并返回需要执行的命令
    pub fn handle(&mut self, event: LifecycleEvent) -> Vec<WindowCommand> {
        let before = self.phase;

        let commands = match event {
            LifecycleEvent::Started => self.on_started(),
            LifecycleEvent::Activated => self.on_activated(),
            LifecycleEvent::PageLoading => {
                // 页面重新就绪前收到的深度链接保存为待处理
                if self.window.is_some() {
                    self.page_loaded = false;
                }
                Vec::new()
            }
            LifecycleEvent::PageReady => self.on_page_ready(),
            LifecycleEvent::CloseRequested => self.on_close_requested(),
            LifecycleEvent::QuitRequested => {
                tracing::info!("应用即将退出");
                self.quitting = true;
                Vec::new()
            }
            LifecycleEvent::WindowDestroyed => self.on_window_destroyed(),
            LifecycleEvent::DeepLinkReceived(url) => match deep_link::normalize(&url) {
                Some(url) => self.route_deep_link(url),
                None => {
                    tracing::debug!("忽略空的深度链接");
                    Vec::new()
                }
            },
            LifecycleEvent::SecondInstance { args } => self.on_second_instance(&args),
        };

        if before != self.phase {
            tracing::debug!(from = ?before, to = ?self.phase, "窗口状态变更");
        }

        commands
    }

    fn on_started(&mut self) -> Vec<WindowCommand> {
        match self.phase {
            WindowPhase::NoWindow if !self.quitting => self.create_window(),
            _ => Vec::new(),
        }
    }

    fn on_activated(&mut self) -> Vec<WindowCommand> {
        match self.phase {
            WindowPhase::NoWindow if self.quitting => Vec::new(),
            WindowPhase::NoWindow => self.create_window(),
            _ => self.reveal(),
        }
    }

    fn on_page_ready(&mut self) -> Vec<WindowCommand> {
        let mut commands = Vec::new();

        match self.phase {
            WindowPhase::NoWindow => {
                tracing::debug!("页面就绪时窗口已不存在，忽略");
                return commands;
            }
            WindowPhase::WindowLoading => {
                self.phase = WindowPhase::WindowReady;
                commands.push(WindowCommand::Show);
            }
            // 页面重新加载
            WindowPhase::WindowReady | WindowPhase::WindowHidden => {}
        }

        self.page_loaded = true;

        if let Some(url) = self.pending_deep_link.take() {
            tracing::info!(url = %url, "投递待处理的深度链接");
            // 加载期间被隐藏的窗口随深度链接一起显示
            let reveal = self.phase == WindowPhase::WindowHidden;
            if reveal {
                self.phase = WindowPhase::WindowReady;
                commands.push(WindowCommand::Show);
            }
            commands.push(WindowCommand::DeliverDeepLink(url));
            if reveal {
                commands.push(WindowCommand::Focus);
            }
        }

        commands
    }

    fn on_close_requested(&mut self) -> Vec<WindowCommand> {
        if self.quitting {
            return Vec::new();
        }

        match self.phase {
            WindowPhase::NoWindow => Vec::new(),
            WindowPhase::WindowLoading | WindowPhase::WindowReady => {
                tracing::info!("拦截窗口关闭，改为隐藏");
                self.phase = WindowPhase::WindowHidden;
                vec![WindowCommand::CancelClose, WindowCommand::Hide]
            }
            WindowPhase::WindowHidden => vec![WindowCommand::CancelClose],
        }
    }

    fn on_window_destroyed(&mut self) -> Vec<WindowCommand> {
        if let Some(id) = self.window.take() {
            if self.quitting {
                tracing::info!(window = id.get(), "主窗口已释放");
            } else {
                tracing::warn!(window = id.get(), "主窗口在非退出状态下被销毁");
            }
        }
        self.phase = WindowPhase::NoWindow;
        self.page_loaded = false;
        Vec::new()
    }

    fn on_second_instance(&mut self, args: &[String]) -> Vec<WindowCommand> {
        tracing::info!(args = ?args, "检测到第二个实例");

        match deep_link::from_launch_args(args) {
            Some(url) => self.route_deep_link(url),
            None => self.reveal(),
        }
    }

    /// 页面已加载则立即投递，否则保存为待处理（后到的覆盖先到的）
    fn route_deep_link(&mut self, url: String) -> Vec<WindowCommand> {
        let mut commands = Vec::new();

        if self.window.is_some() && self.page_loaded {
            tracing::info!(url = %url, "投递深度链接");
            commands.push(WindowCommand::DeliverDeepLink(url));
        } else {
            if let Some(previous) = self.pending_deep_link.as_deref() {
                if previous != url {
                    tracing::warn!(dropped = %previous, url = %url, "未投递的深度链接被覆盖");
                }
            }
            tracing::info!(url = %url, "窗口未就绪，保存深度链接");
            self.pending_deep_link = Some(url);
        }

        commands.extend(self.reveal());
        commands
    }

    /// 显示并聚焦已有窗口，不会创建新窗口
    fn reveal(&mut self) -> Vec<WindowCommand> {
        match self.phase {
            WindowPhase::NoWindow | WindowPhase::WindowLoading => Vec::new(),
            WindowPhase::WindowReady => vec![WindowCommand::Show, WindowCommand::Focus],
            WindowPhase::WindowHidden if self.page_loaded => {
                self.phase = WindowPhase::WindowReady;
                vec![WindowCommand::Show, WindowCommand::Focus]
            }
            // 加载期间被隐藏：等待页面就绪后再显示
            WindowPhase::WindowHidden => {
                self.phase = WindowPhase::WindowLoading;
                Vec::new()
            }
        }
    }

    fn create_window(&mut self) -> Vec<WindowCommand> {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        self.window = Some(id);
        self.phase = WindowPhase::WindowLoading;
        self.page_loaded = false;

        tracing::info!(window = id.get(), "创建主窗口");
        vec![WindowCommand::CreateWindow, WindowCommand::CheckForUpdates]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_controller() -> WindowLifecycleController {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);
        controller.handle(LifecycleEvent::PageReady);
        controller
    }

    fn count_creates(commands: &[WindowCommand]) -> usize {
        commands
            .iter()
            .filter(|c| **c == WindowCommand::CreateWindow)
            .count()
    }

    #[test]
    fn test_start_creates_window_and_checks_updates() {
        let mut controller = WindowLifecycleController::new();
        let commands = controller.handle(LifecycleEvent::Started);

        assert_eq!(
            commands,
            vec![WindowCommand::CreateWindow, WindowCommand::CheckForUpdates]
        );
        assert_eq!(controller.phase(), WindowPhase::WindowLoading);
        assert!(controller.window_id().is_some());
    }

    #[test]
    fn test_page_ready_shows_window() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);

        let commands = controller.handle(LifecycleEvent::PageReady);
        assert_eq!(commands, vec![WindowCommand::Show]);
        assert_eq!(controller.phase(), WindowPhase::WindowReady);
    }

    #[test]
    fn test_started_twice_does_not_create_second_window() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);
        let first = controller.window_id();

        assert!(controller.handle(LifecycleEvent::Started).is_empty());
        assert_eq!(controller.window_id(), first);
    }

    #[test]
    fn test_close_hides_instead_of_destroying() {
        let mut controller = ready_controller();
        let id = controller.window_id();

        let commands = controller.handle(LifecycleEvent::CloseRequested);
        assert_eq!(
            commands,
            vec![WindowCommand::CancelClose, WindowCommand::Hide]
        );
        assert_eq!(controller.phase(), WindowPhase::WindowHidden);
        assert_eq!(controller.window_id(), id);
    }

    #[test]
    fn test_close_while_hidden_only_cancels() {
        let mut controller = ready_controller();
        controller.handle(LifecycleEvent::CloseRequested);

        let commands = controller.handle(LifecycleEvent::CloseRequested);
        assert_eq!(commands, vec![WindowCommand::CancelClose]);
        assert_eq!(controller.phase(), WindowPhase::WindowHidden);
    }

    #[test]
    fn test_activate_hidden_shows_same_window() {
        let mut controller = ready_controller();
        let id = controller.window_id();
        controller.handle(LifecycleEvent::CloseRequested);

        let commands = controller.handle(LifecycleEvent::Activated);
        assert_eq!(commands, vec![WindowCommand::Show, WindowCommand::Focus]);
        assert_eq!(controller.phase(), WindowPhase::WindowReady);
        assert_eq!(controller.window_id(), id);
    }

    #[test]
    fn test_activate_while_loading_waits_for_page() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);

        assert!(controller.handle(LifecycleEvent::Activated).is_empty());
        assert_eq!(controller.phase(), WindowPhase::WindowLoading);
    }

    #[test]
    fn test_closed_during_loading_then_activated_shows_when_ready() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);
        controller.handle(LifecycleEvent::CloseRequested);
        assert_eq!(controller.phase(), WindowPhase::WindowHidden);

        assert!(controller.handle(LifecycleEvent::Activated).is_empty());
        assert_eq!(controller.phase(), WindowPhase::WindowLoading);

        assert_eq!(
            controller.handle(LifecycleEvent::PageReady),
            vec![WindowCommand::Show]
        );
        assert_eq!(controller.phase(), WindowPhase::WindowReady);
    }

    #[test]
    fn test_quit_then_close_then_destroyed() {
        let mut controller = ready_controller();

        assert!(controller.handle(LifecycleEvent::QuitRequested).is_empty());
        assert!(controller.is_quitting());
        // 退出时允许关闭
        assert!(controller.handle(LifecycleEvent::CloseRequested).is_empty());
        assert_eq!(controller.phase(), WindowPhase::WindowReady);

        controller.handle(LifecycleEvent::WindowDestroyed);
        assert_eq!(controller.phase(), WindowPhase::NoWindow);
        assert!(controller.window_id().is_none());
    }

    #[test]
    fn test_activate_while_quitting_does_not_recreate() {
        let mut controller = ready_controller();
        controller.handle(LifecycleEvent::QuitRequested);
        controller.handle(LifecycleEvent::WindowDestroyed);

        assert!(controller.handle(LifecycleEvent::Activated).is_empty());
        assert_eq!(controller.phase(), WindowPhase::NoWindow);
    }

    #[test]
    fn test_unexpected_destroy_allows_recreate_with_new_handle() {
        let mut controller = ready_controller();
        let first = controller.window_id();
        controller.handle(LifecycleEvent::WindowDestroyed);

        let commands = controller.handle(LifecycleEvent::Activated);
        assert_eq!(count_creates(&commands), 1);
        assert_ne!(controller.window_id(), first);
    }

    #[test]
    fn test_deep_link_before_window_is_delivered_once_when_ready() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::DeepLinkReceived(
            "com.fundingbox.meetings://room1".to_string(),
        ));
        assert_eq!(
            controller.pending_deep_link(),
            Some("com.fundingbox.meetings://room1")
        );

        controller.handle(LifecycleEvent::Started);
        let commands = controller.handle(LifecycleEvent::PageReady);
        assert_eq!(
            commands,
            vec![
                WindowCommand::Show,
                WindowCommand::DeliverDeepLink("com.fundingbox.meetings://room1".to_string()),
            ]
        );
        assert!(controller.pending_deep_link().is_none());

        // 页面重新加载不会再次投递
        assert!(controller.handle(LifecycleEvent::PageReady).is_empty());
    }

    #[test]
    fn test_last_deep_link_wins() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::DeepLinkReceived("scheme://first".to_string()));
        controller.handle(LifecycleEvent::DeepLinkReceived("scheme://second".to_string()));

        controller.handle(LifecycleEvent::Started);
        let commands = controller.handle(LifecycleEvent::PageReady);
        let delivered: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                WindowCommand::DeliverDeepLink(url) => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec!["scheme://second"]);
    }

    #[test]
    fn test_deep_link_while_loading_is_queued() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);

        let commands =
            controller.handle(LifecycleEvent::DeepLinkReceived("scheme://room".to_string()));
        assert!(commands.is_empty());
        assert_eq!(controller.pending_deep_link(), Some("scheme://room"));
    }

    #[test]
    fn test_deep_link_when_ready_is_delivered_immediately() {
        let mut controller = ready_controller();
        let commands =
            controller.handle(LifecycleEvent::DeepLinkReceived("scheme://room".to_string()));

        assert_eq!(
            commands,
            vec![
                WindowCommand::DeliverDeepLink("scheme://room".to_string()),
                WindowCommand::Show,
                WindowCommand::Focus,
            ]
        );
        assert!(controller.pending_deep_link().is_none());
    }

    #[test]
    fn test_deep_link_when_hidden_delivers_and_reveals() {
        let mut controller = ready_controller();
        controller.handle(LifecycleEvent::CloseRequested);

        let commands =
            controller.handle(LifecycleEvent::DeepLinkReceived("scheme://room".to_string()));
        assert_eq!(
            commands,
            vec![
                WindowCommand::DeliverDeepLink("scheme://room".to_string()),
                WindowCommand::Show,
                WindowCommand::Focus,
            ]
        );
        assert_eq!(controller.phase(), WindowPhase::WindowReady);
    }

    #[test]
    fn test_deep_link_during_reload_waits_for_page_ready() {
        let mut controller = ready_controller();
        assert!(controller.handle(LifecycleEvent::PageLoading).is_empty());

        let commands =
            controller.handle(LifecycleEvent::DeepLinkReceived("scheme://room".to_string()));
        assert_eq!(commands, vec![WindowCommand::Show, WindowCommand::Focus]);
        assert_eq!(controller.pending_deep_link(), Some("scheme://room"));

        let commands = controller.handle(LifecycleEvent::PageReady);
        assert_eq!(
            commands,
            vec![WindowCommand::DeliverDeepLink("scheme://room".to_string())]
        );
        assert!(controller.pending_deep_link().is_none());
    }

    #[test]
    fn test_page_loading_without_window_is_ignored() {
        let mut controller = WindowLifecycleController::new();
        assert!(controller.handle(LifecycleEvent::PageLoading).is_empty());
        assert_eq!(controller.phase(), WindowPhase::NoWindow);
    }

    #[test]
    fn test_deep_link_after_close_during_loading_reveals_window() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::DeepLinkReceived("scheme://room".to_string()));
        controller.handle(LifecycleEvent::Started);
        controller.handle(LifecycleEvent::CloseRequested);
        assert_eq!(controller.phase(), WindowPhase::WindowHidden);

        let commands = controller.handle(LifecycleEvent::PageReady);
        assert_eq!(
            commands,
            vec![
                WindowCommand::Show,
                WindowCommand::DeliverDeepLink("scheme://room".to_string()),
                WindowCommand::Focus,
            ]
        );
        assert_eq!(controller.phase(), WindowPhase::WindowReady);
    }

    #[test]
    fn test_page_ready_while_hidden_without_link_stays_hidden() {
        let mut controller = WindowLifecycleController::new();
        controller.handle(LifecycleEvent::Started);
        controller.handle(LifecycleEvent::CloseRequested);

        assert!(controller.handle(LifecycleEvent::PageReady).is_empty());
        assert_eq!(controller.phase(), WindowPhase::WindowHidden);
    }

    #[test]
    fn test_blank_deep_link_is_ignored() {
        let mut controller = WindowLifecycleController::new();
        assert!(controller
            .handle(LifecycleEvent::DeepLinkReceived("   ".to_string()))
            .is_empty());
        assert!(controller.pending_deep_link().is_none());
    }

    #[test]
    fn test_second_instance_focuses_existing_window() {
        let mut controller = ready_controller();
        let id = controller.window_id();

        let commands = controller.handle(LifecycleEvent::SecondInstance {
            args: vec!["meetings.exe".to_string()],
        });
        assert_eq!(commands, vec![WindowCommand::Show, WindowCommand::Focus]);
        assert_eq!(controller.window_id(), id);
    }

    #[test]
    fn test_second_instance_forwards_deep_link() {
        let mut controller = ready_controller();
        controller.handle(LifecycleEvent::CloseRequested);

        let commands = controller.handle(LifecycleEvent::SecondInstance {
            args: vec![
                "meetings.exe".to_string(),
                "com.fundingbox.meetings://team".to_string(),
            ],
        });
        assert_eq!(
            commands,
            vec![
                WindowCommand::DeliverDeepLink("com.fundingbox.meetings://team".to_string()),
                WindowCommand::Show,
                WindowCommand::Focus,
            ]
        );
    }

    #[test]
    fn test_second_instance_without_window_only_stores_link() {
        let mut controller = WindowLifecycleController::new();
        let commands = controller.handle(LifecycleEvent::SecondInstance {
            args: vec!["meetings".to_string(), "scheme://early".to_string()],
        });

        assert!(commands.is_empty());
        assert_eq!(controller.phase(), WindowPhase::NoWindow);
        assert_eq!(controller.pending_deep_link(), Some("scheme://early"));
    }

    #[test]
    fn test_at_most_one_window_for_any_activate_close_sequence() {
        // 枚举长度为 6 的所有 激活/关闭/加载/就绪 序列
        let events = [
            LifecycleEvent::Activated,
            LifecycleEvent::CloseRequested,
            LifecycleEvent::PageLoading,
            LifecycleEvent::PageReady,
        ];

        for mut code in 0..events.len().pow(6) {
            let mut controller = WindowLifecycleController::new();
            let mut creates = count_creates(&controller.handle(LifecycleEvent::Started));
            let first = controller.window_id();

            for _ in 0..6 {
                let event = events[code % events.len()].clone();
                code /= events.len();
                creates += count_creates(&controller.handle(event));
                assert!(controller.window_id().is_some());
            }

            assert_eq!(creates, 1);
            assert_eq!(controller.window_id(), first);
        }
    }
}
