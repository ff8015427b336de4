//! 弹窗分类：内部弹窗允许打开新窗口，其余交给系统默认浏览器

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupTarget {
    /// 在应用内打开新窗口（如 OAuth 登录）
    Internal,
    /// 取消并用系统浏览器打开
    Browser,
}

/// 单条弹窗规则：URL 与（可选的）窗口名都匹配时生效
#[derive(Debug, Clone)]
pub struct PopupRule {
    pub name: String,
    url: Regex,
    frame_name: Option<Regex>,
    pub target: PopupTarget,
}

impl PopupRule {
    pub fn new(
        name: impl Into<String>,
        url_pattern: &str,
        frame_pattern: Option<&str>,
        target: PopupTarget,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            url: Regex::new(url_pattern)?,
            frame_name: frame_pattern.map(Regex::new).transpose()?,
            target,
        })
    }

    fn matches(&self, url: &str, frame_name: Option<&str>) -> bool {
        if !self.url.is_match(url) {
            return false;
        }
        match (&self.frame_name, frame_name) {
            (None, _) => true,
            (Some(pattern), Some(frame)) => pattern.is_match(frame),
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PopupRegistry {
    rules: Vec<PopupRule>,
}

impl PopupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置规则：常见 OAuth 提供方的登录页
    pub fn with_defaults() -> Result<Self, regex::Error> {
        let mut registry = Self::new();
        registry.register(PopupRule::new(
            "google-auth",
            r"^https://accounts\.google\.com/",
            None,
            PopupTarget::Internal,
        )?);
        registry.register(PopupRule::new(
            "dropbox-auth",
            r"^https://www\.dropbox\.com/oauth2/authorize",
            None,
            PopupTarget::Internal,
        )?);
        registry.register(PopupRule::new(
            "microsoft-auth",
            r"^https://login\.microsoftonline\.com/",
            None,
            PopupTarget::Internal,
        )?);
        Ok(registry)
    }

    pub fn register(&mut self, rule: PopupRule) {
        self.rules.push(rule);
    }

    /// 第一条匹配的规则决定目标；没有匹配时交给浏览器
    pub fn classify(&self, url: &str, frame_name: Option<&str>) -> PopupTarget {
        match self.rules.iter().find(|rule| rule.matches(url, frame_name)) {
            Some(rule) => {
                tracing::debug!(rule = %rule.name, url = %url, target = ?rule.target, "弹窗规则命中");
                rule.target
            }
            None => PopupTarget::Browser,
        }
    }
}

/// 全局默认弹窗规则
pub static DEFAULT_POPUPS: Lazy<PopupRegistry> =
    Lazy::new(|| PopupRegistry::with_defaults().expect("invalid popup rule"));

/// 只允许把 http/https/mailto 交给系统打开
pub fn is_externally_openable(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https" | "mailto"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_providers_are_internal() {
        let registry = PopupRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.classify("https://accounts.google.com/o/oauth2/auth?x=1", None),
            PopupTarget::Internal
        );
        assert_eq!(
            registry.classify("https://www.dropbox.com/oauth2/authorize?client_id=a", None),
            PopupTarget::Internal
        );
        assert_eq!(
            registry.classify("https://login.microsoftonline.com/common/oauth2", Some("x")),
            PopupTarget::Internal
        );
    }

    #[test]
    fn test_unknown_targets_go_to_browser() {
        let registry = PopupRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.classify("https://meetings.fundingbox.com/static/privacy", None),
            PopupTarget::Browser
        );
        // 前缀不匹配
        assert_eq!(
            registry.classify("https://evil.example/https://accounts.google.com/", None),
            PopupTarget::Browser
        );
        assert_eq!(registry.classify("", None), PopupTarget::Browser);
    }

    #[test]
    fn test_frame_name_rule() {
        let mut registry = PopupRegistry::new();
        registry.register(
            PopupRule::new(
                "calendar",
                r"^https://calendar\.example\.com/",
                Some(r"^calendar-popup$"),
                PopupTarget::Internal,
            )
            .unwrap(),
        );

        let url = "https://calendar.example.com/auth";
        assert_eq!(
            registry.classify(url, Some("calendar-popup")),
            PopupTarget::Internal
        );
        assert_eq!(registry.classify(url, Some("other")), PopupTarget::Browser);
        assert_eq!(registry.classify(url, None), PopupTarget::Browser);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mut registry = PopupRegistry::new();
        registry.register(
            PopupRule::new("deny", r"^https://a\.example/", None, PopupTarget::Browser).unwrap(),
        );
        registry.register(
            PopupRule::new("allow", r"^https://a\.example/", None, PopupTarget::Internal).unwrap(),
        );
        assert_eq!(
            registry.classify("https://a.example/x", None),
            PopupTarget::Browser
        );
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(PopupRule::new("bad", "(", None, PopupTarget::Internal).is_err());
    }

    #[test]
    fn test_externally_openable_schemes() {
        assert!(is_externally_openable("https://meetings.fundingbox.com"));
        assert!(is_externally_openable("mailto:support@fundingbox.com"));
        assert!(!is_externally_openable("file:///etc/passwd"));
        assert!(!is_externally_openable("javascript:alert(1)"));
        assert!(!is_externally_openable("not a url"));
    }
}
