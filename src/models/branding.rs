use serde::Serialize;

/// 品牌配置（静态、只读）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandingConfig {
    /// 关于页面
    pub about_url: &'static str,
    /// 源码仓库
    pub source_url: &'static str,
    /// 应用显示名称
    pub app_name: &'static str,
    /// 默认会议服务地址
    pub default_server_url: &'static str,
    pub faq_url: &'static str,
    pub feedback_url: &'static str,
    pub privacy_policy_url: &'static str,
    pub terms_and_conditions_url: &'static str,
    /// 自定义 URL scheme（深度链接）
    pub url_scheme: &'static str,
}

pub const BRANDING: BrandingConfig = BrandingConfig {
    about_url: "https://meetings.fundingbox.com/",
    source_url: "https://github.com/jitsi/jitsi-meet-electron",
    app_name: "FundingBox Meetings",
    default_server_url: "https://meetings.fundingbox.com",
    faq_url: "https://meetings.fundingbox.com",
    feedback_url: "mailto:support@fundingbox.com",
    privacy_policy_url: "https://meetings.fundingbox.com/static/privacy",
    terms_and_conditions_url: "https://meetings.fundingbox.com/static/terms",
    url_scheme: "com.fundingbox.meetings",
};
