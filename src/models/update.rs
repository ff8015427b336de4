use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 更新源响应
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFeed {
    pub version: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// 下载页面地址
    #[serde(default)]
    pub url: Option<String>,
}

/// 更新检查结果（发送给前端）
#[derive(Debug, Clone, Serialize)]
pub struct UpdateInfo {
    pub current_version: String,
    pub latest_version: String,
    pub has_update: bool,
    pub release_notes: Option<String>,
    pub download_url: Option<String>,
    pub checked_at: DateTime<Utc>,
}
