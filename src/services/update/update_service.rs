use crate::core::error::{AppError, AppResult};
use crate::core::http::build_http_client;
use crate::models::update::{UpdateFeed, UpdateInfo};
use semver::Version;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    Idle,
    Checking,
}

/// 更新检查服务（只检查和通知，不负责安装）
#[derive(Clone)]
pub struct UpdateService {
    current_version: String,
    feed_url: String,
    status: Arc<RwLock<UpdateStatus>>,
}

impl UpdateService {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self::with_version(env!("CARGO_PKG_VERSION"), feed_url)
    }

    pub fn with_version(current_version: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            current_version: current_version.into(),
            feed_url: feed_url.into(),
            status: Arc::new(RwLock::new(UpdateStatus::Idle)),
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub async fn status(&self) -> UpdateStatus {
        *self.status.read().await
    }

    /// 检查是否有可用更新
    pub async fn check_for_updates(&self) -> AppResult<UpdateInfo> {
        {
            let mut status = self.status.write().await;
            if *status == UpdateStatus::Checking {
                return Err(AppError::UpdateFeed {
                    reason: "已有更新检查在进行中".to_string(),
                });
            }
            *status = UpdateStatus::Checking;
        }

        let result = self.fetch_feed().await;
        *self.status.write().await = UpdateStatus::Idle;

        let info = evaluate_feed(&self.current_version, result?)?;
        tracing::info!(
            current = %info.current_version,
            latest = %info.latest_version,
            has_update = info.has_update,
            "更新检查完成"
        );
        Ok(info)
    }

    async fn fetch_feed(&self) -> AppResult<UpdateFeed> {
        tracing::debug!(url = %self.feed_url, "请求更新源");
        let client = build_http_client()?;
        let response = client.get(&self.feed_url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::UpdateFeed {
                reason: format!("更新源返回状态码 {}", response.status()),
            });
        }

        Ok(response.json::<UpdateFeed>().await?)
    }
}

/// 用 semver 比较当前版本与更新源版本
pub fn evaluate_feed(current_version: &str, feed: UpdateFeed) -> AppResult<UpdateInfo> {
    let current = Version::parse(current_version.trim_start_matches('v'))?;
    let latest = Version::parse(feed.version.trim().trim_start_matches('v'))?;

    Ok(UpdateInfo {
        current_version: current.to_string(),
        latest_version: latest.to_string(),
        has_update: latest > current,
        release_notes: feed.notes,
        download_url: feed.url,
        checked_at: chrono::Utc::now(),
    })
}
