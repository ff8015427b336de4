use crate::core::error::AppResult;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("FundingBoxMeetings/", env!("CARGO_PKG_VERSION"));

/// 构建 HTTP 客户端（遵循系统代理环境变量）
pub fn build_http_client() -> AppResult<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_contains_version() {
        assert!(USER_AGENT.starts_with("FundingBoxMeetings/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_build_client() {
        assert!(build_http_client().is_ok());
    }
}
