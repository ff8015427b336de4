// 品牌与应用信息相关命令

use serde::Serialize;

use ::fundingbox_meetings::{BrandingConfig, BRANDING};

#[derive(Serialize)]
pub struct AppInfo {
    name: &'static str,
    version: &'static str,
    os: &'static str,
    arch: &'static str,
}

/// 页面读取品牌配置（会议服务地址、关于/隐私等链接）
#[tauri::command]
pub fn get_branding_config() -> BrandingConfig {
    BRANDING
}

/// 页面用来识别宿主环境
#[tauri::command]
pub fn get_app_info() -> AppInfo {
    AppInfo {
        name: BRANDING.app_name,
        version: env!("CARGO_PKG_VERSION"),
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
    }
}
