//! 深度链接解析与投递脚本

use serde::Serialize;
use url::Url;

/// 页面中接收深度链接的路由入口
pub const ROUTE_ENTRY_POINT: &str = "routeCall._onRoute";

/// 去掉首尾空白，空字符串返回 None
pub fn normalize(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 从完整的命令行参数中取出深度链接
///
/// 跳过可执行文件路径、空参数以及以 `-` 开头的运行时参数，取第一个剩余参数。
pub fn from_launch_args<S: AsRef<str>>(args: &[S]) -> Option<String> {
    args.iter()
        .skip(1)
        .map(AsRef::as_ref)
        .filter(|arg| !arg.trim_start().starts_with('-'))
        .find_map(normalize)
}

/// 生成在页面中调用路由入口的脚本，URL 以 JSON 字符串字面量传入
pub fn route_script(url: &str) -> String {
    let literal = serde_json::Value::String(url.to_string()).to_string();
    format!("{ROUTE_ENTRY_POINT}({literal})")
}

/// 深度链接在页面中的去向
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum RouteTarget {
    /// 与会议服务同源，在内嵌 iframe 中打开
    Conference(String),
    /// 其他地址交给系统浏览器
    External(String),
}

/// 解析深度链接
///
/// `<scheme>://<room>` 解析为会议服务下的房间，`<scheme>://https://...` 与普通 URL
/// 按原样解析。只有与 `server_url` 同源的地址才会在内嵌页面中打开。
pub fn resolve_route(link: &str, scheme: &str, server_url: &str) -> Option<RouteTarget> {
    let server = Url::parse(server_url).ok()?;

    let target = match strip_scheme(link, scheme) {
        Some(rest) if rest.starts_with("http://") || rest.starts_with("https://") => {
            Url::parse(rest).ok()?
        }
        Some(rest) => server.join(rest).ok()?,
        None => Url::parse(link).ok()?,
    };

    if target.origin() == server.origin() {
        Some(RouteTarget::Conference(target.into()))
    } else {
        Some(RouteTarget::External(target.into()))
    }
}

fn strip_scheme<'a>(link: &'a str, scheme: &str) -> Option<&'a str> {
    let (head, rest) = link.split_once("://")?;
    head.eq_ignore_ascii_case(scheme).then_some(rest)
}
