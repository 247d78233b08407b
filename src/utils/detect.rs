//! 设备与 URL 检测工具

/// 移动端 UA 特征串（小写匹配）
const MOBILE_MARKERS: &[&str] = &[
    "mobi",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
    "opera mini",
    "iemobile",
];

/// 判断 User-Agent 是否来自移动端（纯函数）
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// 判断当前浏览器是否移动端
pub fn is_mobile_device() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false)
}

/// 判断是否为完整的 http(s) URL
///
/// 要求带 `http://` 或 `https://` 协议头，且 host 非空、不含空白。
pub fn is_http_url(url: &str) -> bool {
    let rest = if let Some(rest) = url.strip_prefix("https://") {
        rest
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else {
        return false;
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !host.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_user_agents_are_detected() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14)"));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini)"));
    }

    #[test]
    fn desktop_user_agents_are_not_mobile() {
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0"
        ));
        assert!(!is_mobile_user_agent(""));
    }

    #[test]
    fn http_urls_are_recognized() {
        assert!(is_http_url("https://example.com"));
        assert!(is_http_url("http://example.com/path?q=1"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("/relative/path"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("https://bad host/"));
        assert!(!is_http_url("example.com"));
    }
}
