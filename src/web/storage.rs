//! 浏览器存储封装模块
//!
//! - `Local`: window.localStorage 永久缓存
//! - `Cookie`: document.cookie 临时缓存
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，提供简洁的存储接口。
//! 底层存储失败（如配额超限）不在此层区分，统一收敛为 `Option` / `bool`。

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;

/// 浏览器永久缓存封装
///
/// 提供静态方法访问 LocalStorage API，并附带 JSON 序列化变体。
pub struct Local;

impl Local {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取永久缓存
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置永久缓存
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 移除永久缓存
    pub fn remove(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    /// 移除全部永久缓存
    pub fn clear() -> bool {
        Self::storage().and_then(|s| s.clear().ok()).is_some()
    }

    /// 获取永久缓存并反序列化为 JSON
    pub fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
        let raw = Self::get(key)?;
        serde_json::from_str(&raw).ok()
    }

    /// 序列化为 JSON 后设置永久缓存
    pub fn set_json<T: Serialize>(key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => Self::set(key, &raw),
            Err(_) => false,
        }
    }
}

/// 浏览器临时缓存封装
///
/// 封装 document.cookie 的读写。cookie 字符串的解析逻辑抽到
/// 纯函数 [`parse_cookie`] 中以便单测。
pub struct Cookie;

impl Cookie {
    /// 获取 HtmlDocument 实例（cookie 接口挂在 HtmlDocument 上）
    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()
    }

    /// 获取临时缓存，空值视为不存在
    pub fn get(key: &str) -> Option<String> {
        let raw = Self::document()?.cookie().ok()?;
        parse_cookie(&raw, key)
    }

    /// 设置临时缓存
    pub fn set(key: &str, value: &str) -> bool {
        let entry = format!(
            "{}={}; path=/",
            urlencoding::encode(key),
            urlencoding::encode(value)
        );
        Self::document()
            .and_then(|d| d.set_cookie(&entry).ok())
            .is_some()
    }

    /// 移除临时缓存（写入已过期的同名条目）
    pub fn remove(key: &str) -> bool {
        let entry = format!(
            "{}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT",
            urlencoding::encode(key)
        );
        Self::document()
            .and_then(|d| d.set_cookie(&entry).ok())
            .is_some()
    }
}

/// 从 cookie 字符串中取出指定键的值
///
/// cookie 字符串格式为 `k1=v1; k2=v2`，键值均按 URL 编码存储。
/// 空值返回 `None`。
pub fn parse_cookie(raw: &str, key: &str) -> Option<String> {
    for pair in raw.split(';') {
        let pair = pair.trim();
        let Some((k, v)) = pair.split_once('=') else {
            continue;
        };
        let Ok(decoded_key) = urlencoding::decode(k) else {
            continue;
        };
        if decoded_key == key {
            if v.is_empty() {
                return None;
            }
            return urlencoding::decode(v).ok().map(|s| s.into_owned());
        }
    }
    None
}
