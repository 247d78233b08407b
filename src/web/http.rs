//! HTTP 客户端封装
//!
//! 直接基于 `web_sys::fetch` 实现，不引入 `gloo-net`，控制 WASM 体积。
//! 本层只负责把请求发出去、把响应取回来，对业务信封一无所知，
//! 信封的解析在 `request` 层完成。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 传输层错误
#[derive(Debug)]
pub enum HttpError {
    /// 请求尚未发出就失败（Headers / Request 构造）
    Build(String),
    /// fetch 本身失败（断网、CORS、DNS）
    Network(String),
    /// 拿到了响应但读取失败
    Decode(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::Build(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::Network(msg) => write!(f, "网络错误: {}", msg),
            HttpError::Decode(msg) => write!(f, "响应读取失败: {}", msg),
        }
    }
}

fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 响应封装
///
/// 持有未消费的 `web_sys::Response`，既可以一次性读完文本，
/// 也可以通过 [`HttpResponse::into_raw`] 交给调用方增量消费（聊天流）。
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    /// HTTP 状态码
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 是否为 2xx
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// 交出底层 Response，响应体保持未消费状态
    pub fn into_raw(self) -> Response {
        self.inner
    }

    /// 一次性读取响应体文本
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self.inner.text().map_err(|e| HttpError::Decode(js_err(e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::Decode(js_err(e)))?;
        value
            .as_string()
            .ok_or_else(|| HttpError::Decode("响应体不是文本".to_string()))
    }
}

/// 请求构建器
///
/// 链式收集请求头与请求体，`send` 时一次性构造 fetch 请求。
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<JsValue>,
}

impl HttpRequestBuilder {
    fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 追加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 文本请求体（JSON / x-www-form-urlencoded）
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(JsValue::from_str(&body));
        self
    }

    /// 原生 JS 请求体（FormData 等，Content-Type 交给浏览器）
    pub fn body_value(mut self, body: JsValue) -> Self {
        self.body = Some(body);
        self
    }

    /// 发送请求，返回未消费的响应
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let header_map = Headers::new().map_err(|e| HttpError::Build(js_err(e)))?;
        for (key, value) in &self.headers {
            header_map
                .set(key, value)
                .map_err(|e| HttpError::Build(js_err(e)))?;
        }

        let init = RequestInit::new();
        init.set_method(self.method.as_str());
        init.set_headers(&header_map.into());
        if let Some(body) = &self.body {
            init.set_body(body);
        }

        let request = Request::new_with_str_and_init(&self.url, &init)
            .map_err(|e| HttpError::Build(js_err(e)))?;
        let window =
            web_sys::window().ok_or_else(|| HttpError::Network("window 不可用".to_string()))?;

        let fetched = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(js_err(e)))?;
        let response: Response = fetched
            .dyn_into()
            .map_err(|e| HttpError::Decode(js_err(e)))?;

        Ok(HttpResponse { inner: response })
    }
}

/// 轻量级 HTTP 客户端入口
pub struct HttpClient;

impl HttpClient {
    pub fn get(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url, HttpMethod::Get)
    }

    pub fn post(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url, HttpMethod::Post)
    }

    pub fn put(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url, HttpMethod::Put)
    }

    pub fn delete(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url, HttpMethod::Delete)
    }

    /// 按方法枚举创建请求，供统一的分发路径使用
    pub fn request(method: HttpMethod, url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url, method)
    }
}
