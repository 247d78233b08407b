//! 请求封装模块 - 核心抽象层
//!
//! 对外暴露四个请求变体（client / direct / server / server_json）外加一个
//! 流式变体，统一处理：URL 解析、Bearer token 注入、请求体编码、
//! 信封解析与错误归一化。
//!
//! 与旧实现的两点显式重构：
//! - 执行上下文（base URL、渲染模式、会话）通过 [`ApiContext`] 显式传递，
//!   不做环境嗅探，也不读全局可变状态；
//! - 错误以值的形式返回给调用方，由展示层决定如何提示，
//!   请求层内部不触发任何全局通知。

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use homepulse_shared::{Envelope, TOKEN_KEY};

use crate::web::http::{self as web_http, HttpMethod};
use crate::web::storage::Local;

// =========================================================
// 执行上下文 (Execution Context)
// =========================================================

/// 渲染上下文，显式二值参数
///
/// 客户端渲染下业务失败以 [`ApiError`] 原样返回；
/// 服务端渲染下 server 系变体将失败折叠为固定 500 的结构化错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Client,
    Server,
}

/// 会话存取接口
///
/// token 的所有读写都经过这一个入口，保证可测试性。
pub trait SessionStore {
    /// 读取当前 token，空串视为不存在
    fn token(&self) -> Option<String>;
    /// 保存 token
    fn save_token(&self, token: &str);
    /// 清除 token（登出或会话过期）
    fn reset_token(&self);
}

/// 基于 LocalStorage 的会话实现，固定键名 [`TOKEN_KEY`]
pub struct LocalSession;

impl SessionStore for LocalSession {
    fn token(&self) -> Option<String> {
        Local::get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn save_token(&self, token: &str) {
        Local::set(TOKEN_KEY, token);
    }

    fn reset_token(&self) {
        Local::remove(TOKEN_KEY);
    }
}

// =========================================================
// 传输层抽象 (HTTP Transport Abstraction)
// =========================================================

/// 请求体编码
#[derive(Debug, Clone)]
pub enum Body {
    /// multipart 表单键值对，由传输层构造 FormData
    Multipart(Vec<(String, String)>),
    /// 已经按 x-www-form-urlencoded 编码完成的字符串
    UrlEncoded(String),
    /// JSON 文本原样透传
    Json(String),
}

impl Body {
    /// 该编码对应的 Content-Type
    ///
    /// multipart 返回 None，boundary 由浏览器生成。
    fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Multipart(_) => None,
            Body::UrlEncoded(_) => Some("application/x-www-form-urlencoded"),
            Body::Json(_) => Some("application/json"),
        }
    }
}

/// 传输层请求
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

/// 传输层响应
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP 传输特性 (Trait)
///
/// 使用 async_trait 以支持异步调用，(?Send) 是因为
/// 浏览器环境下的 JS 类型不是 Send 的。测试中以内存实现替换。
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<TransportResponse, String>;
}

/// 基于 `web::http` 的 fetch 传输实现
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<TransportResponse, String> {
        let mut builder = web_http::HttpClient::request(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        builder = match req.body {
            Some(Body::Multipart(fields)) => {
                let form = web_sys::FormData::new().map_err(|e| format!("{:?}", e))?;
                for (key, value) in &fields {
                    form.append_with_str(key, value)
                        .map_err(|e| format!("{:?}", e))?;
                }
                builder.body_value(form.into())
            }
            Some(Body::UrlEncoded(text)) | Some(Body::Json(text)) => builder.body(text),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(TransportResponse { status, body })
    }
}

// =========================================================
// 错误归一化 (Error Taxonomy)
// =========================================================

/// 请求层错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 传输 / 网络失败
    Network(String),
    /// 响应体不是合法的 JSON 信封
    Parse(String),
    /// 会话过期 (1002)，token 已被清除
    SessionExpired,
    /// 业务失败（信封状态码非 200）
    Api { code: i64, message: String },
    /// 服务端渲染下的结构化错误，固定 500
    Server { status_code: u16, message: String },
}

impl ApiError {
    /// 供展示层使用的错误文案
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(msg) | ApiError::Parse(msg) => msg.clone(),
            ApiError::SessionExpired => "Session expired".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Server { message, .. } => message.clone(),
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "网络错误: {}", msg),
            ApiError::Parse(msg) => write!(f, "响应解析失败: {}", msg),
            ApiError::SessionExpired => write!(f, "会话已过期"),
            ApiError::Api { code, message } => write!(f, "业务错误 {}: {}", code, message),
            ApiError::Server {
                status_code,
                message,
            } => write!(f, "服务端错误 {}: {}", status_code, message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// URL 与表单编码工具（纯函数，便于单测）
// =========================================================

/// 判断是否为完整的绝对 URL
fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// 解析最终请求地址
///
/// 绝对 URL 原样透传；相对路径拼接到 base URL 上。
/// `use_base` 为 false 的变体（direct）完全不做拼接。
pub fn resolve_url(base: &str, url: &str, use_base: bool) -> String {
    if !use_base || is_absolute(url) {
        return url.to_string();
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// 将查询参数拼接到 URL 上
pub fn append_query(url: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}

/// 将键值对编码为 x-www-form-urlencoded 字符串
///
/// 值为 `None` 时编码为空串（与旧接口的 null 处理保持一致）。
pub fn encode_form_urlencoded(fields: &[(&str, Option<&str>)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            let encoded_value = match value {
                Some(v) => urlencoding::encode(v).into_owned(),
                None => String::new(),
            };
            format!("{}={}", urlencoding::encode(key), encoded_value)
        })
        .collect::<Vec<_>>()
        .join("&")
}

// =========================================================
// 请求上下文与变体 (ApiContext & Variants)
// =========================================================

/// 四个信封变体的内部区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Client,
    Direct,
    Server,
    ServerJson,
}

impl Variant {
    /// 是否注入 Bearer token（server 系变体不携带会话）
    fn injects_token(&self) -> bool {
        matches!(self, Variant::Client | Variant::Direct)
    }

    /// 是否将相对路径拼接到 base URL
    fn uses_base_url(&self) -> bool {
        !matches!(self, Variant::Direct)
    }

    /// 是否为服务端渲染专用变体
    fn is_server_side(&self) -> bool {
        matches!(self, Variant::Server | Variant::ServerJson)
    }
}

/// 请求执行上下文
///
/// 持有 base URL、渲染模式、会话存取与传输实现，
/// 作为 Leptos Context 在组件树中共享。
#[derive(Clone)]
pub struct ApiContext {
    base_url: String,
    mode: RenderMode,
    session: Arc<dyn SessionStore + Send + Sync>,
    transport: Arc<dyn HttpTransport + Send + Sync>,
    /// 会话过期时触发（应用侧接到登录页导航）
    on_session_expired: Arc<dyn Fn() + Send + Sync>,
}

impl ApiContext {
    /// 以浏览器默认实现创建上下文
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_parts(
            base_url,
            RenderMode::Client,
            Arc::new(LocalSession),
            Arc::new(FetchTransport),
        )
    }

    /// 完整注入各组成部分（测试与服务端渲染使用）
    pub fn with_parts(
        base_url: impl Into<String>,
        mode: RenderMode,
        session: Arc<dyn SessionStore + Send + Sync>,
        transport: Arc<dyn HttpTransport + Send + Sync>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            mode,
            session,
            transport,
            on_session_expired: Arc::new(|| {}),
        }
    }

    /// 注册会话过期钩子
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Arc::new(hook);
        self
    }

    /// client 变体：相对 base URL，POST 走 multipart 表单
    pub fn client(&self) -> ClientRequest<'_> {
        ClientRequest(self)
    }

    /// direct 变体：绝对 URL 透传，JSON 请求体
    pub fn direct(&self) -> DirectRequest<'_> {
        DirectRequest(self)
    }

    /// server 变体：相对 base URL，不注入 token
    pub fn server(&self) -> ServerRequest<'_> {
        ServerRequest(self)
    }

    /// server_json 变体：同 server，但请求体为 JSON
    pub fn server_json(&self) -> ServerJsonRequest<'_> {
        ServerJsonRequest(self)
    }

    /// 流式变体：POST JSON 并返回未消费的原始响应
    ///
    /// 不做信封解析，也不做状态码检查，由调用方增量消费
    /// （聊天 token 流）。
    pub async fn stream_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<web_http::HttpResponse> {
        let url = resolve_url(&self.base_url, path, true);
        let payload = serde_json::to_string(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        web_http::HttpClient::post(&url)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// 所有信封变体的公共路径
    ///
    /// 解析 URL -> 注入头 -> 编码请求体 -> 发送 -> 解析信封 -> 归一化错误。
    async fn dispatch(
        &self,
        variant: Variant,
        url: &str,
        method: HttpMethod,
        body: Option<Body>,
    ) -> ApiResult<Envelope> {
        let url = resolve_url(&self.base_url, url, variant.uses_base_url());

        let mut headers: Vec<(String, String)> = Vec::new();
        if variant.injects_token() {
            if let Some(token) = self.session.token() {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }
        if let Some(content_type) = body.as_ref().and_then(Body::content_type) {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }

        let request = HttpRequest {
            url,
            method,
            headers,
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(msg) => return Err(self.normalize(variant, ApiError::Network(msg))),
        };

        let envelope: Envelope = match serde_json::from_str(&response.body) {
            Ok(envelope) => envelope,
            Err(e) => return Err(self.normalize(variant, ApiError::Parse(e.to_string()))),
        };

        if envelope.is_ok() {
            return Ok(envelope);
        }

        // 会话过期只在携带会话的变体上有意义
        if variant.injects_token() && envelope.is_session_expired() {
            self.session.reset_token();
            (self.on_session_expired)();
            return Err(ApiError::SessionExpired);
        }

        let code = envelope.outcome().unwrap_or(0);
        let message = envelope.error_message();
        Err(self.normalize(variant, ApiError::Api { code, message }))
    }

    /// 在服务端渲染模式下，server 系变体的失败折叠为固定 500
    fn normalize(&self, variant: Variant, err: ApiError) -> ApiError {
        if variant.is_server_side() && self.mode == RenderMode::Server {
            ApiError::Server {
                status_code: 500,
                message: err.message(),
            }
        } else {
            err
        }
    }
}

// =========================================================
// 变体门面 (Variant Facades)
// =========================================================

/// client 变体门面
pub struct ClientRequest<'a>(&'a ApiContext);

impl ClientRequest<'_> {
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> ApiResult<Envelope> {
        let url = append_query(url, params);
        self.0
            .dispatch(Variant::Client, &url, HttpMethod::Get, None)
            .await
    }

    /// POST，键值对编码为 multipart 表单
    pub async fn post(&self, url: &str, fields: &[(&str, &str)]) -> ApiResult<Envelope> {
        let body = Body::Multipart(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self.0
            .dispatch(Variant::Client, url, HttpMethod::Post, Some(body))
            .await
    }

    /// POST，请求体由调用方编码完成后原样透传（文件上传等）
    pub async fn upload(&self, url: &str, body: Body) -> ApiResult<Envelope> {
        self.0
            .dispatch(Variant::Client, url, HttpMethod::Post, Some(body))
            .await
    }

    /// PUT，键值对编码为 x-www-form-urlencoded
    pub async fn put(&self, url: &str, fields: &[(&str, Option<&str>)]) -> ApiResult<Envelope> {
        let body = Body::UrlEncoded(encode_form_urlencoded(fields));
        self.0
            .dispatch(Variant::Client, url, HttpMethod::Put, Some(body))
            .await
    }

    /// DELETE，JSON 请求体
    pub async fn delete<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ApiResult<Envelope> {
        let body = Body::Json(serde_json::to_string(body).map_err(|e| ApiError::Parse(e.to_string()))?);
        self.0
            .dispatch(Variant::Client, url, HttpMethod::Delete, Some(body))
            .await
    }
}

/// direct 变体门面
pub struct DirectRequest<'a>(&'a ApiContext);

impl DirectRequest<'_> {
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> ApiResult<Envelope> {
        let url = append_query(url, params);
        self.0
            .dispatch(Variant::Direct, &url, HttpMethod::Get, None)
            .await
    }

    /// POST，JSON 请求体
    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ApiResult<Envelope> {
        let body = Body::Json(serde_json::to_string(body).map_err(|e| ApiError::Parse(e.to_string()))?);
        self.0
            .dispatch(Variant::Direct, url, HttpMethod::Post, Some(body))
            .await
    }

    /// PUT，键值对编码为 x-www-form-urlencoded
    pub async fn put(&self, url: &str, fields: &[(&str, Option<&str>)]) -> ApiResult<Envelope> {
        let body = Body::UrlEncoded(encode_form_urlencoded(fields));
        self.0
            .dispatch(Variant::Direct, url, HttpMethod::Put, Some(body))
            .await
    }

    /// DELETE，JSON 请求体
    pub async fn delete<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ApiResult<Envelope> {
        let body = Body::Json(serde_json::to_string(body).map_err(|e| ApiError::Parse(e.to_string()))?);
        self.0
            .dispatch(Variant::Direct, url, HttpMethod::Delete, Some(body))
            .await
    }
}

/// server 变体门面
pub struct ServerRequest<'a>(&'a ApiContext);

impl ServerRequest<'_> {
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> ApiResult<Envelope> {
        let url = append_query(url, params);
        self.0
            .dispatch(Variant::Server, &url, HttpMethod::Get, None)
            .await
    }

    /// POST，键值对编码为 multipart 表单
    pub async fn post(&self, url: &str, fields: &[(&str, &str)]) -> ApiResult<Envelope> {
        let body = Body::Multipart(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self.0
            .dispatch(Variant::Server, url, HttpMethod::Post, Some(body))
            .await
    }
}

/// server_json 变体门面
pub struct ServerJsonRequest<'a>(&'a ApiContext);

impl ServerJsonRequest<'_> {
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> ApiResult<Envelope> {
        let url = append_query(url, params);
        self.0
            .dispatch(Variant::ServerJson, &url, HttpMethod::Get, None)
            .await
    }

    /// POST，JSON 请求体
    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ApiResult<Envelope> {
        let body = Body::Json(serde_json::to_string(body).map_err(|e| ApiError::Parse(e.to_string()))?);
        self.0
            .dispatch(Variant::ServerJson, url, HttpMethod::Post, Some(body))
            .await
    }
}

#[cfg(test)]
mod tests;
