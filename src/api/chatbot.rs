//! AI 聊天接口

use homepulse_shared::{AuthStatus, ChatMessage, ChatRequest, ChatSession};

use crate::request::{ApiContext, ApiResult};
use crate::web::http::HttpResponse;

use super::decode;

/// 聊天认证服务地址（独立于业务 base URL 的外部服务）
const CHAT_AUTH_URL: &str = "https://ai.homepulse.dev/auth/status";

/// 获取最新活动
pub async fn get_list(ctx: &ApiContext) -> ApiResult<Vec<ChatMessage>> {
    decode(ctx.client().post("/chat/topsky/list", &[]).await?)
}

/// 检查聊天服务认证状态
pub async fn check_auth(ctx: &ApiContext) -> ApiResult<AuthStatus> {
    decode(ctx.direct().get(CHAT_AUTH_URL, &[]).await?)
}

/// 创建新会话
pub async fn get_new_session(ctx: &ApiContext) -> ApiResult<ChatSession> {
    decode(ctx.client().post("/chat/topsky/session/new", &[]).await?)
}

/// 发送消息并等待完整回复
pub async fn get_chat(ctx: &ApiContext, request: &ChatRequest) -> ApiResult<ChatMessage> {
    let fields = [
        ("session_id", request.session_id.as_str()),
        ("message", request.message.as_str()),
    ];
    decode(ctx.client().post("/chat/topsky/chat", &fields).await?)
}

/// 发送消息并返回未消费的流式响应
///
/// 不经过信封解析，调用方自行消费响应体（token 流）。
pub async fn stream_chat(ctx: &ApiContext, request: &ChatRequest) -> ApiResult<HttpResponse> {
    ctx.stream_post("/chat/topsky/chat/stream", request).await
}
