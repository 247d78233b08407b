use serde::{Deserialize, Serialize};

pub mod envelope;

pub use envelope::Envelope;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 业务成功状态码
pub const STATUS_OK: i64 = 200;
/// 会话过期状态码，收到后需要清除 token 并跳转登录页
pub const STATUS_SESSION_EXPIRED: i64 = 1002;

/// localStorage 中会话 token 的固定键名
pub const TOKEN_KEY: &str = "token";

/// 后端未返回 message 时的兜底文案
pub const FALLBACK_ERROR_MESSAGE: &str = "Server error";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 州记录，图表接口的顶层地理维度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state_id: i64,
    pub state_name: String,
}

/// 城市记录，按 state_id 归属到州
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub city_id: i64,
    pub city_name: String,
    pub state_id: i64,
}

/// Metro（都会区）记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetroRecord {
    pub metro_id: i64,
    pub metro_name: String,
}

/// Zipcode 记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipcodeRecord {
    pub zipcode: String,
    pub city_id: i64,
}

/// 房价增长率 / 综合排行的查询条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metro_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// 排行结果的单行数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRow {
    pub zipcode: String,
    /// 区域中位房价
    pub median_price: f64,
    /// 年化增长率（百分比数值，如 5.43 表示 5.43%）
    pub growth_rate: f64,
}

// =========================================================
// 聊天模型 (Chat Models)
// =========================================================

/// 聊天会话，由后端在 session/new 时创建
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 聊天消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// 单条聊天消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// 发起聊天补全的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// 聊天服务的认证状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

// =========================================================
// 用户模型 (User Models)
// =========================================================

/// 登录请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录成功后 data 中携带的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
}
