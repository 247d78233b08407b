//! 响应信封模块
//!
//! 后端所有 JSON 接口的统一返回结构：`{ status|code, message, data }`。
//! 历史接口部分使用 `code` 字段表示状态，规范字段为 `status`，
//! `code` 仅作为兼容旧接口的回退读取。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{FALLBACK_ERROR_MESSAGE, STATUS_OK, STATUS_SESSION_EXPIRED};

/// 后端标准响应信封
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// 规范状态字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// 旧接口的状态字段，仅在 status 缺失时读取
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// 读取本次响应的业务状态码
    ///
    /// 优先读取规范字段 `status`，缺失时回退到旧字段 `code`，
    /// 两者都缺失视为信封不完整，返回 `None`。
    pub fn outcome(&self) -> Option<i64> {
        self.status.or(self.code)
    }

    /// 业务是否成功（状态码 200）
    pub fn is_ok(&self) -> bool {
        self.outcome() == Some(STATUS_OK)
    }

    /// 是否为会话过期响应（状态码 1002）
    pub fn is_session_expired(&self) -> bool {
        self.outcome() == Some(STATUS_SESSION_EXPIRED)
    }

    /// 错误文案，message 缺失时使用兜底文案
    pub fn error_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }

    /// 将 data 字段反序列化为具体类型
    ///
    /// data 缺失时按 JSON `null` 处理，由目标类型决定是否可接受。
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value = self.data.clone().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_prefers_canonical_status_field() {
        let env: Envelope = serde_json::from_value(json!({
            "status": 200,
            "code": 500
        }))
        .unwrap();
        assert_eq!(env.outcome(), Some(200));
        assert!(env.is_ok());
    }

    #[test]
    fn outcome_falls_back_to_legacy_code_field() {
        let env: Envelope = serde_json::from_value(json!({ "code": 200 })).unwrap();
        assert_eq!(env.outcome(), Some(200));

        let env: Envelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(env.outcome(), None);
        assert!(!env.is_ok());
    }

    #[test]
    fn session_expiry_is_detected_on_either_field() {
        let env: Envelope = serde_json::from_value(json!({ "status": 1002 })).unwrap();
        assert!(env.is_session_expired());

        let env: Envelope = serde_json::from_value(json!({ "code": 1002 })).unwrap();
        assert!(env.is_session_expired());
    }

    #[test]
    fn error_message_falls_back_when_absent() {
        let env: Envelope = serde_json::from_value(json!({ "status": 400 })).unwrap();
        assert_eq!(env.error_message(), "Server error");

        let env: Envelope =
            serde_json::from_value(json!({ "status": 400, "message": "bad input" })).unwrap();
        assert_eq!(env.error_message(), "bad input");
    }

    #[test]
    fn decode_reads_typed_data_without_mutation() {
        let env: Envelope = serde_json::from_value(json!({
            "status": 200,
            "data": [
                { "state_id": 6, "state_name": "California" },
                { "state_id": 48, "state_name": "Texas" }
            ]
        }))
        .unwrap();
        let states: Vec<crate::StateRecord> = env.decode().unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].state_id, 6);
        // data 原样保留，可再次解码
        let again: Vec<crate::StateRecord> = env.decode().unwrap();
        assert_eq!(states, again);
    }
}
