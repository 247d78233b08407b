//! 领域 API 模块
//!
//! 每个函数对应一个后端端点：固定的 (路径, 方法, 请求变体) 三元组，
//! 不含任何分支逻辑。信封的 data 字段在这里解码为具体类型。

pub mod charts;
pub mod chatbot;
pub mod user;

use homepulse_shared::Envelope;
use serde::de::DeserializeOwned;

use crate::request::{ApiError, ApiResult};

/// 将成功信封的 data 解码为具体类型
fn decode<T: DeserializeOwned>(envelope: Envelope) -> ApiResult<T> {
    envelope
        .decode()
        .map_err(|e| ApiError::Parse(e.to_string()))
}
