//! 运行时配置模块
//!
//! CSR 应用没有服务端运行时配置，base URL 在编译期由
//! `HOMEPULSE_BASE_URL` 环境变量注入（见 build.rs 的 .env 透传），
//! 未设置时使用默认值。

/// 默认后端 API 地址
const DEFAULT_BASE_URL: &str = "https://api.homepulse.dev";

/// 获取后端 API base URL
pub fn base_url() -> &'static str {
    option_env!("HOMEPULSE_BASE_URL").unwrap_or(DEFAULT_BASE_URL)
}
