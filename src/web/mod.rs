//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。

pub mod http;
pub mod route;
pub mod router;
pub mod storage;

pub use http::HttpClient;
pub use storage::{Cookie, Local};
