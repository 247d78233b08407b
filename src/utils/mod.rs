//! 工具函数模块
//!
//! 纯函数集合：数字/文本格式化、分页切片、地理数据去重分组、
//! 设备与 URL 检测。无状态，不触碰网络与存储。

pub mod detect;
pub mod format;
pub mod page;
pub mod states;

pub use detect::{is_http_url, is_mobile_user_agent};
pub use format::{
    capitalize_first_letter, format_fixed, format_fixed_rate, format_type, global_format_fixed,
    number_formatter, sub_content_to_description, to_thousands,
};
pub use page::data_page;
pub use states::{city_by_state, extract_all_states};
