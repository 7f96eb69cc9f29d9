//! DTO 模块
//!
//! 数据传输对象，用于 API 请求和响应的序列化。

pub mod error_dto;
pub mod feedback_dto;
pub mod query_dto;
pub mod status_dto;

pub use error_dto::*;
pub use feedback_dto::*;
pub use query_dto::*;
pub use status_dto::*;
