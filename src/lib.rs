//! Parley - 对话式问答服务的载荷层
//!
//! 校验并规范化进入服务的查询与反馈请求，将语言模型编排组件的结果
//! 转换为带引用文档的响应，并提供对应的 HTTP 接口。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
