//! 服务层模块
//!
//! 查询处理依赖的外部协作方接口：摘要服务与会话缓存。

pub mod cache;
pub mod summarizer;

pub use cache::{ConversationCache, InMemoryCache, cache_key};
pub use summarizer::{SummarizeRequest, Summarizer};
