//! 数据模型模块
//!
//! 服务内部使用的领域模型。

pub mod summarizer;

pub use summarizer::{RagChunk, SummarizerResult};
