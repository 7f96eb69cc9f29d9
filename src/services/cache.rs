//! 会话缓存
//!
//! 保存每个会话的历史文本，查询时作为上下文交给摘要服务。

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::config::CacheConfig;
use crate::security::session_id::ConversationId;

/// 默认最多保留的会话数
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// 默认每个会话保留的历史字节数
pub const DEFAULT_MAX_HISTORY_BYTES: usize = 64 * 1024;

/// 会话缓存 trait
pub trait ConversationCache: Send + Sync {
    /// 读取键对应的值
    fn get(&self, key: &str) -> Option<String>;

    /// 写入值；键已存在时追加到已有内容之后
    fn insert_or_append(&self, key: &str, value: &str);
}

/// 缓存键：用户与会话的组合
pub fn cache_key(user_id: &str, conversation_id: &ConversationId) -> String {
    format!("{}:{}", user_id, conversation_id)
}

#[derive(Debug)]
struct CachedHistory {
    history: String,
    touched: u64,
}

/// 基于内存的会话缓存
///
/// 会话数超过 `max_entries` 时淘汰最久未访问的会话；单个会话的历史超过
/// `max_history_bytes` 时按行从头部丢弃。
#[derive(Debug)]
pub struct InMemoryCache {
    entries: DashMap<String, CachedHistory>,
    clock: AtomicU64,
    max_entries: usize,
    max_history_bytes: usize,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_HISTORY_BYTES)
    }
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定容量上限创建缓存，`max_entries` 至少为 1
    pub fn with_limits(max_entries: usize, max_history_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            clock: AtomicU64::new(0),
            max_entries: max_entries.max(1),
            max_history_bytes,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_limits(config.max_entries, config.max_history_bytes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn evict_overflow(&self) {
        while self.entries.len() > self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().touched)
                .map(|entry| entry.key().clone());

            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                    debug!(key = %key, "Evicted least recently used conversation");
                }
                None => break,
            }
        }
    }
}

impl ConversationCache for InMemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let touched = self.tick();
        self.entries.get_mut(key).map(|mut entry| {
            entry.touched = touched;
            entry.history.clone()
        })
    }

    fn insert_or_append(&self, key: &str, value: &str) {
        let touched = self.tick();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let cached = occupied.get_mut();
                cached.history.push('\n');
                cached.history.push_str(value);
                cached.touched = touched;
                trim_front(&mut cached.history, self.max_history_bytes);
            }
            Entry::Vacant(vacant) => {
                let mut history = value.to_string();
                trim_front(&mut history, self.max_history_bytes);
                vacant.insert(CachedHistory { history, touched });
            }
        }
        self.evict_overflow();
    }
}

/// Drop whole lines from the front until `history` fits; a single
/// oversized line is kept.
fn trim_front(history: &mut String, max_bytes: usize) {
    while history.len() > max_bytes {
        match history.find('\n') {
            Some(pos) => {
                history.drain(..=pos);
            }
            None => break,
        }
    }
}
