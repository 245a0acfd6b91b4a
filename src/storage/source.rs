//! 数据源抽象与解析链
//!
//! 同一组读操作由远端服务与本地数据集两种数据源实现。`SourceChain` 按顺序
//! 逐个尝试，第一个成功的结果即为最终结果；失败不重试，也不合并部分结果。

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{
    ChatMessage, ChatRoom, Circle, HiddenWestworldInfo, HiddenWikiInfo, Post, Role, Stats,
    WikiEntry,
};
use crate::observability::ResolutionMetrics;
use crate::services::query::{PostQuery, RoleQuery, WikiQuery};

/// 数据源类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// 远端 HTTP 服务
    Remote,
    /// 本地数据集
    Fixture,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Remote => f.write_str("remote"),
            SourceKind::Fixture => f.write_str("fixture"),
        }
    }
}

/// 只读数据源
///
/// 列表操作接收已解析的 limit；默认值的选择在调用方完成。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn roles(&self, query: &RoleQuery) -> Result<Vec<Role>>;

    async fn role(&self, id: &str) -> Result<Role>;

    async fn role_posts(&self, role_id: &str, limit: usize) -> Result<Vec<Post>>;

    async fn posts(&self, query: &PostQuery) -> Result<Vec<Post>>;

    async fn post(&self, id: &str) -> Result<Post>;

    async fn circles(&self) -> Result<Vec<Circle>>;

    async fn circle_posts(&self, circle_id: &str, limit: usize) -> Result<Vec<Post>>;

    async fn chat_rooms(&self, limit: usize) -> Result<Vec<ChatRoom>>;

    async fn chat_messages(&self, room_id: &str, limit: usize) -> Result<Vec<ChatMessage>>;

    async fn wiki_entries(&self, query: &WikiQuery) -> Result<Vec<WikiEntry>>;

    async fn wiki_entry(&self, id: &str) -> Result<WikiEntry>;

    async fn stats(&self) -> Result<Stats>;

    async fn hidden_wiki_info(&self) -> Result<HiddenWikiInfo>;

    async fn hidden_westworld_info(&self) -> Result<HiddenWestworldInfo>;
}

/// 有序数据源链，首个成功者胜出
#[derive(Clone)]
pub struct SourceChain {
    sources: Vec<Arc<dyn DataSource>>,
    metrics: ResolutionMetrics,
}

impl SourceChain {
    pub fn new(sources: Vec<Arc<dyn DataSource>>) -> Self {
        Self::with_metrics(sources, ResolutionMetrics::new())
    }

    pub fn with_metrics(sources: Vec<Arc<dyn DataSource>>, metrics: ResolutionMetrics) -> Self {
        Self { sources, metrics }
    }

    /// 链中数据源的类别，按尝试顺序
    pub fn kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }

    /// 依次调用每个数据源一次，返回第一个成功结果；全部失败时返回最后一个错误
    pub async fn resolve<'q, T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Fn(Arc<dyn DataSource>) -> BoxFuture<'q, Result<T>>,
    {
        let mut last_error = None;

        for (position, source) in self.sources.iter().enumerate() {
            let kind = source.kind();
            match call(Arc::clone(source)).await {
                Ok(value) => {
                    self.metrics.record_hit(kind, position > 0);
                    if position > 0 {
                        debug!(operation, source = %kind, "resolved by fallback source");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if err.is_decode() {
                        self.metrics.record_decode_failure();
                        warn!(operation, source = %kind, error = %err, "malformed response, trying next source");
                    } else {
                        debug!(operation, source = %kind, code = err.code(), error = %err, "source failed");
                    }
                    last_error = Some(err);
                }
            }
        }

        self.metrics.record_unresolved();
        Err(last_error.unwrap_or_else(|| {
            AppError::SourceDisabled(format!("no data source configured for {}", operation))
        }))
    }
}
