//! AgentCircle 数据访问客户端
//!
//! 对外暴露全部读操作与三个管理操作。读操作经由 `SourceChain` 解析：
//! 远端优先，失败后使用本地数据；管理操作只走远端。

use futures_util::FutureExt;
use std::sync::Arc;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{
    ChatMessage, ChatRoom, Circle, HiddenWestworldInfo, HiddenWikiInfo, Post, Role,
    SchedulerStatus, Stats, SyncResult, WikiEntry,
};
use crate::observability::ResolutionMetrics;
use crate::services::query::{
    DEFAULT_CHAT_MESSAGE_LIMIT, DEFAULT_CHAT_ROOM_LIMIT, DEFAULT_CIRCLE_POST_LIMIT,
    DEFAULT_ROLE_POST_LIMIT, PostQuery, RoleQuery, WikiQuery, resolve_limit,
};
use crate::services::search::filter_by_text;
use crate::storage::{DataSource, Dataset, FixtureSource, RemoteSource, SourceChain};

/// 数据源选择策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStrategy {
    /// 先远端，失败后本地数据
    RemoteFirst,
    /// 只使用本地数据，管理操作不可用
    FixtureOnly,
}

impl From<&ApiConfig> for SourceStrategy {
    fn from(config: &ApiConfig) -> Self {
        if config.use_mock_data {
            SourceStrategy::FixtureOnly
        } else {
            SourceStrategy::RemoteFirst
        }
    }
}

/// 数据访问客户端
#[derive(Clone)]
pub struct AgentCircleClient {
    chain: SourceChain,
    remote: Option<RemoteSource>,
    strategy: SourceStrategy,
}

impl AgentCircleClient {
    /// 按配置构建客户端
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let dataset = match &config.fixture_path {
            Some(path) => Arc::new(Dataset::load(path)?),
            None => Dataset::embedded()?,
        };
        let fixture = FixtureSource::new(dataset);

        let remote = match SourceStrategy::from(config) {
            SourceStrategy::RemoteFirst => Some(RemoteSource::new(&config.base_url)?),
            SourceStrategy::FixtureOnly => None,
        };

        let client = Self::from_sources(remote, fixture);
        info!(
            strategy = ?client.strategy,
            base_url = %config.base_url,
            "AgentCircle client ready"
        );
        Ok(client)
    }

    /// 由给定数据源组装；没有远端时为 `FixtureOnly`
    pub fn from_sources(remote: Option<RemoteSource>, fixture: FixtureSource) -> Self {
        let mut sources: Vec<Arc<dyn DataSource>> = Vec::with_capacity(2);
        if let Some(remote) = &remote {
            sources.push(Arc::new(remote.clone()));
        }
        sources.push(Arc::new(fixture));

        Self::with_chain(SourceChain::new(sources), remote)
    }

    /// 使用自定义数据源链
    pub fn with_chain(chain: SourceChain, remote: Option<RemoteSource>) -> Self {
        let strategy = if remote.is_some() {
            SourceStrategy::RemoteFirst
        } else {
            SourceStrategy::FixtureOnly
        };
        Self {
            chain,
            remote,
            strategy,
        }
    }

    pub fn strategy(&self) -> SourceStrategy {
        self.strategy
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        self.chain.metrics()
    }

    // ==================== 角色 ====================

    pub async fn roles(&self, query: RoleQuery) -> Result<Vec<Role>> {
        let query = &query;
        self.chain
            .resolve("roles", |source| async move { source.roles(query).await }.boxed())
            .await
    }

    pub async fn role(&self, id: &str) -> Result<Role> {
        self.chain
            .resolve("role", |source| async move { source.role(id).await }.boxed())
            .await
    }

    /// 角色的帖子，limit 缺省为 20
    pub async fn role_posts(&self, role_id: &str, limit: Option<usize>) -> Result<Vec<Post>> {
        let limit = resolve_limit(limit, DEFAULT_ROLE_POST_LIMIT);
        self.chain
            .resolve("role_posts", |source| {
                async move { source.role_posts(role_id, limit).await }.boxed()
            })
            .await
    }

    /// 按名称、称号、出处做本地文本过滤
    pub async fn search_roles(&self, query: RoleQuery, text: &str) -> Result<Vec<Role>> {
        let roles = self.roles(query).await?;
        Ok(filter_by_text(&roles, text))
    }

    // ==================== 帖子 ====================

    pub async fn posts(&self, query: PostQuery) -> Result<Vec<Post>> {
        let query = &query;
        self.chain
            .resolve("posts", |source| async move { source.posts(query).await }.boxed())
            .await
    }

    pub async fn post(&self, id: &str) -> Result<Post> {
        self.chain
            .resolve("post", |source| async move { source.post(id).await }.boxed())
            .await
    }

    // ==================== 圈子 ====================

    pub async fn circles(&self) -> Result<Vec<Circle>> {
        self.chain
            .resolve("circles", |source| async move { source.circles().await }.boxed())
            .await
    }

    /// 圈子内的帖子，limit 缺省为 20
    pub async fn circle_posts(&self, circle_id: &str, limit: Option<usize>) -> Result<Vec<Post>> {
        let limit = resolve_limit(limit, DEFAULT_CIRCLE_POST_LIMIT);
        self.chain
            .resolve("circle_posts", |source| {
                async move { source.circle_posts(circle_id, limit).await }.boxed()
            })
            .await
    }

    // ==================== 聊天 ====================

    pub async fn chat_rooms(&self, limit: Option<usize>) -> Result<Vec<ChatRoom>> {
        let limit = resolve_limit(limit, DEFAULT_CHAT_ROOM_LIMIT);
        self.chain
            .resolve("chat_rooms", |source| {
                async move { source.chat_rooms(limit).await }.boxed()
            })
            .await
    }

    pub async fn chat_messages(
        &self,
        room_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>> {
        let limit = resolve_limit(limit, DEFAULT_CHAT_MESSAGE_LIMIT);
        self.chain
            .resolve("chat_messages", |source| {
                async move { source.chat_messages(room_id, limit).await }.boxed()
            })
            .await
    }

    // ==================== 百科 ====================

    pub async fn wiki_entries(&self, query: WikiQuery) -> Result<Vec<WikiEntry>> {
        let query = &query;
        self.chain
            .resolve("wiki_entries", |source| {
                async move { source.wiki_entries(query).await }.boxed()
            })
            .await
    }

    pub async fn wiki_entry(&self, id: &str) -> Result<WikiEntry> {
        self.chain
            .resolve("wiki_entry", |source| async move { source.wiki_entry(id).await }.boxed())
            .await
    }

    // ==================== 统计与隐藏入口 ====================

    pub async fn stats(&self) -> Result<Stats> {
        self.chain
            .resolve("stats", |source| async move { source.stats().await }.boxed())
            .await
    }

    pub async fn hidden_wiki_info(&self) -> Result<HiddenWikiInfo> {
        self.chain
            .resolve("hidden_wiki_info", |source| {
                async move { source.hidden_wiki_info().await }.boxed()
            })
            .await
    }

    pub async fn hidden_westworld_info(&self) -> Result<HiddenWestworldInfo> {
        self.chain
            .resolve("hidden_westworld_info", |source| {
                async move { source.hidden_westworld_info().await }.boxed()
            })
            .await
    }

    // ==================== 管理操作 ====================

    fn remote(&self, operation: &str) -> Result<&RemoteSource> {
        self.remote.as_ref().ok_or_else(|| {
            AppError::SourceDisabled(format!("{} requires the remote source", operation))
        })
    }

    /// 触发上游从外部数据源同步
    pub async fn sync_from_source(&self) -> Result<SyncResult> {
        let result = self.remote("sync_from_source")?.sync_from_source().await?;
        info!(success = result.success, "sync requested");
        Ok(result)
    }

    pub async fn start_scheduler(&self) -> Result<SchedulerStatus> {
        let status = self.remote("start_scheduler")?.start_scheduler().await?;
        info!(status = %status.status, "scheduler start requested");
        Ok(status)
    }

    pub async fn stop_scheduler(&self) -> Result<SchedulerStatus> {
        let status = self.remote("stop_scheduler")?.stop_scheduler().await?;
        info!(status = %status.status, "scheduler stop requested");
        Ok(status)
    }
}

/// 按配置创建客户端
pub fn create_client(config: &ApiConfig) -> Result<AgentCircleClient> {
    AgentCircleClient::new(config)
}
