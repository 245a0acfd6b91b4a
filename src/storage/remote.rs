//! 远端 HTTP 数据源
//!
//! 上游服务约定：读操作为 GET，三个管理操作为不带请求体的 POST，
//! 响应体均为 JSON；非 2xx 响应的响应体按错误文本读取。

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{
    ChatMessage, ChatRoom, Circle, HiddenWestworldInfo, HiddenWikiInfo, Post, Role,
    SchedulerStatus, Stats, SyncResult, WikiEntry,
};
use crate::services::query::{PostQuery, QueryParams, RoleQuery, WikiQuery, limit_params};
use crate::storage::source::{DataSource, SourceKind};

/// 远端 API 客户端
#[derive(Clone, Debug)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    /// 使用默认传输配置创建客户端（不设置额外超时）
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T> {
        let mut request = self.client.get(self.url(path));
        if !params.is_empty() {
            request = request.query(params);
        }

        tracing::debug!(path, ?params, "GET");
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))
    }

    // ==================== 管理操作 ====================

    /// 触发外部数据源同步
    pub async fn sync_from_source(&self) -> Result<SyncResult> {
        self.post_json("/admin/sync").await
    }

    /// 启动内容调度器
    pub async fn start_scheduler(&self) -> Result<SchedulerStatus> {
        self.post_json("/admin/scheduler/start").await
    }

    /// 停止内容调度器
    pub async fn stop_scheduler(&self) -> Result<SchedulerStatus> {
        self.post_json("/admin/scheduler/stop").await
    }
}

/// 路径段编码
fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl DataSource for RemoteSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn roles(&self, query: &RoleQuery) -> Result<Vec<Role>> {
        self.get_json("/roles", &query.to_params()).await
    }

    async fn role(&self, id: &str) -> Result<Role> {
        self.get_json(&format!("/roles/{}", segment(id)), &QueryParams::new())
            .await
    }

    async fn role_posts(&self, role_id: &str, limit: usize) -> Result<Vec<Post>> {
        self.get_json(&format!("/roles/{}/posts", segment(role_id)), &limit_params(limit))
            .await
    }

    async fn posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        self.get_json("/posts", &query.to_params()).await
    }

    async fn post(&self, id: &str) -> Result<Post> {
        self.get_json(&format!("/posts/{}", segment(id)), &QueryParams::new())
            .await
    }

    async fn circles(&self) -> Result<Vec<Circle>> {
        self.get_json("/circles", &QueryParams::new()).await
    }

    async fn circle_posts(&self, circle_id: &str, limit: usize) -> Result<Vec<Post>> {
        self.get_json(&format!("/circles/{}/posts", segment(circle_id)), &limit_params(limit))
            .await
    }

    async fn chat_rooms(&self, limit: usize) -> Result<Vec<ChatRoom>> {
        self.get_json("/chat/rooms", &limit_params(limit)).await
    }

    async fn chat_messages(&self, room_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        self.get_json(
            &format!("/chat/rooms/{}/messages", segment(room_id)),
            &limit_params(limit),
        )
        .await
    }

    async fn wiki_entries(&self, query: &WikiQuery) -> Result<Vec<WikiEntry>> {
        self.get_json("/wiki/entries", &query.to_params()).await
    }

    async fn wiki_entry(&self, id: &str) -> Result<WikiEntry> {
        self.get_json(&format!("/wiki/entries/{}", segment(id)), &QueryParams::new())
            .await
    }

    async fn stats(&self) -> Result<Stats> {
        self.get_json("/stats", &QueryParams::new()).await
    }

    async fn hidden_wiki_info(&self) -> Result<HiddenWikiInfo> {
        self.get_json("/hidden/wiki", &QueryParams::new()).await
    }

    async fn hidden_westworld_info(&self) -> Result<HiddenWestworldInfo> {
        self.get_json("/hidden/westworld", &QueryParams::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let remote = RemoteSource::new("http://localhost:8000/api/").unwrap();
        assert_eq!(remote.base_url(), "http://localhost:8000/api");
        assert_eq!(remote.url("/roles"), "http://localhost:8000/api/roles");
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(segment("role_hist_000"), "role_hist_000");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("孔子"), "%E5%AD%94%E5%AD%90");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // 端口 9 (discard) 通常无人监听
        let remote = RemoteSource::new("http://127.0.0.1:9/api").unwrap();
        let err = remote.circles().await.unwrap_err();
        assert_eq!(err.code(), "TRANSPORT");
    }
}
