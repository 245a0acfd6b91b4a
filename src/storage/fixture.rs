//! 本地数据源
//!
//! 对不可变数据集执行与远端相同的过滤、排序与分页。列表操作总是成功；
//! 单实体查询找不到时返回 `NotFound`。

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{
    ChatMessage, ChatRoom, Circle, HiddenWestworldInfo, HiddenWikiInfo, Post, Role, Stats,
    WikiEntry,
};
use crate::services::query::{
    PostQuery, RoleQuery, WikiQuery, circles_by_popularity, posts_by_author, posts_in_circle,
    recent_rooms, room_messages,
};
use crate::storage::dataset::Dataset;
use crate::storage::source::{DataSource, SourceKind};

/// 本地数据源
#[derive(Clone, Debug)]
pub struct FixtureSource {
    dataset: Arc<Dataset>,
}

impl FixtureSource {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// 使用内置数据集
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Dataset::embedded()?))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// 填充作者摘要，与上游返回的帖子形状一致
    fn hydrate(&self, mut posts: Vec<Post>) -> Vec<Post> {
        for post in &mut posts {
            if let Some(author) = self.dataset.role(&post.author_id) {
                post.author = Some(author.summary());
            }
        }
        posts
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fixture
    }

    async fn roles(&self, query: &RoleQuery) -> Result<Vec<Role>> {
        Ok(query.apply(&self.dataset.roles))
    }

    async fn role(&self, id: &str) -> Result<Role> {
        self.dataset
            .role(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Role not found: {}", id)))
    }

    async fn role_posts(&self, role_id: &str, limit: usize) -> Result<Vec<Post>> {
        Ok(self.hydrate(posts_by_author(&self.dataset.posts, role_id, limit)))
    }

    async fn posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        Ok(self.hydrate(query.apply(&self.dataset.posts)))
    }

    async fn post(&self, id: &str) -> Result<Post> {
        let post = self
            .dataset
            .post(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Post not found: {}", id)))?;
        Ok(self.hydrate(vec![post]).remove(0))
    }

    async fn circles(&self) -> Result<Vec<Circle>> {
        Ok(circles_by_popularity(&self.dataset.circles))
    }

    async fn circle_posts(&self, circle_id: &str, limit: usize) -> Result<Vec<Post>> {
        Ok(self.hydrate(posts_in_circle(&self.dataset.posts, circle_id, limit)))
    }

    async fn chat_rooms(&self, limit: usize) -> Result<Vec<ChatRoom>> {
        Ok(recent_rooms(&self.dataset.chat_rooms, limit))
    }

    async fn chat_messages(&self, room_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        Ok(room_messages(&self.dataset.chat_messages, room_id, limit))
    }

    async fn wiki_entries(&self, query: &WikiQuery) -> Result<Vec<WikiEntry>> {
        Ok(query.apply(&self.dataset.wiki_entries))
    }

    async fn wiki_entry(&self, id: &str) -> Result<WikiEntry> {
        self.dataset
            .wiki_entry(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Wiki entry not found: {}", id)))
    }

    async fn stats(&self) -> Result<Stats> {
        Ok(self.dataset.stats())
    }

    async fn hidden_wiki_info(&self) -> Result<HiddenWikiInfo> {
        Ok(HiddenWikiInfo {
            message: "Wiki 百科".into(),
            description: "探索 AgentCircle 世界的百科全书".into(),
            entries_count: self.dataset.wiki_entries.len() as u64,
            url: "/wiki".into(),
        })
    }

    async fn hidden_westworld_info(&self) -> Result<HiddenWestworldInfo> {
        Ok(HiddenWestworldInfo {
            message: "Westworld 体验".into(),
            description: "与 AI 角色进行深度互动，沉浸式剧本杀体验".into(),
            price: "¥14.9 起".into(),
            features: vec![
                "角色互动".into(),
                "剧本杀".into(),
                "历史重演".into(),
                "多结局".into(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Camp;
    use crate::services::query::PostOrder;

    fn source() -> FixtureSource {
        FixtureSource::embedded().unwrap()
    }

    #[tokio::test]
    async fn test_lookups_fail_with_not_found() {
        let fixture = source();
        let err = fixture.role("nonexistent-id").await.unwrap_err();
        assert_eq!(err, AppError::NotFound("Role not found: nonexistent-id".into()));
        assert!(fixture.post("nonexistent-id").await.unwrap_err().is_not_found());
        assert!(fixture.wiki_entry("nonexistent-id").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_lookups_find_existing_records() {
        let fixture = source();
        let first_role = fixture.dataset().roles[0].clone();
        assert_eq!(fixture.role(&first_role.id).await.unwrap(), first_role);

        let first_post = fixture.dataset().posts[0].clone();
        let post = fixture.post(&first_post.id).await.unwrap();
        assert_eq!(post.id, first_post.id);
        assert_eq!(post.author.map(|a| a.id), Some(first_post.author_id));
    }

    #[tokio::test]
    async fn test_posts_are_hydrated_with_authors() {
        let fixture = source();
        let posts = fixture.posts(&PostQuery::new().with_limit(100)).await.unwrap();
        assert_eq!(posts.len(), fixture.dataset().posts.len());
        for post in posts {
            let author = post.author.expect("author hydrated");
            assert_eq!(author.id, post.author_id);
        }
    }

    #[tokio::test]
    async fn test_role_posts_only_contain_author() {
        let fixture = source();
        let author_id = fixture.dataset().posts[0].author_id.clone();
        let posts = fixture.role_posts(&author_id, 20).await.unwrap();
        assert!(!posts.is_empty());
        assert!(posts.iter().all(|p| p.author_id == author_id));

        let capped = fixture.role_posts(&author_id, 1).await.unwrap();
        assert_eq!(capped.len(), 1);
    }

    #[tokio::test]
    async fn test_circles_sorted_by_post_count() {
        let circles = source().circles().await.unwrap();
        assert!(circles.windows(2).all(|w| w[0].post_count >= w[1].post_count));
    }

    #[tokio::test]
    async fn test_chat_messages_belong_to_room_in_time_order() {
        let fixture = source();
        let room_id = fixture.dataset().chat_rooms[0].id.clone();
        let messages = fixture.chat_messages(&room_id, 50).await.unwrap();
        assert!(!messages.is_empty());
        assert!(messages.iter().all(|m| m.room_id == room_id));
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let none = fixture.chat_messages("room_missing", 50).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_chat_rooms_most_recent_first() {
        let rooms = source().chat_rooms(50).await.unwrap();
        assert!(rooms.windows(2).all(|w| w[0].last_message_at >= w[1].last_message_at));
        assert_eq!(source().chat_rooms(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_likes_order_over_embedded_posts() {
        let posts = source()
            .posts(&PostQuery::new().order_by(PostOrder::Likes).with_limit(100))
            .await
            .unwrap();
        assert!(posts.windows(2).all(|w| w[0].likes_count >= w[1].likes_count));
    }

    #[tokio::test]
    async fn test_hidden_wiki_counts_entries() {
        let fixture = source();
        let info = fixture.hidden_wiki_info().await.unwrap();
        assert_eq!(info.entries_count, fixture.dataset().wiki_entries.len() as u64);
        assert_eq!(info.url, "/wiki");

        let westworld = fixture.hidden_westworld_info().await.unwrap();
        assert_eq!(westworld.features.len(), 4);
    }

    #[tokio::test]
    async fn test_custom_dataset() {
        let dataset = Dataset::from_json(
            r#"{"roles": [
                {"id": "r1", "name": "r1", "camp": "history"},
                {"id": "r2", "name": "r2", "camp": "novel"}
            ]}"#,
        )
        .unwrap();
        let fixture = FixtureSource::new(Arc::new(dataset));
        let history = fixture.roles(&RoleQuery::new().with_camp(Camp::History)).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "r1");
    }
}
