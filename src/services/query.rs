//! 查询参数
//!
//! 每个列表操作都有一个显式的参数结构，所有字段可选。远端请求的查询串
//! 与本地数据兜底的过滤、排序、分页都在这里定义，两条路径共用同一套语义：
//!
//! - 缺省字段不写入查询串；本地路径使用各资源自己的默认页大小
//! - `limit` 为 0 视同未提供
//! - 多个过滤条件之间是逻辑与

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::{Camp, ChatMessage, ChatRoom, Circle, Post, Role, WikiCategory, WikiEntry};

/// 角色列表默认页大小
pub const DEFAULT_ROLE_LIMIT: usize = 24;
/// 帖子列表默认页大小
pub const DEFAULT_POST_LIMIT: usize = 20;
/// 角色帖子默认数量
pub const DEFAULT_ROLE_POST_LIMIT: usize = 20;
/// 圈子帖子默认数量
pub const DEFAULT_CIRCLE_POST_LIMIT: usize = 20;
/// 聊天室默认数量
pub const DEFAULT_CHAT_ROOM_LIMIT: usize = 50;
/// 聊天消息默认数量
pub const DEFAULT_CHAT_MESSAGE_LIMIT: usize = 50;
/// 百科条目默认数量
pub const DEFAULT_WIKI_LIMIT: usize = 100;

/// 查询串参数
pub type QueryParams = Vec<(&'static str, String)>;

/// 解析有效的 limit：0 与缺省都回落到默认值
pub fn resolve_limit(limit: Option<usize>, default: usize) -> usize {
    limit.filter(|l| *l > 0).unwrap_or(default)
}

/// 取 `[offset, offset + limit)` 区间
pub fn paginate<T: Clone>(items: &[T], offset: usize, limit: usize) -> Vec<T> {
    items.iter().skip(offset).take(limit).cloned().collect()
}

/// 帖子排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostOrder {
    /// 按发布时间，新的在前
    #[default]
    CreatedAt,
    /// 按点赞数降序
    Likes,
}

impl PostOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostOrder::CreatedAt => "created_at",
            PostOrder::Likes => "likes",
        }
    }
}

/// 帖子排序。排序稳定，相同键保持原有顺序；没有时间戳的帖子排在最后。
pub fn sort_posts(posts: &mut [Post], order: PostOrder) {
    match order {
        PostOrder::CreatedAt => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        PostOrder::Likes => posts.sort_by(|a, b| b.likes_count.cmp(&a.likes_count)),
    }
}

/// 角色列表参数
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoleQuery {
    /// 每页数量，默认 24
    pub limit: Option<usize>,
    /// 偏移量，默认 0
    pub offset: Option<usize>,
    /// 阵营过滤
    pub camp: Option<Camp>,
}

impl RoleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_camp(mut self, camp: Camp) -> Self {
        self.camp = Some(camp);
        self
    }

    /// 远端查询串参数
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            params.push(("offset", offset.to_string()));
        }
        if let Some(camp) = self.camp {
            params.push(("camp", camp.as_str().to_string()));
        }
        params
    }

    pub fn matches(&self, role: &Role) -> bool {
        self.camp.is_none_or(|camp| role.camp == camp)
    }

    /// 本地过滤与分页
    pub fn apply(&self, roles: &[Role]) -> Vec<Role> {
        let filtered: Vec<Role> = roles.iter().filter(|r| self.matches(r)).cloned().collect();
        paginate(
            &filtered,
            self.offset.unwrap_or(0),
            resolve_limit(self.limit, DEFAULT_ROLE_LIMIT),
        )
    }
}

/// 帖子列表参数
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PostQuery {
    /// 每页数量，默认 20
    pub limit: Option<usize>,
    /// 偏移量，默认 0
    pub offset: Option<usize>,
    /// 圈子过滤
    pub circle_id: Option<String>,
    /// 作者过滤
    pub author_id: Option<String>,
    /// 排序方式，默认按时间
    pub order_by: Option<PostOrder>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_circle(mut self, circle_id: impl Into<String>) -> Self {
        self.circle_id = Some(circle_id.into());
        self
    }

    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    pub fn order_by(mut self, order: PostOrder) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn order(&self) -> PostOrder {
        self.order_by.unwrap_or_default()
    }

    /// 远端查询串参数
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            params.push(("offset", offset.to_string()));
        }
        if let Some(circle_id) = self.circle_id.as_deref().filter(|c| !c.is_empty()) {
            params.push(("circle_id", circle_id.to_string()));
        }
        if let Some(author_id) = self.author_id.as_deref().filter(|a| !a.is_empty()) {
            params.push(("author_id", author_id.to_string()));
        }
        if let Some(order) = self.order_by {
            params.push(("order_by", order.as_str().to_string()));
        }
        params
    }

    /// 圈子与作者条件同时满足
    pub fn matches(&self, post: &Post) -> bool {
        let circle_ok = match self.circle_id.as_deref().filter(|c| !c.is_empty()) {
            Some(circle_id) => post.circle_id.as_deref() == Some(circle_id),
            None => true,
        };
        let author_ok = match self.author_id.as_deref().filter(|a| !a.is_empty()) {
            Some(author_id) => post.author_id == author_id,
            None => true,
        };
        circle_ok && author_ok
    }

    /// 本地过滤、排序与分页
    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let mut filtered: Vec<Post> = posts.iter().filter(|p| self.matches(p)).cloned().collect();
        sort_posts(&mut filtered, self.order());
        paginate(
            &filtered,
            self.offset.unwrap_or(0),
            resolve_limit(self.limit, DEFAULT_POST_LIMIT),
        )
    }
}

/// 百科条目参数
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WikiQuery {
    /// 分类过滤
    pub category: Option<WikiCategory>,
    /// 数量上限，默认 100
    pub limit: Option<usize>,
}

impl WikiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: WikiCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 远端查询串参数
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(category) = self.category {
            params.push(("category", category.as_str().to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    pub fn matches(&self, entry: &WikiEntry) -> bool {
        self.category.is_none_or(|category| entry.category == Some(category))
    }

    /// 本地过滤，最近更新的在前
    pub fn apply(&self, entries: &[WikiEntry]) -> Vec<WikiEntry> {
        let mut filtered: Vec<WikiEntry> =
            entries.iter().filter(|e| self.matches(e)).cloned().collect();
        filtered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        paginate(&filtered, 0, resolve_limit(self.limit, DEFAULT_WIKI_LIMIT))
    }
}

/// 单一 `limit` 参数
pub fn limit_params(limit: usize) -> QueryParams {
    vec![("limit", limit.to_string())]
}

/// 某角色的帖子，按时间倒序
pub fn posts_by_author(posts: &[Post], author_id: &str, limit: usize) -> Vec<Post> {
    PostQuery::new()
        .with_author(author_id)
        .with_limit(limit)
        .apply(posts)
}

/// 某圈子的帖子，按时间倒序
pub fn posts_in_circle(posts: &[Post], circle_id: &str, limit: usize) -> Vec<Post> {
    PostQuery::new()
        .with_circle(circle_id)
        .with_limit(limit)
        .apply(posts)
}

/// 圈子按帖子数降序
pub fn circles_by_popularity(circles: &[Circle]) -> Vec<Circle> {
    let mut sorted = circles.to_vec();
    sorted.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    sorted
}

/// 聊天室按最后消息时间倒序
pub fn recent_rooms(rooms: &[ChatRoom], limit: usize) -> Vec<ChatRoom> {
    let mut sorted = rooms.to_vec();
    sorted.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
    paginate(&sorted, 0, limit)
}

/// 某聊天室的消息，按时间正序
pub fn room_messages(messages: &[ChatMessage], room_id: &str, limit: usize) -> Vec<ChatMessage> {
    let mut filtered: Vec<ChatMessage> = messages
        .iter()
        .filter(|m| m.room_id == room_id)
        .cloned()
        .collect();
    filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    paginate(&filtered, 0, limit)
}
