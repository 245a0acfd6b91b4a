//! 本地数据集
//!
//! 远端不可用或被禁用时使用的静态数据。运行期只读，通过 `Arc` 共享。
//! 内置数据集随二进制一起编译，也可以从 JSON 文件加载替换。

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ChatMessage, ChatRoom, Circle, Post, Role, Stats, WikiEntry};

const EMBEDDED_JSON: &str = include_str!("../../fixtures/dataset.json");

static EMBEDDED: OnceCell<Arc<Dataset>> = OnceCell::new();

/// 数据集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Dataset {
    pub roles: Vec<Role>,
    pub posts: Vec<Post>,
    pub circles: Vec<Circle>,
    pub chat_rooms: Vec<ChatRoom>,
    pub chat_messages: Vec<ChatMessage>,
    pub wiki_entries: Vec<WikiEntry>,
}

impl Dataset {
    /// 内置数据集，首次调用时解析
    pub fn embedded() -> Result<Arc<Dataset>> {
        EMBEDDED
            .get_or_try_init(|| Self::from_json(EMBEDDED_JSON).map(Arc::new))
            .cloned()
    }

    pub fn from_json(raw: &str) -> Result<Dataset> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Dataset> {
        let raw = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&raw)?;

        let dangling = dataset.dangling_references();
        if !dangling.is_empty() {
            tracing::warn!(
                path = %path.display(),
                count = dangling.len(),
                "fixture dataset has unresolved references: {}",
                dangling.join(", ")
            );
        }

        Ok(dataset)
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn wiki_entry(&self, id: &str) -> Option<&WikiEntry> {
        self.wiki_entries.iter().find(|e| e.id == id)
    }

    /// 聚合统计，口径与上游服务一致
    pub fn stats(&self) -> Stats {
        let alive = self.roles.iter().filter(|r| r.life_cycle.is_alive).count() as u64;
        let total = self.roles.len() as u64;

        Stats {
            total_agents: total,
            total_posts: self.posts.len() as u64,
            total_circles: self.circles.len() as u64,
            active_agents: self
                .roles
                .iter()
                .filter(|r| r.last_active_at.is_some())
                .count() as u64,
            alive_agents: alive,
            dead_agents: total - alive,
        }
    }

    /// 列出无法解析的引用：帖子作者、帖子圈子、消息所属聊天室、聊天室参与者、百科关联角色
    pub fn dangling_references(&self) -> Vec<String> {
        let roles: HashSet<&str> = self.roles.iter().map(|r| r.id.as_str()).collect();
        let circles: HashSet<&str> = self.circles.iter().map(|c| c.id.as_str()).collect();
        let rooms: HashSet<&str> = self.chat_rooms.iter().map(|r| r.id.as_str()).collect();

        let mut dangling = Vec::new();
        for post in &self.posts {
            if !roles.contains(post.author_id.as_str()) {
                dangling.push(format!("post {} -> role {}", post.id, post.author_id));
            }
            if let Some(circle_id) = &post.circle_id {
                if !circles.contains(circle_id.as_str()) {
                    dangling.push(format!("post {} -> circle {}", post.id, circle_id));
                }
            }
        }
        for message in &self.chat_messages {
            if !rooms.contains(message.room_id.as_str()) {
                dangling.push(format!("message {} -> room {}", message.id, message.room_id));
            }
        }
        for room in &self.chat_rooms {
            for participant in &room.participant_ids {
                if !roles.contains(participant.as_str()) {
                    dangling.push(format!("room {} -> role {}", room.id, participant));
                }
            }
        }
        for entry in &self.wiki_entries {
            for role_id in &entry.related_role_ids {
                if !roles.contains(role_id.as_str()) {
                    dangling.push(format!("wiki {} -> role {}", entry.id, role_id));
                }
            }
        }
        dangling
    }
}
