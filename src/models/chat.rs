//! 聊天室与消息数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 聊天室类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// 私聊（双方）
    Private,
    /// 群聊
    Group,
}

/// 消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Action,
}

/// 聊天室
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub room_type: RoomType,

    /// 场景描述
    #[serde(default)]
    pub scene: Option<String>,

    /// 参与者角色 ID
    #[serde(default)]
    pub participant_ids: Vec<String>,

    #[serde(default, with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, with = "crate::models::timestamp")]
    pub last_message_at: Option<DateTime<Utc>>,
}

/// 聊天消息，隶属于唯一的聊天室
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,

    pub room_id: String,

    pub sender_id: String,

    pub content: String,

    #[serde(default)]
    pub message_type: MessageType,

    /// 情绪标签
    #[serde(default)]
    pub emotion: Option<String>,

    #[serde(default, with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}
