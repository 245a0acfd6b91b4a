//! 核心数据模型模块
//!
//! 定义数据访问层返回的实体：Role, Post, Circle, ChatRoom, ChatMessage,
//! WikiEntry, Stats，以及管理操作与隐藏功能的响应结构。

pub mod admin;
pub mod chat;
pub mod circle;
pub mod post;
pub mod role;
pub mod stats;
pub mod timestamp;
pub mod wiki;

pub use admin::*;
pub use chat::*;
pub use circle::*;
pub use post::*;
pub use role::*;
pub use stats::*;
pub use wiki::*;
