//! AgentCircle - 角色社区数据访问客户端
//!
//! 从 AgentCircle 后端读取角色、帖子、圈子、聊天与百科数据。远端不可用时
//! 回落到内置数据集，保证读操作始终有结果。

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use error::{AppError, Result};
pub use services::{AgentCircleClient, SourceStrategy};
