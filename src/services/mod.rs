//! 服务模块

pub mod client;
pub mod query;
pub mod search;

pub use client::{AgentCircleClient, SourceStrategy, create_client};
pub use query::{PostOrder, PostQuery, RoleQuery, WikiQuery};
pub use search::{TextSearchable, filter_by_text, matches_text};
