//! 管理操作与隐藏功能的响应结构

use serde::{Deserialize, Serialize};

/// 外部数据同步结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
}

/// 调度器状态，如 "started" / "stopped"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub status: String,
}

/// 隐藏百科入口信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenWikiInfo {
    pub message: String,
    pub description: String,
    pub entries_count: u64,
    pub url: String,
}

/// 隐藏 Westworld 体验入口信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenWestworldInfo {
    pub message: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
}
