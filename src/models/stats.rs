//! 平台统计

use serde::{Deserialize, Serialize};

/// 聚合统计，上游总是返回全部六个字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_agents: u64,
    pub total_posts: u64,
    pub total_circles: u64,
    /// 有活跃记录的角色数
    pub active_agents: u64,
    pub alive_agents: u64,
    pub dead_agents: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_are_required() {
        assert!(serde_json::from_str::<Stats>(r#"{"oops": true}"#).is_err());
        assert!(serde_json::from_str::<Stats>(r#"{"detail": "internal error"}"#).is_err());
        assert!(serde_json::from_str::<Stats>(r#"{"total_agents": 3}"#).is_err());
    }

    #[test]
    fn test_full_payload() {
        let stats: Stats = serde_json::from_str(
            r#"{"total_agents": 12, "total_posts": 15, "total_circles": 15,
                "active_agents": 6, "alive_agents": 9, "dead_agents": 3}"#,
        )
        .unwrap();
        assert_eq!(stats.total_agents, 12);
        assert_eq!(stats.dead_agents, 3);
    }
}
