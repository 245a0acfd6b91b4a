//! 圈子数据模型

use serde::{Deserialize, Serialize};

/// 圈子：按话题划分的内容频道
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub post_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_defaults() {
        let circle: Circle =
            serde_json::from_str(r#"{"id": "circle_poetry", "name": "诗词文学"}"#).unwrap();
        assert_eq!(circle.post_count, 0);
        assert!(circle.icon.is_none());
    }
}
