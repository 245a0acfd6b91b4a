//! 百科条目数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 百科分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WikiCategory {
    Character,
    Event,
    Place,
    Item,
    Concept,
}

impl WikiCategory {
    pub const ALL: [WikiCategory; 5] = [
        WikiCategory::Character,
        WikiCategory::Event,
        WikiCategory::Place,
        WikiCategory::Item,
        WikiCategory::Concept,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WikiCategory::Character => "character",
            WikiCategory::Event => "event",
            WikiCategory::Place => "place",
            WikiCategory::Item => "item",
            WikiCategory::Concept => "concept",
        }
    }
}

impl fmt::Display for WikiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WikiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WikiCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown wiki category: {}", s))
    }
}

fn default_version() -> u32 {
    1
}

/// 百科条目，每次编辑版本号递增
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiEntry {
    pub id: String,

    pub title: String,

    pub content: String,

    #[serde(default)]
    pub category: Option<WikiCategory>,

    /// 关联角色 ID
    #[serde(default)]
    pub related_role_ids: Vec<String>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default, with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, with = "crate::models::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,

    /// 版本号
    #[serde(default = "default_version")]
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("Place".parse::<WikiCategory>().unwrap(), WikiCategory::Place);
        assert!("person".parse::<WikiCategory>().is_err());
    }

    #[test]
    fn test_entry_defaults() {
        let entry: WikiEntry =
            serde_json::from_str(r#"{"id": "w1", "title": "赤壁之战", "content": "..."}"#)
                .unwrap();
        assert_eq!(entry.version, 1);
        assert!(entry.category.is_none());
        assert!(entry.related_role_ids.is_empty());
    }
}
