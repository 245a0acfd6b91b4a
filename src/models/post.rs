//! 帖子数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::formats::PreferMany;
use serde_with::{DefaultOnError, OneOrMany, serde_as, skip_serializing_none};
use std::collections::BTreeMap;

use crate::models::role::RoleSummary;

/// 内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// 普通文本
    #[default]
    Text,
    /// 诗词
    Poem,
    /// 歌曲
    Song,
    /// 菜谱
    Recipe,
    /// 剑谱
    SwordManual,
    /// 药方
    Medicine,
    /// 定理
    Theorem,
    /// 故事
    Story,
    /// 哲思
    Philosophy,
}

/// 按内容类型变化的元数据
///
/// 已知字段按类型分组列出，其余键保存在 `extra` 中原样透传。
/// 元数据由上游生成且不做校验：列表字段接受单个字符串，类型不符的已知字段
/// 读作 `None`，不影响帖子本身的解析。
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PostMetadata {
    // 歌曲
    #[serde_as(as = "DefaultOnError")]
    pub lyrics: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub genre: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub mood: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub inspiration: Option<String>,

    // 菜谱
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferMany>>>")]
    pub ingredients: Option<Vec<String>>,
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferMany>>>")]
    pub steps: Option<Vec<String>>,
    #[serde_as(as = "DefaultOnError")]
    pub cooking_time: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub difficulty: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub taste: Option<String>,

    // 剑谱
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferMany>>>")]
    pub moves: Option<Vec<String>>,
    #[serde_as(as = "DefaultOnError")]
    pub internal_skill: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub origin: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub power_level: Option<String>,

    // 药方
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferMany>>>")]
    pub herbs: Option<Vec<String>>,
    #[serde_as(as = "DefaultOnError")]
    pub effects: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub usage: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub precautions: Option<String>,

    // 定理
    #[serde_as(as = "DefaultOnError")]
    pub formula: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub proof: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub application: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub discoverer: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub field: Option<String>,

    // 故事
    #[serde_as(as = "DefaultOnError")]
    pub setting: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferMany>>>")]
    pub characters: Option<Vec<String>>,
    #[serde_as(as = "DefaultOnError")]
    pub plot: Option<String>,

    // 通用
    #[serde_as(as = "DefaultOnError")]
    pub style: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub rhyme_scheme: Option<String>,

    /// 未建模的键
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// 帖子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// 帖子唯一标识
    pub id: String,

    /// 作者角色 ID
    pub author_id: String,

    /// 作者摘要
    #[serde(default)]
    pub author: Option<RoleSummary>,

    /// 所属圈子
    #[serde(default)]
    pub circle_id: Option<String>,

    pub title: String,

    pub content: String,

    #[serde(default)]
    pub content_type: ContentType,

    #[serde(default)]
    pub metadata: PostMetadata,

    #[serde(default)]
    pub likes_count: u64,

    #[serde(default)]
    pub comments_count: u64,

    #[serde(default)]
    pub views_count: u64,

    #[serde(default)]
    pub is_pinned: bool,

    /// 发布时间
    #[serde(default, with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_wire_names() {
        let parsed: ContentType = serde_json::from_str(r#""sword_manual""#).unwrap();
        assert_eq!(parsed, ContentType::SwordManual);
        assert_eq!(
            serde_json::to_string(&ContentType::Philosophy).unwrap(),
            r#""philosophy""#
        );
    }

    #[test]
    fn test_recipe_metadata_and_extra_keys() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": "post_001",
                "author_id": "role_fict_014",
                "title": "高老庄红烧肉",
                "content": "俺老猪的拿手菜",
                "content_type": "recipe",
                "metadata": {
                    "ingredients": ["五花肉", "冰糖"],
                    "cooking_time": "90分钟",
                    "servings": 4
                },
                "likes_count": 42
            }"#,
        )
        .unwrap();

        assert_eq!(post.content_type, ContentType::Recipe);
        assert_eq!(post.metadata.ingredients.as_ref().map(Vec::len), Some(2));
        assert_eq!(post.metadata.extra.get("servings"), Some(&serde_json::json!(4)));
        assert_eq!(post.comments_count, 0);
        assert!(post.author.is_none());
        assert!(!post.is_pinned);
    }

    #[test]
    fn test_malformed_metadata_fields_do_not_fail_the_post() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": "post_llm",
                "author_id": "role_hist_014",
                "title": "东坡肉",
                "content": "...",
                "content_type": "recipe",
                "metadata": {
                    "steps": "先煮再炒",
                    "ingredients": ["五花肉", 3],
                    "cooking_time": 30,
                    "taste": "酥烂",
                    "servings": 4
                }
            }"#,
        )
        .unwrap();

        assert_eq!(post.metadata.steps, Some(vec!["先煮再炒".to_string()]));
        assert_eq!(post.metadata.ingredients, None);
        assert_eq!(post.metadata.cooking_time, None);
        assert_eq!(post.metadata.taste.as_deref(), Some("酥烂"));
        assert_eq!(post.metadata.extra.get("servings"), Some(&serde_json::json!(4)));
    }

    #[test]
    fn test_metadata_skips_absent_fields() {
        let metadata = PostMetadata {
            formula: Some("a^2 + b^2 = c^2".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json, serde_json::json!({"formula": "a^2 + b^2 = c^2"}));
    }
}
