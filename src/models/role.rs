//! 角色数据模型
//!
//! AI 角色：历史人物或小说、电影、游戏、动漫、戏剧中的虚构人物。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 角色阵营（来源类别）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Camp {
    /// 历史人物
    History,
    /// 小说
    Novel,
    /// 电影
    Movie,
    /// 游戏
    Game,
    /// 动漫
    Anime,
    /// 戏剧
    Drama,
}

impl Camp {
    /// 所有阵营
    pub const ALL: [Camp; 6] = [
        Camp::History,
        Camp::Novel,
        Camp::Movie,
        Camp::Game,
        Camp::Anime,
        Camp::Drama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Camp::History => "history",
            Camp::Novel => "novel",
            Camp::Movie => "movie",
            Camp::Game => "game",
            Camp::Anime => "anime",
            Camp::Drama => "drama",
        }
    }
}

impl fmt::Display for Camp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Camp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Camp::ALL
            .into_iter()
            .find(|camp| camp.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown camp: {}", s))
    }
}

fn default_trait() -> f64 {
    50.0
}

/// 五维人格向量（大五人格），数值通常在 0-100 之间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityVector {
    /// 开放性
    #[serde(default = "default_trait")]
    pub openness: f64,
    /// 尽责性
    #[serde(default = "default_trait")]
    pub conscientiousness: f64,
    /// 外向性
    #[serde(default = "default_trait")]
    pub extraversion: f64,
    /// 宜人性
    #[serde(default = "default_trait")]
    pub agreeableness: f64,
    /// 神经质
    #[serde(default = "default_trait")]
    pub neuroticism: f64,
}

impl Default for PersonalityVector {
    fn default() -> Self {
        Self {
            openness: default_trait(),
            conscientiousness: default_trait(),
            extraversion: default_trait(),
            agreeableness: default_trait(),
            neuroticism: default_trait(),
        }
    }
}

/// 生命周期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeCycle {
    /// 出生日期（自由文本，如 "公元前551年"）
    pub birth_date: Option<String>,
    /// 死亡日期
    pub death_date: Option<String>,
    /// 是否存活
    pub is_alive: bool,
    /// 年龄
    pub age: u32,
    /// 健康值
    pub health: u32,
    /// 心情：happy, sad, angry, excited, neutral, thoughtful, tired
    pub mood: String,
}

impl Default for LifeCycle {
    fn default() -> Self {
        Self {
            birth_date: None,
            death_date: None,
            is_alive: true,
            age: 25,
            health: 100,
            mood: "neutral".into(),
        }
    }
}

/// 互动统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoleStats {
    pub reputation: u64,
    pub post_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
}

fn default_llm_model() -> String {
    "gpt-4o-mini".into()
}

/// 角色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// 角色唯一标识
    pub id: String,

    /// 名称
    pub name: String,

    /// 头像地址
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// 阵营
    pub camp: Camp,

    /// 是否为真实历史人物
    #[serde(default)]
    pub is_historical: bool,

    /// 称号
    #[serde(default)]
    pub title: Option<String>,

    /// 简介
    #[serde(default)]
    pub description: Option<String>,

    /// 出处：朝代、小说名、电影名、游戏名等
    #[serde(default)]
    pub source: Option<String>,

    /// 人格向量
    #[serde(default)]
    pub personality: PersonalityVector,

    /// 生命周期
    #[serde(default)]
    pub life_cycle: LifeCycle,

    /// 互动统计
    #[serde(default)]
    pub stats: RoleStats,

    /// 驱动该角色的大模型
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// 创建时间
    #[serde(default, with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    /// 最后活跃时间
    #[serde(default, with = "crate::models::timestamp")]
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Role {
    /// 帖子中内嵌的作者摘要
    pub fn summary(&self) -> RoleSummary {
        RoleSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
            camp: self.camp,
            is_historical: self.is_historical,
            title: self.title.clone(),
        }
    }
}

/// 角色摘要，上游在帖子中内嵌的作者信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub camp: Camp,
    #[serde(default)]
    pub is_historical: bool,
    #[serde(default)]
    pub title: Option<String>,
}
