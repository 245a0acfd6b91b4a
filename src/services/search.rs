//! 本地文本搜索
//!
//! 在已取回的结果上做大小写不敏感的子串匹配，不向远端传递搜索参数。

use crate::models::{Circle, Post, Role, WikiEntry};

/// 可被文本搜索的实体
pub trait TextSearchable {
    /// 参与匹配的字段
    fn search_fields(&self) -> Vec<&str>;
}

impl TextSearchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.title.as_deref());
        fields.extend(self.source.as_deref());
        fields
    }
}

impl TextSearchable for Post {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl TextSearchable for WikiEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl TextSearchable for Circle {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

/// 任一字段包含 `needle`（忽略大小写）。空串匹配所有实体。
pub fn matches_text<T: TextSearchable + ?Sized>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// 保序过滤
pub fn filter_by_text<T: TextSearchable + Clone>(items: &[T], needle: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_text(*item, needle))
        .cloned()
        .collect()
}
