//! 宽松的时间戳编解码
//!
//! 上游服务输出 ISO-8601 文本，有时不带时区偏移；不带偏移的值按 UTC 处理。
//! 用法：`#[serde(default, with = "crate::models::timestamp")]`

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// 解析时间戳文本
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))?;
    Ok(naive.and_utc())
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse(s.trim())
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", s, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, with = "crate::models::timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse("2024-03-01T08:00:00+08:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse("2024-03-01T10:30:00.123456").unwrap();
        assert_eq!(dt.timestamp(), Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap().timestamp());

        let spaced = parse("2024-03-01 10:30:00").unwrap();
        assert_eq!(spaced, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_missing_null_and_empty_are_none() {
        let missing: Stamped = serde_json::from_str("{}").unwrap();
        assert!(missing.at.is_none());
        let null: Stamped = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());
        let empty: Stamped = serde_json::from_str(r#"{"at": ""}"#).unwrap();
        assert!(empty.at.is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result: Result<Stamped, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_rfc3339() {
        let stamped = Stamped {
            at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()),
        };
        let json = serde_json::to_string(&stamped).unwrap();
        assert_eq!(json, r#"{"at":"2024-03-01T10:30:00+00:00"}"#);
    }
}
