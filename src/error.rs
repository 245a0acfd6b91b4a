//! 错误处理模块
//!
//! 定义数据访问层的错误类型。读操作在存在本地数据兜底时不会向调用方暴露
//! 传输类错误；单实体查询与管理操作则会把最终错误返回给调用方。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 网络错误（无法连接、连接被重置等）
    #[error("网络错误: {0}")]
    Transport(String),

    /// 远端返回非 2xx 状态码
    #[error("远端服务返回 {status}: {body}")]
    Status {
        /// HTTP 状态码
        status: u16,
        /// 响应体文本
        body: String,
    },

    /// 响应体无法解析为预期结构
    #[error("响应解析失败: {0}")]
    Decode(String),

    /// 数据源被配置禁用（强制使用本地数据）
    #[error("数据源已禁用: {0}")]
    SourceDisabled(String),

    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl AppError {
    /// 稳定的错误代码，用于日志字段
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => "TRANSPORT",
            AppError::Status { .. } => "UPSTREAM_STATUS",
            AppError::Decode(_) => "DECODE",
            AppError::SourceDisabled(_) => "SOURCE_DISABLED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Config(_) => "CONFIG",
            AppError::Serialization(_) => "SERIALIZATION",
            AppError::Io(_) => "IO",
        }
    }

    /// 是否为远端数据结构不符
    pub fn is_decode(&self) -> bool {
        matches!(self, AppError::Decode(_))
    }

    /// 是否为资源不存在
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            AppError::Status {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Transport("x".into()).code(), "TRANSPORT");
        assert_eq!(
            AppError::Status {
                status: 503,
                body: "down".into()
            }
            .code(),
            "UPSTREAM_STATUS"
        );
        assert_eq!(AppError::NotFound("Role not found: r1".into()).code(), "NOT_FOUND");
    }

    #[test]
    fn test_not_found_message_is_readable() {
        let err = AppError::NotFound("Role not found: nonexistent-id".into());
        assert!(err.to_string().contains("Role not found"));
        assert!(err.is_not_found());
        assert!(!err.is_decode());
    }

    #[test]
    fn test_status_message_carries_body() {
        let err = AppError::Status {
            status: 404,
            body: r#"{"detail":"Role not found"}"#.into(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Role not found"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: AppError = parse.unwrap_err().into();
        assert_eq!(err.code(), "SERIALIZATION");
    }
}
