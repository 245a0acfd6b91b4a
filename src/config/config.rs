use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// 远端服务默认地址（本地开发）
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// 远端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// 服务基础地址，不含末尾斜杠
    #[validate(url)]
    pub base_url: String,
    /// 强制使用本地数据，跳过远端请求
    pub use_mock_data: bool,
    /// 替换内置数据集的 JSON 文件
    pub fixture_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            use_mock_data: true,
            fixture_path: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（EnvFilter 语法）
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 远端 API 配置
    pub api: ApiConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "agentcircle".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.api.use_mock_data = false;
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forces_mock_data() {
        let config = AppConfig::default();
        assert!(config.api.use_mock_data);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.fixture_path.is_none());
    }

    #[test]
    fn test_production_uses_remote() {
        let config = AppConfig::production();
        assert!(!config.api.use_mock_data);
        assert_eq!(config.environment, "production");
        assert!(config.logging.structured);
    }

    #[test]
    fn test_partial_api_section_keeps_defaults() {
        let api: ApiConfig = serde_json::from_str(r#"{"use_mock_data": false}"#).unwrap();
        assert!(!api.use_mock_data);
        assert_eq!(api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_must_be_url() {
        let mut api = ApiConfig::default();
        assert!(api.validate().is_ok());

        api.base_url = "not a url".into();
        assert!(api.validate().is_err());
    }
}
