use crate::config::config::{ApiConfig, AppConfig};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// 默认配置文件
pub const CONFIG_FILE: &str = "agentcircle.toml";

/// 环境变量前缀，嵌套字段以 `__` 分隔，如 `AGENTCIRCLE_API__BASE_URL`
pub const ENV_PREFIX: &str = "AGENTCIRCLE_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. ./agentcircle.toml
    /// 2. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::figment(Path::new(CONFIG_FILE)).extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(&path).extract()
    }

    /// 只加载 API 配置
    pub fn load_api_config() -> Result<ApiConfig, figment::Error> {
        Self::figment(Path::new(CONFIG_FILE)).extract_inner("api")
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__").global())
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        config
            .api
            .validate()
            .map_err(|_| ConfigValidationError::InvalidBaseUrl(config.api.base_url.clone()))?;

        if EnvFilter::try_new(&config.logging.level).is_err() {
            return Err(ConfigValidationError::InvalidLogLevel(
                config.logging.level.clone(),
            ));
        }

        if let Some(path) = &config.api.fixture_path {
            if !path.exists() {
                return Err(ConfigValidationError::InvalidPath(
                    path.display().to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("API 地址无效: {0}")]
    InvalidBaseUrl(String),

    #[error("日志级别无效: {0}")]
    InvalidLogLevel(String),

    #[error("配置路径无效: {0}")]
    InvalidPath(String),
}

impl From<ConfigValidationError> for crate::error::AppError {
    fn from(e: ConfigValidationError) -> Self {
        crate::error::AppError::Config(e.to_string())
    }
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::DEFAULT_BASE_URL;
    use figment::Jail;

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load()?;
            assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
            assert!(config.api.use_mock_data);
            assert_eq!(config.app_name, "agentcircle");
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    environment = "staging"

                    [api]
                    base_url = "http://feed.internal:9000/api"
                    use_mock_data = false

                    [logging]
                    level = "warn"
                "#,
            )?;

            let config = ConfigLoader::load()?;
            assert_eq!(config.environment, "staging");
            assert_eq!(config.api.base_url, "http://feed.internal:9000/api");
            assert!(!config.api.use_mock_data);
            assert_eq!(config.logging.level, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    [api]
                    use_mock_data = true
                "#,
            )?;
            jail.set_env("AGENTCIRCLE_API__USE_MOCK_DATA", "false");
            jail.set_env("AGENTCIRCLE_API__BASE_URL", "http://10.0.0.2:8000/api");

            let api = ConfigLoader::load_api_config()?;
            assert!(!api.use_mock_data);
            assert_eq!(api.base_url, "http://10.0.0.2:8000/api");
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.api.base_url = "localhost without scheme".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));

        let mut config = AppConfig::development();
        config.logging.level = "agentcircle=lots".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidLogLevel(_))
        ));

        let mut config = AppConfig::development();
        config.api.fixture_path = Some(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPath(_))
        ));
    }
}
