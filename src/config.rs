use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::cafe::model::{sample_cafes, Cafe};

/// 配置文件路径的环境变量
pub const CONFIG_ENV: &str = "CAFES_CONFIG";
/// 端口覆盖的环境变量
pub const PORT_ENV: &str = "PORT";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/cafes.toml";

/// 服务配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 数据配置
    pub store: StoreConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 初始数据配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON 格式的初始数据文件，未设置时使用内置示例数据
    pub seed_file: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// 按 CAFES_CONFIG、默认路径、内置默认值的顺序加载，再应用 PORT 覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(port) = env::var(PORT_ENV) {
            config.http.port = port
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的端口: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("超时时间必须大于0".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.bind_address, self.http.port)
    }

    /// 读取初始数据
    pub fn seed_cafes(&self) -> Result<Vec<Cafe>, ConfigError> {
        let Some(path) = &self.store.seed_file else {
            return Ok(sample_cafes());
        };

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(e.to_string()))?;
        let cafes: Vec<Cafe> =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        validate_seed(&cafes)?;
        Ok(cafes)
    }
}

/// 初始数据至少一条，且 id 不重复
fn validate_seed(cafes: &[Cafe]) -> Result<(), ConfigError> {
    if cafes.is_empty() {
        return Err(ConfigError::Validation("初始数据不能为空".to_string()));
    }

    for (i, cafe) in cafes.iter().enumerate() {
        if cafes[..i].iter().any(|c| c.id == cafe.id) {
            return Err(ConfigError::Validation(format!(
                "初始数据中存在重复的 id: {}",
                cafe.id
            )));
        }
    }

    Ok(())
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_temp(
            r#"
[http]
port = 8081

[logging]
level = "debug"
"#,
        );

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.level, "debug");
        assert!(config.store.seed_file.is_none());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load_from_file("/nonexistent/cafes.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let file = write_temp("[http\nport = ");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.http.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn seed_defaults_to_sample_data() {
        let cafes = Config::default().seed_cafes().unwrap();
        assert_eq!(cafes, sample_cafes());
    }

    #[test]
    fn seed_file_is_loaded() {
        let seed = write_temp(
            r#"[{"id": 10, "nombre": "Latte", "precio": 3.1, "descripcion": "Leche"},
                {"id": "11", "nombre": "Ristretto", "precio": 2.2, "descripcion": "Corto"}]"#,
        );

        let mut config = Config::default();
        config.store.seed_file = Some(seed.path().to_path_buf());

        let cafes = config.seed_cafes().unwrap();
        assert_eq!(cafes.len(), 2);
        assert_eq!(cafes[1].id, 11);
    }

    #[test]
    fn empty_seed_file_is_rejected() {
        let seed = write_temp("[]");

        let mut config = Config::default();
        config.store.seed_file = Some(seed.path().to_path_buf());

        let err = config.seed_cafes().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let seed = write_temp(
            r#"[{"id": 1, "nombre": "Cortado", "precio": 2.5, "descripcion": "Corto"},
                {"id": "1", "nombre": "Americano", "precio": 2.0, "descripcion": "Largo"}]"#,
        );

        let mut config = Config::default();
        config.store.seed_file = Some(seed.path().to_path_buf());

        let err = config.seed_cafes().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn app_refuses_empty_seed() {
        let seed = write_temp("[]");

        let mut config = Config::default();
        config.store.seed_file = Some(seed.path().to_path_buf());

        assert!(crate::app_from_config(&config).is_err());
    }
}
