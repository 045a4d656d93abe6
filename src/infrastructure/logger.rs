//! 日志基础设施

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// RUST_LOG 优先，否则使用配置中的级别
    pub fn init(config: &LoggingConfig) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

        // 测试中可能重复初始化，忽略失败
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
