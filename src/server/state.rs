// 应用状态

use crate::config::AppConfig;
use crate::intake::IntakeService;
use std::sync::Arc;

/// 应用全局状态
///
/// 请求之间不共享可变状态，配置在启动时构造一次后只读
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Arc<AppConfig>,
    /// 内容接收服务
    pub intake: Arc<IntakeService>,
}

impl AppState {
    /// 创建新的应用状态
    pub async fn new() -> anyhow::Result<Self> {
        // 加载配置
        let config = AppConfig::load_or_default("config/app.toml").await;
        Ok(Self::from_config(config))
    }

    /// 从给定配置构造（测试时注入临时目录）
    pub fn from_config(config: AppConfig) -> Self {
        let intake = IntakeService::new(config.storage.clone());
        Self {
            config: Arc::new(config),
            intake: Arc::new(intake),
        }
    }
}
