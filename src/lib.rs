// Drop Station Rust 核心库
// 拖放内容接收与落盘服务

// 配置管理模块
pub mod config;

// 日志系统模块
pub mod logging;

// 内容接收核心模块（分类/扩展名推断/文件名生成/落盘）
pub mod intake;

// Web服务器模块
pub mod server;

// 导出常用类型
pub use config::{AppConfig, LogConfig, ServerConfig, StorageConfig};
pub use intake::{
    generate_filename, looks_like_email, ContentKind, IntakeError, IntakeErrorCode,
    IntakeService, StoreOutcome,
};
pub use server::AppState;
