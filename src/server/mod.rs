// Web服务器模块

pub mod handlers;
pub mod state;

pub use state::AppState;
