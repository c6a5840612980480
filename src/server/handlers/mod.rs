// API处理器模块

pub mod store;

pub use store::*;
