// 内容接收核心模块
// 负责分类、扩展名推断、文件名生成与落盘

pub mod classify;
pub mod error;
pub mod filename;
pub mod heuristic;
pub mod service;
pub mod types;
pub mod writer;

pub use classify::{infer_email_extension, infer_image_extension, split_data_uri};
pub use error::{IntakeError, IntakeErrorCode};
pub use filename::generate_filename;
pub use heuristic::{looks_like_email, looks_like_email_bytes};
pub use service::IntakeService;
pub use types::{ContentKind, StoreOutcome};
pub use writer::{ensure_output_dir, write_file};
