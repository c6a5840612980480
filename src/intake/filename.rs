// 唯一文件名生成

use crate::intake::types::ContentKind;
use chrono::Local;
use uuid::Uuid;

/// 生成带时间戳的唯一文件名
///
/// 格式：`{YYYYMMDD_HHMMSS}_{8位随机标识}.{扩展名}`
///
/// 时间戳为本地时间、秒级精度，保证按时间排序；随机后缀保证同一秒内
/// 并发请求的文件名不冲突（概率意义上，不做存在性检查）。
/// 显式指定的扩展名优先，否则按类型取默认扩展名。
pub fn generate_filename(kind: ContentKind, extension: Option<&str>) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let unique_id = short_token();
    let ext = extension.unwrap_or_else(|| kind.default_extension());
    format!("{}_{}.{}", timestamp, unique_id, ext)
}

/// 8 位随机标识（UUIDv4 十六进制表示的前 8 位）
fn short_token() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    uuid[..8].to_string()
}
