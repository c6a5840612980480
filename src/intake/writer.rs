// 落盘写入
// 本模块是整个服务唯一的磁盘副作用入口

use std::io;
use std::path::Path;
use tokio::fs;

/// 幂等地确保输出目录存在
///
/// 目录已存在不是错误，并发调用安全（启动时和每次请求时都会调用）
pub async fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir).await
}

/// 将字节写入 `{dir}/{filename}`，返回写入的字节数
///
/// 新建文件覆盖式写入；目录不存在时直接失败，由调用方保证目录已就绪。
/// 写入中途失败不做清理，可能残留半写文件（本工具可接受）。
pub async fn write_file(dir: &Path, filename: &str, bytes: &[u8]) -> io::Result<u64> {
    let path = dir.join(filename);
    fs::write(&path, bytes).await?;
    Ok(bytes.len() as u64)
}
