// 内容接收服务
// 按声明类型分发到各处理分支，完成分类、解码与落盘

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::intake::classify::{infer_email_extension, infer_image_extension, split_data_uri};
use crate::intake::error::IntakeError;
use crate::intake::filename::generate_filename;
use crate::intake::heuristic::looks_like_email;
use crate::intake::types::{ContentKind, StoreOutcome};
use crate::intake::writer::{ensure_output_dir, write_file};

/// 邮件二进制附件的 data URI 前缀
const DATA_URI_PREFIX: &str = "data:";

/// 内容接收服务
///
/// 每次请求独立无状态，唯一的依赖是注入的存储配置（输出目录），
/// 因此可以用临时目录单独测试
pub struct IntakeService {
    config: StorageConfig,
}

impl IntakeService {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// 接收一次提交并落盘
    ///
    /// `declared_type` 是调用方声明的类型字符串（不可信，仅作路由提示），
    /// `content` 是载荷（纯文本或 `头部,base64` 形式的 data URI 字符串）
    pub async fn store(
        &self,
        declared_type: &str,
        content: &str,
    ) -> Result<StoreOutcome, IntakeError> {
        if content.is_empty() {
            return Err(IntakeError::empty_content());
        }

        let kind = ContentKind::parse(declared_type).ok_or_else(IntakeError::invalid_content_type)?;

        match kind {
            ContentKind::Text => self.store_text(content).await,
            ContentKind::Image => self.store_image(content).await,
            ContentKind::Email => self.store_email(content).await,
        }
    }

    /// 纯文本分支：按 UTF-8 原样写入，不校验内容
    async fn store_text(&self, content: &str) -> Result<StoreOutcome, IntakeError> {
        let filename = generate_filename(ContentKind::Text, None);
        let bytes_written = self.persist(&filename, content.as_bytes()).await?;
        Ok(StoreOutcome {
            kind: ContentKind::Text,
            filename,
            bytes_written,
        })
    }

    /// 图片分支：拆分 data URI，推断扩展名，base64 解码后按二进制写入
    async fn store_image(&self, content: &str) -> Result<StoreOutcome, IntakeError> {
        let (header, body) = split_data_uri(content).ok_or_else(|| {
            IntakeError::process_failed(
                ContentKind::Image,
                "missing comma separator in data URI",
            )
        })?;

        let extension = infer_image_extension(header);
        let data = BASE64_STANDARD
            .decode(body)
            .map_err(|e| IntakeError::process_failed(ContentKind::Image, e))?;

        let filename = generate_filename(ContentKind::Image, Some(extension));
        if !self.config.is_valid_image_extension(&filename) {
            // 推断结果不在配置的允许集合内，仍然落盘但记录告警
            warn!("推断的图片扩展名不在允许集合内: {}", filename);
        }

        let bytes_written = self.persist(&filename, &data).await?;
        Ok(StoreOutcome {
            kind: ContentKind::Image,
            filename,
            bytes_written,
        })
    }

    /// 邮件分支
    ///
    /// data URI 前缀视为二进制附件（.msg/.eml），否则对文本做启发式
    /// 判定：像邮件的存成 .eml，不像的回退为纯文本处理
    async fn store_email(&self, content: &str) -> Result<StoreOutcome, IntakeError> {
        if content.starts_with(DATA_URI_PREFIX) {
            let (header, body) = split_data_uri(content).ok_or_else(|| {
                IntakeError::process_failed(
                    ContentKind::Email,
                    "missing comma separator in data URI",
                )
            })?;

            let data = BASE64_STANDARD
                .decode(body)
                .map_err(|e| IntakeError::process_failed(ContentKind::Email, e))?;

            let extension = infer_email_extension(header, &data);
            let filename = generate_filename(ContentKind::Email, Some(extension));
            let bytes_written = self.persist(&filename, &data).await?;
            return Ok(StoreOutcome {
                kind: ContentKind::Email,
                filename,
                bytes_written,
            });
        }

        if looks_like_email(content) {
            let filename = generate_filename(ContentKind::Email, Some("eml"));
            let bytes_written = self.persist(&filename, content.as_bytes()).await?;
            Ok(StoreOutcome {
                kind: ContentKind::Email,
                filename,
                bytes_written,
            })
        } else {
            // 不像邮件的文本回退为纯文本处理
            debug!("文本未达到邮件标记阈值，按纯文本存储");
            self.store_text(content).await
        }
    }

    /// 确保目录存在后写入（IO 失败统一映射为服务端错误）
    async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<u64, IntakeError> {
        ensure_output_dir(&self.config.output_dir)
            .await
            .map_err(IntakeError::server)?;
        write_file(&self.config.output_dir, filename, bytes)
            .await
            .map_err(IntakeError::server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::error::IntakeErrorCode;
    use std::path::Path;
    use tempfile::TempDir;

    fn service_for(dir: &Path) -> IntakeService {
        IntakeService::new(StorageConfig {
            output_dir: dir.to_path_buf(),
            ..StorageConfig::default()
        })
    }

    fn stored_files(dir: &Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[tokio::test]
    async fn test_store_text_roundtrip() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let outcome = service.store("text", "你好, world").await.unwrap();
        assert_eq!(outcome.kind, ContentKind::Text);
        assert!(outcome.filename.ends_with(".txt"));

        // 存储的 UTF-8 内容与输入逐字节一致
        let stored = std::fs::read(dir.path().join(&outcome.filename)).unwrap();
        assert_eq!(stored, "你好, world".as_bytes());
        assert_eq!(outcome.bytes_written, stored.len() as u64);
    }

    #[tokio::test]
    async fn test_store_image_png_roundtrip() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let raw: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let payload = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(raw));

        let outcome = service.store("image", &payload).await.unwrap();
        assert!(outcome.filename.ends_with(".png"));
        assert_eq!(outcome.message(), format!("Image saved as {}", outcome.filename));

        // 落盘字节与解码后的输入完全一致
        let stored = std::fs::read(dir.path().join(&outcome.filename)).unwrap();
        assert_eq!(stored, raw);
    }

    #[tokio::test]
    async fn test_store_image_header_precedence() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        // 头部同时含 jpeg 和 svg 时按 jpeg 处理
        let payload = format!("data:image/jpeg;svg;base64,{}", BASE64_STANDARD.encode(b"x"));
        let outcome = service.store("image", &payload).await.unwrap();
        assert!(outcome.filename.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_store_image_without_comma_is_client_error() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let err = service.store("image", "not-a-data-uri").await.unwrap_err();
        assert_eq!(err.code, IntakeErrorCode::MalformedPayload);
        assert!(err.message.starts_with("Failed to process image:"));
        // 不产生任何落盘
        assert!(stored_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_store_image_bad_base64_is_client_error() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let err = service
            .store("image", "data:image/png;base64,@@not-base64@@")
            .await
            .unwrap_err();
        assert_eq!(err.code, IntakeErrorCode::MalformedPayload);
        assert!(err.message.starts_with("Failed to process image:"));
        assert!(stored_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_store_email_text_with_markers() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let text = "From: a@b.com\nTo: c@d.com\nSubject: hi\n\nbody";
        let outcome = service.store("email", text).await.unwrap();
        assert_eq!(outcome.kind, ContentKind::Email);
        assert!(outcome.filename.ends_with(".eml"));

        let stored = std::fs::read_to_string(dir.path().join(&outcome.filename)).unwrap();
        assert_eq!(stored, text);
    }

    #[tokio::test]
    async fn test_store_email_text_fallback_to_plain() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        // 仅一个标记，达不到阈值，回退为纯文本
        let outcome = service.store("email", "From: a@b.com\n").await.unwrap();
        assert_eq!(outcome.kind, ContentKind::Text);
        assert!(outcome.filename.ends_with(".txt"));
    }

    #[tokio::test]
    async fn test_store_email_binary_ole_sniff() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        // 头部无线索，靠 OLE 魔数判定为 .msg
        let raw: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        let payload = format!(
            "data:application/octet-stream;base64,{}",
            BASE64_STANDARD.encode(raw)
        );
        let outcome = service.store("email", &payload).await.unwrap();
        assert!(outcome.filename.ends_with(".msg"));

        let stored = std::fs::read(dir.path().join(&outcome.filename)).unwrap();
        assert_eq!(stored, raw);
    }

    #[tokio::test]
    async fn test_store_email_binary_header_hint() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let payload = format!(
            "data:message/rfc822;EML;base64,{}",
            BASE64_STANDARD.encode(b"From: x")
        );
        let outcome = service.store("email", &payload).await.unwrap();
        assert!(outcome.filename.ends_with(".eml"));
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let err = service.store("text", "").await.unwrap_err();
        assert_eq!(err.code, IntakeErrorCode::EmptyContent);
        assert_eq!(err.message, "No content provided");
        assert!(stored_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_type_rejected_without_write() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        let err = service.store("video", "some content").await.unwrap_err();
        assert_eq!(err.code, IntakeErrorCode::InvalidContentType);
        assert_eq!(err.message, "Invalid content type");
        assert!(stored_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_rapid_submissions_get_distinct_filenames() {
        let dir = TempDir::new().unwrap();
        let service = service_for(dir.path());

        // 同一秒内的两次提交必须得到不同文件名
        let first = service.store("text", "one").await.unwrap();
        let second = service.store("text", "two").await.unwrap();
        assert_ne!(first.filename, second.filename);
        assert_eq!(stored_files(dir.path()).len(), 2);
    }

    #[tokio::test]
    async fn test_output_dir_created_on_demand() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("not-yet-created");
        let service = service_for(&nested);

        // 输出目录在请求时幂等创建
        let outcome = service.store("text", "hello").await.unwrap();
        assert!(nested.join(&outcome.filename).is_file());
    }
}
