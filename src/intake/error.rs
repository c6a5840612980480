// 内容接收错误类型

use crate::intake::types::ContentKind;

/// 接收处理错误码
/// 错误码范围：41001 - 41099（客户端）、51001 - 51099（服务端）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeErrorCode {
    /// 内容为空或缺失
    EmptyContent = 41001,
    /// 声明的内容类型无效
    InvalidContentType = 41002,
    /// 载荷格式错误（data URI 缺少逗号分隔符、base64 解码失败等）
    MalformedPayload = 41003,
    /// 文件写入失败
    WriteFailed = 51001,
}

impl IntakeErrorCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// 是否为客户端错误（映射为 HTTP 400）
    pub fn is_client_error(&self) -> bool {
        self.code() < 50000
    }
}

/// 接收处理错误
///
/// message 即返回给客户端的错误文案
#[derive(Debug)]
pub struct IntakeError {
    pub code: IntakeErrorCode,
    pub message: String,
}

impl IntakeError {
    /// 内容为空
    pub fn empty_content() -> Self {
        Self {
            code: IntakeErrorCode::EmptyContent,
            message: "No content provided".to_string(),
        }
    }

    /// 声明类型无效
    pub fn invalid_content_type() -> Self {
        Self {
            code: IntakeErrorCode::InvalidContentType,
            message: "Invalid content type".to_string(),
        }
    }

    /// 某类内容处理失败（格式/解码问题）
    pub fn process_failed(kind: ContentKind, detail: impl std::fmt::Display) -> Self {
        Self {
            code: IntakeErrorCode::MalformedPayload,
            message: format!("Failed to process {}: {}", kind.as_str(), detail),
        }
    }

    /// 服务端错误（文件系统不可用、权限不足等）
    pub fn server(detail: impl std::fmt::Display) -> Self {
        Self {
            code: IntakeErrorCode::WriteFailed,
            message: format!("Server error: {}", detail),
        }
    }
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IntakeError {}
