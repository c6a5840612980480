// 内容接收模块数据类型定义

use serde::{Deserialize, Serialize};

/// 声明的内容类型
///
/// 由调用方声明，仅作为处理分支的路由提示，不代表载荷的真实格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// 纯文本
    Text,
    /// 图片（data URI 载荷）
    Image,
    /// 邮件（文本或二进制附件）
    Email,
}

impl ContentKind {
    /// 解析调用方声明的类型字符串
    ///
    /// 未识别的值返回 None（调用方输入不可信）
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    /// 类型的小写字符串表示（用于错误消息）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Email => "email",
        }
    }

    /// 类型的首字母大写表示（用于成功消息）
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Email => "Email",
        }
    }

    /// 未显式指定扩展名时的默认扩展名
    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Email => "msg",
            _ => "bin",
        }
    }
}

/// 一次落盘操作的结果
#[derive(Debug, Clone, Serialize)]
pub struct StoreOutcome {
    /// 实际存储的类型（邮件文本可能回退为纯文本）
    pub kind: ContentKind,
    /// 生成的文件名
    pub filename: String,
    /// 写入的字节数
    #[serde(rename = "bytesWritten")]
    pub bytes_written: u64,
}

impl StoreOutcome {
    /// 面向客户端的成功消息
    pub fn message(&self) -> String {
        format!("{} saved as {}", self.kind.label(), self.filename)
    }
}
