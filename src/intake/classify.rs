// 扩展名推断
// 依据 data URI 头部的子串匹配与内容嗅探决定存储扩展名

/// 图片扩展名推断规则
///
/// 按优先级排列，首个命中生效，大小写敏感。
/// 顺序有意义：头部可能同时包含多个子串（如 `image/svg+xml;jpeg` 这类
/// 畸形头部），jpeg 规则必须先于 svg 检查。
const IMAGE_HEADER_RULES: &[(&str, &str)] = &[
    ("png", "png"),
    ("jpeg", "jpg"),
    ("jpg", "jpg"),
    ("gif", "gif"),
    ("webp", "webp"),
    ("svg", "svg"),
];

/// 未命中任何规则时的默认图片扩展名
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// OLE 复合文件魔数，Outlook .msg 等遗留二进制格式的签名
const OLE_SIGNATURE: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// 在首个逗号处拆分 data URI 风格字符串为（头部, base64 正文）
///
/// 头部不做进一步校验；没有逗号返回 None（致命格式错误，由调用方上报）
pub fn split_data_uri(content: &str) -> Option<(&str, &str)> {
    content.split_once(',')
}

/// 从 data URI 头部推断图片扩展名
pub fn infer_image_extension(header: &str) -> &'static str {
    for (needle, extension) in IMAGE_HEADER_RULES {
        if header.contains(needle) {
            return extension;
        }
    }
    DEFAULT_IMAGE_EXTENSION
}

/// 推断邮件附件扩展名
///
/// 优先看头部声明（大小写不敏感），头部没有线索时嗅探解码后的
/// 字节：OLE 魔数开头视为 .msg，否则视为 .eml
pub fn infer_email_extension(header: &str, data: &[u8]) -> &'static str {
    let header_lower = header.to_lowercase();
    if header_lower.contains("msg") {
        "msg"
    } else if header_lower.contains("eml") {
        "eml"
    } else if data.starts_with(&OLE_SIGNATURE) {
        "msg"
    } else {
        "eml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_data_uri() {
        assert_eq!(
            split_data_uri("data:image/png;base64,AAAA"),
            Some(("data:image/png;base64", "AAAA"))
        );
        // 只在首个逗号处拆分
        assert_eq!(split_data_uri("a,b,c"), Some(("a", "b,c")));
        assert_eq!(split_data_uri("not-a-data-uri"), None);
    }

    #[test]
    fn test_image_extension_basic() {
        assert_eq!(infer_image_extension("data:image/png;base64"), "png");
        assert_eq!(infer_image_extension("data:image/jpeg;base64"), "jpg");
        assert_eq!(infer_image_extension("data:image/gif;base64"), "gif");
        assert_eq!(infer_image_extension("data:image/webp;base64"), "webp");
        assert_eq!(infer_image_extension("data:image/svg+xml;base64"), "svg");
    }

    #[test]
    fn test_image_extension_precedence() {
        // jpeg 在 svg 之前检查
        assert_eq!(infer_image_extension("jpeg+svg"), "jpg");
        // png 优先级最高
        assert_eq!(infer_image_extension("svg png jpeg"), "png");
    }

    #[test]
    fn test_image_extension_default() {
        assert_eq!(infer_image_extension(""), "png");
        assert_eq!(infer_image_extension("data:image/bmp;base64"), "png");
    }

    #[test]
    fn test_image_extension_case_sensitive() {
        // 头部匹配大小写敏感，大写 PNG 不命中规则，落到默认值
        assert_eq!(infer_image_extension("data:image/PNG;base64"), "png");
        assert_eq!(infer_image_extension("data:image/JPEG;base64"), "png");
    }

    #[test]
    fn test_email_extension_from_header() {
        assert_eq!(infer_email_extension("data:application/vnd.ms-outlook;MSG", b""), "msg");
        assert_eq!(infer_email_extension("data:message/rfc822;eml", b""), "eml");
        // msg 先于 eml 检查
        assert_eq!(infer_email_extension("msg-or-eml", b""), "msg");
    }

    #[test]
    fn test_email_extension_sniff() {
        let ole = [0xD0u8, 0xCF, 0x11, 0xE0, 0xA1, 0xB1];
        assert_eq!(infer_email_extension("data:application/octet-stream", &ole), "msg");
        assert_eq!(
            infer_email_extension("data:application/octet-stream", b"From: a@b.com"),
            "eml"
        );
        // 不足 4 字节不可能命中魔数
        assert_eq!(infer_email_extension("", &[0xD0, 0xCF]), "eml");
    }

    proptest! {
        #[test]
        fn prop_image_extension_is_always_known(header in ".*") {
            let ext = infer_image_extension(&header);
            prop_assert!(["png", "jpg", "gif", "webp", "svg"].contains(&ext));
        }

        #[test]
        fn prop_email_extension_is_msg_or_eml(header in ".*", data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let ext = infer_email_extension(&header, &data);
            prop_assert!(ext == "msg" || ext == "eml");
        }
    }
}
