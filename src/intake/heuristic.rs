// 邮件相似度启发式判定

/// 邮件头标记子串（匹配时大小写不敏感）
const EMAIL_MARKERS: [&str; 9] = [
    "from:",
    "to:",
    "subject:",
    "date:",
    "return-path:",
    "message-id:",
    "content-type:",
    "received:",
    "mime-version:",
];

/// 至少命中该数量的不同标记才判定为邮件
const EMAIL_MARKER_THRESHOLD: usize = 3;

/// 判断一段文本是否像邮件
///
/// 粗粒度启发式，不是邮件解析器：统计文本中出现了多少种不同的
/// 邮件头标记，达到阈值即判定为邮件。对残缺/畸形的邮件文本同样
/// 适用，任何输入都不会失败。
pub fn looks_like_email(text: &str) -> bool {
    let lower = text.to_lowercase();
    let hits = EMAIL_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();
    hits >= EMAIL_MARKER_THRESHOLD
}

/// 字节输入的变体：按 UTF-8 宽松解码后判定（无效序列被替换，不报错）
pub fn looks_like_email_bytes(data: &[u8]) -> bool {
    looks_like_email(&String::from_utf8_lossy(data))
}
