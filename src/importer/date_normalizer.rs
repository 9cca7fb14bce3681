// ==========================================
// 助教聘任管理系统 - 日期规范化
// ==========================================
// 职责: Excel 序列号 / 多种文本日期 → 规范日期字符串
// 输出: YYYY-MM-DDT00:00:00.000Z（UTC 零点，丢弃时分秒）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// 规范日期格式（仅日期，UTC 零点）
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%dT00:00:00.000Z";

/// 1970-01-01 在 Excel（1900 日期系统）中的序列号
const SPREADSHEET_UNIX_EPOCH_SERIAL: f64 = 25569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// 带时间的文本格式（时间部分丢弃）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// 纯日期文本格式，按顺序尝试
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
    "%a, %b %d, %Y",
    "%a %b %d %Y",
];

/// 解析任意单元格值为规范日期字符串
///
/// # 规则
/// - 数值: 视为 Excel 序列号（无时区），换算为毫秒时间戳后取日期
/// - 字符串: 宽松文本解析（ISO / 斜杠 / 英文月份名 / RFC 2822 等）
/// - 其他: DateParse 错误
pub fn parse_date(value: &Value) -> ImportResult<String> {
    parse_naive_date(value).map(format_canonical)
}

/// 解析任意单元格值为 NaiveDate
pub fn parse_naive_date(value: &Value) -> ImportResult<NaiveDate> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(date_from_serial)
            .ok_or_else(|| date_error(value)),
        Value::String(s) => parse_date_text(s),
        _ => Err(date_error(value)),
    }
}

/// NaiveDate → 规范日期字符串
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Excel 序列号 → 日期
fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - SPREADSHEET_UNIX_EPOCH_SERIAL) * MILLIS_PER_DAY).round() as i64;
    // 序列号不带时区，直接取 UTC 下的日期部分
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// 宽松文本日期解析
pub fn parse_date_text(text: &str) -> ImportResult<NaiveDate> {
    let cleaned = strip_ordinal_suffixes(&text.split_whitespace().collect::<Vec<_>>().join(" "));
    if cleaned.is_empty() {
        return Err(ImportError::DateParse {
            value: text.to_string(),
        });
    }

    // 带时区的时间戳：保留书写时的日期
    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&cleaned) {
        return Ok(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Ok(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Ok(date);
        }
    }

    Err(ImportError::DateParse {
        value: text.to_string(),
    })
}

/// 去掉序数后缀（"1st" → "1", "22nd" → "22"）
fn strip_ordinal_suffixes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        out.push(chars[i]);
        if chars[i].is_ascii_digit() && i + 2 < chars.len() {
            let suffix: String = chars[i + 1..i + 3].iter().collect::<String>().to_lowercase();
            let followed_by_letter = chars.get(i + 3).is_some_and(|c| c.is_alphabetic());
            if matches!(suffix.as_str(), "st" | "nd" | "rd" | "th") && !followed_by_letter {
                i += 3;
                continue;
            }
        }
        i += 1;
    }

    out
}

fn date_error(value: &Value) -> ImportError {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    ImportError::DateParse { value: shown }
}
