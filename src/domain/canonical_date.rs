// ==========================================
// 助教聘任管理系统 - 规范日期序列化
// ==========================================
// 职责: 最小表示中的日期统一输出为 YYYY-MM-DDT00:00:00.000Z，
//       读取时复用宽松日期解析（Excel 序列号 / 多种文本格式）
// 用法: #[serde(with = "canonical_date")]
// ==========================================

use crate::importer::date_normalizer::{format_canonical, parse_naive_date};
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_canonical(*date))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_naive_date(&value).map_err(de::Error::custom)
}

/// Option<NaiveDate> 版本（null / 缺省 → None）
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&format_canonical(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }
        parse_naive_date(&value).map(Some).map_err(de::Error::custom)
    }
}
