// ==========================================
// 助教聘任管理系统 - 数据清洗器
// ==========================================
// 职责: TRIM / 空白 → NULL 标准化
// 范围: 仅作用于字符串单元格，数值/布尔/数组原样保留
// ==========================================

use crate::importer::schema::Record;
use serde_json::Value;

pub struct DataCleaner;

impl DataCleaner {
    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 清洗单个单元格值
    pub fn clean_value(&self, value: Value) -> Value {
        match value {
            Value::String(s) => match self.normalize_null(Some(s)) {
                Some(v) => Value::String(v),
                None => Value::Null,
            },
            other => other,
        }
    }

    /// 清洗整条记录（原地）
    pub fn clean_record(&self, record: &mut Record) {
        for value in record.values_mut() {
            let taken = std::mem::take(value);
            *value = self.clean_value(taken);
        }
    }
}
