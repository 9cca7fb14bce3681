// ==========================================
// 助教聘任管理系统 - 字段读取器
// ==========================================
// 职责: 规范化记录 → 强类型字段（容忍表格常见怪癖）
// - 数字以文本出现 / 文本以数字出现
// - 空白视为缺失
// - 列表字段可为数组或 "a, b; c" 形式的文本
// - 数组字段可为 JSON 文本（表格单元格内导出的 JSON）
// ==========================================

use crate::importer::date_normalizer::parse_naive_date;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema::Record;
use chrono::NaiveDate;
use serde_json::Value;

pub struct FieldMapper<'a> {
    record: &'a Record,
    row_number: usize,
}

impl<'a> FieldMapper<'a> {
    pub fn new(record: &'a Record, row_number: usize) -> Self {
        Self { record, row_number }
    }

    /// 取非空单元格值
    pub fn get_value(&self, key: &str) -> Option<&'a Value> {
        match self.record.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => Some(v),
        }
    }

    /// 提取字符串字段（数字按文本处理，整数不带小数点）
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get_value(key)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => i.to_string(),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                    _ => n.to_string(),
                },
            }),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// 提取必填字符串字段
    pub fn require_string(&self, key: &str) -> ImportResult<String> {
        self.get_string(key)
            .ok_or_else(|| self.conversion_error(key, "字段缺失".to_string()))
    }

    /// 解析浮点数
    pub fn parse_f64(&self, key: &str) -> ImportResult<Option<f64>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.conversion_error(key, format!("无法解析为浮点数: {}", n))),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| self.conversion_error(key, format!("无法解析为浮点数: {}", s))),
            Some(other) => Err(self.conversion_error(key, format!("无法解析为浮点数: {}", other))),
        }
    }

    /// 解析必填浮点数
    pub fn require_f64(&self, key: &str) -> ImportResult<f64> {
        self.parse_f64(key)?
            .ok_or_else(|| self.conversion_error(key, "字段缺失".to_string()))
    }

    /// 解析整数（允许 12.0 这类整值浮点）
    pub fn parse_i64(&self, key: &str) -> ImportResult<Option<i64>> {
        let Some(value) = self.parse_f64(key)? else {
            return Ok(None);
        };
        if value.fract() != 0.0 {
            return Err(self.conversion_error(key, format!("无法解析为整数: {}", value)));
        }
        Ok(Some(value as i64))
    }

    /// 解析日期（规范日期串 / 序列号 / 文本）
    pub fn parse_date(&self, key: &str) -> ImportResult<Option<NaiveDate>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(value) => parse_naive_date(value).map(Some),
        }
    }

    pub fn require_date(&self, key: &str) -> ImportResult<NaiveDate> {
        self.parse_date(key)?
            .ok_or_else(|| self.conversion_error(key, "字段缺失".to_string()))
    }

    /// 解析字符串列表（数组或以 , ; 换行 分隔的文本）
    pub fn parse_string_list(&self, key: &str) -> ImportResult<Vec<String>> {
        match self.get_value(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| match v {
                    Value::String(s) => Ok(s.trim().to_string()),
                    other => Err(self.conversion_error(key, format!("列表元素不是文本: {}", other))),
                })
                .filter(|r| !matches!(r, Ok(s) if s.is_empty()))
                .collect(),
            Some(Value::String(s)) => Ok(s
                .split([',', ';', '\n'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()),
            Some(other) => Err(self.conversion_error(key, format!("无法解析为列表: {}", other))),
        }
    }

    /// 解析对象数组（数组或单元格中的 JSON 文本）
    pub fn parse_object_list(&self, key: &str) -> ImportResult<Option<Vec<Record>>> {
        let items = match self.get_value(key) {
            None => return Ok(None),
            Some(Value::Array(items)) => items.clone(),
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(items)) => items,
                _ => {
                    return Err(self.conversion_error(key, format!("无法解析为 JSON 数组: {}", s)))
                }
            },
            Some(other) => {
                return Err(self.conversion_error(key, format!("无法解析为数组: {}", other)))
            }
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(self.conversion_error(key, format!("数组元素不是对象: {}", other))),
            })
            .collect::<ImportResult<Vec<_>>>()
            .map(Some)
    }

    fn conversion_error(&self, key: &str, message: String) -> ImportError {
        ImportError::TypeConversion {
            row: self.row_number,
            field: key.to_string(),
            message,
        }
    }
}
