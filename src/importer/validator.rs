// ==========================================
// 助教聘任管理系统 - 必填字段校验器
// ==========================================
// 职责:
// 1. required_keys 中任一字段为 null/缺失 → 立即失败（报出记录与字段）
// 2. keys 中缺失的字段一律补为显式 null
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema::{NormalizationSchema, Record};
use serde_json::Value;

/// 校验并补齐一批规范化记录
///
/// # 返回
/// - Ok(()): 全部通过；所有 keys 字段均已存在（值或 null）
/// - Err(Validation): 第一条缺少必填字段的记录
pub fn validate(records: &mut [Record], schema: &NormalizationSchema) -> ImportResult<()> {
    for record in records.iter_mut() {
        for key in schema.required_keys {
            let missing = matches!(record.get(*key), None | Some(Value::Null));
            if missing {
                return Err(ImportError::Validation {
                    record: serde_json::to_string(record)?,
                    field: key.to_string(),
                });
            }
        }

        for key in schema.keys {
            if !record.contains_key(*key) {
                record.insert(key.to_string(), Value::Null);
            }
        }
    }

    Ok(())
}
