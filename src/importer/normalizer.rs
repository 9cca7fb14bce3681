// ==========================================
// 助教聘任管理系统 - 模式驱动规范化器
// ==========================================
// 职责: 统一 JSON / 表格两种输入形态 → 规范字段记录数组
// 流程: 分支提取 → 清洗 → 日期列规范化
// DDAH 特化: 动态发现 Duty N / Hours N 列族，折叠为 duties 列表；
//           缺少 utorid 列时按姓名回落匹配申请人
// ==========================================

use crate::config::ImportConfig;
use crate::domain::person::Applicant;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::date_normalizer::parse_date;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::person_matcher::match_by_utorid_or_name;
use crate::importer::row_mapper::RowMapper;
use crate::importer::schema::{NormalizationSchema, Record, DDAH_SCHEMA};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

// ==========================================
// ImportPayload - 导入载荷
// ==========================================
// 形如 {"fileType": "json", "data": ...} 或 {"fileType": "spreadsheet", "data": [...]}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fileType", content = "data", rename_all = "lowercase")]
pub enum ImportPayload {
    Json(Value),
    Spreadsheet(Vec<Record>), // 已由文件解析器解码为 表头 → 值
}

impl ImportPayload {
    pub fn file_type(&self) -> &'static str {
        match self {
            ImportPayload::Json(_) => "json",
            ImportPayload::Spreadsheet(_) => "spreadsheet",
        }
    }
}

/// 规范化导入载荷
///
/// # 返回
/// - Ok(Vec<Record>): 每条记录只包含 schema.keys 中的字段（缺失字段不出现）
/// - Err(DateParse): 任一日期列无法解析，整批中止
pub fn normalize_import(
    payload: &ImportPayload,
    schema: &NormalizationSchema,
    config: &ImportConfig,
) -> ImportResult<Vec<Record>> {
    let mut records = match payload {
        ImportPayload::Json(data) => project_json(data, schema)?,
        ImportPayload::Spreadsheet(rows) => {
            let mut mapper = RowMapper::new(schema, config.fuzzy_match_threshold);
            let records: Vec<Record> = rows
                .iter()
                .map(|row| mapper.format_row(row, config.log_unmatched_columns))
                .collect();
            debug!(
                matched = mapper.empirical_key_map().len(),
                dropped = mapper.unknown_keys().len(),
                "列名匹配完成"
            );
            records
        }
    };

    finish_records(&mut records, schema)?;

    info!(
        entity = %schema.entity,
        file_type = payload.file_type(),
        count = records.len(),
        "规范化完成"
    );
    Ok(records)
}

/// DDAH 规范化（动态列族 + 申请人姓名回落）
///
/// # 参数
/// - applicants: 申请人名单；仅当某行缺少 applicant 且提供了姓名时需要
pub fn normalize_ddah_import(
    payload: &ImportPayload,
    applicants: Option<&[Applicant]>,
    config: &ImportConfig,
) -> ImportResult<Vec<Record>> {
    let schema = &DDAH_SCHEMA;
    let cleaner = DataCleaner;

    let mut records = match payload {
        ImportPayload::Json(data) => project_json(data, schema)?,
        ImportPayload::Spreadsheet(rows) => {
            let bound = estimate_duty_column_bound(rows, config.duty_column_margin);
            debug!(bound = bound, "DDAH 工作项列上界");

            let mut mapper = RowMapper::with_extra_key_map(
                schema,
                duty_column_key_map(bound),
                config.fuzzy_match_threshold,
            );
            rows.iter()
                .map(|row| {
                    let mut record = mapper.format_row(row, config.log_unmatched_columns);
                    cleaner.clean_record(&mut record);
                    collapse_duties(&mut record);
                    record
                })
                .collect()
        }
    };

    finish_records(&mut records, schema)?;

    for record in records.iter_mut() {
        resolve_applicant(record, applicants, config.fuzzy_match_threshold)?;
    }

    info!(
        file_type = payload.file_type(),
        count = records.len(),
        "DDAH 规范化完成"
    );
    Ok(records)
}

// ==========================================
// JSON 分支
// ==========================================

/// 解开 {baseName: [...]} 包装（也接受裸数组），逐项投影到 schema.keys
fn project_json(data: &Value, schema: &NormalizationSchema) -> ImportResult<Vec<Record>> {
    let inner = match data {
        Value::Object(map) => map.get(schema.base_name).ok_or_else(|| {
            ImportError::MalformedPayload(format!("JSON 中缺少 {} 属性", schema.base_name))
        })?,
        other => other,
    };

    let items = inner.as_array().ok_or_else(|| {
        ImportError::MalformedPayload(format!("{} 不是数组", schema.base_name))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let object = item.as_object().ok_or_else(|| {
                ImportError::MalformedPayload(format!("第 {} 项不是对象", idx + 1))
            })?;
            let mut record = Record::new();
            for key in schema.keys {
                if let Some(value) = object.get(*key) {
                    record.insert(key.to_string(), value.clone());
                }
            }
            Ok(record)
        })
        .collect()
}

// ==========================================
// 公共收尾: 清洗 + 日期列
// ==========================================
fn finish_records(records: &mut [Record], schema: &NormalizationSchema) -> ImportResult<()> {
    let cleaner = DataCleaner;
    for record in records.iter_mut() {
        cleaner.clean_record(record);
        for key in schema.date_columns {
            if let Some(value) = record.get_mut(*key) {
                if !value.is_null() {
                    *value = Value::String(parse_date(value)?);
                }
            }
        }
    }
    Ok(())
}

// ==========================================
// DDAH 动态列族
// ==========================================

/// 工作项列数上界
///
/// 表格解码器会省略空单元格，列数会被低估，因此加上安全余量
pub fn estimate_duty_column_bound(rows: &[Record], margin: usize) -> usize {
    let max_columns = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    (max_columns as f64 / 2.0).round() as usize + margin
}

/// 为 1..=bound 生成 Duty N / Hours N 别名（N < 10 时另加零填充写法）
pub fn duty_column_key_map(bound: usize) -> Vec<(String, String)> {
    let mut entries = Vec::with_capacity(bound * 6);
    for n in 1..=bound {
        let duty_key = format!("duty_{}", n);
        let hours_key = format!("hours_{}", n);
        entries.push((duty_key.clone(), duty_key.clone()));
        entries.push((hours_key.clone(), hours_key.clone()));
        entries.push((format!("Duty {}", n), duty_key.clone()));
        entries.push((format!("Hours {}", n), hours_key.clone()));
        if n < 10 {
            entries.push((format!("Duty 0{}", n), duty_key));
            entries.push((format!("Hours 0{}", n), hours_key));
        }
    }
    entries
}

/// 解析 duty_N / hours_N 形式的字段名
fn duty_family_index(key: &str) -> Option<(usize, bool)> {
    if let Some(n) = key.strip_prefix("duty_") {
        return n.parse().ok().map(|n| (n, true));
    }
    if let Some(n) = key.strip_prefix("hours_") {
        return n.parse().ok().map(|n| (n, false));
    }
    None
}

/// 将 duty_N / hours_N 折叠为有序 duties 列表（两者皆空的序号丢弃）
fn collapse_duties(record: &mut Record) {
    let family_keys: Vec<String> = record
        .keys()
        .filter(|k| duty_family_index(k).is_some())
        .cloned()
        .collect();
    if family_keys.is_empty() {
        return;
    }

    let mut pairs: BTreeMap<usize, (Value, Value)> = BTreeMap::new();
    for key in family_keys {
        let Some((n, is_description)) = duty_family_index(&key) else {
            continue;
        };
        let value = record.remove(&key).unwrap_or(Value::Null);
        let entry = pairs.entry(n).or_insert((Value::Null, Value::Null));
        if is_description {
            entry.0 = value;
        } else {
            entry.1 = value;
        }
    }

    let duties: Vec<Value> = pairs
        .into_values()
        .filter(|(description, hours)| !description.is_null() || !hours.is_null())
        .map(|(description, hours)| {
            json!({
                "description": if description.is_null() { json!("") } else { description },
                "hours": if hours.is_null() { json!(0) } else { hours },
            })
        })
        .collect();

    record.insert("duties".to_string(), Value::Array(duties));
}

/// 缺少 applicant 时按 "First Last" 在名单中匹配
fn resolve_applicant(
    record: &mut Record,
    applicants: Option<&[Applicant]>,
    threshold: f64,
) -> ImportResult<()> {
    if record.get("applicant").is_some_and(|v| !v.is_null()) {
        return Ok(());
    }

    let name_part = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };
    let query = format!("{} {}", name_part("first_name"), name_part("last_name"))
        .trim()
        .to_string();
    if query.is_empty() {
        return Ok(());
    }

    let roster = applicants.ok_or(ImportError::MissingContext {
        entity: "ddah",
        collection: "applicants",
    })?;
    let applicant = match_by_utorid_or_name(&query, roster, threshold)?;
    debug!(query = %query, utorid = %applicant.utorid, "按姓名匹配到申请人");
    record.insert(
        "applicant".to_string(),
        Value::String(applicant.utorid.clone()),
    );
    Ok(())
}
