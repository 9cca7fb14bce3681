// ==========================================
// 助教聘任管理系统 - 文件解析器
// ==========================================
// 职责: 上传文件 → ImportPayload
// 支持: JSON (.json) / CSV (.csv) / 表格 (.xlsx/.xls/.xlsm/.ods)
// 约定: 与常见表格解码器一致，空单元格不出现在行记录中
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::normalizer::ImportPayload;
use crate::importer::schema::Record;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: JsonParser / CsvParser / ExcelParser
pub trait FileParser {
    /// 解析文件为导入载荷
    ///
    /// # 返回
    /// - Ok(ImportPayload): JSON 文件 → Json；表格文件 → Spreadsheet（表头 → 值）
    /// - Err: 文件不存在 / 格式不支持 / 解析失败
    fn parse_to_payload(&self, file_path: &Path) -> ImportResult<ImportPayload>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_to_payload(&self, file_path: &Path) -> ImportResult<ImportPayload> {
        ensure_exists(file_path)?;

        let file = File::open(file_path)?;
        let data: Value = serde_json::from_reader(file)?;
        Ok(ImportPayload::Json(data))
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_payload(&self, file_path: &Path) -> ImportResult<ImportPayload> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = Record::new();

            for (col_idx, value) in record.iter().enumerate() {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                if let Some(header) = headers.get(col_idx).filter(|h| !h.is_empty()) {
                    row.insert(header.clone(), Value::String(value.to_string()));
                }
            }

            // 跳过完全空白的行
            if row.is_empty() {
                continue;
            }
            rows.push(row);
        }

        debug!(rows = rows.len(), "CSV 解析完成");
        Ok(ImportPayload::Spreadsheet(rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

/// 单元格 → JSON 值；空单元格与错误单元格返回 None
///
/// 日期单元格保留为序列号，交由日期规范化器处理
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number),
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
        }
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => Number::from_f64(dt.as_f64()).map(Value::Number),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
    }
}

impl FileParser for ExcelParser {
    fn parse_to_payload(&self, file_path: &Path) -> ImportResult<ImportPayload> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xls" | "xlsm" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("表格文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut iter = range.rows();
        let Some(header_row) = iter.next() else {
            return Ok(ImportPayload::Spreadsheet(Vec::new()));
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in iter {
            let mut row = Record::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                let Some(header) = headers.get(col_idx).filter(|h| !h.is_empty()) else {
                    continue;
                };
                if let Some(value) = cell_to_value(cell) {
                    row.insert(header.clone(), value);
                }
            }

            // 跳过完全空白的行
            if row.is_empty() {
                continue;
            }
            rows.push(row);
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "表格解析完成");
        Ok(ImportPayload::Spreadsheet(rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportPayload> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        let payload = match ext.as_str() {
            "json" => JsonParser.parse_to_payload(path)?,
            "csv" => CsvParser.parse_to_payload(path)?,
            "xlsx" | "xls" | "xlsm" | "ods" => ExcelParser.parse_to_payload(path)?,
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        info!(path = %path.display(), file_type = payload.file_type(), "文件解析完成");
        Ok(payload)
    }
}
