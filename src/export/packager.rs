// ==========================================
// 助教聘任管理系统 - 导出文件打包
// ==========================================
// 职责: 表格行 / JSON 文档 → 字节流 + 文件名
// 命名: {prefix}_export_{YYYY-MM-DD}.{ext}
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// 写入目录，返回完整路径
    pub fn write_to_dir(&self, dir: &Path) -> ImportResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "导出文件已写入");
        Ok(path)
    }
}

pub fn export_file_name(prefix: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_export_{}.{}",
        prefix,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// 单元格 → CSV 文本（null 写为空）
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn to_csv_bytes(rows: &[Vec<Value>]) -> ImportResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer.write_record(row.iter().map(cell_text))?;
    }
    writer
        .into_inner()
        .map_err(|e| ImportError::CsvParseError(e.to_string()))
}

pub fn to_json_bytes(document: &Value) -> ImportResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(document)?)
}
