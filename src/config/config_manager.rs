// ==========================================
// 助教聘任管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: key-value（可从 JSON 文件加载 {"key": "value"}）
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有 key-value 创建
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 从 JSON 文件加载
    ///
    /// # 文件格式
    /// - {"fuzzy_match_threshold": "0.8", "duty_column_margin": "30"}
    /// - 值也可以直接写数字/布尔，会按文本保存
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&content)?;

        let values = raw
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Ok(Self { values })
    }

    /// 覆写单个配置值
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 读取配置值，带默认值
    fn get_config_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_config_value(key).unwrap_or(default)
    }

    fn value_error(key: &str, value: &str, message: &str) -> ImportError {
        ImportError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}

impl ImportConfigReader for ConfigManager {
    fn get_fuzzy_match_threshold(&self) -> ImportResult<f64> {
        let key = config_keys::FUZZY_MATCH_THRESHOLD;
        let value = self.get_config_or_default(key, "0.7");
        let threshold = value
            .trim()
            .parse::<f64>()
            .map_err(|_| Self::value_error(key, value, "不是数字"))?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Self::value_error(key, value, "必须在 0 ~ 1 之间"));
        }
        Ok(threshold)
    }

    fn get_duty_column_margin(&self) -> ImportResult<usize> {
        let key = config_keys::DUTY_COLUMN_MARGIN;
        let value = self.get_config_or_default(key, "50");
        value
            .trim()
            .parse::<usize>()
            .map_err(|_| Self::value_error(key, value, "不是非负整数"))
    }

    fn get_export_file_prefix(&self) -> ImportResult<String> {
        let key = config_keys::EXPORT_FILE_PREFIX;
        let value = self.get_config_or_default(key, "tapp").trim();
        if value.is_empty() {
            return Err(Self::value_error(key, value, "不能为空"));
        }
        Ok(value.to_string())
    }

    fn get_log_unmatched_columns(&self) -> ImportResult<bool> {
        let key = config_keys::LOG_UNMATCHED_COLUMNS;
        let value = self.get_config_or_default(key, "true");
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(Self::value_error(key, value, "不是布尔值")),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 匹配
    pub const FUZZY_MATCH_THRESHOLD: &str = "fuzzy_match_threshold";
    pub const LOG_UNMATCHED_COLUMNS: &str = "log_unmatched_columns";

    // DDAH 列族
    pub const DUTY_COLUMN_MARGIN: &str = "duty_column_margin";

    // 导出
    pub const EXPORT_FILE_PREFIX: &str = "export_file_prefix";
}
