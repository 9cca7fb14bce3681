// ==========================================
// 助教聘任管理系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口 + 解析后的配置快照
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::fuzzy::DEFAULT_MATCH_THRESHOLD;
use serde::{Deserialize, Serialize};

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager
pub trait ImportConfigReader: Send + Sync {
    /// 获取列名/人名近似匹配的相似度下限
    ///
    /// # 默认值
    /// - 0.7
    fn get_fuzzy_match_threshold(&self) -> ImportResult<f64>;

    /// 获取 DDAH 工作项列数估计的安全余量
    ///
    /// # 默认值
    /// - 50
    ///
    /// # 用途
    /// - 表格解码器省略空单元格，按列数估计的上界需要加余量
    fn get_duty_column_margin(&self) -> ImportResult<usize>;

    /// 获取导出文件名前缀
    ///
    /// # 默认值
    /// - "tapp"
    fn get_export_file_prefix(&self) -> ImportResult<String>;

    /// 是否记录被丢弃的未匹配列
    ///
    /// # 默认值
    /// - true
    fn get_log_unmatched_columns(&self) -> ImportResult<bool>;
}

// ==========================================
// ImportConfig - 配置快照
// ==========================================
// 一次导入开始时解析一次，之后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub fuzzy_match_threshold: f64,
    pub duty_column_margin: usize,
    pub export_file_prefix: String,
    pub log_unmatched_columns: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: DEFAULT_MATCH_THRESHOLD,
            duty_column_margin: 50,
            export_file_prefix: "tapp".to_string(),
            log_unmatched_columns: true,
        }
    }
}

impl ImportConfig {
    /// 从任意配置读取器解析快照
    pub fn from_reader(reader: &dyn ImportConfigReader) -> ImportResult<Self> {
        Ok(Self {
            fuzzy_match_threshold: reader.get_fuzzy_match_threshold()?,
            duty_column_margin: reader.get_duty_column_margin()?,
            export_file_prefix: reader.get_export_file_prefix()?,
            log_unmatched_columns: reader.get_log_unmatched_columns()?,
        })
    }
}
