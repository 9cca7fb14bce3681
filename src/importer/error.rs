// ==========================================
// 助教聘任管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 规范化阶段任一错误中止整批导入；对账前不写入任何数据
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("导入数据结构错误: {0}")]
    MalformedPayload(String),

    // ===== 规范化错误 =====
    #[error("日期解析失败: {value}")]
    DateParse { value: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversion {
        row: usize,
        field: String,
        message: String,
    },

    #[error("必填字段缺失 (字段 {field}): {record}")]
    Validation { record: String, field: String },

    #[error("无法按 utorid 或姓名匹配人员: {query}")]
    NoPersonMatch { query: String },

    // ===== 引用解析错误 =====
    #[error("引用解析失败 ({entity}): 找不到 {key_kind} = {key}")]
    ReferenceResolution {
        entity: &'static str,
        key_kind: &'static str,
        key: String,
    },

    #[error("缺少上下文集合 ({entity}): 需要 {collection}")]
    MissingContext {
        entity: &'static str,
        collection: &'static str,
    },

    // ===== 对账错误 =====
    #[error("同批次内自然键重复 ({entity}): {key}")]
    DuplicateNaturalKey { entity: &'static str, key: String },

    // ===== 配置错误 =====
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 持久化协作方错误 =====
    #[error("持久化失败: {0}")]
    Persistence(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
