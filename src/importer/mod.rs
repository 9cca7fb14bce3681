// ==========================================
// 助教聘任管理系统 - 导入层
// ==========================================
// 职责: 外部文件 → 规范化记录
// 流程: 文件解析 → 列名匹配 → 清洗 → 日期规范化 → 必填校验
// 支持: JSON, CSV, Excel
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod date_normalizer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod fuzzy;
pub mod normalizer;
pub mod person_matcher;
pub mod row_mapper;
pub mod schema;
pub mod validator;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use date_normalizer::{format_canonical, parse_date, parse_naive_date, CANONICAL_DATE_FORMAT};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, JsonParser, UniversalFileParser};
pub use normalizer::{normalize_ddah_import, normalize_import, ImportPayload};
pub use person_matcher::match_by_utorid_or_name;
pub use row_mapper::RowMapper;
pub use schema::{schema_for, NormalizationSchema, Record};
pub use validator::validate;
