// ==========================================
// 助教聘任管理系统 - 导入导出核心库
// ==========================================
// 职责: 助教聘任数据（教师 / 申请人 / 岗位 / 聘任 / DDAH）的
//       表格与 JSON 往返、规范化与对账
// 外部协作者: HTTP 层、关系型持久化层（经 ImportRepository 接入）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 导入导出参数
pub mod config;

// 导入层 - 文件解析与规范化
pub mod importer;

// 转换层 - 完整表示 ↔ 最小表示
pub mod transform;

// 对账层 - 差异分类与写入集合
pub mod reconcile;

// 导出层 - 格式化与打包
pub mod export;

// 数据仓储层 - 快照与提交
pub mod repository;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DdahStatus, DiffStatus, EntityKind};

// 领域实体
pub use domain::{
    Applicant, Assignment, ContractTemplate, Ddah, Duty, Instructor, MinimalApplicant,
    MinimalAssignment, MinimalDdah, MinimalDuty, MinimalInstructor, MinimalPosition,
    MinimalWageChunk, Position, Session, WageChunk,
};

// 配置
pub use config::{ConfigManager, ImportConfig, ImportConfigReader};

// 导入
pub use importer::{ImportError, ImportPayload, ImportResult, RowMapper, UniversalFileParser};

// 转换
pub use transform::{
    ApplicantTransform, AssignmentTransform, DdahTransform, EntityTransform,
    InstructorTransform, PositionTransform, TransformContext, UpsertShape,
};

// 对账
pub use reconcile::{DiffSpec, DiffSummary, ImportReport, ImportService, ImportableEntity};

// 导出
pub use export::{ExportFile, ExportFormat};

// 仓储
pub use repository::{ImportRepository, InMemoryImportRepository, Snapshot, UpsertBatch};

// ==========================================
// 版本信息
// ==========================================
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "助教聘任管理系统";
