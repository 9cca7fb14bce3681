// ==========================================
// 助教聘任管理系统 - 对账层
// ==========================================
// 职责: 导入记录 vs 现有数据 → 写入集合
// ==========================================

pub mod conflict_handler;
pub mod diff;
pub mod import_service;
pub mod pipeline;

pub use conflict_handler::ConflictHandler;
pub use diff::{diff, upsert_set, DiffSpec, DiffSummary};
pub use import_service::{ImportReport, ImportService};
pub use pipeline::{export_minimal, extract_minimal, prepare_import, DiffSpecs, ImportableEntity};
