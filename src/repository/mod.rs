// ==========================================
// 助教聘任管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 现有数据快照读取 + 写入集合整批提交
// ==========================================

pub mod import_repo;
pub mod memory_repo;

pub use import_repo::{ImportRepository, Snapshot, UpsertBatch};
pub use memory_repo::InMemoryImportRepository;
