// ==========================================
// 助教聘任管理系统 - 领域模型层
// ==========================================
// 职责: 完整表示（可持久化）与最小表示（可导出）
// 红线: 不含规范化逻辑，不含对账逻辑
// ==========================================

pub mod assignment;
pub mod canonical_date;
pub mod ddah;
pub mod person;
pub mod position;
pub mod session;
pub mod types;

// 重导出核心类型
pub use assignment::{Assignment, MinimalAssignment, MinimalWageChunk, WageChunk};
pub use ddah::{Ddah, Duty, MinimalDdah, MinimalDuty};
pub use person::{Applicant, Instructor, MinimalApplicant, MinimalInstructor, Person};
pub use position::{MinimalPosition, Position};
pub use session::{ContractTemplate, Session};
pub use types::{DdahStatus, DiffStatus, EntityKind};
