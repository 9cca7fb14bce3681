// ==========================================
// 助教聘任管理系统 - 转换层
// ==========================================
// 职责: 完整表示 ↔ 最小表示
// ==========================================

pub mod assignment;
pub mod context;
pub mod ddah;
pub mod entity_transform;
pub mod person;
pub mod position;
pub mod shape;
pub mod wage_chunks;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use assignment::AssignmentTransform;
pub use context::TransformContext;
pub use ddah::DdahTransform;
pub use entity_transform::EntityTransform;
pub use person::{ApplicantTransform, InstructorTransform};
pub use position::PositionTransform;
pub use shape::UpsertShape;
pub use wage_chunks::{generate_wage_chunks, wage_chunks_derivable};
