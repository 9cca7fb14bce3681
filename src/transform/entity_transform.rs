// ==========================================
// 助教聘任管理系统 - 最小/完整表示转换 Trait
// ==========================================
// 职责: 定义每种实体的一对转换（不包含实现）
// - to_minimal: 导出，去掉 id 与可派生字段，外键换成自然键
// - to_create_shape / to_update_shape: 导入，解析自然键并套用派生规则
// ==========================================

use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use crate::importer::schema::Record;
use crate::transform::context::TransformContext;
use crate::transform::shape::UpsertShape;
use serde::Serialize;
use std::fmt::Debug;

// ==========================================
// EntityTransform Trait
// ==========================================
// 实现者: InstructorTransform / ApplicantTransform / PositionTransform /
//         AssignmentTransform / DdahTransform
pub trait EntityTransform {
    /// 完整表示（可持久化）
    type Full: Clone + Debug + PartialEq + Serialize;
    /// 最小表示（可导出）
    type Minimal: Clone + Debug + PartialEq + Serialize;

    const ENTITY: EntityKind;

    /// 完整 → 最小
    fn to_minimal(full: &Self::Full, ctx: &TransformContext<'_>) -> ImportResult<Self::Minimal>;

    /// 已校验的规范化记录 → 最小表示
    ///
    /// # 参数
    /// - record: validate 之后的记录（keys 全部存在）
    /// - row_number: 行号（用于错误信息，从 1 开始）
    fn from_record(record: &Record, row_number: usize) -> ImportResult<Self::Minimal>;

    /// 最小 → 完整（不带 id）
    fn build_full(minimal: &Self::Minimal, ctx: &TransformContext<'_>)
        -> ImportResult<Self::Full>;

    fn full_id(full: &Self::Full) -> Option<i64>;

    fn with_id(full: Self::Full, id: Option<i64>) -> Self::Full;

    /// 最小表示的自然键
    fn minimal_key(minimal: &Self::Minimal) -> String;

    /// 完整表示的自然键（与 minimal_key 同一口径）
    fn full_key(full: &Self::Full) -> String;

    /// 新建形态（无 id）
    fn to_create_shape(
        minimal: &Self::Minimal,
        ctx: &TransformContext<'_>,
    ) -> ImportResult<UpsertShape<Self::Full>> {
        let full = Self::build_full(minimal, ctx)?;
        Ok(UpsertShape::Create(Self::with_id(full, None)))
    }

    /// 更新形态（携带已有 id）
    fn to_update_shape(
        minimal: &Self::Minimal,
        ctx: &TransformContext<'_>,
        id: i64,
    ) -> ImportResult<UpsertShape<Self::Full>> {
        let full = Self::build_full(minimal, ctx)?;
        Ok(UpsertShape::Update(Self::with_id(full, Some(id))))
    }
}

/// 组合自然键（utorid / position_code）
pub fn compound_key(utorid: &str, position_code: &str) -> String {
    format!("{} / {}", utorid, position_code)
}
