// ==========================================
// 助教聘任管理系统 - 导入流水线
// ==========================================
// 流程: 规范化 → 必填校验 → 类型提取 → 同批去重 → 对账
// 红线: 任一步骤失败整批中止；本模块不发起任何写入
// ==========================================

use crate::config::ImportConfig;
use crate::domain::{Applicant, Assignment, Ddah, Instructor, Position};
use crate::importer::error::ImportResult;
use crate::importer::normalizer::{normalize_ddah_import, normalize_import, ImportPayload};
use crate::importer::schema::{schema_for, NormalizationSchema, Record};
use crate::importer::validator::validate;
use crate::reconcile::conflict_handler::ConflictHandler;
use crate::reconcile::diff::{diff, DiffSpec};
use crate::repository::{Snapshot, UpsertBatch};
use crate::transform::{
    ApplicantTransform, AssignmentTransform, DdahTransform, EntityTransform,
    InstructorTransform, PositionTransform, UpsertShape,
};
use tracing::debug;

/// 对账结果列表的类型简写
pub type DiffSpecs<T> = Vec<DiffSpec<<T as EntityTransform>::Minimal, <T as EntityTransform>::Full>>;

// ==========================================
// ImportableEntity Trait
// ==========================================
// 把实体转换与快照中的集合、写入批次对接起来
pub trait ImportableEntity: EntityTransform {
    fn schema() -> &'static NormalizationSchema {
        schema_for(Self::ENTITY)
    }

    /// 载荷 → 规范化记录
    fn normalize(
        payload: &ImportPayload,
        _snapshot: &Snapshot,
        config: &ImportConfig,
    ) -> ImportResult<Vec<Record>> {
        normalize_import(payload, Self::schema(), config)
    }

    /// 快照中该实体的现有集合
    fn existing(snapshot: &Snapshot) -> &[Self::Full];

    fn into_batch(shapes: Vec<UpsertShape<Self::Full>>) -> UpsertBatch;
}

impl ImportableEntity for InstructorTransform {
    fn existing(snapshot: &Snapshot) -> &[Instructor] {
        &snapshot.instructors
    }

    fn into_batch(shapes: Vec<UpsertShape<Instructor>>) -> UpsertBatch {
        UpsertBatch::Instructor(shapes)
    }
}

impl ImportableEntity for ApplicantTransform {
    fn existing(snapshot: &Snapshot) -> &[Applicant] {
        &snapshot.applicants
    }

    fn into_batch(shapes: Vec<UpsertShape<Applicant>>) -> UpsertBatch {
        UpsertBatch::Applicant(shapes)
    }
}

impl ImportableEntity for PositionTransform {
    fn existing(snapshot: &Snapshot) -> &[Position] {
        &snapshot.positions
    }

    fn into_batch(shapes: Vec<UpsertShape<Position>>) -> UpsertBatch {
        UpsertBatch::Position(shapes)
    }
}

impl ImportableEntity for AssignmentTransform {
    fn existing(snapshot: &Snapshot) -> &[Assignment] {
        &snapshot.assignments
    }

    fn into_batch(shapes: Vec<UpsertShape<Assignment>>) -> UpsertBatch {
        UpsertBatch::Assignment(shapes)
    }
}

impl ImportableEntity for DdahTransform {
    fn normalize(
        payload: &ImportPayload,
        snapshot: &Snapshot,
        config: &ImportConfig,
    ) -> ImportResult<Vec<Record>> {
        normalize_ddah_import(payload, Some(&snapshot.applicants), config)
    }

    fn existing(snapshot: &Snapshot) -> &[Ddah] {
        &snapshot.ddahs
    }

    fn into_batch(shapes: Vec<UpsertShape<Ddah>>) -> UpsertBatch {
        UpsertBatch::Ddah(shapes)
    }
}

/// 载荷 → 最小表示列表（规范化 + 校验 + 类型提取 + 去重）
pub fn extract_minimal<T: ImportableEntity>(
    payload: &ImportPayload,
    snapshot: &Snapshot,
    config: &ImportConfig,
) -> ImportResult<Vec<T::Minimal>> {
    let mut records = T::normalize(payload, snapshot, config)?;
    validate(&mut records, T::schema())?;
    debug!(entity = %T::ENTITY, count = records.len(), "必填校验通过");

    let minimals = records
        .iter()
        .enumerate()
        .map(|(idx, record)| T::from_record(record, idx + 1))
        .collect::<ImportResult<Vec<_>>>()?;

    ConflictHandler::<T>::new().ensure_unique(&minimals)?;
    Ok(minimals)
}

/// 载荷 → 对账结果（不写入）
pub fn prepare_import<T: ImportableEntity>(
    payload: &ImportPayload,
    snapshot: &Snapshot,
    config: &ImportConfig,
) -> ImportResult<DiffSpecs<T>> {
    let minimals = extract_minimal::<T>(payload, snapshot, config)?;
    diff::<T>(&minimals, T::existing(snapshot), &snapshot.context())
}

/// 快照 → 最小表示列表（导出）
pub fn export_minimal<T: ImportableEntity>(snapshot: &Snapshot) -> ImportResult<Vec<T::Minimal>> {
    let ctx = snapshot.context();
    T::existing(snapshot)
        .iter()
        .map(|full| T::to_minimal(full, &ctx))
        .collect()
}
