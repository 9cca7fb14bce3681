// ==========================================
// 助教聘任管理系统 - 差异对账引擎
// ==========================================
// 职责: 导入记录 vs 现有实体（按自然键配对）→ new / modified / unchanged
// 比较口径: 两侧都先投影到最小表示，只比较最小表示覆盖的字段
// 红线: 只有 new/modified 进入写入集合，重复导入同一文件零写入
// ==========================================

use crate::domain::types::DiffStatus;
use crate::importer::error::ImportResult;
use crate::transform::{EntityTransform, TransformContext, UpsertShape};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

// ==========================================
// DiffSpec - 单条对账结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffSpec<M, F> {
    pub status: DiffStatus,
    pub obj: M,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<F>, // 仅 modified 携带
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub new: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn from_specs<M, F>(specs: &[DiffSpec<M, F>]) -> Self {
        let mut summary = Self::default();
        for spec in specs {
            match spec.status {
                DiffStatus::New => summary.new += 1,
                DiffStatus::Modified => summary.modified += 1,
                DiffStatus::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// 需要写入的条数
    pub fn pending_writes(&self) -> usize {
        self.new + self.modified
    }
}

/// 对账
///
/// # 参数
/// - records: 导入得到的最小表示（已去重）
/// - existing: 现有完整实体快照
/// - ctx: 重建完整表示所需的上下文
///
/// # 返回
/// - 与 records 一一对应、顺序一致的 DiffSpec 列表
/// - Err(ReferenceResolution / MissingContext): 任一记录无法重建完整表示
pub fn diff<T: EntityTransform>(
    records: &[T::Minimal],
    existing: &[T::Full],
    ctx: &TransformContext<'_>,
) -> ImportResult<Vec<DiffSpec<T::Minimal, T::Full>>> {
    let by_key: HashMap<String, &T::Full> =
        existing.iter().map(|e| (T::full_key(e), e)).collect();

    let mut specs = Vec::with_capacity(records.len());
    for record in records {
        let key = T::minimal_key(record);
        // 每条记录都先重建完整表示，自然键无法解析即失败
        let candidate = T::build_full(record, ctx)?;

        let spec = match by_key.get(&key) {
            None => DiffSpec {
                status: DiffStatus::New,
                obj: record.clone(),
                existing: None,
            },
            Some(found) => {
                let candidate = T::to_minimal(&candidate, ctx)?;
                let current = T::to_minimal(found, ctx)?;

                if candidate == current {
                    DiffSpec {
                        status: DiffStatus::Unchanged,
                        obj: record.clone(),
                        existing: None,
                    }
                } else {
                    debug!(entity = %T::ENTITY, key = %key, "记录有变更");
                    DiffSpec {
                        status: DiffStatus::Modified,
                        obj: record.clone(),
                        existing: Some((*found).clone()),
                    }
                }
            }
        };
        specs.push(spec);
    }

    let summary = DiffSummary::from_specs(&specs);
    info!(
        entity = %T::ENTITY,
        new = summary.new,
        modified = summary.modified,
        unchanged = summary.unchanged,
        "对账完成"
    );

    Ok(specs)
}

/// DiffSpec 列表 → 写入集合（跳过 unchanged）
pub fn upsert_set<T: EntityTransform>(
    specs: &[DiffSpec<T::Minimal, T::Full>],
    ctx: &TransformContext<'_>,
) -> ImportResult<Vec<UpsertShape<T::Full>>> {
    let mut shapes = Vec::new();

    for spec in specs {
        match spec.status {
            DiffStatus::Unchanged => continue,
            DiffStatus::New => shapes.push(T::to_create_shape(&spec.obj, ctx)?),
            DiffStatus::Modified => match spec.existing.as_ref().and_then(T::full_id) {
                Some(id) => shapes.push(T::to_update_shape(&spec.obj, ctx, id)?),
                None => shapes.push(T::to_create_shape(&spec.obj, ctx)?),
            },
        }
    }

    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MinimalAssignment, MinimalInstructor};
    use crate::importer::error::ImportError;
    use crate::transform::test_fixtures;
    use crate::transform::{AssignmentTransform, InstructorTransform};

    fn minimal_instructors() -> Vec<MinimalInstructor> {
        let ctx = TransformContext::new();
        test_fixtures::instructors()
            .iter()
            .map(|i| InstructorTransform::to_minimal(i, &ctx).unwrap())
            .collect()
    }

    #[test]
    fn test_same_instructors_are_unchanged() {
        let existing = test_fixtures::instructors();
        let ctx = TransformContext::new();

        let specs = diff::<InstructorTransform>(&minimal_instructors(), &existing, &ctx).unwrap();

        assert!(specs.iter().all(|s| s.status == DiffStatus::Unchanged));
        assert!(upsert_set::<InstructorTransform>(&specs, &ctx)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_new_and_modified_classification() {
        let existing = test_fixtures::instructors();
        let ctx = TransformContext::new();

        let mut records = minimal_instructors();
        records[0].email = Some("henry.smith@utoronto.ca".to_string());
        records.push(MinimalInstructor {
            last_name: "Lee".to_string(),
            first_name: "Jin".to_string(),
            utorid: "leej".to_string(),
            email: None,
        });

        let specs = diff::<InstructorTransform>(&records, &existing, &ctx).unwrap();
        assert_eq!(specs[0].status, DiffStatus::Modified);
        assert_eq!(specs[0].existing.as_ref().unwrap().id, Some(1));
        assert_eq!(specs[1].status, DiffStatus::Unchanged);
        assert_eq!(specs[2].status, DiffStatus::New);
        assert!(specs[2].existing.is_none());

        let summary = DiffSummary::from_specs(&specs);
        assert_eq!(
            summary,
            DiffSummary {
                new: 1,
                modified: 1,
                unchanged: 1
            }
        );
        assert_eq!(summary.pending_writes(), 2);

        let shapes = upsert_set::<InstructorTransform>(&specs, &ctx).unwrap();
        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].is_update());
        assert_eq!(shapes[0].entity().id, Some(1));
        assert!(!shapes[1].is_update());
        assert_eq!(shapes[1].entity().id, None);
    }

    #[test]
    fn test_assignment_with_derivable_chunks_is_unchanged() {
        let session = test_fixtures::session();
        let templates = test_fixtures::contract_templates();
        let applicants = test_fixtures::applicants();
        let positions = test_fixtures::positions();
        let existing = test_fixtures::assignments();
        let ctx = TransformContext::new()
            .with_session(&session)
            .with_contract_templates(&templates)
            .with_applicants(&applicants)
            .with_positions(&positions)
            .with_assignments(&existing);

        let records: Vec<_> = existing
            .iter()
            .map(|a| AssignmentTransform::to_minimal(a, &ctx).unwrap())
            .collect();

        let specs = diff::<AssignmentTransform>(&records, &existing, &ctx).unwrap();
        assert_eq!(DiffSummary::from_specs(&specs).unchanged, 2);
    }

    #[test]
    fn test_assignment_hours_change_is_modified() {
        let session = test_fixtures::session();
        let templates = test_fixtures::contract_templates();
        let applicants = test_fixtures::applicants();
        let positions = test_fixtures::positions();
        let existing = test_fixtures::assignments();
        let ctx = TransformContext::new()
            .with_session(&session)
            .with_contract_templates(&templates)
            .with_applicants(&applicants)
            .with_positions(&positions);

        let mut record = AssignmentTransform::to_minimal(&existing[0], &ctx).unwrap();
        record.hours = 80.0;

        let specs = diff::<AssignmentTransform>(&[record], &existing, &ctx).unwrap();
        assert_eq!(specs[0].status, DiffStatus::Modified);

        let shapes = upsert_set::<AssignmentTransform>(&specs, &ctx).unwrap();
        let updated = shapes[0].entity();
        assert_eq!(updated.id, Some(1000));
        assert_eq!(updated.wage_chunks.len(), 1);
        assert_eq!(updated.wage_chunks[0].hours, 80.0);
    }

    #[test]
    fn test_new_assignment_with_unknown_keys_fails() {
        let session = test_fixtures::session();
        let templates = test_fixtures::contract_templates();
        let applicants = test_fixtures::applicants();
        let positions = test_fixtures::positions();
        let existing = test_fixtures::assignments();
        let ctx = TransformContext::new()
            .with_session(&session)
            .with_contract_templates(&templates)
            .with_applicants(&applicants)
            .with_positions(&positions);

        let record = MinimalAssignment {
            utorid: "ghost".to_string(),
            position_code: "NOPE999".to_string(),
            start_date: None,
            end_date: None,
            contract_template: None,
            contract_override_pdf: None,
            hours: 10.0,
            wage_chunks: None,
        };

        match diff::<AssignmentTransform>(&[record], &existing, &ctx).unwrap_err() {
            ImportError::ReferenceResolution { key, .. } => assert_eq!(key, "ghost"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
