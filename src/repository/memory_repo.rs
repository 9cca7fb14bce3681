// ==========================================
// 助教聘任管理系统 - 内存 Repository 实现
// ==========================================
// 职责: 以 Snapshot 为存储的 ImportRepository（用于预览环境与测试）
// 规则: Create 分配 max(id)+1；Update 按 id 原位替换，id 不存在即失败
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::repository::import_repo::{ImportRepository, Snapshot, UpsertBatch};
use crate::transform::{
    ApplicantTransform, AssignmentTransform, DdahTransform, EntityTransform,
    InstructorTransform, PositionTransform, UpsertShape,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct InMemoryImportRepository {
    state: Arc<Mutex<Snapshot>>,
}

impl InMemoryImportRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(snapshot)),
        }
    }

    /// 当前数据的拷贝
    pub fn snapshot(&self) -> ImportResult<Snapshot> {
        let state = self
            .state
            .lock()
            .map_err(|e| ImportError::Persistence(format!("锁获取失败: {}", e)))?;
        Ok(state.clone())
    }
}

/// 在事务副本上应用写入；任何一条失败则整批丢弃
fn apply<T: EntityTransform>(
    items: &mut Vec<T::Full>,
    shapes: Vec<UpsertShape<T::Full>>,
) -> ImportResult<usize> {
    let mut next_id = items.iter().filter_map(T::full_id).max().unwrap_or(0) + 1;
    let mut written = 0;

    for shape in shapes {
        match shape {
            UpsertShape::Create(entity) => {
                items.push(T::with_id(entity, Some(next_id)));
                next_id += 1;
            }
            UpsertShape::Update(entity) => {
                let id = T::full_id(&entity);
                let slot = items
                    .iter_mut()
                    .find(|item| id.is_some() && T::full_id(item) == id)
                    .ok_or_else(|| {
                        ImportError::Persistence(format!(
                            "{} 不存在: {}",
                            T::ENTITY,
                            T::full_key(&entity)
                        ))
                    })?;
                *slot = entity;
            }
        }
        written += 1;
    }

    Ok(written)
}

#[async_trait]
impl ImportRepository for InMemoryImportRepository {
    async fn load_snapshot(&self) -> ImportResult<Snapshot> {
        self.snapshot()
    }

    async fn commit(&self, batch: UpsertBatch) -> ImportResult<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| ImportError::Persistence(format!("锁获取失败: {}", e)))?;

        let entity = batch.entity();
        let mut staged = state.clone();
        let written = match batch {
            UpsertBatch::Instructor(shapes) => {
                apply::<InstructorTransform>(&mut staged.instructors, shapes)?
            }
            UpsertBatch::Applicant(shapes) => {
                apply::<ApplicantTransform>(&mut staged.applicants, shapes)?
            }
            UpsertBatch::Position(shapes) => {
                apply::<PositionTransform>(&mut staged.positions, shapes)?
            }
            UpsertBatch::Assignment(shapes) => {
                apply::<AssignmentTransform>(&mut staged.assignments, shapes)?
            }
            UpsertBatch::Ddah(shapes) => apply::<DdahTransform>(&mut staged.ddahs, shapes)?,
        };
        *state = staged;

        debug!(entity = %entity, written = written, "内存仓储提交完成");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Instructor;

    fn instructor(id: Option<i64>, utorid: &str) -> Instructor {
        Instructor {
            id,
            first_name: "Henry".to_string(),
            last_name: "Smith".to_string(),
            utorid: utorid.to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_commit_assigns_ids_and_updates() {
        let repo = InMemoryImportRepository::new(Snapshot {
            instructors: vec![instructor(Some(3), "smithh")],
            ..Snapshot::default()
        });

        let mut renamed = instructor(Some(3), "smithh");
        renamed.first_name = "Harry".to_string();
        let written = repo
            .commit(UpsertBatch::Instructor(vec![
                UpsertShape::Update(renamed),
                UpsertShape::Create(instructor(None, "doej")),
            ]))
            .await
            .unwrap();

        assert_eq!(written, 2);
        let snapshot = repo.load_snapshot().await.unwrap();
        assert_eq!(snapshot.instructors[0].first_name, "Harry");
        assert_eq!(snapshot.instructors[1].id, Some(4));
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let repo = InMemoryImportRepository::new(Snapshot::default());

        let result = repo
            .commit(UpsertBatch::Instructor(vec![
                UpsertShape::Create(instructor(None, "doej")),
                UpsertShape::Update(instructor(Some(99), "ghost")),
            ]))
            .await;

        assert!(matches!(result, Err(ImportError::Persistence(_))));
        assert!(repo.snapshot().unwrap().instructors.is_empty());
    }
}
