// ==========================================
// 助教聘任管理系统 - 冲突处理器
// ==========================================
// 职责: 检测同批次内重复自然键
// - 同一实体在一次导入中出现两次 → 拒绝整批
// - 与现有数据撞键不在此处理，交给 diff 判定 modified/unchanged
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::transform::EntityTransform;
use std::collections::HashMap;
use std::marker::PhantomData;

pub struct ConflictHandler<T> {
    _entity: PhantomData<T>,
}

impl<T: EntityTransform> Default for ConflictHandler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EntityTransform> ConflictHandler<T> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }

    /// 检测同批次内重复自然键
    ///
    /// # 返回
    /// - Vec<(行号, 自然键)>: 重复记录列表（不包括第一次出现，行号从 1 开始）
    pub fn detect_duplicates(&self, records: &[T::Minimal]) -> Vec<(usize, String)> {
        let mut first_occurrence: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let key = T::minimal_key(record);
            if first_occurrence.contains_key(&key) {
                duplicates.push((idx + 1, key));
            } else {
                first_occurrence.insert(key, idx + 1);
            }
        }

        duplicates
    }

    /// 同批次内出现重复即失败
    pub fn ensure_unique(&self, records: &[T::Minimal]) -> ImportResult<()> {
        match self.detect_duplicates(records).into_iter().next() {
            Some((_, key)) => Err(ImportError::DuplicateNaturalKey {
                entity: T::ENTITY.as_str(),
                key,
            }),
            None => Ok(()),
        }
    }
}
