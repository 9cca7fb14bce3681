// ==========================================
// 助教聘任管理系统 - 写入形态
// ==========================================
// Create: 不带 id，交由持久化层新建
// Update: 带已有 id，原位更新
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "entity", rename_all = "lowercase")]
pub enum UpsertShape<T> {
    Create(T),
    Update(T),
}

impl<T> UpsertShape<T> {
    pub fn entity(&self) -> &T {
        match self {
            UpsertShape::Create(entity) | UpsertShape::Update(entity) => entity,
        }
    }

    pub fn into_entity(self) -> T {
        match self {
            UpsertShape::Create(entity) | UpsertShape::Update(entity) => entity,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, UpsertShape::Update(_))
    }
}
