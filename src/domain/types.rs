// ==========================================
// 助教聘任管理系统 - 领域类型定义
// ==========================================
// 职责: 实体种类 / 对账状态 / DDAH 状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 实体种类 (Entity Kind)
// ==========================================
// 每种实体对应一份规范化模式（见 importer::schema）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Instructor, // 授课教师
    Applicant,  // 申请人
    Position,   // 助教岗位
    Assignment, // 聘任
    Ddah,       // 工时分配说明（Description of Duties and Allocation of Hours）
}

impl EntityKind {
    /// 用于错误信息与日志的实体名
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Instructor => "instructor",
            EntityKind::Applicant => "applicant",
            EntityKind::Position => "position",
            EntityKind::Assignment => "assignment",
            EntityKind::Ddah => "ddah",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 对账状态 (Diff Status)
// ==========================================
// 序列化格式: 小写（new / modified / unchanged）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    New,       // 现有数据中不存在
    Modified,  // 存在且可比较字段不同
    Unchanged, // 存在且完全一致（不写入）
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffStatus::New => write!(f, "new"),
            DiffStatus::Modified => write!(f, "modified"),
            DiffStatus::Unchanged => write!(f, "unchanged"),
        }
    }
}

// ==========================================
// DDAH 状态
// ==========================================
// 签署/审批状态无法导入，重建的 DDAH 一律为 None
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DdahStatus {
    Pending,
    Emailed,
    Accepted,
}

impl fmt::Display for DdahStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdahStatus::Pending => write!(f, "pending"),
            DdahStatus::Emailed => write!(f, "emailed"),
            DdahStatus::Accepted => write!(f, "accepted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_status_serializes_lowercase() {
        let json = serde_json::to_string(&DiffStatus::Unchanged).unwrap();
        assert_eq!(json, "\"unchanged\"");
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Ddah.to_string(), "ddah");
        assert_eq!(EntityKind::Assignment.as_str(), "assignment");
    }
}
