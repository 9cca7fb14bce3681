// ==========================================
// 助教聘任管理系统 - 导入 Repository Trait
// ==========================================
// 职责: 定义导入/导出所需的数据访问接口（不包含实现）
// 红线: Repository 不含业务逻辑，只提供快照读取与整批提交
// ==========================================

use crate::domain::{
    Applicant, Assignment, ContractTemplate, Ddah, Instructor, Position, Session,
};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use crate::transform::{TransformContext, UpsertShape};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ==========================================
// Snapshot - 现有数据快照
// ==========================================
// 对账开始前一次性读取，之后只读
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session: Option<Session>,
    pub contract_templates: Vec<ContractTemplate>,
    pub instructors: Vec<Instructor>,
    pub applicants: Vec<Applicant>,
    pub positions: Vec<Position>,
    pub assignments: Vec<Assignment>,
    pub ddahs: Vec<Ddah>,
}

impl Snapshot {
    /// 以快照中的全部集合构造转换上下文
    pub fn context(&self) -> TransformContext<'_> {
        let ctx = TransformContext::new()
            .with_contract_templates(&self.contract_templates)
            .with_instructors(&self.instructors)
            .with_applicants(&self.applicants)
            .with_positions(&self.positions)
            .with_assignments(&self.assignments);
        match &self.session {
            Some(session) => ctx.with_session(session),
            None => ctx,
        }
    }
}

// ==========================================
// UpsertBatch - 一次提交的写入集合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entity", content = "shapes", rename_all = "snake_case")]
pub enum UpsertBatch {
    Instructor(Vec<UpsertShape<Instructor>>),
    Applicant(Vec<UpsertShape<Applicant>>),
    Position(Vec<UpsertShape<Position>>),
    Assignment(Vec<UpsertShape<Assignment>>),
    Ddah(Vec<UpsertShape<Ddah>>),
}

impl UpsertBatch {
    pub fn entity(&self) -> EntityKind {
        match self {
            UpsertBatch::Instructor(_) => EntityKind::Instructor,
            UpsertBatch::Applicant(_) => EntityKind::Applicant,
            UpsertBatch::Position(_) => EntityKind::Position,
            UpsertBatch::Assignment(_) => EntityKind::Assignment,
            UpsertBatch::Ddah(_) => EntityKind::Ddah,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            UpsertBatch::Instructor(s) => s.len(),
            UpsertBatch::Applicant(s) => s.len(),
            UpsertBatch::Position(s) => s.len(),
            UpsertBatch::Assignment(s) => s.len(),
            UpsertBatch::Ddah(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ==========================================
// ImportRepository Trait
// ==========================================
// 实现者: InMemoryImportRepository；关系型持久化层在 crate 之外
#[async_trait]
pub trait ImportRepository: Send + Sync {
    /// 读取当前学期的现有数据快照
    async fn load_snapshot(&self) -> ImportResult<Snapshot>;

    /// 提交一批写入（整批成功或整批失败）
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    /// - Err(Persistence): 持久化失败，未写入任何记录
    async fn commit(&self, batch: UpsertBatch) -> ImportResult<usize>;
}
