// ==========================================
// 助教聘任管理系统 - 转换上下文
// ==========================================
// 职责: 为 最小 → 完整 重建提供自然键解析所需的集合
// 红线: 集合缺失（None）是独立的错误，区别于集合中查找不到
// ==========================================

use crate::domain::{
    Applicant, Assignment, ContractTemplate, Instructor, Position, Session,
};
use crate::importer::error::{ImportError, ImportResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformContext<'a> {
    pub session: Option<&'a Session>,
    pub contract_templates: Option<&'a [ContractTemplate]>,
    pub instructors: Option<&'a [Instructor]>,
    pub applicants: Option<&'a [Applicant]>,
    pub positions: Option<&'a [Position]>,
    pub assignments: Option<&'a [Assignment]>,
}

impl<'a> TransformContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session: &'a Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_contract_templates(mut self, templates: &'a [ContractTemplate]) -> Self {
        self.contract_templates = Some(templates);
        self
    }

    pub fn with_instructors(mut self, instructors: &'a [Instructor]) -> Self {
        self.instructors = Some(instructors);
        self
    }

    pub fn with_applicants(mut self, applicants: &'a [Applicant]) -> Self {
        self.applicants = Some(applicants);
        self
    }

    pub fn with_positions(mut self, positions: &'a [Position]) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn with_assignments(mut self, assignments: &'a [Assignment]) -> Self {
        self.assignments = Some(assignments);
        self
    }

    // ===== 必需集合 =====

    pub fn require_session(&self, entity: &'static str) -> ImportResult<&'a Session> {
        self.session.ok_or(missing(entity, "session"))
    }

    pub fn require_contract_templates(
        &self,
        entity: &'static str,
    ) -> ImportResult<&'a [ContractTemplate]> {
        self.contract_templates
            .ok_or(missing(entity, "contract_templates"))
    }

    pub fn require_instructors(&self, entity: &'static str) -> ImportResult<&'a [Instructor]> {
        self.instructors.ok_or(missing(entity, "instructors"))
    }

    pub fn require_applicants(&self, entity: &'static str) -> ImportResult<&'a [Applicant]> {
        self.applicants.ok_or(missing(entity, "applicants"))
    }

    pub fn require_positions(&self, entity: &'static str) -> ImportResult<&'a [Position]> {
        self.positions.ok_or(missing(entity, "positions"))
    }

    pub fn require_assignments(&self, entity: &'static str) -> ImportResult<&'a [Assignment]> {
        self.assignments.ok_or(missing(entity, "assignments"))
    }
}

fn missing(entity: &'static str, collection: &'static str) -> ImportError {
    ImportError::MissingContext { entity, collection }
}

/// 在集合中按自然键查找，找不到即报 ReferenceResolution
pub fn resolve<'a, T, F>(
    items: &'a [T],
    entity: &'static str,
    key_kind: &'static str,
    key: &str,
    matches: F,
) -> ImportResult<&'a T>
where
    F: Fn(&T) -> bool,
{
    items
        .iter()
        .find(|item| matches(item))
        .ok_or_else(|| ImportError::ReferenceResolution {
            entity,
            key_kind,
            key: key.to_string(),
        })
}
