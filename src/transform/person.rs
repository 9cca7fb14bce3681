// ==========================================
// 助教聘任管理系统 - 人员转换（教师 / 申请人）
// ==========================================
// 无外键引用：最小表示 = 完整表示去掉 id
// ==========================================

use crate::domain::person::{Applicant, Instructor, MinimalApplicant, MinimalInstructor};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::schema::Record;
use crate::transform::context::TransformContext;
use crate::transform::entity_transform::EntityTransform;

pub struct InstructorTransform;

impl EntityTransform for InstructorTransform {
    type Full = Instructor;
    type Minimal = MinimalInstructor;

    const ENTITY: EntityKind = EntityKind::Instructor;

    fn to_minimal(full: &Instructor, _ctx: &TransformContext<'_>) -> ImportResult<MinimalInstructor> {
        Ok(MinimalInstructor {
            last_name: full.last_name.clone(),
            first_name: full.first_name.clone(),
            utorid: full.utorid.clone(),
            email: full.email.clone(),
        })
    }

    fn from_record(record: &Record, row_number: usize) -> ImportResult<MinimalInstructor> {
        let fields = FieldMapper::new(record, row_number);
        Ok(MinimalInstructor {
            last_name: fields.get_string("last_name").unwrap_or_default(),
            first_name: fields.get_string("first_name").unwrap_or_default(),
            utorid: fields.require_string("utorid")?,
            email: fields.get_string("email"),
        })
    }

    fn build_full(
        minimal: &MinimalInstructor,
        _ctx: &TransformContext<'_>,
    ) -> ImportResult<Instructor> {
        Ok(Instructor {
            id: None,
            first_name: minimal.first_name.clone(),
            last_name: minimal.last_name.clone(),
            utorid: minimal.utorid.clone(),
            email: minimal.email.clone(),
        })
    }

    fn full_id(full: &Instructor) -> Option<i64> {
        full.id
    }

    fn with_id(full: Instructor, id: Option<i64>) -> Instructor {
        Instructor { id, ..full }
    }

    fn minimal_key(minimal: &MinimalInstructor) -> String {
        minimal.utorid.clone()
    }

    fn full_key(full: &Instructor) -> String {
        full.utorid.clone()
    }
}

pub struct ApplicantTransform;

impl EntityTransform for ApplicantTransform {
    type Full = Applicant;
    type Minimal = MinimalApplicant;

    const ENTITY: EntityKind = EntityKind::Applicant;

    fn to_minimal(full: &Applicant, _ctx: &TransformContext<'_>) -> ImportResult<MinimalApplicant> {
        Ok(MinimalApplicant {
            last_name: full.last_name.clone(),
            first_name: full.first_name.clone(),
            utorid: full.utorid.clone(),
            student_number: full.student_number.clone(),
            email: full.email.clone(),
            phone: full.phone.clone(),
        })
    }

    fn from_record(record: &Record, row_number: usize) -> ImportResult<MinimalApplicant> {
        let fields = FieldMapper::new(record, row_number);
        Ok(MinimalApplicant {
            last_name: fields.get_string("last_name").unwrap_or_default(),
            first_name: fields.get_string("first_name").unwrap_or_default(),
            utorid: fields.require_string("utorid")?,
            student_number: fields.get_string("student_number"),
            email: fields.get_string("email"),
            phone: fields.get_string("phone"),
        })
    }

    fn build_full(
        minimal: &MinimalApplicant,
        _ctx: &TransformContext<'_>,
    ) -> ImportResult<Applicant> {
        Ok(Applicant {
            id: None,
            first_name: minimal.first_name.clone(),
            last_name: minimal.last_name.clone(),
            utorid: minimal.utorid.clone(),
            student_number: minimal.student_number.clone(),
            email: minimal.email.clone(),
            phone: minimal.phone.clone(),
        })
    }

    fn full_id(full: &Applicant) -> Option<i64> {
        full.id
    }

    fn with_id(full: Applicant, id: Option<i64>) -> Applicant {
        Applicant { id, ..full }
    }

    fn minimal_key(minimal: &MinimalApplicant) -> String {
        minimal.utorid.clone()
    }

    fn full_key(full: &Applicant) -> String {
        full.utorid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::shape::UpsertShape;
    use crate::transform::test_fixtures;
    use serde_json::json;

    #[test]
    fn test_instructor_round_trip() {
        let ctx = TransformContext::new();
        for instructor in test_fixtures::instructors() {
            let minimal = InstructorTransform::to_minimal(&instructor, &ctx).unwrap();
            let rebuilt = InstructorTransform::build_full(&minimal, &ctx).unwrap();
            assert_eq!(InstructorTransform::with_id(rebuilt, instructor.id), instructor);
        }
    }

    #[test]
    fn test_minimal_has_no_id() {
        let ctx = TransformContext::new();
        let instructor = &test_fixtures::instructors()[0];
        let minimal = InstructorTransform::to_minimal(instructor, &ctx).unwrap();
        let value = serde_json::to_value(&minimal).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_create_and_update_shapes() {
        let ctx = TransformContext::new();
        let minimal = InstructorTransform::to_minimal(&test_fixtures::instructors()[0], &ctx).unwrap();

        match InstructorTransform::to_create_shape(&minimal, &ctx).unwrap() {
            UpsertShape::Create(full) => assert_eq!(full.id, None),
            other => panic!("unexpected shape: {:?}", other),
        }
        match InstructorTransform::to_update_shape(&minimal, &ctx, 42).unwrap() {
            UpsertShape::Update(full) => assert_eq!(full.id, Some(42)),
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn test_applicant_from_record_numeric_student_number() {
        let record = json!({
            "last_name": "Garcia",
            "first_name": "Maria",
            "utorid": "garciam",
            "student_number": 1001234567,
            "email": null,
            "phone": null,
        })
        .as_object()
        .cloned()
        .unwrap();

        let minimal = ApplicantTransform::from_record(&record, 1).unwrap();
        assert_eq!(minimal.student_number.as_deref(), Some("1001234567"));
        assert_eq!(minimal.email, None);
    }

    #[test]
    fn test_applicant_round_trip() {
        let ctx = TransformContext::new();
        for applicant in test_fixtures::applicants() {
            let minimal = ApplicantTransform::to_minimal(&applicant, &ctx).unwrap();
            let rebuilt = ApplicantTransform::to_update_shape(&minimal, &ctx, applicant.id.unwrap())
                .unwrap()
                .into_entity();
            assert_eq!(rebuilt, applicant);
        }
    }
}
