// ==========================================
// ImportService 集成测试
// ==========================================
// 测试目标: 规范化 → 对账 → 提交 的完整流程与幂等性
// ==========================================


use serde_json::json;
use ta_appointments_import::logging;
use ta_appointments_import::{
    ApplicantTransform, AssignmentTransform, DdahTransform, DiffStatus, ImportError,
    ImportPayload, InstructorTransform, PositionTransform, Snapshot,
};
use test_helpers::{create_test_service, date, seeded_snapshot, spreadsheet};

#[tokio::test]
async fn test_import_same_instructors_twice_is_unchanged() {
    logging::init_test();

    let service = create_test_service(Snapshot {
        session: Some(test_helpers::session()),
        ..Snapshot::default()
    });
    let payload = spreadsheet(json!([
        { "Last Name": "Smith", "First Name": "Henry", "UTORid": "smithh", "Email": "henry.smith@utoronto.ca" },
        { "Last Name": "Garcia", "First Name": "Emily", "UTORid": "garciae" },
    ]));

    let first = service.import::<InstructorTransform>(&payload).await.unwrap();
    assert_eq!(first.summary.new, 2);
    assert_eq!(first.written, 2);

    let specs = service.preview::<InstructorTransform>(&payload).await.unwrap();
    assert!(specs.iter().all(|s| s.status == DiffStatus::Unchanged));

    let second = service.import::<InstructorTransform>(&payload).await.unwrap();
    assert_eq!(second.summary.unchanged, 2);
    assert_eq!(second.written, 0);
    assert_ne!(first.batch_id, second.batch_id);

    let stored = service.repository().snapshot().unwrap();
    assert_eq!(stored.instructors.len(), 2);
    assert_eq!(stored.instructors[0].id, Some(1));
}

#[tokio::test]
async fn test_modified_applicant_updates_in_place() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = ImportPayload::Json(json!({
        "applicants": [
            { "utorid": "doej", "first_name": "John", "last_name": "Doe",
              "student_number": "1001234567", "email": "jdoe@mail.utoronto.ca" },
            { "utorid": "zhangw", "first_name": "Wei", "last_name": "Zhang", "phone": 4165551234_i64 },
        ]
    }));

    let report = service.import::<ApplicantTransform>(&payload).await.unwrap();
    assert_eq!(report.summary.modified, 1);
    assert_eq!(report.summary.unchanged, 1);
    assert_eq!(report.written, 1);

    let stored = service.repository().snapshot().unwrap();
    let doej = stored.applicants.iter().find(|a| a.utorid == "doej").unwrap();
    assert_eq!(doej.id, Some(10));
    assert_eq!(doej.email.as_deref(), Some("jdoe@mail.utoronto.ca"));
    assert_eq!(stored.applicants.len(), 2);
}

#[tokio::test]
async fn test_position_with_unknown_instructor_writes_nothing() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = spreadsheet(json!([
        { "Course Code": "CSC300H1F", "Contract Template": "Standard", "Instructors": "smithh" },
        { "Course Code": "CSC301H1F", "Contract Template": "Standard", "Instructors": "nobody" },
    ]));

    match service.import::<PositionTransform>(&payload).await.unwrap_err() {
        ImportError::ReferenceResolution { key_kind, key, .. } => {
            assert_eq!(key_kind, "instructor");
            assert_eq!(key, "nobody");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let stored = service.repository().snapshot().unwrap();
    assert_eq!(stored.positions.len(), 2);
}

#[tokio::test]
async fn test_missing_required_field_aborts_batch() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = spreadsheet(json!([
        { "UTORid": "doej", "Course": "CSC209Y1Y", "Hours": 20 },
        { "UTORid": "zhangw", "Course": "CSC100H1S" },
    ]));

    match service.import::<AssignmentTransform>(&payload).await.unwrap_err() {
        ImportError::Validation { field, record } => {
            assert_eq!(field, "hours");
            assert!(record.contains("zhangw"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(service.repository().snapshot().unwrap().assignments.len(), 2);
}

#[tokio::test]
async fn test_new_assignment_gets_generated_wage_chunks() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = spreadsheet(json!([
        { "UTORid": "zhangw", "Position Code": "CSC100H1S", "Hours": "35" },
    ]));

    let report = service.import::<AssignmentTransform>(&payload).await.unwrap();
    assert_eq!(report.summary.new, 1);

    let stored = service.repository().snapshot().unwrap();
    let created = stored
        .assignments
        .iter()
        .find(|a| a.applicant.utorid == "zhangw" && a.position.position_code == "CSC100H1S")
        .unwrap();
    assert_eq!(created.id, Some(1002));
    assert_eq!(created.start_date, Some(date(2021, 9, 1)));
    assert_eq!(created.contract_template.template_name, "Standard");
    assert_eq!(created.wage_chunks.len(), 1);
    assert_eq!(created.wage_chunks[0].hours, 35.0);
    assert_eq!(created.wage_chunks[0].rate, Some(45.55));

    // 再次导入同一文件零写入
    let again = service.import::<AssignmentTransform>(&payload).await.unwrap();
    assert_eq!(again.written, 0);
}

#[tokio::test]
async fn test_ddah_by_name_with_duty_columns() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = spreadsheet(json!([
        {
            "Course": "CSC209Y1Y",
            "First Name": "Wei",
            "Last Name": "Zhang",
            "Duty 1": "Labs",
            "Hours 1": 100,
            "Duty 3": "Office hours",
            "Hours 3": "40",
        },
    ]));

    let report = service.import::<DdahTransform>(&payload).await.unwrap();
    assert_eq!(report.summary.new, 1);

    let stored = service.repository().snapshot().unwrap();
    let ddah = stored
        .ddahs
        .iter()
        .find(|d| d.assignment.applicant.utorid == "zhangw")
        .unwrap();
    assert_eq!(ddah.duties.len(), 2);
    assert_eq!(ddah.duties[1].order, 2);
    assert_eq!(ddah.duties[1].description, "Office hours");
    assert_eq!(ddah.total_hours, 140.0);
}

#[tokio::test]
async fn test_duplicate_natural_key_in_batch_rejected() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = spreadsheet(json!([
        { "UTORid": "doej", "Course": "CSC209Y1Y", "Hours": 20 },
        { "UTORid": "doej", "Course": "CSC209Y1Y", "Hours": 30 },
    ]));

    assert!(matches!(
        service.import::<AssignmentTransform>(&payload).await,
        Err(ImportError::DuplicateNaturalKey { entity: "assignment", .. })
    ));
}

#[tokio::test]
async fn test_preview_rejects_new_assignment_with_unknown_keys() {
    logging::init_test();

    let service = create_test_service(seeded_snapshot());
    let payload = spreadsheet(json!([
        { "UTORid": "ghost", "Position Code": "NOPE999", "Hours": 10 },
    ]));

    match service.preview::<AssignmentTransform>(&payload).await.unwrap_err() {
        ImportError::ReferenceResolution { key_kind, key, .. } => {
            assert_eq!(key_kind, "applicant");
            assert_eq!(key, "ghost");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
