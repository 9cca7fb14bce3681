// ==========================================
// 助教聘任管理系统 - DDAH 转换
// ==========================================
// 外键: (applicant utorid, position_code) ↔ 聘任
// 派生: duty.order 按出现顺序从 1 重新编号；total_hours = Σ duty.hours
// ==========================================

use crate::domain::ddah::{Ddah, Duty, MinimalDdah, MinimalDuty};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::schema::Record;
use crate::transform::context::{resolve, TransformContext};
use crate::transform::entity_transform::{compound_key, EntityTransform};

pub struct DdahTransform;

impl EntityTransform for DdahTransform {
    type Full = Ddah;
    type Minimal = MinimalDdah;

    const ENTITY: EntityKind = EntityKind::Ddah;

    fn to_minimal(full: &Ddah, _ctx: &TransformContext<'_>) -> ImportResult<MinimalDdah> {
        let mut duties: Vec<&Duty> = full.duties.iter().collect();
        duties.sort_by_key(|d| d.order);

        Ok(MinimalDdah {
            position_code: full.assignment.position.position_code.clone(),
            applicant: full.assignment.applicant.utorid.clone(),
            duties: duties
                .into_iter()
                .map(|d| MinimalDuty {
                    description: d.description.clone(),
                    hours: d.hours,
                })
                .collect(),
        })
    }

    fn from_record(record: &Record, row_number: usize) -> ImportResult<MinimalDdah> {
        let fields = FieldMapper::new(record, row_number);

        let duties = fields
            .parse_object_list("duties")?
            .unwrap_or_default()
            .iter()
            .map(|item| {
                let duty = FieldMapper::new(item, row_number);
                Ok(MinimalDuty {
                    description: duty.get_string("description").unwrap_or_default(),
                    hours: duty.parse_f64("hours")?.unwrap_or(0.0),
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(MinimalDdah {
            position_code: fields.require_string("position_code")?,
            applicant: fields.require_string("applicant")?,
            duties,
        })
    }

    fn build_full(minimal: &MinimalDdah, ctx: &TransformContext<'_>) -> ImportResult<Ddah> {
        let assignments = ctx.require_assignments("ddah")?;
        let key = compound_key(&minimal.applicant, &minimal.position_code);

        let assignment = resolve(assignments, "ddah", "assignment", &key, |a| {
            a.applicant.utorid == minimal.applicant
                && a.position.position_code == minimal.position_code
        })?;

        let duties: Vec<Duty> = minimal
            .duties
            .iter()
            .enumerate()
            .map(|(idx, d)| Duty {
                order: idx as u32 + 1,
                description: d.description.clone(),
                hours: d.hours,
            })
            .collect();
        let total_hours: f64 = duties.iter().map(|d| d.hours).sum();

        Ok(Ddah {
            id: None,
            assignment: assignment.clone(),
            duties,
            total_hours,
            status: None,
        })
    }

    fn full_id(full: &Ddah) -> Option<i64> {
        full.id
    }

    fn with_id(full: Ddah, id: Option<i64>) -> Ddah {
        Ddah { id, ..full }
    }

    fn minimal_key(minimal: &MinimalDdah) -> String {
        compound_key(&minimal.applicant, &minimal.position_code)
    }

    fn full_key(full: &Ddah) -> String {
        compound_key(
            &full.assignment.applicant.utorid,
            &full.assignment.position.position_code,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use crate::transform::test_fixtures;
    use serde_json::json;

    fn minimal_ddah() -> MinimalDdah {
        MinimalDdah {
            position_code: "CSC100H1S".to_string(),
            applicant: "doej".to_string(),
            duties: vec![
                MinimalDuty {
                    description: "Tutorials".to_string(),
                    hours: 40.0,
                },
                MinimalDuty {
                    description: "Marking".to_string(),
                    hours: 30.0,
                },
            ],
        }
    }

    #[test]
    fn test_build_full_numbers_duties_and_sums_hours() {
        let assignments = test_fixtures::assignments();
        let ctx = TransformContext::new().with_assignments(&assignments);

        let full = DdahTransform::build_full(&minimal_ddah(), &ctx).unwrap();
        assert_eq!(full.assignment.id, Some(1000));
        assert_eq!(full.duties[0].order, 1);
        assert_eq!(full.duties[1].order, 2);
        assert_eq!(full.total_hours, 70.0);
        assert_eq!(full.status, None);
    }

    #[test]
    fn test_to_minimal_orders_duties() {
        let assignments = test_fixtures::assignments();
        let ctx = TransformContext::new().with_assignments(&assignments);

        let mut full = DdahTransform::build_full(&minimal_ddah(), &ctx).unwrap();
        full.duties.reverse();

        assert_eq!(DdahTransform::to_minimal(&full, &ctx).unwrap(), minimal_ddah());
    }

    #[test]
    fn test_unknown_assignment_names_compound_key() {
        let assignments = test_fixtures::assignments();
        let ctx = TransformContext::new().with_assignments(&assignments);

        let mut minimal = minimal_ddah();
        minimal.position_code = "CSC209Y1Y".to_string();

        match DdahTransform::build_full(&minimal, &ctx).unwrap_err() {
            ImportError::ReferenceResolution { key, .. } => assert_eq!(key, "doej / CSC209Y1Y"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_assignments_context() {
        assert!(matches!(
            DdahTransform::build_full(&minimal_ddah(), &TransformContext::new()),
            Err(ImportError::MissingContext { collection: "assignments", .. })
        ));
    }

    #[test]
    fn test_from_record_defaults_blank_duty_fields() {
        let record = json!({
            "position_code": "CSC100H1S",
            "applicant": "doej",
            "duties": [
                { "description": "Tutorials", "hours": 40 },
                { "description": null, "hours": null },
            ],
        })
        .as_object()
        .cloned()
        .unwrap();

        let minimal = DdahTransform::from_record(&record, 1).unwrap();
        assert_eq!(minimal.duties[1].description, "");
        assert_eq!(minimal.duties[1].hours, 0.0);
    }
}
