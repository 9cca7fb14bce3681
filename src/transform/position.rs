// ==========================================
// 助教聘任管理系统 - 岗位转换
// ==========================================
// 外键:
// - contract_template ↔ 合同模板名
// - instructors ↔ 教师 utorid 列表（导出时排序，导入时去重）
// ==========================================

use crate::domain::person::Instructor;
use crate::domain::position::{MinimalPosition, Position};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::schema::Record;
use crate::transform::context::{resolve, TransformContext};
use crate::transform::entity_transform::EntityTransform;

pub struct PositionTransform;

impl EntityTransform for PositionTransform {
    type Full = Position;
    type Minimal = MinimalPosition;

    const ENTITY: EntityKind = EntityKind::Position;

    fn to_minimal(full: &Position, _ctx: &TransformContext<'_>) -> ImportResult<MinimalPosition> {
        let mut instructors: Vec<String> =
            full.instructors.iter().map(|i| i.utorid.clone()).collect();
        instructors.sort();

        Ok(MinimalPosition {
            position_code: full.position_code.clone(),
            position_title: full.position_title.clone(),
            start_date: full.start_date,
            end_date: full.end_date,
            hours_per_assignment: full.hours_per_assignment,
            desired_num_assignments: full.desired_num_assignments,
            current_enrollment: full.current_enrollment,
            current_waitlisted: full.current_waitlisted,
            contract_template: full.contract_template.template_name.clone(),
            instructors,
            duties: full.duties.clone(),
            qualifications: full.qualifications.clone(),
        })
    }

    fn from_record(record: &Record, row_number: usize) -> ImportResult<MinimalPosition> {
        let fields = FieldMapper::new(record, row_number);
        Ok(MinimalPosition {
            position_code: fields.require_string("position_code")?,
            position_title: fields.get_string("position_title"),
            start_date: fields.parse_date("start_date")?,
            end_date: fields.parse_date("end_date")?,
            hours_per_assignment: fields.parse_f64("hours_per_assignment")?,
            desired_num_assignments: fields.parse_i64("desired_num_assignments")?,
            current_enrollment: fields.parse_i64("current_enrollment")?,
            current_waitlisted: fields.parse_i64("current_waitlisted")?,
            contract_template: fields.require_string("contract_template")?,
            instructors: fields.parse_string_list("instructors")?,
            duties: fields.get_string("duties"),
            qualifications: fields.get_string("qualifications"),
        })
    }

    fn build_full(minimal: &MinimalPosition, ctx: &TransformContext<'_>) -> ImportResult<Position> {
        let templates = ctx.require_contract_templates("position")?;
        let roster = ctx.require_instructors("position")?;

        let template = resolve(
            templates,
            "position",
            "contract_template",
            &minimal.contract_template,
            |t| t.template_name == minimal.contract_template,
        )?;

        let mut instructors: Vec<Instructor> = Vec::with_capacity(minimal.instructors.len());
        for utorid in &minimal.instructors {
            if instructors.iter().any(|i| &i.utorid == utorid) {
                continue;
            }
            let instructor = resolve(roster, "position", "instructor", utorid, |i| {
                &i.utorid == utorid
            })?;
            instructors.push(instructor.clone());
        }

        Ok(Position {
            id: None,
            position_code: minimal.position_code.clone(),
            position_title: minimal.position_title.clone(),
            start_date: minimal.start_date,
            end_date: minimal.end_date,
            hours_per_assignment: minimal.hours_per_assignment,
            desired_num_assignments: minimal.desired_num_assignments,
            current_enrollment: minimal.current_enrollment,
            current_waitlisted: minimal.current_waitlisted,
            duties: minimal.duties.clone(),
            qualifications: minimal.qualifications.clone(),
            instructors,
            contract_template: template.clone(),
        })
    }

    fn full_id(full: &Position) -> Option<i64> {
        full.id
    }

    fn with_id(full: Position, id: Option<i64>) -> Position {
        Position { id, ..full }
    }

    fn minimal_key(minimal: &MinimalPosition) -> String {
        minimal.position_code.clone()
    }

    fn full_key(full: &Position) -> String {
        full.position_code.clone()
    }
}
