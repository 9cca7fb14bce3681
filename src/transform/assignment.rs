// ==========================================
// 助教聘任管理系统 - 聘任转换
// ==========================================
// 导出时省略可派生字段:
// - start_date / end_date 与岗位一致 → 省略
// - contract_template 与岗位模板一致 → 省略
// - wage_chunks 可由默认规则重新生成 → 省略
// 导入时对省略字段套用相同的派生规则
// ==========================================

use crate::domain::assignment::{Assignment, MinimalAssignment, MinimalWageChunk, WageChunk};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::schema::Record;
use crate::transform::context::{resolve, TransformContext};
use crate::transform::entity_transform::{compound_key, EntityTransform};
use crate::transform::wage_chunks::{generate_wage_chunks, wage_chunks_derivable};

pub struct AssignmentTransform;

impl EntityTransform for AssignmentTransform {
    type Full = Assignment;
    type Minimal = MinimalAssignment;

    const ENTITY: EntityKind = EntityKind::Assignment;

    fn to_minimal(full: &Assignment, ctx: &TransformContext<'_>) -> ImportResult<MinimalAssignment> {
        let session = ctx.require_session("assignment")?;
        let position = &full.position;

        let wage_chunks = if wage_chunks_derivable(&full.wage_chunks, full.hours, position, session)
        {
            None
        } else {
            Some(full.wage_chunks.iter().map(to_minimal_chunk).collect())
        };

        Ok(MinimalAssignment {
            utorid: full.applicant.utorid.clone(),
            position_code: position.position_code.clone(),
            start_date: full.start_date.filter(|d| Some(*d) != position.start_date),
            end_date: full.end_date.filter(|d| Some(*d) != position.end_date),
            contract_template: (full.contract_template.template_name
                != position.contract_template.template_name)
                .then(|| full.contract_template.template_name.clone()),
            contract_override_pdf: full.contract_override_pdf.clone(),
            hours: full.hours,
            wage_chunks,
        })
    }

    fn from_record(record: &Record, row_number: usize) -> ImportResult<MinimalAssignment> {
        let fields = FieldMapper::new(record, row_number);

        let wage_chunks = match fields.parse_object_list("wage_chunks")? {
            None => None,
            Some(items) => Some(
                items
                    .iter()
                    .map(|item| {
                        let chunk = FieldMapper::new(item, row_number);
                        Ok(MinimalWageChunk {
                            start_date: chunk.require_date("start_date")?,
                            end_date: chunk.require_date("end_date")?,
                            hours: chunk.require_f64("hours")?,
                            rate: chunk.parse_f64("rate")?,
                        })
                    })
                    .collect::<ImportResult<Vec<_>>>()?,
            ),
        };

        Ok(MinimalAssignment {
            utorid: fields.require_string("utorid")?,
            position_code: fields.require_string("position_code")?,
            start_date: fields.parse_date("start_date")?,
            end_date: fields.parse_date("end_date")?,
            contract_template: fields.get_string("contract_template"),
            contract_override_pdf: fields.get_string("contract_override_pdf"),
            hours: fields.require_f64("hours")?,
            wage_chunks,
        })
    }

    fn build_full(
        minimal: &MinimalAssignment,
        ctx: &TransformContext<'_>,
    ) -> ImportResult<Assignment> {
        let session = ctx.require_session("assignment")?;
        let applicants = ctx.require_applicants("assignment")?;
        let positions = ctx.require_positions("assignment")?;
        let templates = ctx.require_contract_templates("assignment")?;

        let applicant = resolve(applicants, "assignment", "applicant", &minimal.utorid, |a| {
            a.utorid == minimal.utorid
        })?;
        let position = resolve(
            positions,
            "assignment",
            "position",
            &minimal.position_code,
            |p| p.position_code == minimal.position_code,
        )?;

        let contract_template = match &minimal.contract_template {
            Some(name) => resolve(templates, "assignment", "contract_template", name, |t| {
                &t.template_name == name
            })?
            .clone(),
            None => position.contract_template.clone(),
        };

        let wage_chunks = match &minimal.wage_chunks {
            Some(chunks) => chunks.iter().map(to_full_chunk).collect(),
            None => generate_wage_chunks(minimal.hours, position, session),
        };

        Ok(Assignment {
            id: None,
            applicant: applicant.clone(),
            position: position.clone(),
            start_date: minimal.start_date.or(position.start_date),
            end_date: minimal.end_date.or(position.end_date),
            contract_template,
            contract_override_pdf: minimal.contract_override_pdf.clone(),
            hours: minimal.hours,
            wage_chunks,
        })
    }

    fn full_id(full: &Assignment) -> Option<i64> {
        full.id
    }

    fn with_id(full: Assignment, id: Option<i64>) -> Assignment {
        Assignment { id, ..full }
    }

    fn minimal_key(minimal: &MinimalAssignment) -> String {
        compound_key(&minimal.utorid, &minimal.position_code)
    }

    fn full_key(full: &Assignment) -> String {
        compound_key(&full.applicant.utorid, &full.position.position_code)
    }
}

fn to_minimal_chunk(chunk: &WageChunk) -> MinimalWageChunk {
    MinimalWageChunk {
        start_date: chunk.start_date,
        end_date: chunk.end_date,
        hours: chunk.hours,
        rate: chunk.rate,
    }
}

fn to_full_chunk(chunk: &MinimalWageChunk) -> WageChunk {
    WageChunk {
        start_date: chunk.start_date,
        end_date: chunk.end_date,
        hours: chunk.hours,
        rate: chunk.rate,
    }
}
