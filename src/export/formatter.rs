// ==========================================
// 助教聘任管理系统 - 导出格式化器
// ==========================================
// 职责: 最小表示 → JSON 文档 / 表格行（表头 + 数据行）
// 约定: 表头使用导入端列名别名，导出文件可原样再导入
// - instructors 写成 "a, b"
// - wage_chunks 写成单元格内 JSON 文本
// - DDAH 工作项展开为 Duty N / Hours N 列对
// ==========================================

use crate::domain::{
    MinimalApplicant, MinimalAssignment, MinimalDdah, MinimalInstructor, MinimalPosition,
};
use crate::importer::date_normalizer::format_canonical;
use crate::importer::error::ImportResult;
use crate::importer::schema::NormalizationSchema;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON 导出: { [baseName]: [...] }
pub fn to_json<M: Serialize>(records: &[M], schema: &NormalizationSchema) -> ImportResult<Value> {
    let mut document = Map::new();
    document.insert(schema.base_name.to_string(), serde_json::to_value(records)?);
    Ok(Value::Object(document))
}

// ==========================================
// SpreadsheetFormatter Trait
// ==========================================
pub trait SpreadsheetFormatter: Sized {
    /// 表头行 + 每条记录一行
    fn to_spreadsheet_rows(records: &[Self]) -> ImportResult<Vec<Vec<Value>>>;
}

fn header(names: &[&str]) -> Vec<Value> {
    names.iter().map(|n| Value::String(n.to_string())).collect()
}

fn text(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}

fn date(value: Option<NaiveDate>) -> Value {
    value
        .map(|d| Value::String(format_canonical(d)))
        .unwrap_or(Value::Null)
}

fn number<N: Into<Value>>(value: Option<N>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

impl SpreadsheetFormatter for MinimalInstructor {
    fn to_spreadsheet_rows(records: &[Self]) -> ImportResult<Vec<Vec<Value>>> {
        let mut rows = vec![header(&["Last Name", "First Name", "UTORid", "Email"])];
        rows.extend(records.iter().map(|r| {
            vec![
                Value::String(r.last_name.clone()),
                Value::String(r.first_name.clone()),
                Value::String(r.utorid.clone()),
                text(&r.email),
            ]
        }));
        Ok(rows)
    }
}

impl SpreadsheetFormatter for MinimalApplicant {
    fn to_spreadsheet_rows(records: &[Self]) -> ImportResult<Vec<Vec<Value>>> {
        let mut rows = vec![header(&[
            "Last Name",
            "First Name",
            "UTORid",
            "Student Number",
            "Email",
            "Phone",
        ])];
        rows.extend(records.iter().map(|r| {
            vec![
                Value::String(r.last_name.clone()),
                Value::String(r.first_name.clone()),
                Value::String(r.utorid.clone()),
                text(&r.student_number),
                text(&r.email),
                text(&r.phone),
            ]
        }));
        Ok(rows)
    }
}

impl SpreadsheetFormatter for MinimalPosition {
    fn to_spreadsheet_rows(records: &[Self]) -> ImportResult<Vec<Vec<Value>>> {
        let mut rows = vec![header(&[
            "Position Code",
            "Position Title",
            "Start Date",
            "End Date",
            "Hours Per Assignment",
            "Desired Assignments",
            "Current Enrollment",
            "Waitlisted",
            "Contract Template",
            "Instructors",
            "Duties",
            "Qualifications",
        ])];
        rows.extend(records.iter().map(|r| {
            vec![
                Value::String(r.position_code.clone()),
                text(&r.position_title),
                date(r.start_date),
                date(r.end_date),
                number(r.hours_per_assignment),
                number(r.desired_num_assignments),
                number(r.current_enrollment),
                number(r.current_waitlisted),
                Value::String(r.contract_template.clone()),
                Value::String(r.instructors.join(", ")),
                text(&r.duties),
                text(&r.qualifications),
            ]
        }));
        Ok(rows)
    }
}

impl SpreadsheetFormatter for MinimalAssignment {
    fn to_spreadsheet_rows(records: &[Self]) -> ImportResult<Vec<Vec<Value>>> {
        let mut rows = vec![header(&[
            "UTORid",
            "Position Code",
            "Start Date",
            "End Date",
            "Contract Template",
            "Contract Override PDF",
            "Hours",
            "Wage Chunks",
        ])];
        for r in records {
            let wage_chunks = match &r.wage_chunks {
                Some(chunks) => Value::String(serde_json::to_string(chunks)?),
                None => Value::Null,
            };
            rows.push(vec![
                Value::String(r.utorid.clone()),
                Value::String(r.position_code.clone()),
                date(r.start_date),
                date(r.end_date),
                text(&r.contract_template),
                text(&r.contract_override_pdf),
                Value::from(r.hours),
                wage_chunks,
            ]);
        }
        Ok(rows)
    }
}

impl SpreadsheetFormatter for MinimalDdah {
    fn to_spreadsheet_rows(records: &[Self]) -> ImportResult<Vec<Vec<Value>>> {
        let max_duties = records.iter().map(|r| r.duties.len()).max().unwrap_or(0);

        let mut head = header(&["Position Code", "UTORid", "Total Hours"]);
        for n in 1..=max_duties {
            head.push(Value::String(format!("Duty {}", n)));
            head.push(Value::String(format!("Hours {}", n)));
        }

        let mut rows = vec![head];
        for r in records {
            let total: f64 = r.duties.iter().map(|d| d.hours).sum();
            let mut row = vec![
                Value::String(r.position_code.clone()),
                Value::String(r.applicant.clone()),
                Value::from(total),
            ];
            for idx in 0..max_duties {
                match r.duties.get(idx) {
                    Some(duty) => {
                        row.push(Value::String(duty.description.clone()));
                        row.push(Value::from(duty.hours));
                    }
                    None => {
                        row.push(Value::Null);
                        row.push(Value::Null);
                    }
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MinimalDuty;
    use crate::importer::schema::INSTRUCTOR_SCHEMA;
    use serde_json::json;

    #[test]
    fn test_to_json_wraps_in_base_name() {
        let records = vec![MinimalInstructor {
            last_name: "Smith".to_string(),
            first_name: "Henry".to_string(),
            utorid: "smithh".to_string(),
            email: None,
        }];

        let value = to_json(&records, &INSTRUCTOR_SCHEMA).unwrap();
        assert_eq!(value["instructors"][0]["utorid"], json!("smithh"));
        assert!(value["instructors"][0].get("id").is_none());
    }

    #[test]
    fn test_position_rows_join_instructors_and_dates() {
        let records = vec![MinimalPosition {
            position_code: "CSC100H1S".to_string(),
            position_title: None,
            start_date: NaiveDate::from_ymd_opt(2021, 9, 1),
            end_date: None,
            hours_per_assignment: Some(70.0),
            desired_num_assignments: Some(5),
            current_enrollment: None,
            current_waitlisted: None,
            contract_template: "Standard".to_string(),
            instructors: vec!["garciae".to_string(), "smithh".to_string()],
            duties: None,
            qualifications: None,
        }];

        let rows = MinimalPosition::to_spreadsheet_rows(&records).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), rows[1].len());
        assert_eq!(rows[1][2], json!("2021-09-01T00:00:00.000Z"));
        assert_eq!(rows[1][3], Value::Null);
        assert_eq!(rows[1][5], json!(5));
        assert_eq!(rows[1][9], json!("garciae, smithh"));
    }

    #[test]
    fn test_ddah_rows_pad_duty_columns() {
        let records = vec![
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
            },
            MinimalDdah {
                position_code: "CSC209Y1Y".to_string(),
                applicant: "zhangw".to_string(),
                duties: vec![MinimalDuty {
                    description: "Labs".to_string(),
                    hours: 20.0,
                }],
            },
        ];

        let rows = MinimalDdah::to_spreadsheet_rows(&records).unwrap();
        assert_eq!(
            rows[0],
            vec![
                json!("Position Code"),
                json!("UTORid"),
                json!("Total Hours"),
                json!("Duty 1"),
                json!("Hours 1"),
                json!("Duty 2"),
                json!("Hours 2"),
            ]
        );
        assert_eq!(rows[1][2], json!(70.0));
        assert_eq!(rows[2][5], Value::Null);
    }
}
