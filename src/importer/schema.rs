// ==========================================
// 助教聘任管理系统 - 规范化模式
// ==========================================
// 职责: 每种实体一份不可变模式（进程级常量）
// 内容: 规范字段 / 必填字段 / 列名别名 / 日期列 / 主键 / JSON 包装名
// ==========================================

use crate::domain::types::EntityKind;
use serde_json::{Map, Value};

/// 规范化后的记录（规范字段名 → 单元格值）
pub type Record = Map<String, Value>;

// ==========================================
// NormalizationSchema - 规范化模式
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationSchema {
    pub entity: EntityKind,
    pub keys: &'static [&'static str],
    pub required_keys: &'static [&'static str],
    pub key_map: &'static [(&'static str, &'static str)], // 已知别名 → 规范字段
    pub date_columns: &'static [&'static str],
    pub primary_key: &'static [&'static str],
    pub base_name: &'static str,
}

pub static INSTRUCTOR_SCHEMA: NormalizationSchema = NormalizationSchema {
    entity: EntityKind::Instructor,
    keys: &["last_name", "first_name", "utorid", "email"],
    required_keys: &["utorid"],
    key_map: &[
        ("First Name", "first_name"),
        ("Given Name", "first_name"),
        ("First", "first_name"),
        ("Last Name", "last_name"),
        ("Surname", "last_name"),
        ("Family Name", "last_name"),
        ("Last", "last_name"),
        ("Email", "email"),
        ("Email Address", "email"),
        ("UTORid", "utorid"),
        ("UTORID", "utorid"),
    ],
    date_columns: &[],
    primary_key: &["utorid"],
    base_name: "instructors",
};

pub static APPLICANT_SCHEMA: NormalizationSchema = NormalizationSchema {
    entity: EntityKind::Applicant,
    keys: &[
        "last_name",
        "first_name",
        "utorid",
        "student_number",
        "email",
        "phone",
    ],
    required_keys: &["utorid"],
    key_map: &[
        ("First Name", "first_name"),
        ("Given Name", "first_name"),
        ("First", "first_name"),
        ("Last Name", "last_name"),
        ("Surname", "last_name"),
        ("Family Name", "last_name"),
        ("Last", "last_name"),
        ("Email", "email"),
        ("Email Address", "email"),
        ("UTORid", "utorid"),
        ("UTORID", "utorid"),
        ("Student Number", "student_number"),
        ("Student ID", "student_number"),
        ("Phone", "phone"),
        ("Phone Number", "phone"),
    ],
    date_columns: &[],
    primary_key: &["utorid"],
    base_name: "applicants",
};

pub static POSITION_SCHEMA: NormalizationSchema = NormalizationSchema {
    entity: EntityKind::Position,
    keys: &[
        "position_code",
        "position_title",
        "start_date",
        "end_date",
        "hours_per_assignment",
        "desired_num_assignments",
        "current_enrollment",
        "current_waitlisted",
        "contract_template",
        "instructors",
        "duties",
        "qualifications",
    ],
    required_keys: &["position_code", "contract_template"],
    key_map: &[
        ("Position Code", "position_code"),
        ("Course Code", "position_code"),
        ("Course", "position_code"),
        ("Position Title", "position_title"),
        ("Course Title", "position_title"),
        ("Title", "position_title"),
        ("Start Date", "start_date"),
        ("Start", "start_date"),
        ("End Date", "end_date"),
        ("End", "end_date"),
        ("Hours Per Assignment", "hours_per_assignment"),
        ("Hours per Assignment", "hours_per_assignment"),
        ("Desired Assignments", "desired_num_assignments"),
        ("Number of Assignments", "desired_num_assignments"),
        ("Enrollment", "current_enrollment"),
        ("Current Enrollment", "current_enrollment"),
        ("Waitlist", "current_waitlisted"),
        ("Waitlisted", "current_waitlisted"),
        ("Contract Template", "contract_template"),
        ("Template", "contract_template"),
        ("Instructors", "instructors"),
        ("Instructor", "instructors"),
        ("Duties", "duties"),
        ("Qualifications", "qualifications"),
    ],
    date_columns: &["start_date", "end_date"],
    primary_key: &["position_code"],
    base_name: "positions",
};

pub static ASSIGNMENT_SCHEMA: NormalizationSchema = NormalizationSchema {
    entity: EntityKind::Assignment,
    keys: &[
        "utorid",
        "position_code",
        "start_date",
        "end_date",
        "contract_template",
        "contract_override_pdf",
        "hours",
        "wage_chunks",
    ],
    required_keys: &["utorid", "position_code", "hours"],
    key_map: &[
        ("UTORid", "utorid"),
        ("UTORID", "utorid"),
        ("Position Code", "position_code"),
        ("Course Code", "position_code"),
        ("Course", "position_code"),
        ("Start Date", "start_date"),
        ("End Date", "end_date"),
        ("Contract Template", "contract_template"),
        ("Template", "contract_template"),
        ("Contract Override PDF", "contract_override_pdf"),
        ("Hours", "hours"),
        ("Total Hours", "hours"),
        ("Wage Chunks", "wage_chunks"),
    ],
    date_columns: &["start_date", "end_date"],
    primary_key: &["utorid", "position_code"],
    base_name: "assignments",
};

pub static DDAH_SCHEMA: NormalizationSchema = NormalizationSchema {
    entity: EntityKind::Ddah,
    keys: &[
        "position_code",
        "applicant",
        "email",
        "first_name",
        "last_name",
        "hours",
        "duties",
    ],
    required_keys: &["position_code", "applicant"],
    key_map: &[
        ("Position Code", "position_code"),
        ("Course Code", "position_code"),
        ("Course", "position_code"),
        ("UTORid", "applicant"),
        ("UTORID", "applicant"),
        ("utorid", "applicant"),
        ("Applicant", "applicant"),
        ("Email", "email"),
        ("First Name", "first_name"),
        ("Last Name", "last_name"),
        ("Total Hours", "hours"),
        ("Hours", "hours"),
    ],
    date_columns: &[],
    primary_key: &["applicant", "position_code"],
    base_name: "ddahs",
};

/// 按实体种类取模式
pub fn schema_for(entity: EntityKind) -> &'static NormalizationSchema {
    match entity {
        EntityKind::Instructor => &INSTRUCTOR_SCHEMA,
        EntityKind::Applicant => &APPLICANT_SCHEMA,
        EntityKind::Position => &POSITION_SCHEMA,
        EntityKind::Assignment => &ASSIGNMENT_SCHEMA,
        EntityKind::Ddah => &DDAH_SCHEMA,
    }
}
