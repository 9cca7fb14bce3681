// ==========================================
// 助教聘任管理系统 - 助教岗位（Position）
// ==========================================
// 自然键: position_code
// 最小表示: 教师以 utorid 列表表示，合同模板以 template_name 表示
// ==========================================

use crate::domain::canonical_date;
use crate::domain::person::Instructor;
use crate::domain::session::ContractTemplate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub position_code: String,
    pub position_title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub hours_per_assignment: Option<f64>,
    pub desired_num_assignments: Option<i64>,
    pub current_enrollment: Option<i64>,
    pub current_waitlisted: Option<i64>,
    pub duties: Option<String>,
    pub qualifications: Option<String>,

    // ===== 已解析的外键对象 =====
    pub instructors: Vec<Instructor>,
    pub contract_template: ContractTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalPosition {
    pub position_code: String,
    pub position_title: Option<String>,
    #[serde(default, with = "canonical_date::option")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "canonical_date::option")]
    pub end_date: Option<NaiveDate>,
    pub hours_per_assignment: Option<f64>,
    pub desired_num_assignments: Option<i64>,
    pub current_enrollment: Option<i64>,
    pub current_waitlisted: Option<i64>,
    pub contract_template: String, // 合同模板名（自然键）
    pub instructors: Vec<String>,  // 教师 utorid（排序后）
    pub duties: Option<String>,
    pub qualifications: Option<String>,
}
