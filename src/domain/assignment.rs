// ==========================================
// 助教聘任管理系统 - 聘任（Assignment）
// ==========================================
// 自然键: (申请人 utorid, position_code)
// 派生规则:
// - start/end 未设置时继承岗位日期
// - 合同模板未设置时继承岗位模板
// - 工资分段可由学期两档时薪 + 岗位日期重建时从最小表示中省略
// ==========================================

use crate::domain::canonical_date;
use crate::domain::person::Applicant;
use crate::domain::position::Position;
use crate::domain::session::ContractTemplate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WageChunk - 工资分段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageChunk {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours: f64,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalWageChunk {
    #[serde(with = "canonical_date")]
    pub start_date: NaiveDate,
    #[serde(with = "canonical_date")]
    pub end_date: NaiveDate,
    pub hours: f64,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub applicant: Applicant,
    pub position: Position,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub contract_template: ContractTemplate,
    pub contract_override_pdf: Option<String>,
    pub hours: f64,
    pub wage_chunks: Vec<WageChunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalAssignment {
    pub utorid: String,
    pub position_code: String,
    #[serde(default, with = "canonical_date::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "canonical_date::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_override_pdf: Option<String>,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wage_chunks: Option<Vec<MinimalWageChunk>>,
}
