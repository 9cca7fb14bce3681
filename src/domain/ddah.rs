// ==========================================
// 助教聘任管理系统 - DDAH（工时分配说明）
// ==========================================
// 自然键: (申请人 utorid, position_code)，与所属聘任一致
// 红线: total_hours 与 order 总是重算；status 不可导入
// ==========================================

use crate::domain::assignment::Assignment;
use crate::domain::types::DdahStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duty {
    pub order: u32,
    pub description: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ddah {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub assignment: Assignment,
    pub duties: Vec<Duty>,
    pub total_hours: f64,
    pub status: Option<DdahStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalDuty {
    pub description: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalDdah {
    pub position_code: String,
    pub applicant: String, // 申请人 utorid
    pub duties: Vec<MinimalDuty>,
}
