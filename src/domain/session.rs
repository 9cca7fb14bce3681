// ==========================================
// 助教聘任管理系统 - 学期（Session）
// ==========================================
// 用途: 聘任工资分段的派生依据（两档时薪 + 学期起止）
// 红线: 导入流程只读，不通过导入创建
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rate1: Option<f64>, // 第一档时薪（起始自然年）
    pub rate2: Option<f64>, // 第二档时薪（跨年后的自然年）
}

// ==========================================
// ContractTemplate - 合同模板
// ==========================================
// 自然键: template_name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTemplate {
    pub id: i64,
    pub template_name: String,
    pub template_file: String,
}
