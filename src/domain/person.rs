// ==========================================
// 助教聘任管理系统 - 人员实体（教师 / 申请人）
// ==========================================
// 自然键: utorid
// 最小表示: 去掉数据库 id，其余字段原样保留
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Person - 可按 utorid 或姓名匹配的人员
// ==========================================
pub trait Person {
    fn utorid(&self) -> &str;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
}

// ==========================================
// Instructor - 授课教师（完整表示）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub utorid: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalInstructor {
    pub last_name: String,
    pub first_name: String,
    pub utorid: String,
    pub email: Option<String>,
}

// ==========================================
// Applicant - 申请人（完整表示）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub utorid: String,
    pub student_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalApplicant {
    pub last_name: String,
    pub first_name: String,
    pub utorid: String,
    pub student_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Person for Instructor {
    fn utorid(&self) -> &str {
        &self.utorid
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Person for Applicant {
    fn utorid(&self) -> &str {
        &self.utorid
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
}
