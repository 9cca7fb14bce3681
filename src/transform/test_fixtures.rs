// 单元测试共享数据：一个跨年学期 + 最小名单

use crate::domain::{
    Applicant, Assignment, ContractTemplate, Instructor, Position, Session, WageChunk,
};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn session() -> Session {
    Session {
        id: 1,
        name: "2021 Fall/2022 Winter".to_string(),
        start_date: date(2021, 9, 1),
        end_date: date(2022, 4, 30),
        rate1: Some(45.55),
        rate2: Some(46.74),
    }
}

pub fn contract_templates() -> Vec<ContractTemplate> {
    vec![
        ContractTemplate {
            id: 1,
            template_name: "Standard".to_string(),
            template_file: "standard.html".to_string(),
        },
        ContractTemplate {
            id: 2,
            template_name: "OTO".to_string(),
            template_file: "oto.html".to_string(),
        },
    ]
}

pub fn instructors() -> Vec<Instructor> {
    vec![
        Instructor {
            id: Some(1),
            first_name: "Henry".to_string(),
            last_name: "Smith".to_string(),
            utorid: "smithh".to_string(),
            email: Some("hery.smith@utoronto.ca".to_string()),
        },
        Instructor {
            id: Some(2),
            first_name: "Emily".to_string(),
            last_name: "Garcia".to_string(),
            utorid: "garciae".to_string(),
            email: None,
        },
    ]
}

pub fn applicants() -> Vec<Applicant> {
    vec![
        Applicant {
            id: Some(10),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            utorid: "doej".to_string(),
            student_number: Some("1001234567".to_string()),
            email: Some("john.doe@mail.utoronto.ca".to_string()),
            phone: None,
        },
        Applicant {
            id: Some(11),
            first_name: "Wei".to_string(),
            last_name: "Zhang".to_string(),
            utorid: "zhangw".to_string(),
            student_number: None,
            email: None,
            phone: Some("4165551234".to_string()),
        },
    ]
}

/// CSC100H1S: 单学期；CSC209Y1Y: 跨年
pub fn positions() -> Vec<Position> {
    let templates = contract_templates();
    let instructors = instructors();
    vec![
        Position {
            id: Some(100),
            position_code: "CSC100H1S".to_string(),
            position_title: Some("Intro to Computer Science".to_string()),
            start_date: Some(date(2021, 9, 1)),
            end_date: Some(date(2021, 12, 31)),
            hours_per_assignment: Some(70.0),
            desired_num_assignments: Some(5),
            current_enrollment: Some(200),
            current_waitlisted: None,
            duties: Some("Tutorials".to_string()),
            qualifications: None,
            instructors: vec![instructors[0].clone()],
            contract_template: templates[0].clone(),
        },
        Position {
            id: Some(101),
            position_code: "CSC209Y1Y".to_string(),
            position_title: Some("Software Tools".to_string()),
            start_date: Some(date(2021, 9, 1)),
            end_date: Some(date(2022, 4, 30)),
            hours_per_assignment: Some(140.0),
            desired_num_assignments: None,
            current_enrollment: None,
            current_waitlisted: None,
            duties: None,
            qualifications: Some("C programming".to_string()),
            instructors: vec![instructors[1].clone(), instructors[0].clone()],
            contract_template: templates[1].clone(),
        },
    ]
}

pub fn assignments() -> Vec<Assignment> {
    let positions = positions();
    let applicants = applicants();
    vec![
        Assignment {
            id: Some(1000),
            applicant: applicants[0].clone(),
            position: positions[0].clone(),
            start_date: positions[0].start_date,
            end_date: positions[0].end_date,
            contract_template: positions[0].contract_template.clone(),
            contract_override_pdf: None,
            hours: 70.0,
            wage_chunks: vec![WageChunk {
                start_date: date(2021, 9, 1),
                end_date: date(2021, 12, 31),
                hours: 70.0,
                rate: Some(45.55),
            }],
        },
        Assignment {
            id: Some(1001),
            applicant: applicants[1].clone(),
            position: positions[1].clone(),
            start_date: positions[1].start_date,
            end_date: positions[1].end_date,
            contract_template: positions[1].contract_template.clone(),
            contract_override_pdf: None,
            hours: 140.0,
            wage_chunks: vec![
                WageChunk {
                    start_date: date(2021, 9, 1),
                    end_date: date(2021, 12, 31),
                    hours: 70.0,
                    rate: Some(45.55),
                },
                WageChunk {
                    start_date: date(2022, 1, 1),
                    end_date: date(2022, 4, 30),
                    hours: 70.0,
                    rate: Some(46.74),
                },
            ],
        },
    ]
}
