// ==========================================
// 助教聘任管理系统 - 工资分段
// ==========================================
// 职责:
// 1. generate_wage_chunks: 按自然年切分岗位区间，生成默认工资分段
// 2. wage_chunks_derivable: 判断已有分段能否由默认规则重新生成（精确相等）
// 规则:
// - 岗位未给出日期时沿用学期日期
// - 分段所在年份 == 学期起始年份 → rate1，否则 rate2
// - 跨两年时每段 hours / 2，末段取余量，保证合计精确等于总课时
// ==========================================

use crate::domain::assignment::WageChunk;
use crate::domain::position::Position;
use crate::domain::session::Session;
use chrono::{Datelike, NaiveDate};

/// 岗位的生效区间（缺失时回落到学期区间）
pub fn effective_position_dates(position: &Position, session: &Session) -> (NaiveDate, NaiveDate) {
    (
        position.start_date.unwrap_or(session.start_date),
        position.end_date.unwrap_or(session.end_date),
    )
}

/// 按自然年边界切分 [start, end]
fn split_at_year_boundaries(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut segments = Vec::new();
    let mut segment_start = start;

    while let Some(year_end) = NaiveDate::from_ymd_opt(segment_start.year(), 12, 31) {
        if year_end >= end {
            break;
        }
        segments.push((segment_start, year_end));
        match year_end.succ_opt() {
            Some(next) => segment_start = next,
            None => break,
        }
    }
    segments.push((segment_start, end));

    segments
}

fn rate_for_year(year: i32, session: &Session) -> Option<f64> {
    if year == session.start_date.year() {
        session.rate1
    } else {
        session.rate2
    }
}

/// 生成默认工资分段
///
/// # 参数
/// - hours: 聘任总课时
/// - position: 所属岗位（提供区间）
/// - session: 学期（提供两档时薪）
pub fn generate_wage_chunks(hours: f64, position: &Position, session: &Session) -> Vec<WageChunk> {
    let (start, end) = effective_position_dates(position, session);
    let segments = split_at_year_boundaries(start, end);

    let count = segments.len();
    let share = hours / count as f64;
    let last_share = hours - share * (count - 1) as f64;

    segments
        .into_iter()
        .enumerate()
        .map(|(idx, (start_date, end_date))| WageChunk {
            start_date,
            end_date,
            hours: if idx + 1 == count { last_share } else { share },
            rate: rate_for_year(start_date.year(), session),
        })
        .collect()
}

/// 判断工资分段是否可由默认规则派生
pub fn wage_chunks_derivable(
    chunks: &[WageChunk],
    hours: f64,
    position: &Position,
    session: &Session,
) -> bool {
    let (start, end) = effective_position_dates(position, session);

    match chunks {
        [only] => {
            only.start_date == start
                && only.end_date == end
                && (only.rate == session.rate1 || only.rate == session.rate2)
                && only.rate == rate_for_year(only.start_date.year(), session)
                && only.hours == hours
        }
        [first, second] => {
            first.start_date == start
                && second.end_date == end
                && first.end_date.month() == 12
                && first.end_date.day() == 31
                && first.end_date.succ_opt() == Some(second.start_date)
                && first.rate == session.rate1
                && second.rate == session.rate2
                && first.start_date.year() == session.start_date.year()
                && first.hours + second.hours == hours
                && first.hours == hours / 2.0
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_fixtures::{self, date};

    #[test]
    fn test_single_year_position_gets_one_chunk() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[0];

        let chunks = generate_wage_chunks(70.0, position, &session);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_date, date(2021, 9, 1));
        assert_eq!(chunks[0].end_date, date(2021, 12, 31));
        assert_eq!(chunks[0].hours, 70.0);
        assert_eq!(chunks[0].rate, Some(45.55));
        assert!(wage_chunks_derivable(&chunks, 70.0, position, &session));
    }

    #[test]
    fn test_spanning_position_splits_at_new_year() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[1];

        let chunks = generate_wage_chunks(140.0, position, &session);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].end_date, date(2021, 12, 31));
        assert_eq!(chunks[1].start_date, date(2022, 1, 1));
        assert_eq!(chunks[0].rate, Some(45.55));
        assert_eq!(chunks[1].rate, Some(46.74));
        assert_eq!(chunks[0].hours + chunks[1].hours, 140.0);
        assert!(wage_chunks_derivable(&chunks, 140.0, position, &session));
    }

    #[test]
    fn test_odd_hours_sum_exactly() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[1];

        let chunks = generate_wage_chunks(0.3, position, &session);
        assert_eq!(chunks[0].hours + chunks[1].hours, 0.3);
        assert!(wage_chunks_derivable(&chunks, 0.3, position, &session));
    }

    #[test]
    fn test_second_year_only_position_uses_rate2() {
        let session = test_fixtures::session();
        let mut position = test_fixtures::positions()[0].clone();
        position.start_date = Some(date(2022, 1, 10));
        position.end_date = Some(date(2022, 4, 30));

        let chunks = generate_wage_chunks(60.0, &position, &session);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].rate, Some(46.74));
        assert!(wage_chunks_derivable(&chunks, 60.0, &position, &session));
    }

    #[test]
    fn test_position_without_dates_uses_session_dates() {
        let session = test_fixtures::session();
        let mut position = test_fixtures::positions()[0].clone();
        position.start_date = None;
        position.end_date = None;

        let chunks = generate_wage_chunks(100.0, &position, &session);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].start_date, session.start_date);
        assert_eq!(chunks[1].end_date, session.end_date);
    }

    #[test]
    fn test_custom_rate_not_derivable() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[0];

        let mut chunks = generate_wage_chunks(70.0, position, &session);
        chunks[0].rate = Some(50.0);
        assert!(!wage_chunks_derivable(&chunks, 70.0, position, &session));
    }

    #[test]
    fn test_hours_mismatch_not_derivable() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[0];

        let chunks = generate_wage_chunks(70.0, position, &session);
        assert!(!wage_chunks_derivable(&chunks, 65.0, position, &session));
    }

    #[test]
    fn test_uneven_split_not_derivable() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[1];

        let mut chunks = generate_wage_chunks(140.0, position, &session);
        chunks[0].hours = 100.0;
        chunks[1].hours = 40.0;
        assert!(!wage_chunks_derivable(&chunks, 140.0, position, &session));
    }

    #[test]
    fn test_shifted_chunk_dates_not_derivable() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[0];

        let mut chunks = generate_wage_chunks(70.0, position, &session);
        chunks[0].start_date = date(2021, 9, 15);
        assert!(!wage_chunks_derivable(&chunks, 70.0, position, &session));
    }

    #[test]
    fn test_second_tier_rate_in_first_year_is_kept() {
        let session = test_fixtures::session();
        let position = &test_fixtures::positions()[0];

        // 单段、日期与工时都吻合，但首年用了第二档费率：重新生成会得到 rate1
        let mut chunks = generate_wage_chunks(70.0, position, &session);
        chunks[0].rate = session.rate2;
        assert_eq!(chunks[0].rate, Some(46.74));
        assert!(!wage_chunks_derivable(&chunks, 70.0, position, &session));
        assert_ne!(generate_wage_chunks(70.0, position, &session), chunks);
    }
}
