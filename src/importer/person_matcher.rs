// ==========================================
// 助教聘任管理系统 - 人员模糊匹配器
// ==========================================
// 职责: 按 utorid 或姓名在人员名单中定位一个人
// 规则:
// 1. utorid 精确匹配直接返回
// 2. 否则以 "Last, First" 与 "First Last" 两种写法建索引，近似匹配（阈值同列名匹配）
// 3. 无匹配 → NoPersonMatch
// ==========================================

use crate::domain::person::Person;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::fuzzy::best_match;

pub fn match_by_utorid_or_name<'a, P: Person>(
    name: &str,
    people: &'a [P],
    threshold: f64,
) -> ImportResult<&'a P> {
    let query = name.trim();

    if let Some(person) = people.iter().find(|p| p.utorid() == query) {
        return Ok(person);
    }

    let mut index: Vec<(String, usize)> = Vec::with_capacity(people.len() * 2);
    for (idx, person) in people.iter().enumerate() {
        index.push((
            format!("{}, {}", person.last_name(), person.first_name()),
            idx,
        ));
        index.push((
            format!("{} {}", person.first_name(), person.last_name()),
            idx,
        ));
    }

    let hit = best_match(query, index.iter().map(|(k, _)| k.as_str()), threshold)
        .and_then(|(hit, _)| index.iter().find(|(k, _)| k == hit))
        .map(|(_, idx)| *idx);

    match hit {
        Some(idx) => Ok(&people[idx]),
        None => Err(ImportError::NoPersonMatch {
            query: query.to_string(),
        }),
    }
}
