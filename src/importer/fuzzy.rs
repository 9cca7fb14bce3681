// ==========================================
// 助教聘任管理系统 - 近似字符串匹配
// ==========================================
// 职责: 列名 / 人名的相似度计算与最佳候选选取
// 算法: 归一化（小写 + 仅保留字母数字、逗号、空格）后的 normalized Levenshtein
// 范围: 0.0 ~ 1.0（1.0 = 归一化后完全相同）
// ==========================================

/// 默认相似度下限
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;

/// 匹配前的字符串归一化
pub fn normalize_for_match(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ',' || *c == ' ')
        .collect()
}

/// 在候选集中选取相似度最高且不低于阈值的候选
///
/// # 返回
/// - Some((候选, 分数)): 最佳候选；分数相同时取先出现者
/// - None: 没有候选达到阈值
pub fn best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized_query = normalize_for_match(query);
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = strsim::normalized_levenshtein(
            &normalized_query,
            &normalize_for_match(candidate),
        );
        if score < threshold {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best
}
