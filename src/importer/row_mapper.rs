// ==========================================
// 助教聘任管理系统 - 列名模糊匹配器（RowMapper）
// ==========================================
// 职责: 人工编辑的表头 → 规范字段名（带会话级缓存）
// 流程: 正缓存 → 负缓存 → 精确匹配 → 近似匹配（阈值 0.7）
// 红线:
// - 一个规范字段一旦被某个表头匹配，即移出候选池（一对一）
// - 实例只服务于一次导入，不跨批次复用、不跨线程共享
// ==========================================

use crate::importer::fuzzy::best_match;
use crate::importer::schema::{NormalizationSchema, Record};
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub struct RowMapper {
    // 剩余候选池（查找串 → 规范字段），保持插入顺序
    key_map: Vec<(String, String)>,
    // 已确定的表头 → 规范字段（只增不减）
    empirical_key_map: HashMap<String, String>,
    // 确定无法匹配的表头
    unknown_keys: HashSet<String>,
    threshold: f64,
    fuzzy_searches: usize,
}

impl RowMapper {
    /// 由模式构造（候选池 = keys ∪ key_map）
    pub fn new(schema: &NormalizationSchema, threshold: f64) -> Self {
        Self::with_extra_key_map(schema, Vec::new(), threshold)
    }

    /// 由模式 + 额外生成的别名构造（用于动态列族）
    pub fn with_extra_key_map<I>(schema: &NormalizationSchema, extra: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut key_map: Vec<(String, String)> = schema
            .keys
            .iter()
            .map(|k| (k.to_string(), k.to_string()))
            .chain(
                schema
                    .key_map
                    .iter()
                    .map(|(alias, key)| (alias.to_string(), key.to_string())),
            )
            .collect();
        key_map.extend(extra);

        // 同一查找串只保留第一次出现
        let mut seen = HashSet::new();
        key_map.retain(|(lookup, _)| seen.insert(lookup.clone()));

        Self {
            key_map,
            empirical_key_map: HashMap::new(),
            unknown_keys: HashSet::new(),
            threshold,
            fuzzy_searches: 0,
        }
    }

    /// 将一行原始记录转换为规范字段记录
    ///
    /// # 说明
    /// - 无法匹配的列直接丢弃（不报错），表格中常见说明性多余列
    /// - log_enabled 时以 debug 级别记录被丢弃的列
    pub fn format_row(&mut self, raw: &Record, log_enabled: bool) -> Record {
        let mut row = Record::new();
        for (header, value) in raw {
            if let Some(key) = self.canonical_key(header, log_enabled) {
                row.insert(key, value.clone());
            }
        }
        row
    }

    /// 查找单个表头对应的规范字段
    pub fn canonical_key(&mut self, header: &str, log_enabled: bool) -> Option<String> {
        if let Some(key) = self.empirical_key_map.get(header) {
            return Some(key.clone());
        }
        if self.unknown_keys.contains(header) {
            return None;
        }

        match self.lookup(header) {
            Some(key) => {
                self.empirical_key_map
                    .insert(header.to_string(), key.clone());
                // 一对一：移除所有指向该规范字段的候选
                self.key_map.retain(|(_, target)| target != &key);
                Some(key)
            }
            None => {
                if log_enabled {
                    debug!(header = %header, "未匹配的列，已丢弃");
                }
                self.unknown_keys.insert(header.to_string());
                None
            }
        }
    }

    fn lookup(&mut self, header: &str) -> Option<String> {
        if let Some((_, key)) = self.key_map.iter().find(|(lookup, _)| lookup == header) {
            return Some(key.clone());
        }

        self.fuzzy_searches += 1;
        let (hit, _score) = best_match(
            header,
            self.key_map.iter().map(|(lookup, _)| lookup.as_str()),
            self.threshold,
        )?;
        self.key_map
            .iter()
            .find(|(lookup, _)| lookup == hit)
            .map(|(_, key)| key.clone())
    }

    /// 已执行的近似搜索次数（缓存命中不计）
    pub fn fuzzy_search_count(&self) -> usize {
        self.fuzzy_searches
    }

    pub fn empirical_key_map(&self) -> &HashMap<String, String> {
        &self.empirical_key_map
    }

    pub fn unknown_keys(&self) -> &HashSet<String> {
        &self.unknown_keys
    }
}
