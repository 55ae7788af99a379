// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

use crate::domain::models::outcome::OutcomeCounts;
use crate::domain::models::summary::RunSummary;

/// 排行中的单个条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWord {
    pub word: String,
    pub count: u64,
}

/// JSON报告
#[derive(Debug, Serialize)]
struct Report<'a> {
    top: &'a [RankedWord],
    outcomes: OutcomeCounts,
    total_resources: usize,
    admitted: usize,
    not_admitted: usize,
    deadline_expired: bool,
    drained: bool,
    elapsed_ms: u64,
    started_at: String,
}

/// 按次数降序取前N个单词
///
/// 次数相同时按单词字典序升序排列，保证输出稳定
///
/// # 参数
///
/// * `table` - 聚合表快照
/// * `n` - 最多返回的条目数
pub fn top_words(table: &HashMap<String, u64>, n: usize) -> Vec<RankedWord> {
    let mut ranked: Vec<RankedWord> = table
        .iter()
        .map(|(word, count)| RankedWord {
            word: word.clone(),
            count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(n);
    ranked
}

/// 纯文本排行，每行 `word count`
pub fn render_text(ranked: &[RankedWord]) -> String {
    let mut out = String::new();
    for entry in ranked {
        let _ = writeln!(out, "{} {}", entry.word, entry.count);
    }
    out
}

/// 带运行汇总的JSON报告
pub fn render_json(ranked: &[RankedWord], summary: &RunSummary) -> Result<String, serde_json::Error> {
    let report = Report {
        top: ranked,
        outcomes: summary.outcomes,
        total_resources: summary.total_resources,
        admitted: summary.admitted,
        not_admitted: summary.not_admitted,
        deadline_expired: summary.deadline_expired,
        drained: summary.drained,
        elapsed_ms: summary.elapsed_ms,
        started_at: summary.started_at.to_rfc3339(),
    };
    serde_json::to_string_pretty(&report)
}

/// 生成最终报告
///
/// # 参数
///
/// * `table` - 聚合表快照
/// * `n` - 排行长度
/// * `summary` - 运行汇总
/// * `json` - 是否输出JSON
pub fn report_top(
    table: &HashMap<String, u64>,
    n: usize,
    summary: &RunSummary,
    json: bool,
) -> Result<String, serde_json::Error> {
    let ranked = top_words(table, n);
    if json {
        render_json(&ranked, summary)
    } else {
        Ok(render_text(&ranked))
    }
}
