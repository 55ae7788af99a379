// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::models::word_count::WordCounts;
use crate::infrastructure::metrics;

/// 全局词频聚合表
///
/// 单次运行内由所有任务共享。每次合并在写锁内一次性提交整个局部映射，
/// 并发的快照要么看到某次合并的全部结果，要么完全看不到
#[derive(Debug, Default)]
pub struct Aggregator {
    table: RwLock<HashMap<String, u64>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将局部计数合并到全局表
    ///
    /// # 参数
    ///
    /// * `local` - 单个文本的词频映射
    pub fn merge(&self, local: WordCounts) {
        if local.is_empty() {
            return;
        }

        let merged: u64 = local.values().sum();
        {
            let mut table = self.table.write();
            for (word, count) in local {
                *table.entry(word).or_insert(0) += count;
            }
        }
        metrics::record_words_merged(merged);
    }

    /// 读取单个单词的累计次数
    pub fn get(&self, word: &str) -> Option<u64> {
        self.table.read().get(word).copied()
    }

    /// 表中不同单词的数量
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// 获取整张表的只读快照
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.table.read().clone()
    }
}
