// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::domain::models::lexicon::Lexicon;
use crate::domain::models::word_count::WordCounts;

/// 词频计数服务
///
/// 按空白字符切分文本，只统计出现在词库中的token
#[derive(Debug, Clone)]
pub struct WordCounter {
    lexicon: Arc<Lexicon>,
}

impl WordCounter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// 统计单段文本中词库单词的出现次数
    ///
    /// # 参数
    ///
    /// * `text` - 纯文本
    ///
    /// # 返回值
    ///
    /// 单词到次数的映射，可能为空
    pub fn count(&self, text: &str) -> WordCounts {
        let mut counts = WordCounts::new();
        for token in text.split_whitespace() {
            if self.lexicon.contains(token) {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}
