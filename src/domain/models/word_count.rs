// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;

/// 单词到出现次数的映射
///
/// 单词区分大小写，按完整的token字符串去重
pub type WordCounts = HashMap<String, u64>;
