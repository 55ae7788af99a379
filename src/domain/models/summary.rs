// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::outcome::OutcomeCounts;

/// 单次运行的汇总信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// 运行开始时间
    pub started_at: DateTime<Utc>,
    /// 运行耗时（毫秒）
    pub elapsed_ms: u64,
    /// 输入资源总数
    pub total_resources: usize,
    /// 获得并发槽位并启动的资源数
    pub admitted: usize,
    /// 截止时间到达前未能启动的资源数
    pub not_admitted: usize,
    /// 各终止状态计数
    pub outcomes: OutcomeCounts,
    /// 注册到完成追踪器的工作单元数（抓取阶段 + 处理阶段）
    pub units_spawned: usize,
    /// 已发出完成信号的工作单元数
    pub units_completed: usize,
    /// 观察到的最大同时抓取数
    pub peak_in_flight: usize,
    /// 截止时间是否已触发
    pub deadline_expired: bool,
    /// 所有工作单元是否在宽限期内结束
    pub drained: bool,
}

impl RunSummary {
    /// 进入处理阶段的资源数，即成功抓取的数量
    pub fn fetched(&self) -> usize {
        self.units_spawned.saturating_sub(self.admitted)
    }
}
