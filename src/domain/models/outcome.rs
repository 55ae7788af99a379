// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 任务链的终止状态
///
/// 每个输入资源恰好对应一个终止状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// 抓取、计数并合并成功
    Success,
    /// 网络错误、传输错误或非200响应
    FetchFailed,
    /// 标记解析失败或临时存储读写失败
    ProcessFailed,
    /// 截止时间到达，任务被取消或未被接纳
    Cancelled,
}

impl TaskOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskOutcome::Success => "success",
            TaskOutcome::FetchFailed => "fetch_failed",
            TaskOutcome::ProcessFailed => "process_failed",
            TaskOutcome::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 各终止状态的计数快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub success: usize,
    pub fetch_failed: usize,
    pub process_failed: usize,
    pub cancelled: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.fetch_failed + self.process_failed + self.cancelled
    }
}

/// 并发安全的终止状态计数器
///
/// 单次运行内共享，由各任务在到达终止状态时记录
#[derive(Debug, Default)]
pub struct OutcomeTally {
    success: AtomicUsize,
    fetch_failed: AtomicUsize,
    process_failed: AtomicUsize,
    cancelled: AtomicUsize,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: TaskOutcome) {
        self.record_many(outcome, 1);
    }

    pub fn record_many(&self, outcome: TaskOutcome, n: usize) {
        let counter = match outcome {
            TaskOutcome::Success => &self.success,
            TaskOutcome::FetchFailed => &self.fetch_failed,
            TaskOutcome::ProcessFailed => &self.process_failed,
            TaskOutcome::Cancelled => &self.cancelled,
        };
        counter.fetch_add(n, Ordering::AcqRel);
    }

    pub fn snapshot(&self) -> OutcomeCounts {
        OutcomeCounts {
            success: self.success.load(Ordering::Acquire),
            fetch_failed: self.fetch_failed.load(Ordering::Acquire),
            process_failed: self.process_failed.load(Ordering::Acquire),
            cancelled: self.cancelled.load(Ordering::Acquire),
        }
    }
}
