// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::infrastructure::metrics;

/// 并发预算
///
/// 容量为K的计数信号量。获取槽位在耗尽时阻塞，槽位在 `BudgetSlot` 被丢弃时无条件归还
#[derive(Clone, Debug)]
pub struct ConcurrencyBudget {
    semaphore: Arc<Semaphore>,
    gauge: Arc<InFlight>,
}

#[derive(Debug, Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

/// 已获取的并发槽位
///
/// 持有期间计入在途数量
#[derive(Debug)]
pub struct BudgetSlot {
    gauge: Arc<InFlight>,
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyBudget {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            gauge: Arc::new(InFlight::default()),
        }
    }

    /// 获取一个槽位，预算耗尽时等待
    ///
    /// # 返回值
    ///
    /// 信号量被关闭时返回 `None`
    pub async fn acquire(&self) -> Option<BudgetSlot> {
        let permit = self.semaphore.clone().acquire_owned().await.ok()?;
        let current = self.gauge.current.fetch_add(1, Ordering::AcqRel) + 1;
        self.gauge.peak.fetch_max(current, Ordering::AcqRel);
        metrics::set_in_flight(current);
        Some(BudgetSlot {
            gauge: self.gauge.clone(),
            _permit: permit,
        })
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn in_flight(&self) -> usize {
        self.gauge.current.load(Ordering::Acquire)
    }

    /// 运行期间观察到的最大在途数量
    pub fn peak(&self) -> usize {
        self.gauge.peak.load(Ordering::Acquire)
    }
}

impl Drop for BudgetSlot {
    fn drop(&mut self) {
        // the permit field is released after this body runs
        let current = self.gauge.current.fetch_sub(1, Ordering::AcqRel) - 1;
        metrics::set_in_flight(current);
    }
}
