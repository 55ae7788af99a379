// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// 运行上下文
///
/// 所有任务共享同一个截止时间。到达截止时间或被手动取消后，
/// `cancelled()` 立即完成，`is_cancelled()` 返回 true。取消是协作式的，
/// 任务需要在I/O边界处观察它
#[derive(Clone, Debug)]
pub struct RunContext {
    deadline: Instant,
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl RunContext {
    /// 创建在 `timeout` 后到期的上下文
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            deadline,
            cancel_tx: Arc::new(cancel_tx),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// 立即取消，例如收到中断信号时
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// 截止时间是否已过
    pub fn deadline_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow() || self.deadline_expired()
    }

    /// 等待取消发生
    pub async fn cancelled(&self) {
        let mut cancel_rx = self.cancel_tx.subscribe();
        tokio::select! {
            _ = tokio::time::sleep_until(self.deadline) => {}
            _ = cancel_rx.wait_for(|cancelled| *cancelled) => {}
        }
    }
}
