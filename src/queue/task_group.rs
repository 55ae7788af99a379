// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// 任务组
///
/// 结构化的完成追踪器。每个工作单元在派生时同步注册，
/// 由 `CompletionGuard` 在单元结束（包括提前返回和panic）时恰好发出一次完成信号。
/// 单元内部可以通过克隆的任务组继续派生后继单元，后继的注册发生在前驱的完成信号之前，
/// 因此待完成数量不会在中途提前归零
#[derive(Clone, Debug, Default)]
pub struct TaskGroup {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    pending: AtomicUsize,
    spawned: AtomicUsize,
    completed: AtomicUsize,
    idle: Notify,
}

/// 单个工作单元的完成守卫
///
/// 丢弃时发出完成信号
#[derive(Debug)]
pub struct CompletionGuard {
    inner: Arc<Inner>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个工作单元并返回它的完成守卫
    pub fn register(&self) -> CompletionGuard {
        self.inner.spawned.fetch_add(1, Ordering::AcqRel);
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        CompletionGuard {
            inner: self.inner.clone(),
        }
    }

    /// 注册并派生一个工作单元
    pub fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.register();
        tokio::spawn(async move {
            let _guard = guard;
            future.await;
        })
    }

    /// 等待所有已注册的单元完成
    ///
    /// 调用时若没有待完成单元则立即返回
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    pub fn spawned(&self) -> usize {
        self.inner.spawned.load(Ordering::Acquire)
    }

    pub fn completed(&self) -> usize {
        self.inner.completed.load(Ordering::Acquire)
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.inner.completed.fetch_add(1, Ordering::AcqRel);
        if self.inner.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_on_empty_group_returns() {
        let group = TaskGroup::new();
        group.wait().await;
        assert_eq!(group.spawned(), 0);
        assert_eq!(group.completed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_covers_spawned_successors() {
        let group = TaskGroup::new();
        let finished = Arc::new(AtomicUsize::new(0));

        for i in 0..10u64 {
            let successor_group = group.clone();
            let finished = finished.clone();
            group.spawn(async move {
                tokio::time::sleep(Duration::from_millis(10 * i)).await;
                // only even units hand off to a successor
                if i % 2 == 0 {
                    let finished = finished.clone();
                    successor_group.spawn(async move {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        finished.fetch_add(1, Ordering::SeqCst);
                    });
                }
            });
        }

        group.wait().await;

        assert_eq!(finished.load(Ordering::SeqCst), 5);
        assert_eq!(group.spawned(), 15);
        assert_eq!(group.completed(), 15);
        assert_eq!(group.pending(), 0);
    }

    #[tokio::test]
    async fn test_early_return_signals_exactly_once() {
        let group = TaskGroup::new();

        for i in 0..20 {
            group.spawn(async move {
                if i % 3 == 0 {
                    return;
                }
                tokio::task::yield_now().await;
            });
        }

        group.wait().await;
        assert_eq!(group.completed(), 20);
    }

    #[tokio::test]
    async fn test_panicking_unit_still_completes() {
        let group = TaskGroup::new();

        let handle = group.spawn(async {
            panic!("unit failed");
        });
        group.spawn(async {});

        group.wait().await;
        assert!(handle.await.is_err());
        assert_eq!(group.completed(), 2);
    }

    #[tokio::test]
    async fn test_manual_guard() {
        let group = TaskGroup::new();
        let guard = group.register();
        assert_eq!(group.pending(), 1);

        let waiter = {
            let group = group.clone();
            tokio::spawn(async move { group.wait().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
        assert_eq!(group.completed(), 1);
    }
}
