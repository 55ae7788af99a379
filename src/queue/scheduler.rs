// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::config::settings::Settings;
use crate::domain::models::outcome::TaskOutcome;
use crate::domain::models::resource::Resource;
use crate::domain::models::summary::RunSummary;
use crate::infrastructure::metrics;
use crate::queue::budget::ConcurrencyBudget;
use crate::queue::context::RunContext;
use crate::workers::article_worker::{ArticleWorker, TaskScope};

/// 调度器选项
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// 并发预算K
    pub concurrency: usize,
    /// 全局截止时间
    pub deadline: Duration,
    /// 截止后等待剩余单元结束的宽限期
    pub shutdown_grace: Duration,
}

impl SchedulerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            concurrency: settings.pipeline.concurrency,
            deadline: settings.deadline(),
            shutdown_grace: settings.shutdown_grace(),
        }
    }
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            concurrency: 500,
            deadline: Duration::from_secs(15 * 60),
            shutdown_grace: Duration::from_secs(10),
        }
    }
}

/// 有界并发调度器
///
/// 为每个输入资源接纳一条任务链，同时进行的抓取不超过K个。
/// 所有已接纳的单元（含派生的处理阶段）结束后返回；截止时间到达后停止接纳，
/// 并在宽限期内等待剩余单元收尾
pub struct Scheduler {
    worker: Arc<ArticleWorker>,
    options: SchedulerOptions,
}

impl Scheduler {
    /// 创建新的调度器实例
    ///
    /// # 参数
    ///
    /// * `worker` - 执行任务链的工作器
    /// * `options` - 调度器选项
    ///
    /// # 返回值
    ///
    /// 返回新的调度器实例
    pub fn new(worker: Arc<ArticleWorker>, options: SchedulerOptions) -> Self {
        Self { worker, options }
    }

    /// 使用配置的截止时间运行
    pub async fn run(&self, resources: Vec<Resource>) -> RunSummary {
        let ctx = RunContext::with_timeout(self.options.deadline);
        self.run_with_context(resources, ctx).await
    }

    /// 在给定的运行上下文中处理全部资源
    ///
    /// # 参数
    ///
    /// * `resources` - 有序的资源列表
    /// * `ctx` - 共享的截止/取消上下文
    ///
    /// # 返回值
    ///
    /// 运行汇总
    #[instrument(skip_all, fields(resources = resources.len(), concurrency = self.options.concurrency))]
    pub async fn run_with_context(&self, resources: Vec<Resource>, ctx: RunContext) -> RunSummary {
        let started_at = Utc::now();
        let start = Instant::now();
        let total = resources.len();

        let budget = ConcurrencyBudget::new(self.options.concurrency);
        let scope = TaskScope::new(ctx.clone());
        let mut admitted = 0usize;

        for resource in resources {
            let slot = tokio::select! {
                biased;
                _ = ctx.cancelled() => None,
                slot = budget.acquire() => slot,
            };
            let Some(slot) = slot else {
                break;
            };
            // a slot freed at the same instant the deadline fired
            if ctx.is_cancelled() {
                break;
            }

            admitted += 1;
            let worker = self.worker.clone();
            scope
                .group
                .spawn(worker.fetch_phase(resource, slot, scope.clone()));
        }

        let not_admitted = total - admitted;
        if not_admitted > 0 {
            warn!(
                "Run cancelled before admission finished, {} resources not admitted",
                not_admitted
            );
            scope.tally.record_many(TaskOutcome::Cancelled, not_admitted);
            metrics::record_outcomes(TaskOutcome::Cancelled, not_admitted);
        }

        let drained = self.drain(&scope, &ctx).await;
        let outcomes = scope.tally.snapshot();

        let summary = RunSummary {
            started_at,
            elapsed_ms: start.elapsed().as_millis() as u64,
            total_resources: total,
            admitted,
            not_admitted,
            outcomes,
            units_spawned: scope.group.spawned(),
            units_completed: scope.group.completed(),
            peak_in_flight: budget.peak(),
            deadline_expired: ctx.deadline_expired(),
            drained,
        };

        info!(
            "Run finished: {} succeeded, {} fetch failures, {} process failures, {} cancelled in {}ms",
            outcomes.success,
            outcomes.fetch_failed,
            outcomes.process_failed,
            outcomes.cancelled,
            summary.elapsed_ms
        );

        summary
    }

    async fn drain(&self, scope: &TaskScope, ctx: &RunContext) -> bool {
        let grace = self.options.shutdown_grace;
        tokio::select! {
            biased;
            _ = scope.group.wait() => true,
            _ = async {
                ctx.cancelled().await;
                tokio::time::sleep(grace).await;
            } => {
                warn!(
                    "Shutdown grace elapsed with {} units still running",
                    scope.group.pending()
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
