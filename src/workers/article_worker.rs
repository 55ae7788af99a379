// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::models::outcome::{OutcomeTally, TaskOutcome};
use crate::domain::models::resource::Resource;
use crate::domain::repositories::scratch_repository::{ScratchError, ScratchStore};
use crate::domain::services::counting_service::WordCounter;
use crate::engines::traits::ArticleSource;
use crate::infrastructure::aggregate::Aggregator;
use crate::infrastructure::metrics;
use crate::queue::budget::BudgetSlot;
use crate::queue::context::RunContext;
use crate::queue::task_group::TaskGroup;

/// 单次运行的共享句柄
///
/// 在接纳任务时传入每条任务链
#[derive(Clone)]
pub struct TaskScope {
    pub ctx: RunContext,
    pub group: TaskGroup,
    pub tally: Arc<OutcomeTally>,
}

impl TaskScope {
    pub fn new(ctx: RunContext) -> Self {
        Self {
            ctx,
            group: TaskGroup::new(),
            tally: Arc::new(OutcomeTally::new()),
        }
    }

    fn finish(&self, outcome: TaskOutcome) {
        self.tally.record(outcome);
        metrics::record_outcome(outcome);
    }
}

/// 抓取阶段交给处理阶段的正文
enum Handoff {
    Inline(String),
    Scratch(String),
}

/// 文章工作器
///
/// 执行单个资源的两阶段任务链：抓取阶段持有并发槽位，
/// 成功后派生不占用槽位的处理阶段完成计数与合并
pub struct ArticleWorker {
    source: Arc<dyn ArticleSource>,
    counter: WordCounter,
    aggregator: Arc<Aggregator>,
    scratch: Option<Arc<dyn ScratchStore>>,
}

impl ArticleWorker {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        counter: WordCounter,
        aggregator: Arc<Aggregator>,
        scratch: Option<Arc<dyn ScratchStore>>,
    ) -> Self {
        Self {
            source,
            counter,
            aggregator,
            scratch,
        }
    }

    /// 抓取阶段
    ///
    /// 槽位在本阶段的最后被释放；截止时间到达时进行中的请求被丢弃
    #[instrument(skip_all, fields(url = %resource, engine = self.source.name()))]
    pub async fn fetch_phase(self: Arc<Self>, resource: Resource, slot: BudgetSlot, scope: TaskScope) {
        let _slot = slot;

        if scope.ctx.is_cancelled() {
            warn!("Deadline passed before fetch started");
            scope.finish(TaskOutcome::Cancelled);
            return;
        }

        let fetched = tokio::select! {
            biased;
            _ = scope.ctx.cancelled() => {
                warn!("Fetch cancelled by deadline");
                scope.finish(TaskOutcome::Cancelled);
                return;
            }
            result = self.source.fetch(&resource) => result,
        };

        let text = match fetched {
            Ok(text) => text,
            Err(e) => {
                error!("Fetch failed: {}", e);
                scope.finish(e.outcome());
                return;
            }
        };

        if text.is_empty() {
            debug!("No article container found");
        }

        let handoff = match &self.scratch {
            Some(store) => {
                let key = Uuid::new_v4().simple().to_string();
                if let Err(e) = store.save(&key, text.as_bytes()).await {
                    error!("Failed to write scratch text: {}", e);
                    scope.finish(TaskOutcome::ProcessFailed);
                    return;
                }
                Handoff::Scratch(key)
            }
            None => Handoff::Inline(text),
        };

        let worker = self.clone();
        let successor_scope = scope.clone();
        scope.group.spawn(async move {
            worker
                .process_phase(resource, handoff, successor_scope)
                .await;
        });
    }

    /// 处理阶段
    ///
    /// 不再发起网络I/O，取消信号到达后仍会完成计数与合并
    #[instrument(skip_all, fields(url = %resource))]
    async fn process_phase(self: Arc<Self>, resource: Resource, handoff: Handoff, scope: TaskScope) {
        let text = match handoff {
            Handoff::Inline(text) => text,
            Handoff::Scratch(key) => match self.take_scratch(&key).await {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to read scratch text: {}", e);
                    scope.finish(TaskOutcome::ProcessFailed);
                    return;
                }
            },
        };

        let counts = self.counter.count(&text);
        let distinct = counts.len();
        self.aggregator.merge(counts);

        info!("Merged {} distinct lexicon words", distinct);
        scope.finish(TaskOutcome::Success);
    }

    async fn take_scratch(&self, key: &str) -> Result<String, ScratchError> {
        let store = self
            .scratch
            .as_ref()
            .ok_or_else(|| ScratchError::Other("scratch store not configured".to_string()))?;

        let data = store
            .get(key)
            .await?
            .ok_or_else(|| ScratchError::Missing(key.to_string()))?;

        if let Err(e) = store.delete(key).await {
            warn!("Failed to delete scratch entry {}: {}", key, e);
        }

        String::from_utf8(data).map_err(|e| ScratchError::Other(e.to_string()))
    }
}
