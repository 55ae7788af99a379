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

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use wordcrawl::cli::Cli;
use wordcrawl::config::settings::Settings;
use wordcrawl::domain::services::counting_service::WordCounter;
use wordcrawl::domain::services::extraction_service::ArticleExtractor;
use wordcrawl::engines::reqwest_engine::ReqwestArticleFetcher;
use wordcrawl::infrastructure::aggregate::Aggregator;
use wordcrawl::infrastructure::metrics;
use wordcrawl::infrastructure::storage::create_scratch_store;
use wordcrawl::presentation::report;
use wordcrawl::queue::context::RunContext;
use wordcrawl::queue::scheduler::{Scheduler, SchedulerOptions};
use wordcrawl::utils::input;
use wordcrawl::utils::telemetry;
use wordcrawl::workers::article_worker::ArticleWorker;

/// 主函数
///
/// 加载配置和输入，运行抓取流水线，最后输出词频排行
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let cli = Cli::parse();
    let mut settings = Settings::new().context("Failed to load configuration")?;
    cli.apply(&mut settings);
    settings.validate()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(settings.telemetry.json);
    metrics::init_metrics(&settings.metrics);
    info!("Starting wordcrawl...");

    // 3. Load inputs
    let lexicon = input::load_lexicon(&settings.input.lexicon_path, settings.input.min_word_len)
        .await
        .with_context(|| format!("Failed to load lexicon {}", settings.input.lexicon_path))?;
    let resources = input::load_resources(&settings.input.resources_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load resource list {}",
                settings.input.resources_path
            )
        })?;
    info!(
        "Loaded {} lexicon words and {} resources",
        lexicon.len(),
        resources.len()
    );

    // 4. Initialize components
    let scratch = create_scratch_store(&settings.scratch)
        .await
        .context("Failed to prepare scratch storage")?;

    let extractor = ArticleExtractor::new(
        settings.extraction.container_tag.clone(),
        settings.extraction.class_marker.clone(),
    );
    let fetcher = Arc::new(ReqwestArticleFetcher::new(&settings.http, extractor)?);
    let aggregator = Arc::new(Aggregator::new());
    let counter = WordCounter::new(Arc::new(lexicon));
    let worker = Arc::new(ArticleWorker::new(
        fetcher,
        counter,
        aggregator.clone(),
        scratch.clone(),
    ));
    let scheduler = Scheduler::new(worker, SchedulerOptions::from_settings(&settings));

    // 5. Run until done, deadline or Ctrl+C
    let ctx = RunContext::with_timeout(settings.deadline());
    {
        let ctx = ctx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling run");
                ctx.cancel();
            }
        });
    }

    let summary = scheduler.run_with_context(resources, ctx).await;

    if let Some(store) = &scratch {
        if let Err(e) = store.purge().await {
            warn!("Failed to clean up scratch storage: {}", e);
        }
    }

    // 6. Report
    let rendered = report::report_top(
        &aggregator.snapshot(),
        settings.pipeline.top_n,
        &summary,
        cli.json,
    )?;
    print!("{}", rendered);

    Ok(())
}
