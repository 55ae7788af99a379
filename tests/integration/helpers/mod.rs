// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordcrawl::config::settings::Settings;
use wordcrawl::domain::models::lexicon::Lexicon;
use wordcrawl::domain::repositories::scratch_repository::ScratchStore;
use wordcrawl::domain::services::counting_service::WordCounter;
use wordcrawl::domain::services::extraction_service::ArticleExtractor;
use wordcrawl::engines::reqwest_engine::ReqwestArticleFetcher;
use wordcrawl::infrastructure::aggregate::Aggregator;
use wordcrawl::queue::scheduler::{Scheduler, SchedulerOptions};
use wordcrawl::workers::article_worker::ArticleWorker;

/// 测试用流水线
pub struct TestPipeline {
    pub scheduler: Scheduler,
    pub aggregator: Arc<Aggregator>,
}

pub fn article_page(text: &str) -> String {
    format!(
        r#"<html><head><title>t</title></head><body>
<div class="nav">the the the</div>
<div class="content article-text main"><p>{}</p></div>
</body></html>"#,
        text
    )
}

pub fn plain_page() -> String {
    "<html><body><div class=\"sidebar\">the fox the fox</div></body></html>".to_string()
}

/// 挂载一个HTML页面
pub async fn mount_html(server: &MockServer, route: &str, status: u16, html: String, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_raw(html, "text/html; charset=utf-8")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// 不带请求间隔的测试配置
pub fn test_settings() -> Settings {
    let mut settings = Settings::defaults().unwrap();
    settings.http.pacing_ms = 0;
    settings.http.request_timeout_secs = 30;
    settings.http.connect_timeout_secs = 5;
    settings
}

pub fn build_pipeline(
    settings: &Settings,
    lexicon: Lexicon,
    scratch: Option<Arc<dyn ScratchStore>>,
) -> TestPipeline {
    let extractor = ArticleExtractor::new(
        settings.extraction.container_tag.clone(),
        settings.extraction.class_marker.clone(),
    );
    let fetcher = Arc::new(ReqwestArticleFetcher::new(&settings.http, extractor).unwrap());
    let aggregator = Arc::new(Aggregator::new());
    let worker = ArticleWorker::new(
        fetcher,
        WordCounter::new(Arc::new(lexicon)),
        aggregator.clone(),
        scratch,
    );

    TestPipeline {
        scheduler: Scheduler::new(Arc::new(worker), SchedulerOptions::from_settings(settings)),
        aggregator,
    }
}
