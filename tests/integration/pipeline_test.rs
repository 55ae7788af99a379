// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{article_page, build_pipeline, mount_html, plain_page, test_settings};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

use wordcrawl::domain::models::lexicon::Lexicon;
use wordcrawl::domain::models::resource::Resource;
use wordcrawl::domain::repositories::scratch_repository::ScratchStore;
use wordcrawl::infrastructure::storage::LocalScratch;
use wordcrawl::presentation::report::top_words;

fn lexicon() -> Lexicon {
    ["the", "fox", "jumps", "quick"].into_iter().collect()
}

async fn standard_server() -> MockServer {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/a1",
        200,
        article_page("the quick fox the fox"),
        Duration::ZERO,
    )
    .await;
    mount_html(&server, "/a2", 200, article_page("jumps the fox"), Duration::ZERO).await;
    mount_html(&server, "/plain", 200, plain_page(), Duration::ZERO).await;
    mount_html(&server, "/gone", 404, article_page("the the the"), Duration::ZERO).await;
    server
}

fn resources(server: &MockServer, routes: &[&str]) -> Vec<Resource> {
    routes
        .iter()
        .map(|r| Resource::new(format!("{}{}", server.uri(), r)))
        .collect()
}

#[tokio::test]
async fn test_pipeline_counts_only_article_text() {
    let server = standard_server().await;
    let settings = test_settings();
    let pipeline = build_pipeline(&settings, lexicon(), None);

    let summary = pipeline
        .scheduler
        .run(resources(&server, &["/a1", "/a2", "/plain", "/gone"]))
        .await;

    assert!(summary.drained);
    assert!(!summary.deadline_expired);
    assert_eq!(summary.admitted, 4);
    assert_eq!(summary.outcomes.success, 3);
    assert_eq!(summary.outcomes.fetch_failed, 1);
    assert_eq!(summary.units_completed, 4 + 3);

    let expected: HashMap<String, u64> = [("the", 3), ("fox", 3), ("jumps", 1), ("quick", 1)]
        .into_iter()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    assert_eq!(pipeline.aggregator.snapshot(), expected);

    let ranked = top_words(&pipeline.aggregator.snapshot(), 3);
    let listed: Vec<(&str, u64)> = ranked.iter().map(|r| (r.word.as_str(), r.count)).collect();
    assert_eq!(listed, vec![("fox", 3), ("the", 3), ("jumps", 1)]);
}

#[tokio::test]
async fn test_every_resource_failing_still_reports() {
    let server = standard_server().await;
    let settings = test_settings();
    let pipeline = build_pipeline(&settings, lexicon(), None);

    let summary = pipeline
        .scheduler
        .run(resources(&server, &["/gone", "/missing", "/gone"]))
        .await;

    assert!(summary.drained);
    assert_eq!(summary.outcomes.fetch_failed, 3);
    assert_eq!(summary.units_completed, 3);
    assert!(top_words(&pipeline.aggregator.snapshot(), 10).is_empty());
}

#[tokio::test]
async fn test_duplicate_resources_are_counted_twice() {
    let server = standard_server().await;
    let settings = test_settings();
    let pipeline = build_pipeline(&settings, lexicon(), None);

    let summary = pipeline
        .scheduler
        .run(resources(&server, &["/a2", "/a2"]))
        .await;

    assert_eq!(summary.outcomes.success, 2);
    assert_eq!(pipeline.aggregator.get("jumps"), Some(2));
}

#[tokio::test]
async fn test_local_scratch_handoff() {
    let server = standard_server().await;
    let dir = tempfile::tempdir().unwrap();
    let scratch = Arc::new(LocalScratch::new(dir.path().join("scratch")));
    scratch.prepare().await.unwrap();

    let settings = test_settings();
    let pipeline = build_pipeline(
        &settings,
        lexicon(),
        Some(scratch.clone() as Arc<dyn ScratchStore>),
    );

    let summary = pipeline
        .scheduler
        .run(resources(&server, &["/a1", "/a2"]))
        .await;

    assert_eq!(summary.outcomes.success, 2);
    assert_eq!(pipeline.aggregator.get("the"), Some(3));
    assert_eq!(pipeline.aggregator.get("fox"), Some(3));

    let leftover = std::fs::read_dir(scratch.base_path()).unwrap().count();
    assert_eq!(leftover, 0);

    scratch.purge().await.unwrap();
    assert!(!scratch.base_path().exists());
}

#[tokio::test]
async fn test_concurrency_budget_against_slow_server() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/slow",
        200,
        article_page("fox"),
        Duration::from_millis(200),
    )
    .await;

    let mut settings = test_settings();
    settings.pipeline.concurrency = 2;
    let pipeline = build_pipeline(&settings, lexicon(), None);

    let summary = pipeline
        .scheduler
        .run(resources(&server, &["/slow"; 6]))
        .await;

    assert_eq!(summary.outcomes.success, 6);
    assert!(summary.peak_in_flight <= 2);
    assert_eq!(pipeline.aggregator.get("fox"), Some(6));
    // three waves of two requests
    assert!(summary.elapsed_ms >= 600);
}

#[tokio::test]
async fn test_deadline_cancels_slow_fetches() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/stall",
        200,
        article_page("fox"),
        Duration::from_secs(20),
    )
    .await;

    let mut settings = test_settings();
    settings.pipeline.concurrency = 2;
    settings.pipeline.deadline_secs = 1;
    settings.pipeline.shutdown_grace_secs = 2;
    let pipeline = build_pipeline(&settings, lexicon(), None);

    let summary = pipeline
        .scheduler
        .run(resources(&server, &["/stall"; 5]))
        .await;

    assert!(summary.deadline_expired);
    assert!(summary.drained);
    assert_eq!(summary.admitted, 2);
    assert_eq!(summary.not_admitted, 3);
    assert_eq!(summary.outcomes.cancelled, 5);
    assert!(summary.elapsed_ms < 10_000);
    assert!(pipeline.aggregator.is_empty());
}
