// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{article_page, build_pipeline, mount_html, test_settings};
use std::io::Write;
use std::time::Duration;
use wiremock::MockServer;

use wordcrawl::presentation::report::report_top;
use wordcrawl::utils::input::{load_lexicon, load_resources};

#[tokio::test]
async fn test_run_from_input_files() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/story",
        200,
        article_page("Fox fox the at quick1 quick fox"),
        Duration::ZERO,
    )
    .await;

    let mut lexicon_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(lexicon_file, "fox\nthe\nat\nquick1\nquick\nFox").unwrap();

    let mut urls_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(urls_file, "{}/story\n\n{}/story", server.uri(), server.uri()).unwrap();

    let settings = test_settings();
    let lexicon = load_lexicon(lexicon_file.path(), settings.input.min_word_len)
        .await
        .unwrap();
    let resources = load_resources(urls_file.path()).await.unwrap();

    assert!(lexicon.contains("fox"));
    assert!(lexicon.contains("Fox"));
    assert!(!lexicon.contains("at"));
    assert!(!lexicon.contains("quick1"));
    assert_eq!(resources.len(), 2);

    let pipeline = build_pipeline(&settings, lexicon, None);
    let summary = pipeline.scheduler.run(resources).await;

    assert_eq!(summary.outcomes.success, 2);
    assert_eq!(pipeline.aggregator.get("fox"), Some(4));
    assert_eq!(pipeline.aggregator.get("Fox"), Some(2));
    assert_eq!(pipeline.aggregator.get("the"), Some(2));
    assert_eq!(pipeline.aggregator.get("quick"), Some(2));
    assert_eq!(pipeline.aggregator.get("at"), None);

    let rendered = report_top(&pipeline.aggregator.snapshot(), 2, &summary, false).unwrap();
    assert_eq!(rendered, "fox 4\nFox 2\n");
}

#[tokio::test]
async fn test_missing_lexicon_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_lexicon(dir.path().join("absent"), 3).await.is_err());
    assert!(load_resources(dir.path().join("absent")).await.is_err());
}
