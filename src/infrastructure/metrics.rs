// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;
use crate::domain::models::outcome::TaskOutcome;

/// 初始化指标系统
///
/// 仅在启用时安装Prometheus导出器；未安装时所有指标调用都是空操作
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_counter!("wordcrawl_tasks_total", "Task chains by terminal outcome");
    describe_counter!(
        "wordcrawl_words_merged_total",
        "Lexicon word occurrences merged into the aggregate table"
    );
    describe_gauge!("wordcrawl_fetch_in_flight", "Task chains holding a budget slot");

    info!("Metrics exporter listening on {}", addr);
}

pub fn record_outcome(outcome: TaskOutcome) {
    counter!("wordcrawl_tasks_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_outcomes(outcome: TaskOutcome, n: usize) {
    counter!("wordcrawl_tasks_total", "outcome" => outcome.as_str()).increment(n as u64);
}

pub fn record_words_merged(n: u64) {
    counter!("wordcrawl_words_merged_total").increment(n);
}

pub fn set_in_flight(n: usize) {
    gauge!("wordcrawl_fetch_in_flight").set(n as f64);
}
