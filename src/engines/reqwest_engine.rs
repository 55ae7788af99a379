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

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

use crate::config::settings::HttpSettings;
use crate::domain::models::resource::Resource;
use crate::domain::services::extraction_service::ArticleExtractor;
use crate::engines::traits::{ArticleSource, FetchError};
use crate::engines::user_agents::UserAgentPool;

/// 文章抓取引擎
///
/// 基于reqwest实现，所有请求共享一个带cookie存储的客户端
pub struct ReqwestArticleFetcher {
    client: reqwest::Client,
    extractor: ArticleExtractor,
    user_agents: UserAgentPool,
    pacing: Duration,
}

impl ReqwestArticleFetcher {
    /// 创建新的抓取引擎
    ///
    /// # 参数
    ///
    /// * `settings` - HTTP配置
    /// * `extractor` - 正文提取器
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestArticleFetcher)` - 抓取引擎
    /// * `Err(FetchError)` - 客户端构建失败
    pub fn new(settings: &HttpSettings, extractor: ArticleExtractor) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            extractor,
            user_agents: UserAgentPool::new(settings.user_agents.clone().unwrap_or_default()),
            pacing: Duration::from_millis(settings.pacing_ms),
        })
    }

    pub fn user_agents(&self) -> &UserAgentPool {
        &self.user_agents
    }
}

#[async_trait]
impl ArticleSource for ReqwestArticleFetcher {
    /// 执行HTTP抓取并提取正文
    ///
    /// 请求前先等待配置的间隔；任何非200响应都视为失败
    async fn fetch(&self, resource: &Resource) -> Result<String, FetchError> {
        let url = Url::parse(resource.as_str())?;

        // Pace before every request
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agents.pick())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await?;
        debug!(
            "Fetched {} bytes in {}ms",
            body.len(),
            start.elapsed().as_millis()
        );

        let html = self.extractor.decode(content_type.as_deref(), &body)?;
        Ok(self.extractor.extract(&html))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
