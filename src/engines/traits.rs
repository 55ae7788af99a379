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
use thiserror::Error;

use crate::domain::models::outcome::TaskOutcome;
use crate::domain::models::resource::Resource;
use crate::domain::services::extraction_service::ExtractionError;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL无法解析
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非200响应
    #[error("Unexpected status code: {0}")]
    Status(u16),
    /// 标记无法解析
    #[error("Malformed markup: {0}")]
    Markup(#[from] ExtractionError),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl FetchError {
    /// 该错误对应的任务终止状态
    ///
    /// 标记解析失败属于处理失败，其余均属于抓取失败
    pub fn outcome(&self) -> TaskOutcome {
        match self {
            FetchError::Markup(_) => TaskOutcome::ProcessFailed,
            _ => TaskOutcome::FetchFailed,
        }
    }
}

/// 文章来源特质
///
/// 给定资源，返回提取后的正文纯文本。找不到正文容器时返回空文本而非错误
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// 抓取并提取正文
    ///
    /// 返回的future被丢弃时，进行中的请求随之中止
    async fn fetch(&self, resource: &Resource) -> Result<String, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
