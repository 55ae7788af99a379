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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::utils::errors::PipelineError;

/// 应用程序配置设置
///
/// 包含调度、HTTP、文章提取、输入文件、临时存储、指标和日志等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 调度配置
    pub pipeline: PipelineSettings,
    /// HTTP抓取配置
    pub http: HttpSettings,
    /// 文章提取配置
    pub extraction: ExtractionSettings,
    /// 输入文件配置
    pub input: InputSettings,
    /// 临时存储配置
    pub scratch: ScratchSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub telemetry: TelemetrySettings,
}

/// 调度配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    /// 同时进行的抓取任务上限
    pub concurrency: usize,
    /// 全局截止时间（秒）
    pub deadline_secs: u64,
    /// 截止时间到达后等待剩余任务收尾的宽限期（秒）
    pub shutdown_grace_secs: u64,
    /// 报告中输出的高频词数量
    pub top_n: usize,
}

/// HTTP抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 每次请求前的等待间隔（毫秒）
    pub pacing_ms: u64,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 连接超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 自定义User-Agent池，未设置时使用内置池
    pub user_agents: Option<Vec<String>>,
}

/// 文章提取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    /// 正文容器的标签名
    pub container_tag: String,
    /// 正文容器class属性中需要包含的标记子串
    pub class_marker: String,
}

/// 输入文件配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    /// 词库文件路径
    pub lexicon_path: String,
    /// URL列表文件路径
    pub resources_path: String,
    /// 词库中单词的最小长度
    pub min_word_len: usize,
}

/// 临时存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScratchSettings {
    /// 存储类型 (memory, local)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用Prometheus导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// 是否输出JSON格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和环境变量（前缀 `WORDCRAWL`，分隔符 `__`）
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("WORDCRAWL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值创建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Pipeline
            .set_default("pipeline.concurrency", 500)?
            .set_default("pipeline.deadline_secs", 15 * 60)?
            .set_default("pipeline.shutdown_grace_secs", 10)?
            .set_default("pipeline.top_n", 10)?
            // HTTP
            .set_default("http.pacing_ms", 3000)?
            .set_default("http.request_timeout_secs", 60)?
            .set_default("http.connect_timeout_secs", 30)?
            // Extraction
            .set_default("extraction.container_tag", "div")?
            .set_default("extraction.class_marker", "article-text")?
            // Input
            .set_default("input.lexicon_path", "bank-of-words")?
            .set_default("input.resources_path", "endg-urls")?
            .set_default("input.min_word_len", 3)?
            // Scratch
            .set_default("scratch.storage_type", "memory")?
            .set_default("scratch.local_path", "./tmp")?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            // Telemetry
            .set_default("telemetry.json", false)
    }

    /// 校验配置的合法性
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.pipeline.concurrency == 0 {
            return Err(PipelineError::InvalidConfig(
                "pipeline.concurrency must be at least 1".to_string(),
            ));
        }
        if self.extraction.container_tag.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "extraction.container_tag must not be empty".to_string(),
            ));
        }
        if self.extraction.class_marker.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "extraction.class_marker must not be empty".to_string(),
            ));
        }
        if let Some(agents) = &self.http.user_agents {
            if agents.is_empty() {
                return Err(PipelineError::InvalidConfig(
                    "http.user_agents must contain at least one entry".to_string(),
                ));
            }
        }
        match self.scratch.storage_type.as_str() {
            "memory" | "local" => Ok(()),
            other => Err(PipelineError::InvalidConfig(format!(
                "Unsupported scratch storage type: {}",
                other
            ))),
        }
    }

    /// 全局截止时间
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.pipeline.deadline_secs)
    }

    /// 截止后的收尾宽限期
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.pipeline.shutdown_grace_secs)
    }

    /// 请求间隔
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.http.pacing_ms)
    }
}
