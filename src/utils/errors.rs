// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 流水线构建错误类型
///
/// 仅在运行开始前出现，运行期间的单个任务错误不会上升为该类型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("配置无效: {0}")]
    InvalidConfig(String),
}
