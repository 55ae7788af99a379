// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 临时存储错误类型
#[derive(Error, Debug)]
pub enum ScratchError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 指定键不存在
    #[error("Scratch entry not found: {0}")]
    Missing(String),
    /// 存储错误
    #[error("Scratch error: {0}")]
    Other(String),
}

/// 临时存储特质
///
/// 抓取阶段与处理阶段之间的可选交接通道
#[async_trait]
pub trait ScratchStore: Send + Sync {
    /// 使用指定键保存文本
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), ScratchError>;

    /// 根据键读取文本
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ScratchError>;

    /// 根据键删除文本
    async fn delete(&self, key: &str) -> Result<(), ScratchError>;

    /// 清理整个存储，运行结束时调用
    async fn purge(&self) -> Result<(), ScratchError>;
}
