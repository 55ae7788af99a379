// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 输入文件加载
//!
//! 词库文件与URL列表文件均为每行一条记录的纯文本

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::models::lexicon::Lexicon;
use crate::domain::models::resource::Resource;

static ALPHABETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("static regex is valid"));

/// 输入加载错误类型
#[derive(Error, Debug)]
pub enum InputError {
    #[error("读取文件失败 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 从文件加载词库
///
/// # 参数
///
/// * `path` - 词库文件路径
/// * `min_len` - 单词最小长度
///
/// # 返回值
///
/// * `Ok(Lexicon)` - 过滤后的词库
/// * `Err(InputError)` - 文件读取失败
pub async fn load_lexicon(path: impl AsRef<Path>, min_len: usize) -> Result<Lexicon, InputError> {
    let content = read_file(path.as_ref()).await?;
    let lexicon = parse_lexicon(&content, min_len);
    info!(
        "Loaded {} lexicon words from {}",
        lexicon.len(),
        path.as_ref().display()
    );
    Ok(lexicon)
}

/// 解析词库内容
///
/// 只接受长度不小于 `min_len` 且全部由ASCII字母组成的行，其余行被丢弃
pub fn parse_lexicon(content: &str, min_len: usize) -> Lexicon {
    content
        .lines()
        .filter(|line| {
            let accepted = line.len() >= min_len && ALPHABETIC.is_match(line);
            if !accepted && !line.is_empty() {
                debug!("Rejected lexicon entry: {:?}", line);
            }
            accepted
        })
        .collect()
}

/// 从文件加载待抓取的URL列表
pub async fn load_resources(path: impl AsRef<Path>) -> Result<Vec<Resource>, InputError> {
    let content = read_file(path.as_ref()).await?;
    let resources = parse_resources(&content);
    info!(
        "Loaded {} resources from {}",
        resources.len(),
        path.as_ref().display()
    );
    Ok(resources)
}

/// 解析URL列表内容
///
/// 保持原有顺序和重复项，跳过空行
pub fn parse_resources(content: &str) -> Vec<Resource> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Resource::new)
        .collect()
}

/// 读取整个文件
///
/// 非法的UTF-8字节被替换为U+FFFD，所在行随后会被各自的解析规则丢弃，而不是让整个文件加载失败
async fn read_file(path: &Path) -> Result<String, InputError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| InputError::Io {
            path: path.display().to_string(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
