// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::debug;

/// 文章提取错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// 响应不是可解析的标记文本
    #[error("unsupported content type: {0}")]
    NotMarkup(String),
}

/// 文章正文提取服务
///
/// 以深度优先顺序查找第一个class属性包含标记子串的容器元素，
/// 并按文档顺序拼接其所有后代文本节点
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    container_tag: String,
    class_marker: String,
}

impl ArticleExtractor {
    pub fn new(container_tag: impl Into<String>, class_marker: impl Into<String>) -> Self {
        Self {
            container_tag: container_tag.into().trim().to_ascii_lowercase(),
            class_marker: class_marker.into(),
        }
    }

    /// 将响应体解码为标记文本
    ///
    /// 字符集依次取自BOM、Content-Type的 `charset` 参数；都没有时，
    /// 合法的UTF-8按UTF-8处理，否则由chardetng猜测。无法映射的字节被替换而不是报错
    ///
    /// # 参数
    ///
    /// * `content_type` - 响应的Content-Type头，缺失时按HTML处理
    /// * `body` - 原始响应体
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 解码后的文本
    /// * `Err(ExtractionError)` - 响应不是标记类型
    pub fn decode(&self, content_type: Option<&str>, body: &[u8]) -> Result<String, ExtractionError> {
        let mut declared = None;

        if let Some(ct) = content_type {
            let mut parts = ct.split(';');
            let mime = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            let is_markup = mime.is_empty()
                || mime.starts_with("text/")
                || mime.contains("html")
                || mime.contains("xml");
            if !is_markup {
                return Err(ExtractionError::NotMarkup(mime));
            }
            declared = parts.find_map(charset_param);
        }

        let encoding = declared.unwrap_or_else(|| sniff_encoding(body));
        // decode() lets a BOM override the chosen encoding
        let (text, used, had_errors) = encoding.decode(body);
        if had_errors {
            debug!("Replaced malformed {} sequences in response body", used.name());
        }
        Ok(text.into_owned())
    }

    /// 提取正文文本
    ///
    /// 找不到容器时返回空字符串，这不是错误
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| self.is_article_container(element))
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default()
    }

    fn is_article_container(&self, element: &ElementRef) -> bool {
        let value = element.value();
        value.name() == self.container_tag
            && value
                .attr("class")
                .is_some_and(|class| class.contains(&self.class_marker))
    }
}

fn charset_param(param: &str) -> Option<&'static Encoding> {
    let (name, value) = param.split_once('=')?;
    if !name.trim().eq_ignore_ascii_case("charset") {
        return None;
    }
    Encoding::for_label(value.trim().trim_matches('"').as_bytes())
}

fn sniff_encoding(body: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(body).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new("div", "article-text")
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
