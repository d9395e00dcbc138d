//! HTML 清洗服务 - 业务能力层
//!
//! 只负责"去掉噪声元素并提取可见文本"能力，不读写任何文件
//!
//! ## 技术栈
//! - 使用 `scraper`（html5ever）宽松解析，残缺的标记不会导致失败
//! - 使用 `regex` 预处理自闭合的原始文本元素

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{CleanedText, Document};

/// 默认移除的噪声元素
pub const NOISE_SELECTORS: &str =
    "noscript, script, style, iframe, link[rel=stylesheet], meta, head title";

/// 这些元素的内容按原始文本解析，`<iframe/>` 这样的自闭合写法会吞掉后面的整个文档
const RAW_TEXT_SELF_CLOSING: &str =
    r"(?i)<(iframe|script|style|noscript|title|textarea|noembed|noframes|xmp)(\s[^<>]*?)?\s*/>";

/// 文本提取时视为块级边界的元素
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "details",
    "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "li", "main",
    "nav", "ol", "p", "pre", "section", "summary", "table", "tbody", "td", "tfoot", "th",
    "thead", "title", "tr", "ul",
];

/// HTML 清洗服务
///
/// 职责：
/// - 解析原始 HTML
/// - 移除 script、style、iframe 等噪声元素
/// - 提取剩余的可见文本并规整空白
pub struct MarkupCleaner {
    noise: Selector,
    self_closing: Regex,
}

impl MarkupCleaner {
    /// 使用默认噪声选择器创建
    pub fn new() -> Result<Self> {
        Self::with_selectors(NOISE_SELECTORS)
    }

    /// 使用自定义的 CSS 选择器列表创建
    pub fn with_selectors(selectors: &str) -> Result<Self> {
        let noise = Selector::parse(selectors).map_err(|e| {
            PipelineError::invalid_argument(format!("无效的选择器 '{}': {}", selectors, e))
        })?;
        let self_closing = Regex::new(RAW_TEXT_SELF_CLOSING)
            .map_err(|e| PipelineError::invalid_argument(format!("无效的正则: {}", e)))?;

        Ok(Self {
            noise,
            self_closing,
        })
    }

    /// 清洗文档
    ///
    /// 相同输入总是得到相同输出，不依赖任何外部状态。
    pub fn clean(&self, document: &Document) -> CleanedText {
        let normalized = self.self_closing.replace_all(document.raw(), "<$1$2></$1>");
        let mut html = Html::parse_document(&normalized);

        let noise_ids: Vec<_> = html.select(&self.noise).map(|el| el.id()).collect();
        debug!("移除 {} 个噪声元素", noise_ids.len());
        for id in noise_ids {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
            }
        }

        let mut raw_text = String::new();
        collect_text(html.root_element(), &mut raw_text);

        let text = raw_text.split_whitespace().collect::<Vec<_>>().join(" ");
        debug!("清洗完成: {} -> {} 字符", document.raw().len(), text.len());

        CleanedText::new(text)
    }
}

/// 按文档顺序收集文本节点，块级元素两侧补空格
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let is_block = BLOCK_ELEMENTS.contains(&el.name());
                if is_block {
                    out.push(' ');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
                if is_block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        let cleaner = MarkupCleaner::new().unwrap();
        cleaner.clean(&Document::new(html)).as_str().to_string()
    }

    #[test]
    fn test_removes_all_noise_elements() {
        let html = r#"<html><head><title>t</title><style>c{}</style></head><body><script>bad</script><noscript>bad2</noscript><iframe/>Good<link rel="stylesheet"/></body></html>"#;
        assert_eq!(clean(html), "Good");
    }

    #[test]
    fn test_meta_and_stylesheet_links_removed() {
        let html = r#"<html><head><meta charset="utf-8"><meta name="description" content="desc"><link rel="stylesheet" href="a.css"></head><body><p>Текст</p></body></html>"#;
        assert_eq!(clean(html), "Текст");
    }

    #[test]
    fn test_block_boundaries_become_spaces() {
        let html = "<div>first</div><p>second</p><ul><li>a</li><li>b</li></ul>";
        assert_eq!(clean(html), "first second a b");
    }

    #[test]
    fn test_inline_boundaries_do_not_split_words() {
        assert_eq!(clean("<p>Hel<b>lo</b> <i>wor</i>ld</p>"), "Hello world");
    }

    #[test]
    fn test_preserves_order_around_removed_elements() {
        let html = "<body>one<script>var x = 1;</script>two<style>p{}</style>three</body>";
        assert_eq!(clean(html), "onetwothree");

        let html = "<body><p>one</p><script>x</script><p>two</p><iframe src=\"a\"></iframe><p>three</p></body>";
        assert_eq!(clean(html), "one two three");
    }

    #[test]
    fn test_self_closing_script_does_not_swallow_document() {
        let html = r#"<body><script src="a.js"/><p>visible</p><iframe src="x" /><p>also</p></body>"#;
        assert_eq!(clean(html), "visible also");
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let html = "<html><body><div><p>unclosed <b>bold<div>next</body>";
        assert_eq!(clean(html), "unclosed bold next");
    }

    #[test]
    fn test_whitespace_is_collapsed_and_trimmed() {
        assert_eq!(clean("  <p>\n  a \t  b\n</p>   "), "a b");
    }

    #[test]
    fn test_comments_are_not_text() {
        assert_eq!(clean("<p>a<!-- hidden -->b</p>"), "ab");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let html = "<html><head><title>T</title></head><body><h1>Заголовок</h1><p>текст <a href='#'>ссылка</a></p></body></html>";
        let cleaner = MarkupCleaner::new().unwrap();
        let doc = Document::new(html);
        assert_eq!(cleaner.clean(&doc), cleaner.clean(&doc));
        assert_eq!(cleaner.clean(&doc).as_str(), "Заголовок текст ссылка");
    }

    #[test]
    fn test_custom_selectors() {
        let cleaner = MarkupCleaner::with_selectors("nav, footer").unwrap();
        let doc = Document::new("<body><nav>menu</nav><p>body</p><footer>foot</footer></body>");
        assert_eq!(cleaner.clean(&doc).as_str(), "body");
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let err = MarkupCleaner::with_selectors("<<<").err().unwrap();
        assert!(matches!(err, PipelineError::InvalidArgument { .. }));
    }
}
