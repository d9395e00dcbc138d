//! 各阶段之间传递的文本模型

use std::fmt;

/// 原始 HTML 文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    raw: String,
}

impl Document {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// 未经修改的原始标记文本
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// 清洗后的纯文本
///
/// 不含任何标记语法，也不含被移除元素（script、style 等）的内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText(String);

impl CleanedText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CleanedText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 提示词模板，包含 `{{...}}` 形式的占位符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 替换完占位符后的最终提示词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt(String);

impl AssembledPrompt {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssembledPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
