//! 提示词组装服务 - 业务能力层
//!
//! 只负责"把清洗后的文本和配置值填进模板"能力

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{AssembledPrompt, CleanedText, ConfigValues, PromptTemplate};

/// 正文占位符
pub const CONTENT_PLACEHOLDER: &str = "{{ИСХОДНЫЙ_ТЕКСТ}}";
/// `object` 配置项占位符
pub const OBJECT_PLACEHOLDER: &str = "{{OBJECT_VALUES}}";
/// `targets` 配置项占位符
pub const TARGETS_PLACEHOLDER: &str = "{{TARGETS_VALUES}}";

/// 占位符的取值来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// 清洗后的正文
    CleanedText,
    /// 配置文件中的某个键
    Config(&'static str),
}

/// 可识别的占位符及其取值来源，按替换顺序排列
pub const PLACEHOLDERS: &[(&str, ValueSource)] = &[
    (CONTENT_PLACEHOLDER, ValueSource::CleanedText),
    (OBJECT_PLACEHOLDER, ValueSource::Config("object")),
    (TARGETS_PLACEHOLDER, ValueSource::Config("targets")),
];

/// 提示词组装服务
///
/// 按 正文 → object → targets 的顺序依次替换，后面的替换作用于前面的结果，
/// 所以正文里出现的 `{{OBJECT_VALUES}}` 等也会被展开。
/// 不认识的 `{{...}}` 原样保留。
#[derive(Debug, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    pub fn new() -> Self {
        Self
    }

    /// 组装最终提示词
    ///
    /// 替换到某个占位符时，如果它出现在当前文本中而对应的配置值缺失，
    /// 返回 `MissingConfiguration`；没有出现的占位符不要求有值。
    pub fn assemble(
        &self,
        template: &PromptTemplate,
        cleaned_text: &CleanedText,
        values: &ConfigValues,
    ) -> Result<AssembledPrompt> {
        let mut prompt = template.as_str().to_string();
        let mut substitutions = 0;

        for (token, source) in PLACEHOLDERS {
            let count = prompt.matches(token).count();
            if count == 0 {
                continue;
            }

            let value = match source {
                ValueSource::CleanedText => cleaned_text.as_str(),
                ValueSource::Config(key) => {
                    values
                        .get(key)
                        .ok_or_else(|| PipelineError::MissingConfiguration {
                            key: key.to_string(),
                            placeholder: token.to_string(),
                        })?
                }
            };

            prompt = prompt.replace(token, value);
            substitutions += count;
        }

        debug!(
            "模板组装完成: 替换 {} 处占位符，提示词长度 {} 字符",
            substitutions,
            prompt.chars().count()
        );

        Ok(AssembledPrompt::new(prompt))
    }
}
