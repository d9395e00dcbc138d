/// 远程生成的结果
///
/// 生成失败不是错误：它以 `NoResult` 的形式继续流转，并照常写入结果文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// 模型返回的文本
    Generated(String),
    /// 调用失败，`reason` 仅用于日志
    NoResult { reason: String },
}

impl GenerationResult {
    /// 写入结果文件时使用的内容，失败时为空字符串
    pub fn artifact_content(&self) -> &str {
        match self {
            GenerationResult::Generated(text) => text,
            GenerationResult::NoResult { .. } => "",
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationResult::Generated(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationResult::Generated(text) => Some(text),
            GenerationResult::NoResult { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_result_persists_as_empty() {
        let result = GenerationResult::NoResult {
            reason: "quota".to_string(),
        };
        assert_eq!(result.artifact_content(), "");
        assert!(!result.is_generated());
        assert_eq!(result.text(), None);
    }
}
