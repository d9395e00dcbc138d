use std::path::PathBuf;

use thiserror::Error;

/// 流水线错误类型
///
/// 除 [`ServiceError`] 外，这里的每一种错误都会中止本次运行。
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 必需的输入缺失（空路径、空请求等）
    #[error("参数无效: {what}")]
    InvalidArgument { what: String },

    /// 读取或写入产物文件失败
    #[error("文件操作失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 模板需要的配置值不存在
    #[error("缺少配置项 '{key}' (占位符 {placeholder})")]
    MissingConfiguration { key: String, placeholder: String },

    /// 设置文件无法读取或解析
    #[error("设置文件错误 ({}): {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

impl PipelineError {
    /// 创建参数无效错误
    pub fn invalid_argument(what: impl Into<String>) -> Self {
        PipelineError::InvalidArgument { what: what.into() }
    }

    /// 创建带路径的 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// 出错的文件路径（I/O 与设置文件错误）
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PipelineError::Io { path, .. } | PipelineError::Settings { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}

/// 远程生成服务错误
///
/// 只在 `services::llm_service` 内部流转，最终会被转换成
/// [`GenerationResult::NoResult`](crate::models::GenerationResult::NoResult)。
#[derive(Debug, Error)]
pub enum ServiceError {
    /// API 调用失败（认证、配额、请求格式、网络）
    #[error("LLM API调用失败: {0}")]
    Api(#[from] async_openai::error::OpenAIError),

    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },

    /// 其他后端错误
    #[error("生成服务错误: {0}")]
    Other(String),
}

/// 流水线结果类型
pub type Result<T> = std::result::Result<T, PipelineError>;
