//! # HTML Prompt Runner
//!
//! 把一份原始 HTML 变成一次 LLM 生成请求：清洗网页、填充提示词模板、
//! 调用模型，并把每一步的中间产物写入磁盘
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 产物文件读写，失败时带上文件路径
//!
//! ### ② 业务能力层（Services）
//! - `MarkupCleaner` - 去掉 script/style/iframe 等噪声，提取可见文本
//! - `ConfigStore` - 从 `key=value` 文件读取指定的键
//! - `PromptAssembler` - 把正文和配置值填进模板
//! - `GenerationClient` / `LlmService` - 调用模型，失败时返回空结果
//!
//! ### ③ 流程层（Workflow）
//! - `Pipeline` - 流程编排（读取 → 清洗 → 组装 → 生成 → 写入）
//!
//! ## 错误处理
//!
//! 文件读写失败、配置缺失、参数无效都会中止运行并返回 [`PipelineError`]；
//! 模型调用失败只会让结果文件为空，运行照常完成。

pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::{Config, LlmConfig, PipelineConfig};
pub use error::{PipelineError, Result, ServiceError};
pub use models::{AssembledPrompt, CleanedText, ConfigValues, Document, GenerationResult, PromptTemplate};
pub use services::{ConfigStore, GenerationClient, LlmService, MarkupCleaner, PromptAssembler, TextGenerator};
pub use workflow::{Pipeline, RunReport, Stage};
