//! 数据模型
//!
//! 每个模型只由产生它的阶段拥有，下游阶段只读取其引用。

pub mod config_values;
pub mod generation;
pub mod text;

pub use config_values::ConfigValues;
pub use generation::GenerationResult;
pub use text::{AssembledPrompt, CleanedText, Document, PromptTemplate};
