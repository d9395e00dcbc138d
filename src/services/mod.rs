pub mod config_store;
pub mod generation_client;
pub mod llm_service;
pub mod markup_cleaner;
pub mod prompt_assembler;

pub use config_store::ConfigStore;
pub use generation_client::GenerationClient;
pub use llm_service::{LlmService, TextGenerator};
pub use markup_cleaner::MarkupCleaner;
pub use prompt_assembler::PromptAssembler;
