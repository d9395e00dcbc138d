use crate::config::Config;
use crate::error::Result;
use crate::services::LlmService;
use crate::utils::logging::{log_run_summary, log_startup};
use crate::workflow::{Pipeline, RunReport};

/// 应用主结构
pub struct App {
    pipeline: Pipeline<LlmService>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let llm = LlmService::new(&config.llm);
        let pipeline = Pipeline::new(config.paths, llm)?;

        Ok(Self { pipeline })
    }

    /// 运行一次流水线
    pub async fn run(&self) -> Result<RunReport> {
        let report = self.pipeline.run().await?;
        log_run_summary(&report);
        Ok(report)
    }
}
