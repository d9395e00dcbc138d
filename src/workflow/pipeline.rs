//! 流水线 - 流程层
//!
//! 核心职责：定义"一次运行"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取原始 HTML → 清洗 → 写入清洗结果
//! 2. 读取配置 → 读取模板 → 组装 → 写入提示词
//! 3. 调用模型 → 写入模型输出
//!
//! 每一步的产物写入磁盘之后才进入下一步。文件读写失败立即中止；
//! 模型调用失败不会中止，结果文件照常写入（内容为空）。

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::infrastructure::{read_artifact, write_artifact};
use crate::models::{Document, GenerationResult, PromptTemplate};
use crate::services::{ConfigStore, GenerationClient, MarkupCleaner, PromptAssembler, TextGenerator};
use crate::workflow::stage::Stage;

/// 每次运行从配置文件读取的键
///
/// `additions` 目前没有对应的占位符，只读取并记录。
pub const REQUESTED_KEYS: [&str; 3] = ["object", "additions", "targets"];

/// 一次运行的结果摘要
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// 清洗后文本的字符数
    pub cleaned_chars: usize,
    /// 最终提示词的字符数
    pub prompt_chars: usize,
    /// 模型调用结果
    pub outcome: GenerationResult,
    /// 按写入顺序排列的产物路径
    pub artifacts: Vec<PathBuf>,
}

impl RunReport {
    /// 模型调用失败但其余产物都已写入
    pub fn is_partial(&self) -> bool {
        !self.outcome.is_generated()
    }
}

/// 流水线
///
/// - 持有各阶段的服务和产物路径
/// - 严格按顺序执行，不做并发
/// - 同一组路径上不要同时运行两个流水线
pub struct Pipeline<G> {
    paths: PipelineConfig,
    cleaner: MarkupCleaner,
    config_store: ConfigStore,
    assembler: PromptAssembler,
    client: GenerationClient<G>,
}

impl<G: TextGenerator> Pipeline<G> {
    /// 创建新的流水线
    pub fn new(paths: PipelineConfig, generator: G) -> Result<Self> {
        paths.validate()?;

        Ok(Self {
            config_store: ConfigStore::new(&paths.config_path),
            cleaner: MarkupCleaner::new()?,
            assembler: PromptAssembler::new(),
            client: GenerationClient::new(generator),
            paths,
        })
    }

    pub fn generator(&self) -> &G {
        self.client.generator()
    }

    /// 执行一次完整运行
    pub async fn run(&self) -> Result<RunReport> {
        let mut stage = Stage::ReadRawInput;

        match self.run_stages(&mut stage).await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("❌ [{}] 运行中止: {}", stage, e);
                Err(e)
            }
        }
    }

    async fn run_stages(&self, stage: &mut Stage) -> Result<RunReport> {
        let paths = &self.paths;
        let mut artifacts = Vec::with_capacity(3);

        // ========== 清洗 ==========
        info!("📄 读取原始HTML: {}", paths.raw_input_path.display());
        let document = Document::new(read_artifact(&paths.raw_input_path).await?);

        enter(stage, Stage::Clean);
        let cleaned = self.cleaner.clean(&document);
        let cleaned_chars = cleaned.as_str().chars().count();
        info!("🧹 清洗完成，正文 {} 字符", cleaned_chars);
        if cleaned.is_empty() {
            warn!("⚠️ 清洗后的正文为空");
        }

        enter(stage, Stage::PersistCleaned);
        write_artifact(&paths.cleaned_output_path, cleaned.as_str()).await?;
        artifacts.push(paths.cleaned_output_path.clone());

        // ========== 组装 ==========
        enter(stage, Stage::ReadConfig);
        let values = self.config_store.read_keys(REQUESTED_KEYS).await;
        for key in values.absent_keys() {
            warn!("⚠️ 配置项 '{}' 缺失", key);
        }
        if let Some(additions) = values.get("additions") {
            debug!("additions = {}", additions);
        }

        enter(stage, Stage::ReadTemplate);
        let template = PromptTemplate::new(read_artifact(&paths.template_path).await?);

        enter(stage, Stage::Assemble);
        let prompt = self.assembler.assemble(&template, &cleaned, &values)?;
        let prompt_chars = prompt.as_str().chars().count();
        info!("📝 提示词组装完成，{} 字符", prompt_chars);

        enter(stage, Stage::PersistPrompt);
        write_artifact(&paths.prompt_output_path, prompt.as_str()).await?;
        artifacts.push(paths.prompt_output_path.clone());

        // ========== 生成 ==========
        enter(stage, Stage::Invoke);
        let outcome = self.client.generate(&cleaned, &prompt).await;

        enter(stage, Stage::PersistResult);
        write_artifact(&paths.result_output_path, outcome.artifact_content()).await?;
        artifacts.push(paths.result_output_path.clone());

        enter(stage, Stage::Done);

        Ok(RunReport {
            cleaned_chars,
            prompt_chars,
            outcome,
            artifacts,
        })
    }
}

fn enter(stage: &mut Stage, next: Stage) {
    debug_assert_eq!(stage.next(), Some(next));
    debug!("阶段: {} → {}", stage, next);
    *stage = next;
}
