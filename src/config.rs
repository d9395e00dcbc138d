use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// 指向 TOML 设置文件的环境变量
pub const SETTINGS_ENV: &str = "PIPELINE_SETTINGS";

/// 程序配置
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// 各产物文件路径
    pub paths: PipelineConfig,
    /// 模型与采样参数
    pub llm: LlmConfig,
}

/// 流水线各阶段的产物路径
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// 原始 HTML
    pub raw_input_path: PathBuf,
    /// 清洗后的文本
    pub cleaned_output_path: PathBuf,
    /// `key=value` 配置文件
    pub config_path: PathBuf,
    /// 提示词模板
    pub template_path: PathBuf,
    /// 组装后的提示词
    pub prompt_output_path: PathBuf,
    /// 模型输出
    pub result_output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_input_path: PathBuf::from("rawHtml.txt"),
            cleaned_output_path: PathBuf::from("cleanedHtml.txt"),
            config_path: PathBuf::from("properties.cfg"),
            template_path: PathBuf::from("baseGeminiPrompt.txt"),
            prompt_output_path: PathBuf::from("geminiPromptOutput.txt"),
            result_output_path: PathBuf::from("geminiOutput.txt"),
        }
    }
}

impl PipelineConfig {
    /// 所有路径都放在同一个目录下（文件名取默认值）
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let default = Self::default();
        Self {
            raw_input_path: dir.join(default.raw_input_path),
            cleaned_output_path: dir.join(default.cleaned_output_path),
            config_path: dir.join(default.config_path),
            template_path: dir.join(default.template_path),
            prompt_output_path: dir.join(default.prompt_output_path),
            result_output_path: dir.join(default.result_output_path),
        }
    }

    fn entries(&self) -> [(&'static str, &Path); 6] {
        [
            ("raw_input_path", self.raw_input_path.as_path()),
            ("cleaned_output_path", self.cleaned_output_path.as_path()),
            ("config_path", self.config_path.as_path()),
            ("template_path", self.template_path.as_path()),
            ("prompt_output_path", self.prompt_output_path.as_path()),
            ("result_output_path", self.result_output_path.as_path()),
        ]
    }

    /// 任何路径为空都视为参数缺失
    pub fn validate(&self) -> Result<()> {
        for (name, path) in self.entries() {
            if path.as_os_str().is_empty() {
                return Err(PipelineError::invalid_argument(format!("路径 {} 为空", name)));
            }
        }
        Ok(())
    }
}

/// LLM 配置
///
/// `Debug` 输出不包含 API 密钥。
#[derive(Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub model_name: String,
    /// 低温度，尽量让同样的输入得到同样的输出
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model_name: "gemini-2.5-flash-preview-05-20".to_string(),
            temperature: 0.05,
            top_p: 0.95,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_base_url", &self.api_base_url)
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish()
    }
}

impl LlmConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(PipelineError::invalid_argument(format!(
                "temperature {} 超出范围 [0, 2]",
                self.temperature
            )));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(PipelineError::invalid_argument(format!(
                "top_p {} 超出范围 (0, 1]",
                self.top_p
            )));
        }
        if self.model_name.trim().is_empty() {
            return Err(PipelineError::invalid_argument("模型名称为空"));
        }
        Ok(())
    }
}

/// TOML 设置文件，所有字段都是可选的
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    paths: PathSettings,
    llm: LlmSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PathSettings {
    raw_input_path: Option<PathBuf>,
    cleaned_output_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    template_path: Option<PathBuf>,
    prompt_output_path: Option<PathBuf>,
    result_output_path: Option<PathBuf>,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LlmSettings {
    api_key: Option<String>,
    api_base_url: Option<String>,
    model_name: Option<String>,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &self.api_key.as_deref().map(redact))
            .field("api_base_url", &self.api_base_url)
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish()
    }
}

/// 密钥只显示是否已设置
fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<未设置>"
    } else {
        "***"
    }
}

impl Config {
    /// 默认值 → 设置文件（`PIPELINE_SETTINGS`）→ 环境变量
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(settings_path) = std::env::var_os(SETTINGS_ENV) {
            let settings_path = PathBuf::from(settings_path);
            config.apply_settings_file(&settings_path)?;
            info!("已加载设置文件: {}", settings_path.display());
        }

        config.apply_env(|name| std::env::var(name).ok());
        config.paths.validate()?;
        config.llm.validate()?;

        Ok(config)
    }

    /// 用 TOML 设置文件覆盖当前值
    pub fn apply_settings_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.apply_settings_str(&content)
            .map_err(|message| PipelineError::Settings {
                path: path.to_path_buf(),
                message,
            })
    }

    fn apply_settings_str(&mut self, content: &str) -> std::result::Result<(), String> {
        let settings: SettingsFile = toml::from_str(content).map_err(|e| e.to_string())?;
        debug!("设置文件内容: {:?}", settings);

        let p = settings.paths;
        let paths = &mut self.paths;
        override_with(&mut paths.raw_input_path, p.raw_input_path);
        override_with(&mut paths.cleaned_output_path, p.cleaned_output_path);
        override_with(&mut paths.config_path, p.config_path);
        override_with(&mut paths.template_path, p.template_path);
        override_with(&mut paths.prompt_output_path, p.prompt_output_path);
        override_with(&mut paths.result_output_path, p.result_output_path);

        let l = settings.llm;
        let llm = &mut self.llm;
        override_with(&mut llm.api_key, l.api_key);
        override_with(&mut llm.api_base_url, l.api_base_url);
        override_with(&mut llm.model_name, l.model_name);
        override_with(&mut llm.temperature, l.temperature);
        override_with(&mut llm.top_p, l.top_p);

        Ok(())
    }

    /// 用环境变量覆盖当前值；数值解析失败时保留原值
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let paths = &mut self.paths;
        override_with(&mut paths.raw_input_path, var("RAW_INPUT_PATH").map(PathBuf::from));
        override_with(&mut paths.cleaned_output_path, var("CLEANED_OUTPUT_PATH").map(PathBuf::from));
        override_with(&mut paths.config_path, var("CONFIG_PATH").map(PathBuf::from));
        override_with(&mut paths.template_path, var("TEMPLATE_PATH").map(PathBuf::from));
        override_with(&mut paths.prompt_output_path, var("PROMPT_OUTPUT_PATH").map(PathBuf::from));
        override_with(&mut paths.result_output_path, var("RESULT_OUTPUT_PATH").map(PathBuf::from));

        let llm = &mut self.llm;
        override_with(
            &mut llm.api_key,
            var("LLM_API_KEY")
                .or_else(|| var("GEMINI_API_KEY"))
                .or_else(|| var("GOOGLE_API_KEY")),
        );
        override_with(&mut llm.api_base_url, var("LLM_API_BASE_URL"));
        override_with(&mut llm.model_name, var("LLM_MODEL_NAME"));
        override_with(&mut llm.temperature, var("LLM_TEMPERATURE").and_then(|v| v.parse().ok()));
        override_with(&mut llm.top_p, var("LLM_TOP_P").and_then(|v| v.parse().ok()));
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
