//! LLM 服务 - 业务能力层
//!
//! 只负责"把一段文本发给模型并拿回文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 OpenAI 兼容接口访问 Gemini（也可以换成任何兼容服务）

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::ServiceError;

/// 远程文本生成能力
///
/// 流水线只依赖这个 trait，测试中可以替换成假的实现。
pub trait TextGenerator {
    /// 模型名称（仅用于日志）
    fn model_name(&self) -> &str;

    /// 发送完整的请求内容，返回模型输出
    fn generate(
        &self,
        payload: &str,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// 基于 `async-openai` 的 LLM 服务
///
/// 职责：
/// - 持有模型名和采样参数
/// - 每次调用时创建客户端，调用结束即释放
pub struct LlmService {
    config: LlmConfig,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn client(&self) -> Client<OpenAIConfig> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&self.config.api_key)
            .with_api_base(&self.config.api_base_url);

        Client::with_config(openai_config)
    }
}

impl TextGenerator for LlmService {
    fn model_name(&self) -> &str {
        &self.config.model_name
    }

    async fn generate(&self, payload: &str) -> Result<String, ServiceError> {
        debug!(
            "调用 LLM API，模型: {}, temperature: {}, top_p: {}",
            self.config.model_name, self.config.temperature, self.config.top_p
        );
        debug!("请求长度: {} 字符", payload.chars().count());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(payload)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.config.temperature)
            .top_p(self.config.top_p)
            .build()?;

        // 客户端只在本次调用内存活
        let client = self.client();
        let response = client.chat().create(request).await?;
        drop(client);

        debug!("LLM API 调用成功");

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ServiceError::EmptyResponse {
                model: self.config.model_name.clone(),
            })
    }
}
