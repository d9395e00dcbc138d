//! 生成调用服务 - 业务能力层
//!
//! 负责拼装请求内容、调用 [`TextGenerator`]，并把任何服务错误吸收为 `NoResult`

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::{AssembledPrompt, CleanedText, GenerationResult};
use crate::services::llm_service::TextGenerator;
use crate::utils::logging::truncate_text;

/// 生成调用服务
///
/// 每次运行只调用一次，不重试。
pub struct GenerationClient<G> {
    generator: G,
}

impl<G: TextGenerator> GenerationClient<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 调用远程模型
    ///
    /// 请求内容为提示词后直接追加清洗后的正文，空内容也照常发送。
    /// 服务端的任何失败（包括拒绝空请求）都转换为 [`GenerationResult::NoResult`]。
    pub async fn generate(
        &self,
        cleaned_text: &CleanedText,
        prompt: &AssembledPrompt,
    ) -> GenerationResult {
        let payload = build_payload(cleaned_text, prompt);
        if payload.trim().is_empty() {
            warn!("⚠️ 提示词和正文均为空");
        }

        info!("🤖 调用模型 {} ...", self.generator.model_name());
        let started = Instant::now();

        match self.generator.generate(&payload).await {
            Ok(text) => {
                debug!("模型输出预览: {}", truncate_text(&text, 80));
                info!(
                    "✓ 模型返回 {} 字符，用时 {:.1}s",
                    text.chars().count(),
                    started.elapsed().as_secs_f64()
                );
                GenerationResult::Generated(text)
            }
            Err(e) => {
                warn!("⚠️ 生成失败，结果记为空: {}", e);
                GenerationResult::NoResult {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// 请求内容：提示词 + 正文
pub fn build_payload(cleaned_text: &CleanedText, prompt: &AssembledPrompt) -> String {
    let mut payload = String::with_capacity(prompt.as_str().len() + cleaned_text.as_str().len());
    payload.push_str(prompt.as_str());
    payload.push_str(cleaned_text.as_str());
    payload
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::error::ServiceError;

    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
        last_payload: Mutex<Option<String>>,
        fail: bool,
    }

    impl TextGenerator for Recording {
        fn model_name(&self) -> &str {
            "recording"
        }

        async fn generate(&self, payload: &str) -> std::result::Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.to_string());
            if self.fail {
                Err(ServiceError::Other("quota exceeded".to_string()))
            } else {
                Ok("ответ".to_string())
            }
        }
    }

    fn prompt(text: &str) -> AssembledPrompt {
        AssembledPrompt::new(text.to_string())
    }

    #[tokio::test]
    async fn test_payload_is_prompt_then_text() {
        let client = GenerationClient::new(Recording::default());

        let result = client
            .generate(&CleanedText::from("BODY"), &prompt("PROMPT: "))
            .await;

        assert_eq!(result, GenerationResult::Generated("ответ".to_string()));
        let payload = client.generator().last_payload.lock().unwrap().clone();
        assert_eq!(payload.as_deref(), Some("PROMPT: BODY"));
    }

    #[tokio::test]
    async fn test_service_error_becomes_no_result() {
        let client = GenerationClient::new(Recording {
            fail: true,
            ..Default::default()
        });

        let result = client
            .generate(&CleanedText::from("x"), &prompt("p"))
            .await;

        match result {
            GenerationResult::NoResult { reason } => assert!(reason.contains("quota exceeded")),
            other => panic!("expected NoResult, got {other:?}"),
        }
        assert_eq!(client.generator().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_payload_is_still_sent() {
        let client = GenerationClient::new(Recording {
            fail: true,
            ..Default::default()
        });

        let result = client
            .generate(&CleanedText::from(""), &prompt("  \n"))
            .await;

        assert!(matches!(result, GenerationResult::NoResult { .. }));
        assert_eq!(client.generator().calls.load(Ordering::SeqCst), 1);
        let payload = client.generator().last_payload.lock().unwrap().clone();
        assert_eq!(payload.as_deref(), Some("  \n"));
    }
}
