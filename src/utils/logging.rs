/// 日志工具模块
///
/// 提供运行开始与结束时的日志输出
use tracing::{info, warn};

use crate::config::Config;
use crate::models::GenerationResult;
use crate::workflow::RunReport;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 输入: {}", config.paths.raw_input_path.display());
    info!("📝 模板: {}", config.paths.template_path.display());
    info!(
        "🤖 模型: {} (temperature {}, top_p {})",
        config.llm.model_name, config.llm.temperature, config.llm.top_p
    );
    if config.llm.api_key.is_empty() {
        warn!("⚠️ 未设置 API 密钥 (LLM_API_KEY / GEMINI_API_KEY)");
    }
    info!("{}", "=".repeat(60));
}

/// 打印运行结果统计
pub fn log_run_summary(report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 运行完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("正文: {} 字符", report.cleaned_chars);
    info!("提示词: {} 字符", report.prompt_chars);
    match &report.outcome {
        GenerationResult::Generated(text) => {
            info!("✅ 模型输出: {}", truncate_text(text.trim(), 80));
        }
        GenerationResult::NoResult { reason } => {
            warn!("❌ 模型调用失败，结果文件为空: {}", reason);
        }
    }
    for path in &report.artifacts {
        info!("  已保存: {}", path.display());
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
