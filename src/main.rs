use anyhow::{Context, Result};
use html_prompt_runner::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化并运行应用
    let app = App::initialize(config).context("初始化失败")?;
    let report = app.run().await.context("运行失败")?;

    if report.is_partial() {
        tracing::warn!("⚠️ 部分完成：模型未返回结果");
    }

    Ok(())
}
