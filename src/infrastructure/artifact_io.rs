//! 产物文件读写
//!
//! 所有失败都转换为带路径的 [`PipelineError::Io`]，由调用方决定是否中止。

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::error::{PipelineError, Result};

/// 以 UTF-8 读取整个文件
pub async fn read_artifact(path: &Path) -> Result<String> {
    match fs::read_to_string(path).await {
        Ok(content) => {
            debug!("读取文件 {}: {} 字节", path.display(), content.len());
            Ok(content)
        }
        Err(e) => {
            error!("❌ 无法读取文件 {}: {}", path.display(), e);
            Err(PipelineError::io(path, e))
        }
    }
}

/// 写入（覆盖）文件，写完并刷盘后才返回
pub async fn write_artifact(path: &Path, content: &str) -> Result<()> {
    let write = async {
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await
    };

    match write.await {
        Ok(()) => {
            info!("✓ 已写入文件: {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("❌ 无法写入文件 {}: {}", path.display(), e);
            Err(PipelineError::io(path, e))
        }
    }
}
