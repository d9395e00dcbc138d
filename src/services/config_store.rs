//! 配置读取服务 - 业务能力层
//!
//! 只负责从 `key=value` 文件中读取指定的键

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, warn};

use crate::models::ConfigValues;

/// 注释行前缀
const COMMENT_PREFIX: char = '#';

/// 配置读取服务
///
/// 文件不可读不是错误：所有请求的键都会标记为缺失，
/// 由下游（模板组装）决定缺失值是否致命。
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取指定的键
    ///
    /// 重复的键只保留一项；文件中有但未请求的键被忽略。
    pub async fn read_keys<I, S>(&self, keys: I) -> ConfigValues
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = ConfigValues::all_absent(keys);

        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let found = parse_into(&content, &mut values);
                debug!(
                    "配置文件 {}: 请求 {} 个键，找到 {} 个",
                    self.path.display(),
                    values.len(),
                    found
                );
            }
            Err(e) => {
                warn!(
                    "⚠️ 无法读取配置文件 '{}': {}，所有配置项视为缺失",
                    self.path.display(),
                    e
                );
            }
        }

        values
    }
}

/// 解析 `key=value` 文本，只填充已请求的键，返回命中的行数
///
/// 以第一个 `=` 分割，键和值都去掉首尾空白；同一个键出现多次时后者覆盖前者。
fn parse_into(content: &str, values: &mut ConfigValues) -> usize {
    let mut found = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        if values.set_if_requested(key, value.trim()) {
            found += 1;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str, keys: &[&str]) -> ConfigValues {
        let mut values = ConfigValues::all_absent(keys.iter().copied());
        parse_into(content, &mut values);
        values
    }

    #[test]
    fn test_parse_basic_pairs() {
        let values = parse("object = OBJ\ntargets=TGT\n", &["object", "targets"]);
        assert_eq!(values.get("object"), Some("OBJ"));
        assert_eq!(values.get("targets"), Some("TGT"));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "# object=commented\n\n   \n  # another\nobject=real\n";
        let values = parse(content, &["object"]);
        assert_eq!(values.get("object"), Some("real"));
    }

    #[test]
    fn test_split_on_first_equals() {
        let values = parse("object=a=b=c\n", &["object"]);
        assert_eq!(values.get("object"), Some("a=b=c"));
    }

    #[test]
    fn test_unrequested_keys_ignored_and_missing_absent() {
        let values = parse("extra=1\nobject=OBJ\n", &["object", "targets"]);
        assert!(!values.is_requested("extra"));
        assert_eq!(values.get("targets"), None);
        assert_eq!(values.absent_keys().collect::<Vec<_>>(), vec!["targets"]);
    }

    #[test]
    fn test_lines_without_key_or_separator_skipped() {
        let values = parse("=value\nobject\n  = x\n", &["object"]);
        assert_eq!(values.get("object"), None);
    }

    #[test]
    fn test_empty_value_is_present() {
        let values = parse("object=\n", &["object"]);
        assert_eq!(values.get("object"), Some(""));
    }

    #[test]
    fn test_later_line_wins() {
        let values = parse("object=first\nobject=second\n", &["object"]);
        assert_eq!(values.get("object"), Some("second"));
    }

    #[tokio::test]
    async fn test_read_keys_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.cfg");
        std::fs::write(&path, "# settings\nobject=Объект\ntargets=Цели\n").unwrap();

        let store = ConfigStore::new(&path);
        let values = store.read_keys(["object", "additions", "targets"]).await;

        assert_eq!(values.get("object"), Some("Объект"));
        assert_eq!(values.get("targets"), Some("Цели"));
        assert_eq!(values.get("additions"), None);
    }

    #[tokio::test]
    async fn test_unreadable_file_yields_all_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("missing.cfg"));

        let values = store.read_keys(["object", "targets"]).await;

        assert_eq!(values.len(), 2);
        assert_eq!(values.absent_keys().count(), 2);
    }
}
