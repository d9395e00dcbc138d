use std::collections::BTreeMap;

/// 从配置文件读取到的键值
///
/// 每个请求过的键都有一项；值为 `None` 表示文件中没有该键或文件不可读。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigValues {
    values: BTreeMap<String, Option<String>>,
}

impl ConfigValues {
    /// 所有请求的键都标记为缺失
    pub fn all_absent<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: keys.into_iter().map(|k| (k.into(), None)).collect(),
        }
    }

    /// 该键是否被请求过
    pub fn is_requested(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// 获取某个键的值；未请求或缺失都返回 `None`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_deref())
    }

    /// 只为已请求的键设置值，未请求的键直接忽略
    pub(crate) fn set_if_requested(&mut self, key: &str, value: &str) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    /// 缺失值的键
    pub fn absent_keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_collapses_duplicates() {
        let values = ConfigValues::all_absent(["object", "targets", "object"]);
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("object"), None);
        assert!(values.is_requested("targets"));
    }

    #[test]
    fn test_set_only_requested_keys() {
        let mut values = ConfigValues::all_absent(["object"]);
        assert!(values.set_if_requested("object", "OBJ"));
        assert!(!values.set_if_requested("other", "x"));
        assert_eq!(values.get("object"), Some("OBJ"));
        assert!(!values.is_requested("other"));
        assert_eq!(values.absent_keys().count(), 0);
    }
}
