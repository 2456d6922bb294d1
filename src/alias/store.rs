use std::collections::HashMap;

use crate::assertion::Subject;
use crate::http::Response;
use crate::{CheckError, Result};

/// 别名存储，作用域为单个用例
///
/// 同名写入覆盖旧值；读取未写入的别名返回 `UnknownAlias`。
#[derive(Debug, Clone, Default)]
pub struct AliasStore {
    entries: HashMap<String, Subject>,
}

impl AliasStore {
    /// 创建新的空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入别名，返回被覆盖的旧值
    pub fn set(&mut self, name: impl Into<String>, value: Subject) -> Option<Subject> {
        self.entries.insert(name.into(), value)
    }

    /// 以 `@name` 为 label 写入响应
    pub fn set_response(&mut self, name: &str, response: &Response) -> Subject {
        let subject = Subject::from_response(format!("@{}", name), response);
        self.set(name, subject.clone());
        subject
    }

    pub fn get(&self, name: &str) -> Result<&Subject> {
        self.entries
            .get(name.trim_start_matches('@'))
            .ok_or_else(|| CheckError::UnknownAlias(name.trim_start_matches('@').to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name.trim_start_matches('@'))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_get_unset_alias() {
        let store = AliasStore::new();
        match store.get("posts") {
            Err(CheckError::UnknownAlias(name)) => assert_eq!(name, "posts"),
            other => panic!("Expected UnknownAlias, got {:?}", other),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = AliasStore::new();
        assert!(store.set("post", Subject::new("@post", json!(1))).is_none());
        let previous = store.set("post", Subject::new("@post", json!(2)));

        assert_eq!(previous.unwrap().value(), &json!(1));
        assert_eq!(store.get("post").unwrap().value(), &json!(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_at_prefix_is_optional() {
        let mut store = AliasStore::new();
        store.set("posts", Subject::new("@posts", json!([])));
        assert!(store.get("@posts").is_ok());
        assert!(store.contains("@posts"));
        assert!(store.contains("posts"));
    }

    #[test]
    fn test_set_response() {
        let response = Response::new(
            201,
            Default::default(),
            json!({"id": 101}),
            Duration::from_millis(3),
        );

        let mut store = AliasStore::new();
        let subject = store.set_response("createdPost", &response);

        assert_eq!(subject.label(), "@createdPost");
        assert_eq!(
            store.get("createdPost").unwrap().its("status").unwrap().value(),
            &json!(201)
        );
    }

    #[test]
    fn test_clear() {
        let mut store = AliasStore::new();
        store.set("a", Subject::new("@a", json!(null)));
        store.clear();
        assert!(store.is_empty());
        assert!(store.get("a").is_err());
    }
}
