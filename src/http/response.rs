use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::{Map, Value, json};

use crate::http::types::Status;

/// 一次请求的响应快照，生成后只读
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    /// header 名统一为小写
    pub headers: HashMap<String, String>,
    pub body: Value,
    pub duration: Duration,
}

impl Response {
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Value,
        duration: Duration,
    ) -> Self {
        Self {
            status: Status::new(status),
            headers,
            body,
            duration,
        }
    }

    /// 由原始响应构建；body 优先按 JSON 解析，失败则保留为字符串
    ///
    /// 同名 header 以 `", "` 合并，非 UTF-8 字节按有损方式解码。
    pub fn from_raw(status: u16, raw_headers: &HeaderMap, text: &str, duration: Duration) -> Self {
        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in raw_headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            headers
                .entry(name.as_str().to_lowercase())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }

        Self::new(status, headers, parse_body(text), duration)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// 转换为可投影的结构化值
    ///
    /// `{ "status": 200, "headers": {..}, "body": .., "duration": 12 }`
    pub fn to_value(&self) -> Value {
        let headers: Map<String, Value> = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let duration_ms = self.duration.as_millis() as u64;

        json!({
            "status": self.status.code(),
            "headers": headers,
            "body": self.body,
            "duration": duration_ms,
        })
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_json_body() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "application/json".parse().unwrap());

        let response =
            Response::from_raw(200, &headers, r#"[{"id": 1}]"#, Duration::from_millis(5));

        assert_eq!(response.body, json!([{"id": 1}]));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
    }

    #[test]
    fn test_from_raw_text_and_empty_body() {
        let headers = HeaderMap::new();
        let text = Response::from_raw(200, &headers, "plain", Duration::ZERO);
        assert_eq!(text.body, Value::String("plain".to_string()));

        let empty = Response::from_raw(204, &headers, "", Duration::ZERO);
        assert_eq!(empty.body, Value::Null);
    }

    #[test]
    fn test_from_raw_joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("Set-Cookie", "a=1".parse().unwrap());
        headers.append("Set-Cookie", "b=2".parse().unwrap());
        headers.insert(
            "X-Raw",
            reqwest::header::HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        );

        let response = Response::from_raw(200, &headers, "", Duration::ZERO);
        assert_eq!(response.header("set-cookie"), Some("a=1, b=2"));
        assert_eq!(response.header("x-raw"), Some("caf\u{fffd}"));
    }

    #[test]
    fn test_to_value_layout() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = Response::new(404, headers, json!({}), Duration::from_millis(42));

        let value = response.to_value();
        assert_eq!(value["status"], json!(404));
        assert_eq!(value["headers"]["content-type"], json!("application/json"));
        assert_eq!(value["body"], json!({}));
        assert_eq!(value["duration"], json!(42));
    }
}
