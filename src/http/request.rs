use std::collections::BTreeMap;

use reqwest::header::{HeaderMap as Headers, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::http::types::{Method, Url};
use crate::{CheckError, Result};

/// 一次待发送的请求
///
/// `execute` 按值接收请求，发出后不可再修改。
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<Value>,
    /// 按键排序，发送顺序固定
    pub query_params: BTreeMap<String, String>,
    /// 为 true 时，状态码 >= 400 作为 UnexpectedStatus 返回
    pub fail_on_status_code: bool,
}

impl Request {
    pub fn new(method: &str, url: &str) -> Result<Self> {
        Ok(Self {
            method: method.parse()?,
            url: Url::parse(url)?,
            headers: Headers::new(),
            body: None,
            query_params: BTreeMap::new(),
            fail_on_status_code: true,
        })
    }

    pub fn get(url: &str) -> Result<Self> {
        Self::new("GET", url)
    }

    pub fn post(url: &str) -> Result<Self> {
        Self::new("POST", url)
    }

    pub fn put(url: &str) -> Result<Self> {
        Self::new("PUT", url)
    }

    pub fn delete(url: &str) -> Result<Self> {
        Self::new("DELETE", url)
    }

    fn insert_header(&mut self, key: &str, value: &str) -> Result<()> {
        let name: HeaderName = key
            .parse()
            .map_err(|_| CheckError::ParseError(format!("Invalid header name: {}", key)))?;
        let value: HeaderValue = value
            .parse()
            .map_err(|_| CheckError::ParseError(format!("Invalid header value for {}", key)))?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self> {
        self.insert_header(key, value)?;
        Ok(self)
    }

    /// 设置 JSON 请求体，同时补上 Content-Type
    pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(data)?);
        self.insert_header("Content-Type", "application/json")?;
        Ok(self)
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query_params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn fail_on_status_code(mut self, enabled: bool) -> Self {
        self.fail_on_status_code = enabled;
        self
    }
}
