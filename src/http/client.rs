use std::error::Error as _;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::types::Status;
use crate::{CheckError, Result};

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base_url: Option<url::Url>,
}

impl Client {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            inner,
            base_url: None,
        })
    }

    /// 相对路径请求将拼接到该地址上
    pub fn with_base_url(mut self, base_url: url::Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn base_url(&self) -> Option<&url::Url> {
        self.base_url.as_ref()
    }

    /// 发送一次请求
    ///
    /// 只有网络层失败才返回 `Transport`；状态码 >= 400 仅在
    /// `fail_on_status_code` 打开时转为 `UnexpectedStatus`。
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method;
        let mut url = request.url.resolve(self.base_url.as_ref())?;
        if !request.query_params.is_empty() {
            // 显式 query 参数覆盖 URL 中已有的同名参数
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| !request.query_params.contains_key(key.as_ref()))
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .extend_pairs(&request.query_params);
        }
        let transport_error = |e: reqwest::Error| CheckError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            message: describe(&e),
        };

        let mut req = self
            .inner
            .request(method.into(), url.clone())
            .headers(request.headers);

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        debug!(%method, %url, "sending request");
        let start = Instant::now();
        let response = req.send().await.map_err(transport_error)?;
        let status = Status::from(response.status());
        let headers = response.headers().clone();
        let text = response.text().await.map_err(transport_error)?;
        let duration = start.elapsed();
        debug!(%method, %url, status = status.code(), elapsed_ms = duration.as_millis() as u64, "received response");

        let response = Response::from_raw(status.code(), &headers, &text, duration);

        if request.fail_on_status_code && response.status.is_failure() {
            return Err(CheckError::UnexpectedStatus {
                method: method.to_string(),
                url: url.to_string(),
                status: status.code(),
            });
        }

        Ok(response)
    }
}

/// reqwest 的顶层错误信息不含根因，这里把 source 链拼起来
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
