use thiserror::Error;

use crate::assertion::AssertionFailure;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    /// 网络层无法完成请求（DNS、连接、超时、读取响应体）
    #[error("Transport error for {method} {url}: {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    /// 状态码 >= 400 且未关闭 fail_on_status_code
    #[error("Unexpected status {status} for {method} {url}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Cannot project '{segment}' from {subject}: {reason}")]
    Projection {
        subject: String,
        segment: String,
        reason: String,
    },

    #[error("{predicate} cannot be applied to {subject}: expected {expected}, got {actual}")]
    TypeMismatch {
        subject: String,
        predicate: String,
        expected: String,
        actual: String,
    },

    #[error("{0}")]
    Assertion(#[from] AssertionFailure),

    #[error("Unknown alias '@{0}'")]
    UnknownAlias(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

impl CheckError {
    /// 请求阶段的错误（会让用例停在 Requesting 状态）
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            CheckError::Transport { .. } | CheckError::UnexpectedStatus { .. }
        )
    }
}

impl From<anyhow::Error> for CheckError {
    fn from(err: anyhow::Error) -> Self {
        CheckError::Other(err.to_string())
    }
}

/// Result type for restcheck crate
pub type Result<T> = std::result::Result<T, CheckError>;
