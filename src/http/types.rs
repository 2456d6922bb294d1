use std::fmt;
use std::str::FromStr;

use crate::{CheckError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = CheckError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(CheckError::ParseError(format!(
                "Invalid HTTP method: {}",
                s
            ))),
        }
    }
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// 请求目标地址
///
/// 相对路径（以 `/` 开头）在执行前由 [`Url::resolve`] 拼接到 base URL 上。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Url {
    Absolute(url::Url),
    Relative(String),
}

impl Url {
    /// 默认 scheme，当 URL 中未指定 scheme 时使用
    const DEFAULT_SCHEME: &'static str = "http";

    pub fn parse(s: &str) -> Result<Self> {
        let input = s.trim();
        if input.is_empty() {
            return Err(CheckError::InvalidUrl("empty url".to_string()));
        }

        if input.starts_with('/') {
            return Ok(Url::Relative(input.to_string()));
        }

        // "localhost:3000/posts" -> "http://localhost:3000/posts"
        let normalized = if input.contains("://") {
            input.to_string()
        } else {
            format!("{}://{}", Self::DEFAULT_SCHEME, input)
        };

        let url = url::Url::parse(&normalized)?;
        if url.host().is_none() {
            return Err(CheckError::InvalidUrl(input.to_string()));
        }
        Ok(Url::Absolute(url))
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Url::Relative(_))
    }

    /// 将相对路径拼接到 base 上；绝对地址原样返回
    ///
    /// base 的路径前缀会被保留: `http://host/api` + `/posts` -> `http://host/api/posts`
    pub fn resolve(&self, base: Option<&url::Url>) -> Result<url::Url> {
        match self {
            Url::Absolute(url) => Ok(url.clone()),
            Url::Relative(path) => {
                let base = base.ok_or_else(|| {
                    CheckError::InvalidUrl(format!(
                        "relative url '{}' requires a base url",
                        path
                    ))
                })?;
                let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
                Ok(url::Url::parse(&joined)?)
            }
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Url::Absolute(url) => write!(f, "{}", url),
            Url::Relative(path) => write!(f, "{}", path),
        }
    }
}

/// 响应状态码，接受 reqwest 能产生的任意值（100..=999）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.0)
    }

    /// 400 及以上视为失败状态
    pub fn is_failure(&self) -> bool {
        self.0 >= 400
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

impl From<reqwest::StatusCode> for Status {
    fn from(code: reqwest::StatusCode) -> Self {
        Self(code.as_u16())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert!("FETCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_parse_full_url() {
        let url = Url::parse("https://api.example.com:8443/v1/posts?id=1").unwrap();
        match url {
            Url::Absolute(u) => {
                assert_eq!(u.scheme(), "https");
                assert_eq!(u.host_str(), Some("api.example.com"));
                assert_eq!(u.port(), Some(8443));
                assert_eq!(u.path(), "/v1/posts");
                assert_eq!(u.query(), Some("id=1"));
            }
            Url::Relative(_) => panic!("expected absolute url"),
        }
    }

    #[test]
    fn test_parse_url_without_scheme() {
        let url = Url::parse("localhost:3000/posts").unwrap();
        let resolved = url.resolve(None).unwrap();
        assert_eq!(resolved.as_str(), "http://localhost:3000/posts");
    }

    #[test]
    fn test_parse_relative_url() {
        let url = Url::parse("  /posts/1 ").unwrap();
        assert!(url.is_relative());
        assert_eq!(url.to_string(), "/posts/1");
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = url::Url::parse("https://jsonplaceholder.typicode.com/").unwrap();
        let url = Url::parse("/posts/invalid").unwrap();
        assert_eq!(
            url.resolve(Some(&base)).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/posts/invalid"
        );
    }

    #[test]
    fn test_resolve_keeps_base_path_prefix() {
        let base = url::Url::parse("http://127.0.0.1:8080/api").unwrap();
        let url = Url::parse("/posts").unwrap();
        assert_eq!(
            url.resolve(Some(&base)).unwrap().as_str(),
            "http://127.0.0.1:8080/api/posts"
        );
    }

    #[test]
    fn test_resolve_relative_without_base() {
        let url = Url::parse("/posts").unwrap();
        assert!(matches!(url.resolve(None), Err(CheckError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_empty_url() {
        assert!(Url::parse("   ").is_err());
    }

    #[test]
    fn test_status_ranges() {
        let ok = Status::new(201);
        assert!(ok.is_success());
        assert!(!ok.is_failure());

        let not_found = Status::new(404);
        assert!(not_found.is_client_error());
        assert!(not_found.is_failure());
        assert_eq!(not_found.to_string(), "404 Not Found");

        let unusual = Status::new(799);
        assert!(unusual.is_failure());
        assert!(!unusual.is_server_error());
        assert_eq!(unusual.to_string(), "799 Unknown");
    }
}
