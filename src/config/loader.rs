use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use tracing::debug;

use crate::config::types::{ConfigFile, Overrides, Settings};
use crate::{CheckError, Result};

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "restcheck.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CheckError::Config(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| CheckError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/restcheck/
    ///
    /// 找到但无法解析的文件返回错误，不会回退到默认配置。
    pub fn find_and_load() -> Result<Option<ConfigFile>> {
        let current = std::env::current_dir()?;
        match Self::find_and_load_from(&current)? {
            Some(config) => Ok(Some(config)),
            None => Self::try_load_from_user_dir(),
        }
    }

    /// 从 `start` 开始逐级向上查找 restcheck.toml
    pub fn find_and_load_from(start: &Path) -> Result<Option<ConfigFile>> {
        for dir in start.ancestors() {
            let config_path = dir.join(Self::CONFIG_FILE);
            if config_path.exists() {
                debug!(path = %config_path.display(), "loading config");
                return Self::load_from_path(&config_path).map(Some);
            }
        }

        Ok(None)
    }

    fn try_load_from_user_dir() -> Result<Option<ConfigFile>> {
        let Some(home) = dirs::home_dir() else {
            return Ok(None);
        };
        let config_path = home
            .join(".config")
            .join("restcheck")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            Self::load_from_path(&config_path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// 合并配置
    ///
    /// 优先级：CLI 覆盖 > 环境 > 顶层 > 内置默认值
    pub fn build_settings(
        config: Option<&ConfigFile>,
        env_name: Option<&str>,
        overrides: &Overrides,
    ) -> Result<Settings> {
        let environment = match (config, env_name) {
            (_, None) => None,
            (Some(config), Some(name)) => Some(config.get_environment(name).ok_or_else(|| {
                CheckError::Config(format!("Unknown environment '{}'", name))
            })?),
            (None, Some(name)) => {
                return Err(CheckError::Config(format!(
                    "Environment '{}' requested but no config file was found",
                    name
                )));
            }
        };

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| environment.and_then(|env| env.base_url.clone()))
            .or_else(|| config.and_then(|c| c.base_url.clone()))
            .unwrap_or_else(|| Settings::DEFAULT_BASE_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or_else(|| environment.and_then(|env| env.timeout_secs))
            .or_else(|| config.and_then(|c| c.timeout_secs))
            .unwrap_or(Settings::DEFAULT_TIMEOUT_SECS);

        let resolved = Self::resolve_env_vars(&base_url);
        let base_url = url::Url::parse(&resolved)
            .map_err(|e| CheckError::Config(format!("Invalid base_url '{}': {}", resolved, e)))?;

        Ok(Settings {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 解析并替换系统环境变量 ${VAR}，未定义的保持原样
    pub fn resolve_env_vars(text: &str) -> String {
        static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ENV_REGEX.get_or_init(|| {
            Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(text, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
    }
}
