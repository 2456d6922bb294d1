use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// 单个环境的覆盖项
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Environment {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 完整的配置文件 `restcheck.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,

    /// 所有环境配置
    #[serde(default)]
    pub environments: HashMap<String, Environment>,
}

impl ConfigFile {
    /// 获取指定环境的配置
    pub fn get_environment(&self, env_name: &str) -> Option<&Environment> {
        self.environments.get(env_name)
    }
}

/// CLI 传入的覆盖项（优先级最高）
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 合并后的最终设置
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: url::Url,
    pub timeout: Duration,
}

impl Settings {
    pub const DEFAULT_BASE_URL: &'static str = "https://jsonplaceholder.typicode.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}
