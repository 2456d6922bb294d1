use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use restcheck::config::{ConfigLoader, Overrides};
use restcheck::http::Client;
use restcheck::runner::{RunOptions, TestReporter};
use restcheck::suites::posts_suite;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 运行 posts API 检查
    Run(RunArgs),
    /// 列出所有用例名称
    List,
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// 使用配置文件中的环境
    #[arg(short, long)]
    pub env: Option<String>,

    /// 覆盖 base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// 覆盖请求超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// 指定配置文件（默认自动查找 restcheck.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 只运行名称包含该文本的用例
    #[arg(short, long)]
    pub filter: Option<String>,

    /// 显示所有诊断信息
    #[arg(short, long)]
    pub verbose: bool,
}

/// 运行套件，返回是否全部通过
pub async fn run(args: RunArgs) -> Result<bool> {
    let config = match &args.config {
        Some(path) => Some(ConfigLoader::load_from_path(path)?),
        None => ConfigLoader::find_and_load()?,
    };

    let overrides = Overrides {
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout,
    };
    let settings = ConfigLoader::build_settings(config.as_ref(), args.env.as_deref(), &overrides)
        .context("invalid configuration")?;

    tracing::info!(base_url = %settings.base_url, timeout = ?settings.timeout, "settings resolved");

    let client = Client::with_timeout(settings.timeout)?.with_base_url(settings.base_url);
    let options = RunOptions {
        filter: args.filter.clone(),
    };

    let report = posts_suite().run(&client, &options).await;
    TestReporter::new(args.verbose).print_report(&report);

    Ok(report.summary.all_passed())
}

pub fn list() {
    let suite = posts_suite();
    println!("{}:", suite.name());
    for (index, case) in suite.cases().enumerate() {
        println!("  [{}] {}", index + 1, case.name());
    }
}
