use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 支持通过 RUST_LOG 环境变量控制日志级别；未设置时默认 `info`，
/// `verbose` 打开时默认 `restcheck=debug`。日志写到 stderr，报告写到 stdout。
///
/// 示例:
/// - RUST_LOG=restcheck=debug restcheck run
/// - RUST_LOG=info restcheck run --filter posts
pub fn init_logger(verbose: bool) {
    let default_directive = if verbose { "restcheck=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 重复初始化（例如测试中）时忽略错误
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Logger initialized");
}
