mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            // 初始化日志系统
            restcheck::logger::init_logger(args.verbose);
            if !cli::run(args).await? {
                std::process::exit(1);
            }
        }
        Commands::List => cli::list(),
    }
    Ok(())
}
