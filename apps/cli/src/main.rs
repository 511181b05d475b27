//! # Trajex CLI
//!
//! 轨迹实验命令行工具。
//!
//! ```bash
//! # 生成默认配置
//! trajex-cli config init
//!
//! # 在模拟机械臂上运行实验计划（虚拟时间，尽快完成）
//! trajex-cli run --virtual-time --output-dir data
//!
//! # 打印梯形轨迹采样
//! trajex-cli profile trapezoidal --start 0 --goal 1.5708 --max-velocity 1.5708 --max-acceleration 3.1416
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{ConfigCommand, ProfileCommand, RunCommand};

/// Trajex CLI - 轨迹实验命令行工具
#[derive(Parser, Debug)]
#[command(name = "trajex-cli")]
#[command(about = "Motion-profile experiments on a 6-axis arm", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 运行实验计划
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 打印轨迹采样
    #[command(subcommand)]
    Profile(ProfileCommand),
}

fn main() -> Result<()> {
    // 初始化日志（stderr，stdout 留给数据输出）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trajex_cli=info".parse()?)
                .add_directive("trajex_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),

        Commands::Run { args } => args.execute(),

        Commands::Profile(cmd) => cmd.execute(),
    }
}
