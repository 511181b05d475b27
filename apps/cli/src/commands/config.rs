//! 配置管理命令
//!
//! 实验配置文件的生成、查看和检查。

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use trajex_tools::ExperimentConfig;

/// 默认配置文件路径
fn default_config_file() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;
    Ok(ExperimentConfig::default_path(&dir))
}

/// 解析配置文件路径：显式路径优先，否则使用平台配置目录
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_file(),
    }
}

/// 加载配置
///
/// - 显式给出的路径必须存在
/// - 默认路径不存在时使用默认配置
pub fn load_config(explicit: Option<&Path>) -> Result<ExperimentConfig> {
    let path = resolve_config_path(explicit)?;

    if !path.exists() {
        if explicit.is_some() {
            bail!("配置文件不存在: {}", path.display());
        }
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(ExperimentConfig::default_config());
    }

    ExperimentConfig::load_from_file(&path)
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 生成默认配置文件
    Init {
        /// 输出路径（默认为平台配置目录）
        path: Option<PathBuf>,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },

    /// 打印当前生效的配置（TOML）
    Show {
        /// 配置文件路径
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 检查配置
    Check {
        /// 配置文件路径
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Init { path, force } => Self::init_(path, force),

            ConfigCommand::Show { config } => Self::show_(config),

            ConfigCommand::Check { config } => Self::check_(config),
        }
    }

    fn init_(path: Option<PathBuf>, force: bool) -> Result<()> {
        let path = resolve_config_path(path.as_deref())?;

        if path.exists() && !force {
            bail!(
                "配置文件已存在: {}（使用 --force 覆盖）",
                path.display()
            );
        }

        ExperimentConfig::default_config()
            .save_to_file(&path)
            .context("生成配置文件失败")?;
        println!("✅ 已生成配置文件: {}", path.display());
        Ok(())
    }

    fn show_(config: Option<PathBuf>) -> Result<()> {
        let config = load_config(config.as_deref())?;
        print!("{}", config.to_toml_string()?);
        Ok(())
    }

    fn check_(config: Option<PathBuf>) -> Result<()> {
        let path = resolve_config_path(config.as_deref())?;
        let config = load_config(config.as_deref())?;

        println!("配置文件: {}", path.display());
        println!("  控制频率: {} Hz", config.control.frequency_hz);
        println!("  轴: {:?}", config.axes);
        println!(
            "  梯形往复: {}（{} 段）",
            enabled(config.ramp.enabled),
            config.ramp.reversals
        );
        println!(
            "  位置振荡: {}（{} 组参数）",
            enabled(config.oscillation.enabled),
            config.oscillation.params.len()
        );
        println!(
            "  力矩激励: {}（{} 组参数）",
            enabled(config.torque.enabled),
            config.torque.params.len()
        );
        println!("  输出目录: {}", config.output_dir.display());
        println!("✅ 配置有效");
        Ok(())
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag { "启用" } else { "禁用" }
}
