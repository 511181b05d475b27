//! 运行实验计划
//!
//! 在模拟机械臂上执行完整计划，日志写入输出目录，报告保存为 `report.json`。

use super::config::load_config;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use trajex_client::{
    ChannelRecorder, ChannelRecorderFactory, ExperimentRunner, ManualClock, MonotonicClock,
    NoDynamics, PlanReport, RecorderFactory, SimulatedArm, SpinClock, TextRecorderFactory,
};
use trajex_tools::ExperimentConfig;

/// 报告文件名
const REPORT_FILE_NAME: &str = "report.json";

/// 运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出目录（覆盖配置中的 output_dir）
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 使用虚拟时间（不等待真实时钟，尽快完成）
    #[arg(long)]
    pub virtual_time: bool,
}

impl RunCommand {
    pub fn execute(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        config.validate().context("配置无效")?;

        println!("⏳ 运行实验计划（模拟机械臂）...");
        println!("  控制频率: {} Hz", config.control.frequency_hz);
        println!("  输出目录: {}", config.output_dir.display());

        let report = if self.virtual_time {
            let mut factory =
                TextRecorderFactory::new(&config.output_dir).context("创建输出目录失败")?;
            execute_plan(&config, ManualClock::new(), &mut factory)?
        } else {
            let mut factory =
                ChannelRecorderFactory::new(&config.output_dir, ChannelRecorder::DEFAULT_CAPACITY)
                    .context("创建输出目录失败")?;
            let report = execute_plan(&config, SpinClock::new(config.control.spin), &mut factory)?;
            if factory.dropped_records() > 0 {
                println!("⚠️  丢弃记录: {}", factory.dropped_records());
            }
            report
        };

        let report_path = config.output_dir.join(REPORT_FILE_NAME);
        let json = serde_json::to_string_pretty(&report).context("序列化报告失败")?;
        std::fs::write(&report_path, json)
            .with_context(|| format!("写入报告失败: {}", report_path.display()))?;

        print_summary(&report);
        println!("报告: {}", report_path.display());
        Ok(())
    }
}

fn execute_plan<C, F>(config: &ExperimentConfig, clock: C, factory: &mut F) -> Result<PlanReport>
where
    C: MonotonicClock,
    F: RecorderFactory,
{
    let arm = SimulatedArm::new(config.control_period());
    let mut runner = ExperimentRunner::new(arm, NoDynamics, clock)?
        .with_resync_threshold(config.control.resync_after_periods);
    let report = runner.run_plan(config, factory)?;
    Ok(report)
}

fn print_summary(report: &PlanReport) {
    println!(
        "✅ 完成 {}/{} 段，共 {} 个周期，超时 {} 个周期",
        report.completed(),
        report.segments.len(),
        report.total_ticks(),
        report.total_overruns()
    );
    for segment in report.aborted() {
        println!("⚠️  中止: {} ({} 个周期后)", segment.spec, segment.ticks_run);
    }
}
