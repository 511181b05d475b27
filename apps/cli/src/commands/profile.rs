//! 轨迹采样命令
//!
//! 按固定周期步进轨迹，每行输出 `time position velocity acceleration`。

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, BufWriter, Write};
use trajex_profile::{MotionProfile, ProfileSample, SinusoidalProfile, TrapezoidalProfile};

/// 采样参数
#[derive(Args, Debug)]
pub struct SamplingArgs {
    /// 控制周期（秒）
    #[arg(long, default_value_t = 0.002)]
    pub dt: f64,
}

/// 轨迹命令
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// 梯形速度轨迹
    Trapezoidal {
        /// 起始位置（rad）
        #[arg(long, allow_negative_numbers = true)]
        start: f64,

        /// 目标位置（rad）
        #[arg(long, allow_negative_numbers = true)]
        goal: f64,

        /// 最大速度（rad/s）
        #[arg(long, allow_negative_numbers = true)]
        max_velocity: f64,

        /// 最大加速度（rad/s²）
        #[arg(long, allow_negative_numbers = true)]
        max_acceleration: f64,

        /// 运行时长 = settle * t_total
        #[arg(long, default_value_t = 1.5)]
        settle: f64,

        #[command(flatten)]
        sampling: SamplingArgs,
    },

    /// 余弦振荡轨迹
    Sinusoidal {
        /// 基准位置（rad）
        #[arg(long, allow_negative_numbers = true)]
        base: f64,

        /// 振幅（rad）
        #[arg(long, allow_negative_numbers = true)]
        amplitude: f64,

        /// 角频率（rad/s）
        #[arg(long, allow_negative_numbers = true)]
        omega: f64,

        /// 运行时长（振荡周期的倍数）
        #[arg(long, default_value_t = 1.0)]
        periods: f64,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
}

impl ProfileCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ProfileCommand::Trapezoidal {
                start,
                goal,
                max_velocity,
                max_acceleration,
                settle,
                sampling,
            } => {
                let dt = checked_dt(sampling.dt)?;
                let mut ramp = TrapezoidalProfile::new(start, goal, max_velocity, max_acceleration)
                    .context("轨迹参数无效")?;
                let timing = *ramp.timing();
                let ticks = ticks_for(settle.max(1.0) * timing.t_total, dt);

                let stdout = io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                writeln!(
                    out,
                    "# t_accel={:.6} t_const={:.6} t_total={:.6} peak_velocity={:.6} triangular={}",
                    timing.t_accel,
                    timing.t_const,
                    timing.t_total,
                    timing.peak_velocity,
                    timing.is_triangular()
                )?;
                write_samples(&mut out, &mut ramp, dt, ticks)?;
                out.flush()?;
                Ok(())
            },

            ProfileCommand::Sinusoidal {
                base,
                amplitude,
                omega,
                periods,
                sampling,
            } => {
                let dt = checked_dt(sampling.dt)?;
                let mut profile =
                    SinusoidalProfile::setup(base, amplitude, omega).context("轨迹参数无效")?;
                let ticks = ticks_for(periods.max(0.0) * profile.period(), dt);

                let stdout = io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                writeln!(out, "# period={:.6}", profile.period())?;
                write_samples(&mut out, &mut profile, dt, ticks)?;
                out.flush()?;
                Ok(())
            },
        }
    }
}

fn checked_dt(dt: f64) -> Result<f64> {
    if !dt.is_finite() || dt <= 0.0 {
        anyhow::bail!("--dt 必须为正数，实际为 {}", dt);
    }
    Ok(dt)
}

fn ticks_for(duration: f64, dt: f64) -> usize {
    (duration / dt).ceil() as usize
}

/// 输出 t = 0 的初始采样和之后 `ticks` 个周期的采样
fn write_samples<W, P>(out: &mut W, profile: &mut P, dt: f64, ticks: usize) -> Result<()>
where
    W: Write,
    P: MotionProfile,
{
    write_line(out, profile.elapsed(), &profile.sample())?;
    for _ in 0..ticks {
        let sample = profile.update(dt);
        write_line(out, profile.elapsed(), &sample)?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, t: f64, sample: &ProfileSample) -> Result<()> {
    writeln!(
        out,
        "{:.6} {:.6} {:.6} {:.6}",
        t, sample.position, sample.velocity, sample.acceleration
    )?;
    Ok(())
}
