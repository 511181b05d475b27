//! Experiment Runner - 实验运行器
//!
//! 把轨迹、单轴注入、传输层、逆动力学、录制和节拍器串成固定周期的实验段。
//!
//! # 每个周期
//!
//! ```text
//! profile.update(dt) → inject → ID 前馈 → transport.dispatch → recorder.record → pacer.pace
//! ```
//!
//! # 错误处理
//!
//! - `TransportError` / `ProfileError`：中止当前段剩余周期，记录到报告，继续下一段
//! - `RecordingError` / 配置错误：致命，整个计划返回错误

use super::pacer::{LoopPacer, MonotonicClock, TickReport};
use crate::dynamics::InverseDynamics;
use crate::error::{ExperimentError, Result};
use crate::recording::{RecorderFactory, SampleRecorder};
use crate::transport::{ArmTransport, GainMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use trajex_profile::{
    Axis, AxisArray, LinearBlend, MotionProfile, SinusoidalProfile, TrapezoidalProfile,
    inject_axis, inject_sample,
};
use trajex_tools::{
    ArmCommand, ArmState, ExperimentConfig, ExperimentKind, RampSettings, SampleRecord,
};

/// 实验段标识
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentSpec {
    /// 多轴插值到初始位姿
    Blend { target: AxisArray<f64> },
    /// 梯形往复的第 `reversal` 段
    Ramp { axis: usize, reversal: usize },
    /// 位置振荡
    Oscillation { axis: usize, param_index: usize },
    /// 力矩激励
    TorqueExcitation { axis: usize, param_index: usize },
}

impl fmt::Display for SegmentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentSpec::Blend { .. } => write!(f, "blend"),
            SegmentSpec::Ramp { axis, reversal } => write!(f, "ramp axis={} reversal={}", axis, reversal),
            SegmentSpec::Oscillation { axis, param_index } => {
                write!(f, "oscillation axis={} exp={}", axis, param_index)
            },
            SegmentSpec::TorqueExcitation { axis, param_index } => {
                write!(f, "torque axis={} exp={}", axis, param_index)
            },
        }
    }
}

/// 实验段结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// 完成全部周期
    Completed,
    /// 中途中止
    Aborted {
        /// 中止原因
        reason: String,
    },
}

/// 单个实验段的报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// 实验段
    pub spec: SegmentSpec,
    /// 计划周期数
    pub ticks_planned: usize,
    /// 实际执行的周期数
    pub ticks_run: usize,
    /// 超时周期数
    pub overruns: usize,
    /// 最大落后时长（微秒）
    pub max_lateness_us: u64,
    /// 重新锚定次数
    pub resyncs: usize,
    /// 结果
    pub outcome: SegmentOutcome,
}

impl SegmentReport {
    fn new(spec: SegmentSpec, ticks_planned: usize) -> Self {
        Self {
            spec,
            ticks_planned,
            ticks_run: 0,
            overruns: 0,
            max_lateness_us: 0,
            resyncs: 0,
            outcome: SegmentOutcome::Completed,
        }
    }

    fn observe(&mut self, tick: &TickReport) {
        if tick.is_overrun() {
            self.overruns += 1;
            self.max_lateness_us = self.max_lateness_us.max(tick.lateness.as_micros() as u64);
        }
        if tick.resynced {
            self.resyncs += 1;
        }
    }

    /// 是否完成
    pub fn is_completed(&self) -> bool {
        self.outcome == SegmentOutcome::Completed
    }
}

/// 整个实验计划的报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// 按执行顺序排列的段报告
    pub segments: Vec<SegmentReport>,
    /// `transport.finish()` 是否成功
    pub finished: bool,
}

impl PlanReport {
    /// 完成的段数
    pub fn completed(&self) -> usize {
        self.segments.iter().filter(|s| s.is_completed()).count()
    }

    /// 中止的段
    pub fn aborted(&self) -> impl Iterator<Item = &SegmentReport> {
        self.segments.iter().filter(|s| !s.is_completed())
    }

    /// 总周期数
    pub fn total_ticks(&self) -> usize {
        self.segments.iter().map(|s| s.ticks_run).sum()
    }

    /// 总超时周期数
    pub fn total_overruns(&self) -> usize {
        self.segments.iter().map(|s| s.overruns).sum()
    }
}

/// 实验运行器
pub struct ExperimentRunner<T, D, C>
where
    T: ArmTransport,
    D: InverseDynamics,
    C: MonotonicClock,
{
    transport: T,
    dynamics: D,
    pacer: LoopPacer<C>,
    dt: f64,
    last_state: ArmState,
}

impl<T, D, C> ExperimentRunner<T, D, C>
where
    T: ArmTransport,
    D: InverseDynamics,
    C: MonotonicClock,
{
    /// 创建运行器，控制周期取自传输层
    pub fn new(transport: T, dynamics: D, clock: C) -> Result<Self> {
        let dt = transport.control_period();
        let pacer = LoopPacer::new(clock, dt)?;
        Ok(Self {
            transport,
            dynamics,
            pacer,
            dt,
            last_state: ArmState::default(),
        })
    }

    /// 落后超过 `periods` 个周期时重新锚定
    pub fn with_resync_threshold(mut self, periods: Option<u32>) -> Self {
        self.pacer = self.pacer.with_resync_threshold(periods);
        self
    }

    /// 控制周期（秒）
    pub fn period(&self) -> f64 {
        self.dt
    }

    /// 节拍器周期
    pub fn pacer_period(&self) -> Duration {
        self.pacer.period()
    }

    /// 传输层
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn read_state(&mut self) -> Result<ArmState> {
        let state = self.transport.read_state()?;
        self.last_state = state;
        Ok(state)
    }

    fn dispatch(&mut self, command: &ArmCommand) -> Result<ArmState> {
        let state = self.transport.dispatch(command)?;
        self.last_state = state;
        Ok(state)
    }

    /// 执行一个固定周期数的实验段
    ///
    /// 段内错误按 [`ExperimentError::is_segment_local`] 分类：局部错误中止本段并写入报告，
    /// 其余错误直接返回。
    fn run_segment<F>(&mut self, spec: SegmentSpec, ticks: usize, mut body: F) -> Result<SegmentReport>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        let mut report = SegmentReport::new(spec, ticks);
        tracing::info!(segment = %spec, ticks, "Segment started");

        self.pacer.start();
        for _ in 0..ticks {
            if let Err(e) = body(self) {
                return self.abort(report, e);
            }
            report.ticks_run += 1;
            let tick = self.pacer.pace();
            report.observe(&tick);
        }

        tracing::info!(
            segment = %spec,
            overruns = report.overruns,
            max_lateness_us = report.max_lateness_us,
            "Segment completed"
        );
        Ok(report)
    }

    fn abort(&self, mut report: SegmentReport, error: ExperimentError) -> Result<SegmentReport> {
        if !error.is_segment_local() {
            return Err(error);
        }
        tracing::warn!(
            segment = %report.spec,
            ticks_run = report.ticks_run,
            "Segment aborted: {}",
            error
        );
        report.outcome = SegmentOutcome::Aborted {
            reason: error.to_string(),
        };
        Ok(report)
    }

    /// 多轴线性插值到目标位姿（不录制）
    ///
    /// 前馈力矩为 `ID(q, qd, 0)`。
    pub fn move_to_pose(&mut self, target: AxisArray<f64>, ticks: usize) -> Result<SegmentReport> {
        let spec = SegmentSpec::Blend { target };
        let from = match self.read_state() {
            Ok(state) => state.position,
            Err(e) => return self.abort(SegmentReport::new(spec, ticks), e),
        };
        let mut blend = match LinearBlend::new(from, target, ticks, self.dt) {
            Ok(blend) => blend,
            Err(e) => return self.abort(SegmentReport::new(spec, ticks), e.into()),
        };

        tracing::info!("Move to initial pose");
        self.run_segment(spec, ticks, |runner| {
            let Some(step) = blend.next() else {
                return Ok(());
            };
            let torque =
                runner
                    .dynamics
                    .inverse_dynamics(&step.position, &step.velocity, &AxisArray::ZERO);
            runner.dispatch(&ArmCommand::new(step.position, step.velocity, torque))?;
            Ok(())
        })
    }

    /// 单轴轨迹段
    ///
    /// 每个周期把 `profile` 的采样注入到 `baseline` 的 `axis` 分量（速度基准为零），
    /// 前馈力矩为重力补偿 `ID(q, 0, 0)`。记录的时间为 `time_offset + profile.elapsed()`。
    #[allow(clippy::too_many_arguments)]
    pub fn run_single_axis_profile<P, R>(
        &mut self,
        spec: SegmentSpec,
        profile: &mut P,
        axis: Axis,
        baseline: &AxisArray<f64>,
        ticks: usize,
        time_offset: f64,
        recorder: &mut R,
    ) -> Result<SegmentReport>
    where
        P: MotionProfile,
        R: SampleRecorder,
    {
        let dt = self.dt;
        self.run_segment(spec, ticks, |runner| {
            let sample = profile.update(dt);
            let command = inject_sample(baseline, &AxisArray::ZERO, axis, sample);
            let feedforward = runner.dynamics.gravity(&command.position);
            let command = ArmCommand::new(command.position, command.velocity, feedforward);
            let measured = runner.dispatch(&command)?;
            recorder.record(&SampleRecord {
                command,
                feedforward_torque: feedforward,
                measured,
                elapsed_time: time_offset + profile.elapsed(),
            })?;
            Ok(())
        })
    }

    /// 梯形往复实验
    ///
    /// 目标依次为 `home + displacement`、`home`、`home + displacement`……，每段从上一段的目标出发；
    /// `return_home` 时最后一段回到绝对零位。段中止后，下一段从最后的实测位置出发。
    /// 每段运行 `ceil(settle_factor * t_total / dt)` 个周期，所有段写入同一个日志，时间连续。
    pub fn run_trapezoidal_ramps<R>(
        &mut self,
        axis: Axis,
        settings: &RampSettings,
        recorder: &mut R,
    ) -> Result<Vec<SegmentReport>>
    where
        R: SampleRecorder,
    {
        let first = SegmentSpec::Ramp {
            axis: axis.index(),
            reversal: 0,
        };
        let baseline = match self.read_state() {
            Ok(state) => state.position,
            Err(e) => return Ok(vec![self.abort(SegmentReport::new(first, 0), e)?]),
        };
        let home = baseline[axis];

        let mut reports = Vec::with_capacity(settings.reversals);
        let mut start = home;
        let mut time_offset = 0.0;

        for reversal in 0..settings.reversals {
            tracing::info!(axis = axis.index(), "Progress: {}/{}", reversal + 1, settings.reversals);
            let spec = SegmentSpec::Ramp {
                axis: axis.index(),
                reversal,
            };

            let goal = if settings.return_home && reversal + 1 == settings.reversals {
                0.0
            } else if reversal % 2 == 0 {
                home + settings.displacement
            } else {
                home
            };

            let mut ramp = match TrapezoidalProfile::new(
                start,
                goal,
                settings.max_velocity,
                settings.max_acceleration,
            ) {
                Ok(ramp) => ramp,
                Err(e) => {
                    reports.push(self.abort(SegmentReport::new(spec, 0), e.into())?);
                    continue;
                },
            };

            let t_total = ramp.timing().t_total;
            let ticks = (settings.settle_factor * t_total / self.dt).ceil() as usize;
            let report = self.run_single_axis_profile(
                spec,
                &mut ramp,
                axis,
                &baseline,
                ticks,
                time_offset,
                recorder,
            )?;

            time_offset += report.ticks_run as f64 * self.dt;
            start = if report.is_completed() {
                goal
            } else {
                self.last_state.position[axis]
            };
            reports.push(report);
        }

        recorder.flush()?;
        Ok(reports)
    }

    /// 位置振荡实验
    ///
    /// 以当前实测位置为基准，运行 `ceil(periods * 2π/ω / dt)` 个周期。
    pub fn run_oscillation<R>(
        &mut self,
        axis: Axis,
        param_index: usize,
        amplitude: f64,
        angular_frequency: f64,
        periods: f64,
        recorder: &mut R,
    ) -> Result<SegmentReport>
    where
        R: SampleRecorder,
    {
        let spec = SegmentSpec::Oscillation {
            axis: axis.index(),
            param_index,
        };
        tracing::info!(
            axis = axis.index(),
            amplitude,
            angular_frequency,
            "Experiment {}: sinusoidal",
            param_index
        );

        let baseline = match self.read_state() {
            Ok(state) => state.position,
            Err(e) => return self.abort(SegmentReport::new(spec, 0), e),
        };
        let mut profile = match SinusoidalProfile::setup(baseline[axis], amplitude, angular_frequency)
        {
            Ok(profile) => profile,
            Err(e) => return self.abort(SegmentReport::new(spec, 0), e.into()),
        };

        let ticks = (periods * profile.period() / self.dt).ceil() as usize;
        let report =
            self.run_single_axis_profile(spec, &mut profile, axis, &baseline, ticks, 0.0, recorder)?;
        recorder.flush()?;
        Ok(report)
    }

    /// 力矩激励实验（调用方负责切换到零增益）
    ///
    /// 每个周期命令零位置、零速度，力矩为 `ID(0, 0, 0)` 加上 `axis` 分量的 `A sin(ωt)`，
    /// 第 `i` 个周期取 `t = i * dt`（从 0 开始）。
    pub fn run_torque_excitation<R>(
        &mut self,
        axis: Axis,
        param_index: usize,
        amplitude: f64,
        angular_frequency: f64,
        ticks: usize,
        recorder: &mut R,
    ) -> Result<SegmentReport>
    where
        R: SampleRecorder,
    {
        let spec = SegmentSpec::TorqueExcitation {
            axis: axis.index(),
            param_index,
        };
        if !angular_frequency.is_finite() || angular_frequency <= 0.0 || !amplitude.is_finite() {
            return Err(ExperimentError::invalid_parameter(
                "torque.params",
                format!("A={}, ω={}", amplitude, angular_frequency),
            ));
        }
        tracing::info!(
            axis = axis.index(),
            amplitude,
            angular_frequency,
            "Experiment {}: torque excitation",
            param_index
        );

        let dt = self.dt;
        let feedforward = self.dynamics.inverse_dynamics(
            &AxisArray::ZERO,
            &AxisArray::ZERO,
            &AxisArray::ZERO,
        );
        let mut tick = 0usize;

        let report = self.run_segment(spec, ticks, |runner| {
            let elapsed = tick as f64 * dt;
            tick += 1;
            let excitation = amplitude * (angular_frequency * elapsed).sin();
            let torque = feedforward + inject_axis(&AxisArray::ZERO, axis, excitation);
            let command = ArmCommand::torque_only(torque);
            let measured = runner.dispatch(&command)?;
            recorder.record(&SampleRecord {
                command,
                feedforward_torque: feedforward,
                measured,
                elapsed_time: elapsed,
            })?;
            Ok(())
        })?;
        recorder.flush()?;
        Ok(report)
    }

    /// 执行完整实验计划
    ///
    /// 插值到 stow 位姿 → 每个轴的往复、振荡实验 → （可选）插值到 candle 位姿并执行力矩激励
    /// → `transport.finish()`。
    pub fn run_plan<F>(&mut self, config: &ExperimentConfig, factory: &mut F) -> Result<PlanReport>
    where
        F: RecorderFactory,
    {
        config
            .validate()
            .map_err(|e| ExperimentError::config(format!("{:#}", e)))?;
        let axes = config
            .axes
            .iter()
            .map(|&i| Axis::try_from_index(i))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::info!(
            frequency_hz = config.control.frequency_hz,
            "Control loop [Hz]: {}",
            1.0 / self.dt
        );
        if (config.control_period() - self.dt).abs() > 1e-12 {
            tracing::warn!(
                "Configured period {} s differs from transport period {} s; using transport period",
                config.control_period(),
                self.dt
            );
        }

        let mut plan = PlanReport::default();

        if config.ramp.enabled || config.oscillation.enabled {
            plan.segments
                .push(self.move_to_pose(config.poses.stow, config.poses.blend_ticks)?);

            for &axis in &axes {
                if config.ramp.enabled {
                    let mut recorder = factory.open(ExperimentKind::Trapezoidal, 0, axis.index())?;
                    let reports = self.run_trapezoidal_ramps(axis, &config.ramp, &mut recorder);
                    factory.close(recorder)?;
                    plan.segments.extend(reports?);
                }

                if config.oscillation.enabled {
                    for (j, &[amplitude, omega]) in config.oscillation.params.iter().enumerate() {
                        let mut recorder =
                            factory.open(ExperimentKind::Sinusoidal, j, axis.index())?;
                        let report = self.run_oscillation(
                            axis,
                            j,
                            amplitude,
                            omega,
                            config.oscillation.periods,
                            &mut recorder,
                        );
                        factory.close(recorder)?;
                        plan.segments.push(report?);
                    }
                }
            }
        }

        if config.torque.enabled {
            plan.segments
                .push(self.move_to_pose(config.poses.candle, config.poses.blend_ticks)?);
            self.run_torque_experiments(config, &axes, factory, &mut plan)?;
        }

        match self.transport.finish() {
            Ok(()) => plan.finished = true,
            Err(e) => tracing::warn!("Failed to finish session: {}", e),
        }

        tracing::info!(
            completed = plan.completed(),
            total = plan.segments.len(),
            overruns = plan.total_overruns(),
            "Experiment plan finished"
        );
        Ok(plan)
    }

    fn run_torque_experiments<F>(
        &mut self,
        config: &ExperimentConfig,
        axes: &[Axis],
        factory: &mut F,
        plan: &mut PlanReport,
    ) -> Result<()>
    where
        F: RecorderFactory,
    {
        if let Err(e) = self.transport.set_gains(GainMode::Zero) {
            tracing::warn!("Failed to switch to zero gains, skipping torque experiments: {}", e);
            return Ok(());
        }

        let mut result = Ok(());
        'outer: for &axis in axes {
            for (j, &[amplitude, omega]) in config.torque.params.iter().enumerate() {
                let step = factory
                    .open(ExperimentKind::TorqueExcitation, j, axis.index())
                    .map_err(ExperimentError::from)
                    .and_then(|mut recorder| {
                        let report = self.run_torque_excitation(
                            axis,
                            j,
                            amplitude,
                            omega,
                            config.torque.ticks,
                            &mut recorder,
                        );
                        factory.close(recorder)?;
                        report
                    });
                match step {
                    Ok(report) => plan.segments.push(report),
                    Err(e) => {
                        result = Err(e);
                        break 'outer;
                    },
                }
            }
        }

        // 无论成功与否都恢复增益
        if let Err(e) = self.transport.set_gains(GainMode::Default) {
            tracing::warn!("Failed to restore default gains: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::pacer::ManualClock;
    use crate::dynamics::NoDynamics;
    use crate::recording::MemoryRecorder;
    use crate::sim::SimulatedArm;

    fn runner(arm: SimulatedArm) -> ExperimentRunner<SimulatedArm, NoDynamics, ManualClock> {
        ExperimentRunner::new(arm, NoDynamics, ManualClock::new()).unwrap()
    }

    #[test]
    fn test_period_from_transport() {
        let r = runner(SimulatedArm::new(0.004));
        assert_eq!(r.period(), 0.004);
        assert_eq!(r.pacer_period(), Duration::from_millis(4));
    }

    #[test]
    fn test_invalid_transport_period() {
        assert!(ExperimentRunner::new(SimulatedArm::new(0.0), NoDynamics, ManualClock::new()).is_err());
    }

    #[test]
    fn test_move_to_pose_lands_on_target() {
        let mut r = runner(SimulatedArm::new(0.002).with_time_constant(0.0));
        let target = AxisArray::new([0.0, 1.0, -1.0, 1.5, 0.0, 0.0]);
        let report = r.move_to_pose(target, 100).unwrap();

        assert!(report.is_completed());
        assert_eq!(report.ticks_run, 100);
        assert_eq!(r.transport().state().position, target);
        assert_eq!(r.transport().dispatch_count(), 100);
    }

    #[test]
    fn test_single_axis_profile_injects_only_axis() {
        let baseline = AxisArray::new([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let mut r = runner(
            SimulatedArm::new(0.002).with_initial_position(baseline),
        );
        let mut profile = SinusoidalProfile::setup(0.3, 0.1, 2.0).unwrap();
        let mut recorder = MemoryRecorder::new();

        let spec = SegmentSpec::Oscillation { axis: 2, param_index: 0 };
        let report = r
            .run_single_axis_profile(spec, &mut profile, Axis::A3, &baseline, 50, 1.0, &mut recorder)
            .unwrap();

        assert_eq!(report.ticks_run, 50);
        let records = recorder.records();
        assert_eq!(records.len(), 50);
        for record in records {
            for axis in Axis::ALL {
                if axis != Axis::A3 {
                    assert_eq!(record.command.position[axis], baseline[axis]);
                    assert_eq!(record.command.velocity[axis], 0.0);
                }
            }
        }
        assert!((records[0].elapsed_time - 1.002).abs() < 1e-12);
        assert!((records[49].elapsed_time - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_transport_failure_aborts_segment() {
        let arm = SimulatedArm::new(0.002)
            .fail_on_dispatch(10, crate::error::TransportError::Disconnected);
        let mut r = runner(arm);
        let mut recorder = MemoryRecorder::new();

        let report = r
            .run_oscillation(Axis::A1, 0, 0.1, 2.0, 1.0, &mut recorder)
            .unwrap();

        assert_eq!(report.ticks_run, 9);
        assert!(matches!(report.outcome, SegmentOutcome::Aborted { .. }));
        assert_eq!(recorder.records().len(), 9);
        // 中止后不再发送剩余周期
        assert_eq!(r.transport().dispatch_count(), 10);
    }

    #[test]
    fn test_torque_excitation_commands() {
        let mut r = runner(SimulatedArm::new(0.002));
        let mut recorder = MemoryRecorder::new();
        let report = r
            .run_torque_excitation(Axis::A6, 1, 0.5, 2.0, 20, &mut recorder)
            .unwrap();

        assert!(report.is_completed());
        let records = recorder.records();
        assert_eq!(records.len(), 20);
        // 第一个采样在 t = 0，力矩分量为 sin(0)
        assert_eq!(records[0].elapsed_time, 0.0);
        assert_eq!(records[0].command.torque[Axis::A6], 0.0);
        assert!((records[19].elapsed_time - 19.0 * 0.002).abs() < 1e-12);
        for record in records {
            assert_eq!(record.command.position, AxisArray::ZERO);
            assert_eq!(record.command.velocity, AxisArray::ZERO);
            let expected = 0.5 * (2.0 * record.elapsed_time).sin();
            assert!((record.command.torque[Axis::A6] - expected).abs() < 1e-12);
            assert_eq!(record.command.torque[Axis::A1], 0.0);
        }
    }

    #[test]
    fn test_torque_excitation_rejects_bad_frequency() {
        let mut r = runner(SimulatedArm::new(0.002));
        let mut recorder = MemoryRecorder::new();
        let err = r
            .run_torque_excitation(Axis::A1, 0, 0.5, 0.0, 20, &mut recorder)
            .unwrap_err();
        assert!(matches!(err, ExperimentError::InvalidParameter { .. }));
    }

    #[test]
    fn test_plan_report_totals() {
        let mut plan = PlanReport::default();
        let mut a = SegmentReport::new(SegmentSpec::Ramp { axis: 0, reversal: 0 }, 10);
        a.ticks_run = 10;
        a.overruns = 2;
        let mut b = SegmentReport::new(SegmentSpec::Ramp { axis: 0, reversal: 1 }, 10);
        b.ticks_run = 4;
        b.outcome = SegmentOutcome::Aborted {
            reason: "timeout".to_string(),
        };
        plan.segments = vec![a, b];

        assert_eq!(plan.completed(), 1);
        assert_eq!(plan.aborted().count(), 1);
        assert_eq!(plan.total_ticks(), 14);
        assert_eq!(plan.total_overruns(), 2);
    }
}
