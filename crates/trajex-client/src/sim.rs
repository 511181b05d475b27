//! 模拟机械臂
//!
//! 无硬件时使用的 [`ArmTransport`] 实现：
//!
//! - **默认增益**：实测位置以一阶惯性跟踪命令位置（时间常数可配置）
//! - **零增益**：命令力矩经单位惯量 + 阻尼积分为速度和位置
//! - 速度、加速度由相邻周期的差分得到，实测力矩等于命令力矩
//!
//! 可以在指定的 dispatch 次数上注入一次失败，用于测试段中止逻辑。

use crate::error::TransportError;
use crate::transport::{ArmTransport, GainMode};
use trajex_profile::AxisArray;
use trajex_tools::{ArmCommand, ArmState};

/// 模拟机械臂
#[derive(Debug, Clone)]
pub struct SimulatedArm {
    period: f64,
    time_constant: f64,
    damping: f64,
    gains: GainMode,
    state: ArmState,
    home: AxisArray<f64>,
    dispatch_count: u64,
    failure: Option<(u64, TransportError)>,
    finished: bool,
}

impl SimulatedArm {
    /// 默认跟踪时间常数（秒）
    pub const DEFAULT_TIME_CONSTANT: f64 = 0.01;

    /// 零增益模式的默认阻尼（N·m·s/rad）
    pub const DEFAULT_DAMPING: f64 = 0.5;

    /// 创建静止于零位的模拟机械臂
    pub fn new(period: f64) -> Self {
        Self {
            period,
            time_constant: Self::DEFAULT_TIME_CONSTANT,
            damping: Self::DEFAULT_DAMPING,
            gains: GainMode::Default,
            state: ArmState::default(),
            home: AxisArray::ZERO,
            dispatch_count: 0,
            failure: None,
            finished: false,
        }
    }

    /// 初始位置
    pub fn with_initial_position(mut self, position: AxisArray<f64>) -> Self {
        self.state = ArmState::at_rest(position);
        self
    }

    /// 跟踪时间常数（0 表示理想跟踪）
    pub fn with_time_constant(mut self, time_constant: f64) -> Self {
        self.time_constant = time_constant.max(0.0);
        self
    }

    /// 零增益模式的阻尼
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// 第 `dispatch`（从 1 开始）次调用返回 `error`，仅触发一次
    pub fn fail_on_dispatch(mut self, dispatch: u64, error: TransportError) -> Self {
        self.failure = Some((dispatch, error));
        self
    }

    /// 已调用 `dispatch` 的次数
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    /// 当前增益模式
    pub fn gains(&self) -> GainMode {
        self.gains
    }

    /// 当前状态
    pub fn state(&self) -> &ArmState {
        &self.state
    }

    /// 会话是否已结束
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn step(&mut self, command: &ArmCommand) {
        let dt = self.period;
        let previous = self.state;

        let (position, velocity) = match self.gains {
            GainMode::Default => {
                let position = if self.time_constant > 0.0 {
                    let alpha = 1.0 - (-dt / self.time_constant).exp();
                    previous
                        .position
                        .map_with(command.position, |q, target| q + alpha * (target - q))
                } else {
                    command.position
                };
                let velocity = (position - previous.position) * (1.0 / dt);
                (position, velocity)
            },
            GainMode::Zero => {
                let acceleration = command.torque - previous.velocity * self.damping;
                let velocity = previous.velocity + acceleration * dt;
                let position = previous.position + velocity * dt;
                (position, velocity)
            },
        };

        self.state = ArmState {
            position,
            velocity,
            acceleration: (velocity - previous.velocity) * (1.0 / dt),
            torque: command.torque,
        };
    }
}

impl ArmTransport for SimulatedArm {
    fn control_period(&self) -> f64 {
        self.period
    }

    fn read_state(&mut self) -> Result<ArmState, TransportError> {
        Ok(self.state)
    }

    fn dispatch(&mut self, command: &ArmCommand) -> Result<ArmState, TransportError> {
        if self.finished {
            return Err(TransportError::Rejected("session finished".to_string()));
        }

        self.dispatch_count += 1;
        let count = self.dispatch_count;
        if self.failure.as_ref().is_some_and(|(at, _)| *at == count)
            && let Some((_, error)) = self.failure.take()
        {
            return Err(error);
        }

        self.step(command);
        Ok(self.state)
    }

    fn set_gains(&mut self, mode: GainMode) -> Result<(), TransportError> {
        tracing::debug!(?mode, "simulated arm gains switched");
        self.gains = mode;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TransportError> {
        self.state = ArmState::at_rest(self.home);
        self.gains = GainMode::Default;
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajex_profile::Axis;

    #[test]
    fn test_ideal_tracking() {
        let mut arm = SimulatedArm::new(0.002).with_time_constant(0.0);
        let target = AxisArray::splat(0.5);
        let state = arm
            .dispatch(&ArmCommand::new(target, AxisArray::ZERO, AxisArray::ZERO))
            .unwrap();
        assert_eq!(state.position, target);
        assert!((state.velocity[Axis::A1] - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_order_tracking_converges() {
        let mut arm = SimulatedArm::new(0.002);
        let command = ArmCommand::new(AxisArray::splat(1.0), AxisArray::ZERO, AxisArray::ZERO);
        for _ in 0..500 {
            arm.dispatch(&command).unwrap();
        }
        let state = arm.read_state().unwrap();
        assert!((state.position[Axis::A3] - 1.0).abs() < 1e-6);
        assert!(state.velocity.max_abs() < 1e-3);
    }

    #[test]
    fn test_zero_gain_integrates_torque() {
        let mut arm = SimulatedArm::new(0.002).with_damping(0.0);
        arm.set_gains(GainMode::Zero).unwrap();

        let mut torque = AxisArray::ZERO;
        torque[Axis::A6] = 1.0;
        let state = arm.dispatch(&ArmCommand::torque_only(torque)).unwrap();

        assert!((state.velocity[Axis::A6] - 0.002).abs() < 1e-12);
        assert!(state.position[Axis::A6] > 0.0);
        assert_eq!(state.position[Axis::A1], 0.0);
        assert_eq!(state.torque, torque);
    }

    #[test]
    fn test_injected_failure_triggers_once() {
        let mut arm = SimulatedArm::new(0.002).fail_on_dispatch(2, TransportError::Timeout {
            timeout_ms: 10,
        });
        let command = ArmCommand::default();

        assert!(arm.dispatch(&command).is_ok());
        assert_eq!(
            arm.dispatch(&command),
            Err(TransportError::Timeout { timeout_ms: 10 })
        );
        assert!(arm.dispatch(&command).is_ok());
        assert_eq!(arm.dispatch_count(), 3);
    }

    #[test]
    fn test_finish_returns_home() {
        let mut arm =
            SimulatedArm::new(0.002).with_initial_position(AxisArray::splat(0.3));
        arm.set_gains(GainMode::Zero).unwrap();
        arm.finish().unwrap();

        assert!(arm.is_finished());
        assert_eq!(arm.gains(), GainMode::Default);
        assert_eq!(arm.read_state().unwrap().position, AxisArray::ZERO);
        assert!(matches!(
            arm.dispatch(&ArmCommand::default()),
            Err(TransportError::Rejected(_))
        ));
    }
}
