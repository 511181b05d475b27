//! 机械臂传输层接口
//!
//! 实验运行时只通过 [`ArmTransport`] 与机械臂交互：每个周期调用一次
//! `dispatch()`，发送命令并返回最新实测状态。真实硬件驱动和
//! [`SimulatedArm`](crate::sim::SimulatedArm) 都实现此 trait。

use crate::error::TransportError;
use trajex_tools::{ArmCommand, ArmState};

/// 增益模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainMode {
    /// 默认 PD 增益（位置跟踪）
    Default,
    /// 零增益（纯力矩控制）
    Zero,
}

/// 机械臂传输层
///
/// 同步接口：`dispatch()` 在一个控制周期内返回。
pub trait ArmTransport {
    /// 传输层配置的控制周期（秒）
    fn control_period(&self) -> f64;

    /// 读取当前实测状态（不发送命令）
    fn read_state(&mut self) -> Result<ArmState, TransportError>;

    /// 发送一条命令并返回最新实测状态
    fn dispatch(&mut self, command: &ArmCommand) -> Result<ArmState, TransportError>;

    /// 切换增益模式
    fn set_gains(&mut self, mode: GainMode) -> Result<(), TransportError>;

    /// 结束会话（回到安全位姿）
    fn finish(&mut self) -> Result<(), TransportError>;
}

impl<T: ArmTransport + ?Sized> ArmTransport for &mut T {
    fn control_period(&self) -> f64 {
        (**self).control_period()
    }

    fn read_state(&mut self) -> Result<ArmState, TransportError> {
        (**self).read_state()
    }

    fn dispatch(&mut self, command: &ArmCommand) -> Result<ArmState, TransportError> {
        (**self).dispatch(command)
    }

    fn set_gains(&mut self, mode: GainMode) -> Result<(), TransportError> {
        (**self).set_gains(mode)
    }

    fn finish(&mut self) -> Result<(), TransportError> {
        (**self).finish()
    }
}
