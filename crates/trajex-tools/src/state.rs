//! # 命令与状态
//!
//! 每个控制周期发送的命令和收到的实测状态（纯数据结构）。

use serde::{Deserialize, Serialize};
use trajex_profile::AxisArray;

/// 一个控制周期的完整命令
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmCommand {
    /// 位置命令（rad）
    pub position: AxisArray<f64>,
    /// 速度命令（rad/s）
    pub velocity: AxisArray<f64>,
    /// 力矩命令（N·m），包含前馈力矩
    pub torque: AxisArray<f64>,
}

impl ArmCommand {
    /// 创建命令
    pub fn new(position: AxisArray<f64>, velocity: AxisArray<f64>, torque: AxisArray<f64>) -> Self {
        Self {
            position,
            velocity,
            torque,
        }
    }

    /// 纯力矩命令（位置、速度为零）
    pub fn torque_only(torque: AxisArray<f64>) -> Self {
        Self {
            position: AxisArray::ZERO,
            velocity: AxisArray::ZERO,
            torque,
        }
    }
}

/// 实测状态（由传输层返回）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmState {
    /// 实测位置（rad）
    pub position: AxisArray<f64>,
    /// 实测速度（rad/s）
    pub velocity: AxisArray<f64>,
    /// 实测加速度（rad/s²）
    pub acceleration: AxisArray<f64>,
    /// 实测力矩（N·m）
    pub torque: AxisArray<f64>,
}

impl ArmState {
    /// 静止于某一位姿的状态
    pub fn at_rest(position: AxisArray<f64>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
