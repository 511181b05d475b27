//! # 采样记录格式定义
//!
//! 每个控制周期一行，列之间以空格分隔。所有录制工具共用。
//!
//! ```text
//! Tracking 布局（位置实验）:
//! [cmd_q×6] [cmd_dq×6] [cmd_tau×6] [q×6] [dq×6] [ddq×6] [tau×6] [time]
//!
//! TorqueExcitation 布局（力矩激励实验）:
//! [tau_excitation×6] [tau_feedforward×6] [q×6] [dq×6] [ddq×6] [tau×6] [time]
//! ```

use crate::state::{ArmCommand, ArmState};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use trajex_profile::{AXIS_COUNT, AxisArray};

/// 一个控制周期的采样记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// 本周期发送的命令
    pub command: ArmCommand,
    /// 命令中的前馈力矩部分（逆动力学补偿）
    pub feedforward_torque: AxisArray<f64>,
    /// 本周期收到的实测状态
    pub measured: ArmState,
    /// 时间（秒）
    pub elapsed_time: f64,
}

impl SampleRecord {
    /// 激励力矩 = 命令力矩 - 前馈力矩
    pub fn excitation_torque(&self) -> AxisArray<f64> {
        self.command.torque - self.feedforward_torque
    }
}

/// 记录行布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    /// 位置跟踪实验：命令位置/速度/力矩 + 实测
    Tracking,
    /// 力矩激励实验：激励力矩/前馈力矩 + 实测
    TorqueExcitation,
}

impl RecordLayout {
    /// 每行的列数
    pub const fn columns(self) -> usize {
        match self {
            RecordLayout::Tracking => 7 * AXIS_COUNT + 1,
            RecordLayout::TorqueExcitation => 6 * AXIS_COUNT + 1,
        }
    }

    /// 格式化一条记录（不含换行符）
    pub fn format(self, record: &SampleRecord) -> String {
        let mut line = String::with_capacity(self.columns() * 12);
        match self {
            RecordLayout::Tracking => {
                push_vector(&mut line, &record.command.position);
                push_vector(&mut line, &record.command.velocity);
                push_vector(&mut line, &record.command.torque);
            },
            RecordLayout::TorqueExcitation => {
                push_vector(&mut line, &record.excitation_torque());
                push_vector(&mut line, &record.feedforward_torque);
            },
        }
        push_vector(&mut line, &record.measured.position);
        push_vector(&mut line, &record.measured.velocity);
        push_vector(&mut line, &record.measured.acceleration);
        push_vector(&mut line, &record.measured.torque);
        let _ = write!(line, "{:.6}", record.elapsed_time);
        line
    }
}

fn push_vector(line: &mut String, values: &AxisArray<f64>) {
    for v in values.iter() {
        // 写入 String 不会失败
        let _ = write!(line, "{:.6} ", v);
    }
}

/// 实验类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentKind {
    /// 梯形往复实验
    Trapezoidal,
    /// 位置振荡实验
    Sinusoidal,
    /// 力矩激励实验
    TorqueExcitation,
}

impl ExperimentKind {
    /// 该实验的记录行布局
    pub const fn layout(self) -> RecordLayout {
        match self {
            ExperimentKind::Trapezoidal | ExperimentKind::Sinusoidal => RecordLayout::Tracking,
            ExperimentKind::TorqueExcitation => RecordLayout::TorqueExcitation,
        }
    }

    /// 日志文件名
    ///
    /// - `data_trapezoidal_joint_{axis}.txt`（只有一组参数，不含参数序号）
    /// - `data_sinusoidal_exp{j}_joint_{axis}.txt`
    /// - `data_sinusoidal_exp{j}_joint_{axis}_torque.txt`
    pub fn file_name(self, param_index: usize, axis: usize) -> String {
        match self {
            ExperimentKind::Trapezoidal => format!("data_trapezoidal_joint_{}.txt", axis),
            ExperimentKind::Sinusoidal => {
                format!("data_sinusoidal_exp{}_joint_{}.txt", param_index, axis)
            },
            ExperimentKind::TorqueExcitation => {
                format!("data_sinusoidal_exp{}_joint_{}_torque.txt", param_index, axis)
            },
        }
    }

    /// 名称
    pub const fn name(self) -> &'static str {
        match self {
            ExperimentKind::Trapezoidal => "trapezoidal",
            ExperimentKind::Sinusoidal => "sinusoidal",
            ExperimentKind::TorqueExcitation => "torque_excitation",
        }
    }
}

impl std::fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SampleRecord {
        SampleRecord {
            command: ArmCommand::new(
                AxisArray::splat(1.0),
                AxisArray::splat(2.0),
                AxisArray::splat(3.5),
            ),
            feedforward_torque: AxisArray::splat(3.0),
            measured: ArmState {
                position: AxisArray::splat(4.0),
                velocity: AxisArray::splat(5.0),
                acceleration: AxisArray::splat(6.0),
                torque: AxisArray::splat(7.0),
            },
            elapsed_time: 0.002,
        }
    }

    #[test]
    fn test_tracking_layout() {
        let line = RecordLayout::Tracking.format(&record());
        let columns: Vec<f64> = line.split(' ').map(|c| c.parse().unwrap()).collect();

        assert_eq!(columns.len(), RecordLayout::Tracking.columns());
        assert_eq!(columns.len(), 43);
        assert_eq!(columns[0], 1.0);
        assert_eq!(columns[6], 2.0);
        assert_eq!(columns[12], 3.5);
        assert_eq!(columns[18], 4.0);
        assert_eq!(columns[36], 7.0);
        assert_eq!(columns[42], 0.002);
        assert!(!line.ends_with(' '));
    }

    #[test]
    fn test_torque_layout() {
        let line = RecordLayout::TorqueExcitation.format(&record());
        let columns: Vec<f64> = line.split(' ').map(|c| c.parse().unwrap()).collect();

        assert_eq!(columns.len(), 37);
        // 激励 = 3.5 - 3.0
        assert_eq!(columns[0], 0.5);
        assert_eq!(columns[6], 3.0);
        assert_eq!(columns[12], 4.0);
        assert_eq!(columns[36], 0.002);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            ExperimentKind::Trapezoidal.file_name(0, 5),
            "data_trapezoidal_joint_5.txt"
        );
        assert_eq!(
            ExperimentKind::Sinusoidal.file_name(1, 0),
            "data_sinusoidal_exp1_joint_0.txt"
        );
        assert_eq!(
            ExperimentKind::TorqueExcitation.file_name(0, 5),
            "data_sinusoidal_exp0_joint_5_torque.txt"
        );
    }

    #[test]
    fn test_kind_layout() {
        assert_eq!(ExperimentKind::Trapezoidal.layout(), RecordLayout::Tracking);
        assert_eq!(ExperimentKind::Sinusoidal.layout(), RecordLayout::Tracking);
        assert_eq!(
            ExperimentKind::TorqueExcitation.layout(),
            RecordLayout::TorqueExcitation
        );
        assert_eq!(format!("{}", ExperimentKind::TorqueExcitation), "torque_excitation");
    }
}
