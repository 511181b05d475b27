//! Single-Axis Injector - 单轴注入
//!
//! 单轴实验中，只有一个轴跟随轨迹，其他轴保持在基准向量上。
//! 注入是纯函数：返回基准向量的副本，只替换指定轴的分量。

use crate::axis::{AXIS_COUNT, Axis, AxisArray};
use crate::error::{ProfileError, Result};
use crate::profile::ProfileSample;

/// 把标量注入到基准向量的第 `index` 个分量
///
/// # 错误
///
/// `index >= 6` → `IndexOutOfRange`
///
/// # 示例
///
/// ```rust
/// use trajex_profile::{AxisArray, inject};
///
/// let baseline = AxisArray::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
/// let cmd = inject(&baseline, 5, 9.0).unwrap();
/// assert_eq!(cmd.as_array(), &[0.0, 1.0, 2.0, 3.0, 4.0, 9.0]);
/// assert!(inject(&baseline, 6, 9.0).is_err());
/// ```
pub fn inject(baseline: &AxisArray<f64>, index: usize, value: f64) -> Result<AxisArray<f64>> {
    if index >= AXIS_COUNT {
        return Err(ProfileError::IndexOutOfRange {
            index,
            dimension: AXIS_COUNT,
        });
    }

    let mut command = *baseline;
    *command.try_get_mut(index)? = value;
    Ok(command)
}

/// 按轴枚举注入（永不越界）
pub fn inject_axis(baseline: &AxisArray<f64>, axis: Axis, value: f64) -> AxisArray<f64> {
    let mut command = *baseline;
    command[axis] = value;
    command
}

/// 单轴命令：位置和速度两组向量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleAxisCommand {
    /// 位置命令
    pub position: AxisArray<f64>,
    /// 速度命令
    pub velocity: AxisArray<f64>,
}

/// 把一个轨迹采样注入到位置基准和速度基准
///
/// 位置基准通常是实验开始时的实测位置，速度基准通常为零向量。
pub fn inject_sample(
    position_baseline: &AxisArray<f64>,
    velocity_baseline: &AxisArray<f64>,
    axis: Axis,
    sample: ProfileSample,
) -> SingleAxisCommand {
    SingleAxisCommand {
        position: inject_axis(position_baseline, axis, sample.position),
        velocity: inject_axis(velocity_baseline, axis, sample.velocity),
    }
}
