//! Linear Blend - 多轴线性插值到目标位姿
//!
//! 在 `N = ticks` 个控制周期内把所有轴从 `from` 线性移动到 `to`。第 `k` 个周期
//! （`k = 0..N`，从 0 开始）命令：
//!
//! ```text
//! s    = (k + 1) / N
//! q_k  = from * (1 - s) + to * s
//! dq   = (to - from) / (N * dt)
//! ```
//!
//! 共产生 `N` 个周期，每个周期的速度都是 `dq`；最后一个周期严格落在 `to` 上，之后迭代结束，
//! 不产生零速度的保持周期。
//!
//! # 示例
//!
//! ```rust
//! use trajex_profile::{AxisArray, LinearBlend};
//!
//! let from = AxisArray::ZERO;
//! let to = AxisArray::splat(1.0);
//! let blend = LinearBlend::new(from, to, 4, 0.5).unwrap();
//!
//! let positions: Vec<f64> = blend.map(|step| step.position.as_array()[0]).collect();
//! assert_eq!(positions, vec![0.25, 0.5, 0.75, 1.0]);
//! ```

use crate::axis::AxisArray;
use crate::error::{ProfileError, Result, ensure_finite, ensure_positive};

/// 单个周期的多轴命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendStep {
    /// 周期序号（从 0 开始）
    pub tick: usize,
    /// 位置命令
    pub position: AxisArray<f64>,
    /// 速度命令
    pub velocity: AxisArray<f64>,
}

/// 多轴线性插值
///
/// 实现 `Iterator`，每次迭代产生一个周期的命令，共 `ticks` 次。
#[derive(Debug, Clone)]
pub struct LinearBlend {
    from: AxisArray<f64>,
    to: AxisArray<f64>,
    velocity: AxisArray<f64>,
    ticks: usize,
    current_tick: usize,
}

impl LinearBlend {
    /// 创建线性插值
    ///
    /// # 错误
    ///
    /// `ticks == 0`、`dt` 非正或位姿含非有限值 → `InvalidBoundaryConditions`
    pub fn new(from: AxisArray<f64>, to: AxisArray<f64>, ticks: usize, dt: f64) -> Result<Self> {
        if ticks == 0 {
            return Err(ProfileError::invalid("blend ticks must be at least 1"));
        }
        ensure_positive("dt", dt)?;
        for (a, b) in from.iter().zip(to.iter()) {
            ensure_finite("blend pose", *a)?;
            ensure_finite("blend pose", *b)?;
        }

        let velocity = (to - from) * (1.0 / (ticks as f64 * dt));

        Ok(Self {
            from,
            to,
            velocity,
            ticks,
            current_tick: 0,
        })
    }

    /// 总周期数
    pub fn total_ticks(&self) -> usize {
        self.ticks
    }

    /// 目标位姿
    pub fn target(&self) -> &AxisArray<f64> {
        &self.to
    }

    /// 恒定速度命令
    pub fn velocity(&self) -> &AxisArray<f64> {
        &self.velocity
    }

    /// 当前进度（0.0 到 1.0）
    pub fn progress(&self) -> f64 {
        self.current_tick as f64 / self.ticks as f64
    }

    /// 第 `tick` 个周期（从 0 开始）的位置
    pub fn position_at(&self, tick: usize) -> AxisArray<f64> {
        if tick + 1 >= self.ticks {
            return self.to;
        }
        let s = (tick + 1) as f64 / self.ticks as f64;
        self.from.map_with(self.to, |a, b| a * (1.0 - s) + b * s)
    }
}

impl Iterator for LinearBlend {
    type Item = BlendStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick >= self.ticks {
            return None;
        }

        let step = BlendStep {
            tick: self.current_tick,
            position: self.position_at(self.current_tick),
            velocity: self.velocity,
        };
        self.current_tick += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ticks - self.current_tick;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinearBlend {}
