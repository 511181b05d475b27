//! MotionProfile trait - 单轴轨迹通用接口
//!
//! # 设计理念
//!
//! - **Tick 模式**: 控制循环负责定时，轨迹只负责计算
//! - **显式时间**: 每次 `update(dt)` 推进自身的时间计数器，不依赖全局时钟
//! - **独占所有权**: 轨迹状态由创建它的实验段独占，不跨线程共享
//!
//! # 示例
//!
//! ```rust
//! use trajex_profile::{MotionProfile, TrapezoidalProfile};
//!
//! let mut ramp = TrapezoidalProfile::new(0.0, 1.0, 0.5, 1.0).unwrap();
//! let dt = 0.002;
//! while !ramp.is_finished() {
//!     let sample = ramp.update(dt);
//!     assert!(sample.velocity.abs() <= 0.5 + 1e-12);
//! }
//! assert_eq!(ramp.sample().position, 1.0);
//! ```

/// 某一时刻的运动学状态
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileSample {
    /// 位置
    pub position: f64,
    /// 速度
    pub velocity: f64,
    /// 加速度
    pub acceleration: f64,
}

impl ProfileSample {
    /// 静止于某一位置
    pub const fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            acceleration: 0.0,
        }
    }

    /// 取反（位置、速度、加速度同时取负）
    pub fn negated(self) -> Self {
        Self {
            position: -self.position,
            velocity: -self.velocity,
            acceleration: -self.acceleration,
        }
    }
}

/// 单轴轨迹通用接口
pub trait MotionProfile {
    /// 推进 `dt` 秒并返回新时刻的采样
    ///
    /// 非正或非有限的 `dt` 不推进时间，elapsed 单调不减。
    fn update(&mut self, dt: f64) -> ProfileSample;

    /// 当前采样（不推进时间）
    fn sample(&self) -> ProfileSample;

    /// 自 setup 以来经过的时间（秒）
    fn elapsed(&self) -> f64;

    /// 轨迹总时长；无限时长的轨迹返回 `None`
    fn total_duration(&self) -> Option<f64>;

    /// 是否已到达终止状态
    fn is_finished(&self) -> bool {
        self.total_duration()
            .is_some_and(|total| self.elapsed() >= total)
    }
}

/// 推进时间计数器，忽略非正或非有限的步长
#[inline]
pub(crate) fn advance(elapsed: f64, dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        elapsed + dt
    } else {
        elapsed
    }
}
