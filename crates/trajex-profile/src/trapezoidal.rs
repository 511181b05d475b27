//! Trapezoidal Profile - 梯形速度轨迹
//!
//! 限速、限加速度的点到点运动：加速段、匀速段（可能为零长度）、对称减速段。
//!
//! # 算法
//!
//! ```text
//! delta     = |goal - start|
//! v_peak    = min(sqrt(a_max * delta), v_max)
//! t_accel   = v_peak / a_max
//! t_const   = (delta - v_peak² / a_max) / v_peak
//! t_total   = 2 * t_accel + t_const
//! ```
//!
//! 距离太短、无法达到 `v_max` 时退化为三角形轨迹（`t_const == 0`）。
//! 位置和速度在各段交界处连续，加速度为 bang-bang 形式，在交界处跳变。
//!
//! # 示例
//!
//! ```rust
//! use trajex_profile::{MotionProfile, TrapezoidalProfile};
//! use std::f64::consts::{FRAC_PI_2, PI};
//!
//! let mut ramp = TrapezoidalProfile::new(0.0, FRAC_PI_2, FRAC_PI_2, PI).unwrap();
//! assert!((ramp.total_duration().unwrap() - 1.5).abs() < 1e-12);
//!
//! let dt = 0.002;
//! let ticks = (1.5 * ramp.total_duration().unwrap() / dt).ceil() as usize;
//! for _ in 0..ticks {
//!     ramp.update(dt);
//! }
//! assert_eq!(ramp.sample().position, FRAC_PI_2);
//! ```

use crate::error::{Result, ensure_finite, ensure_positive};
use crate::profile::{MotionProfile, ProfileSample, advance};

/// 点到点运动的边界条件（不可变）
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionBoundaryConditions {
    /// 起始位置
    pub start_position: f64,
    /// 目标位置
    pub goal_position: f64,
    /// 最大速度（> 0）
    pub max_velocity: f64,
    /// 最大加速度（> 0）
    pub max_acceleration: f64,
}

impl MotionBoundaryConditions {
    /// 创建并验证边界条件
    ///
    /// # 错误
    ///
    /// - `max_velocity` 或 `max_acceleration` 非正 → `InvalidBoundaryConditions`
    /// - 任一参数非有限值 → `InvalidBoundaryConditions`
    pub fn new(
        start_position: f64,
        goal_position: f64,
        max_velocity: f64,
        max_acceleration: f64,
    ) -> Result<Self> {
        let conditions = Self {
            start_position,
            goal_position,
            max_velocity,
            max_acceleration,
        };
        conditions.validate()?;
        Ok(conditions)
    }

    /// 验证边界条件
    pub fn validate(&self) -> Result<()> {
        ensure_finite("start_position", self.start_position)?;
        ensure_finite("goal_position", self.goal_position)?;
        ensure_positive("max_velocity", self.max_velocity)?;
        ensure_positive("max_acceleration", self.max_acceleration)?;
        Ok(())
    }

    /// 运动距离（绝对值）
    pub fn distance(&self) -> f64 {
        (self.goal_position - self.start_position).abs()
    }
}

/// 梯形轨迹的分段时间参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalTiming {
    /// 运动方向：+1、-1，起止相同时为 0
    pub direction: f64,
    /// 实际峰值速度（三角形退化时小于 max_velocity）
    pub peak_velocity: f64,
    /// 加速段时长
    pub t_accel: f64,
    /// 匀速段时长
    pub t_const: f64,
    /// 总时长 = 2 * t_accel + t_const
    pub t_total: f64,
}

impl TrapezoidalTiming {
    /// 计算分段时间
    fn compute(conditions: &MotionBoundaryConditions) -> Self {
        let delta = conditions.distance();
        if delta == 0.0 {
            return Self {
                direction: 0.0,
                peak_velocity: 0.0,
                t_accel: 0.0,
                t_const: 0.0,
                t_total: 0.0,
            };
        }

        let direction = (conditions.goal_position - conditions.start_position).signum();
        let a_max = conditions.max_acceleration;
        let reachable = (a_max * delta).sqrt();

        // 三角形退化：匀速段严格为 0，避免舍入误差产生微小的负值
        let (peak_velocity, t_const) = if reachable <= conditions.max_velocity {
            (reachable, 0.0)
        } else {
            let v = conditions.max_velocity;
            (v, ((delta - v * v / a_max) / v).max(0.0))
        };

        let t_accel = peak_velocity / a_max;

        Self {
            direction,
            peak_velocity,
            t_accel,
            t_const,
            t_total: 2.0 * t_accel + t_const,
        }
    }

    /// 是否为三角形轨迹（没有匀速段）
    pub fn is_triangular(&self) -> bool {
        self.t_const == 0.0
    }
}

/// 梯形速度轨迹
///
/// 由 [`TrapezoidalProfile::setup`] 创建，之后反复调用 `update(dt)` 推进。
/// `elapsed >= t_total` 后保持在目标位置，速度和加速度为 0，超时不会报错。
#[derive(Debug, Clone)]
pub struct TrapezoidalProfile {
    conditions: MotionBoundaryConditions,
    timing: TrapezoidalTiming,
    elapsed: f64,
    current: ProfileSample,
}

impl TrapezoidalProfile {
    /// 根据边界条件计算时间参数
    pub fn setup(conditions: MotionBoundaryConditions) -> Result<Self> {
        conditions.validate()?;
        let timing = TrapezoidalTiming::compute(&conditions);

        Ok(Self {
            conditions,
            timing,
            elapsed: 0.0,
            current: ProfileSample::at_rest(conditions.start_position),
        })
    }

    /// 便捷构造：`setup(start, goal, max_velocity, max_acceleration)`
    pub fn new(start: f64, goal: f64, max_velocity: f64, max_acceleration: f64) -> Result<Self> {
        Self::setup(MotionBoundaryConditions::new(
            start,
            goal,
            max_velocity,
            max_acceleration,
        )?)
    }

    /// 边界条件
    pub fn conditions(&self) -> &MotionBoundaryConditions {
        &self.conditions
    }

    /// 分段时间参数
    pub fn timing(&self) -> &TrapezoidalTiming {
        &self.timing
    }

    /// 在任意时刻求值（不修改状态）
    ///
    /// `t` 小于 0 时按 0 处理。
    pub fn evaluate(&self, t: f64) -> ProfileSample {
        let c = &self.conditions;
        let TrapezoidalTiming {
            direction,
            peak_velocity: v_peak,
            t_accel,
            t_const,
            t_total,
        } = self.timing;
        let a_max = c.max_acceleration;
        let t = t.max(0.0);

        if c.start_position == c.goal_position {
            return ProfileSample::at_rest(c.start_position);
        }

        if t < t_accel {
            // 加速段
            let acceleration = direction * a_max;
            ProfileSample {
                position: c.start_position + 0.5 * acceleration * t * t,
                velocity: acceleration * t,
                acceleration,
            }
        } else if t < t_accel + t_const {
            // 匀速段
            let t_c = t - t_accel;
            ProfileSample {
                position: c.start_position + direction * (0.5 * v_peak * t_accel + v_peak * t_c),
                velocity: direction * v_peak,
                acceleration: 0.0,
            }
        } else if t < t_total {
            // 减速段
            let t_d = t - t_accel - t_const;
            ProfileSample {
                position: c.start_position
                    + direction
                        * (0.5 * v_peak * t_accel + v_peak * t_const + v_peak * t_d
                            - 0.5 * a_max * t_d * t_d),
                velocity: direction * (v_peak - a_max * t_d),
                acceleration: -direction * a_max,
            }
        } else {
            ProfileSample::at_rest(c.goal_position)
        }
    }
}

impl MotionProfile for TrapezoidalProfile {
    fn update(&mut self, dt: f64) -> ProfileSample {
        self.elapsed = advance(self.elapsed, dt);
        self.current = self.evaluate(self.elapsed);
        self.current
    }

    fn sample(&self) -> ProfileSample {
        self.current
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn total_duration(&self) -> Option<f64> {
        Some(self.timing.t_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_setup_rejects_non_positive_limits() {
        for (v, a) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, -2.0)] {
            let err = TrapezoidalProfile::new(0.0, 1.0, v, a).unwrap_err();
            assert!(
                matches!(err, ProfileError::InvalidBoundaryConditions { .. }),
                "v={} a={} -> {:?}",
                v,
                a,
                err
            );
        }
    }

    #[test]
    fn test_setup_rejects_non_finite_positions() {
        assert!(TrapezoidalProfile::new(f64::NAN, 1.0, 1.0, 1.0).is_err());
        assert!(TrapezoidalProfile::new(0.0, f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_reference_timing() {
        let ramp = TrapezoidalProfile::new(0.0, FRAC_PI_2, FRAC_PI_2, PI).unwrap();
        let timing = ramp.timing();

        let expected_t_total =
            2.0 * (FRAC_PI_2 / PI) + (FRAC_PI_2 - FRAC_PI_2 * FRAC_PI_2 / PI) / FRAC_PI_2;

        assert_eq!(timing.direction, 1.0);
        assert!((timing.peak_velocity - FRAC_PI_2).abs() < EPS);
        assert!((timing.t_accel - 0.5).abs() < EPS);
        assert!((timing.t_const - 0.5).abs() < EPS);
        assert!((ramp.total_duration().unwrap() - expected_t_total).abs() < EPS);
        assert!(!timing.is_triangular());
    }

    #[test]
    fn test_initial_sample() {
        let ramp = TrapezoidalProfile::new(0.3, 1.0, 1.0, 2.0).unwrap();
        let s = ramp.sample();
        assert_eq!(s.position, 0.3);
        assert_eq!(s.velocity, 0.0);

        let s0 = ramp.evaluate(0.0);
        assert_eq!(s0.position, 0.3);
        assert_eq!(s0.velocity, 0.0);
    }

    #[test]
    fn test_negative_time_is_clamped() {
        let ramp = TrapezoidalProfile::new(0.0, 1.0, 1.0, 2.0).unwrap();
        assert_eq!(ramp.evaluate(-5.0), ramp.evaluate(0.0));
    }

    #[test]
    fn test_terminal_state_holds_goal() {
        let mut ramp = TrapezoidalProfile::new(-0.2, 0.7, 1.0, 2.0).unwrap();
        let total = ramp.total_duration().unwrap();

        let end = ramp.update(total);
        assert_eq!(end, ProfileSample::at_rest(0.7));
        assert!(ramp.is_finished());

        // 超时继续推进，保持在目标位置
        for _ in 0..100 {
            assert_eq!(ramp.update(0.01), ProfileSample::at_rest(0.7));
        }
    }

    #[test]
    fn test_degenerate_zero_distance() {
        let mut ramp = TrapezoidalProfile::new(1.25, 1.25, 1.0, 1.0).unwrap();
        assert_eq!(ramp.total_duration(), Some(0.0));
        assert_eq!(ramp.timing().direction, 0.0);
        assert!(ramp.is_finished());

        for _ in 0..10 {
            assert_eq!(ramp.update(0.1), ProfileSample::at_rest(1.25));
        }
    }

    #[test]
    fn test_triangular_degeneracy() {
        // max_velocity 很大，距离很短
        let ramp = TrapezoidalProfile::new(0.0, 0.01, 100.0, 1.0).unwrap();
        let timing = ramp.timing();

        assert!(timing.peak_velocity < 100.0);
        assert_eq!(timing.t_const, 0.0);
        assert!(timing.is_triangular());
        assert!((timing.peak_velocity - 0.1).abs() < EPS);
        assert!((timing.t_total - 0.2).abs() < EPS);
    }

    #[test]
    fn test_phase_accelerations() {
        let ramp = TrapezoidalProfile::new(0.0, 2.0, 1.0, 2.0).unwrap();
        let t = *ramp.timing();

        assert_eq!(ramp.evaluate(t.t_accel * 0.5).acceleration, 2.0);
        assert_eq!(ramp.evaluate(t.t_accel + t.t_const * 0.5).acceleration, 0.0);
        assert_eq!(
            ramp.evaluate(t.t_accel + t.t_const + t.t_accel * 0.5)
                .acceleration,
            -2.0
        );
        assert_eq!(ramp.evaluate(t.t_total + 1.0).acceleration, 0.0);
    }

    #[test]
    fn test_velocity_bounded_by_limit() {
        let ramp = TrapezoidalProfile::new(0.0, 3.0, 0.8, 1.5).unwrap();
        let total = ramp.total_duration().unwrap();
        let mut t = 0.0;
        while t <= total + 0.1 {
            let s = ramp.evaluate(t);
            assert!(s.velocity.abs() <= 0.8 + EPS, "t={} v={}", t, s.velocity);
            t += 0.001;
        }
    }

    #[test]
    fn test_continuity_at_phase_boundaries() {
        let ramp = TrapezoidalProfile::new(0.0, 2.0, 1.0, 2.0).unwrap();
        let t = *ramp.timing();
        let eps = 1e-6;

        for boundary in [t.t_accel, t.t_accel + t.t_const, t.t_total] {
            let before = ramp.evaluate(boundary - eps);
            let after = ramp.evaluate(boundary + eps);
            assert!(
                (before.position - after.position).abs() < 1e-5,
                "position jump at {}",
                boundary
            );
            assert!(
                (before.velocity - after.velocity).abs() < 1e-4,
                "velocity jump at {}",
                boundary
            );
        }
    }

    #[test]
    fn test_negative_direction_is_exact_negation() {
        let forward = TrapezoidalProfile::new(0.0, 1.3, 0.9, 2.1).unwrap();
        let backward = TrapezoidalProfile::new(0.0, -1.3, 0.9, 2.1).unwrap();

        let total = forward.total_duration().unwrap();
        let mut t = 0.0;
        while t <= total * 1.2 {
            let f = forward.evaluate(t);
            let b = backward.evaluate(t);
            assert_eq!(b.position, -f.position, "t={}", t);
            assert_eq!(b.velocity, -f.velocity, "t={}", t);
            assert_eq!(b.acceleration, -f.acceleration, "t={}", t);
            t += 0.003;
        }
    }

    #[test]
    fn test_update_ignores_non_positive_dt() {
        let mut ramp = TrapezoidalProfile::new(0.0, 1.0, 1.0, 1.0).unwrap();
        ramp.update(0.1);
        let before = ramp.elapsed();
        ramp.update(-1.0);
        ramp.update(0.0);
        assert_eq!(ramp.elapsed(), before);
    }
}
