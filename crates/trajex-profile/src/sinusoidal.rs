//! Sinusoidal Profile - 余弦振荡轨迹
//!
//! ```text
//! q(t)   = q0 - A + A * cos(ωt)
//! dq(t)  = -A * ω * sin(ωt)
//! ddq(t) = A * ω² * cos(ωt)
//! ```
//!
//! `t = 0` 时位置等于 `q0` 且速度为 0，之后绕 `q0 - A` 振荡，峰峰值 `2A`，
//! 周期 `T = 2π / ω`。无限时长，没有终止状态；重新 `setup` 即可重新开始。

use crate::error::{Result, ensure_finite, ensure_positive};
use crate::profile::{MotionProfile, ProfileSample, advance};
use std::f64::consts::TAU;

/// 余弦振荡轨迹
#[derive(Debug, Clone)]
pub struct SinusoidalProfile {
    base_position: f64,
    amplitude: f64,
    angular_frequency: f64,
    elapsed: f64,
    current: ProfileSample,
}

impl SinusoidalProfile {
    /// 创建振荡轨迹，elapsed 置 0 并计算初始采样
    ///
    /// # 错误
    ///
    /// `angular_frequency` 非正，或任一参数非有限值 → `InvalidBoundaryConditions`
    pub fn setup(base_position: f64, amplitude: f64, angular_frequency: f64) -> Result<Self> {
        ensure_finite("base_position", base_position)?;
        ensure_finite("amplitude", amplitude)?;
        ensure_positive("angular_frequency", angular_frequency)?;

        let mut profile = Self {
            base_position,
            amplitude,
            angular_frequency,
            elapsed: 0.0,
            current: ProfileSample::at_rest(base_position),
        };
        profile.current = profile.evaluate(0.0);
        Ok(profile)
    }

    /// 振荡中心
    pub fn base_position(&self) -> f64 {
        self.base_position
    }

    /// 振幅
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// 角频率（rad/s）
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// 周期 `T = 2π / ω`
    pub fn period(&self) -> f64 {
        TAU / self.angular_frequency
    }

    /// 在任意时刻求值（不修改状态）
    pub fn evaluate(&self, t: f64) -> ProfileSample {
        let a = self.amplitude;
        let w = self.angular_frequency;
        let (sin, cos) = (w * t).sin_cos();

        // q0 - A + A*cos 写成 q0 + A*(cos - 1)，t = 0 时严格等于 q0
        ProfileSample {
            position: self.base_position + a * (cos - 1.0),
            velocity: -a * w * sin,
            acceleration: a * w * w * cos,
        }
    }
}

impl MotionProfile for SinusoidalProfile {
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
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;

    #[test]
    fn test_setup_validation() {
        assert!(matches!(
            SinusoidalProfile::setup(0.0, 0.2, 0.0),
            Err(ProfileError::InvalidBoundaryConditions { .. })
        ));
        assert!(SinusoidalProfile::setup(0.0, 0.2, -1.0).is_err());
        assert!(SinusoidalProfile::setup(f64::NAN, 0.2, 1.0).is_err());
        assert!(SinusoidalProfile::setup(0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_initial_condition_is_exact() {
        let profile = SinusoidalProfile::setup(0.75, 0.2, 0.2).unwrap();
        let s = profile.sample();
        assert_eq!(s.position, 0.75);
        assert_eq!(s.velocity, 0.0);
        assert_eq!(s.acceleration, 0.2 * 0.2 * 0.2);
        assert_eq!(profile.elapsed(), 0.0);
    }

    #[test]
    fn test_period() {
        let profile = SinusoidalProfile::setup(0.0, 0.1, 2.0).unwrap();
        assert!((profile.period() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_range_and_center() {
        let mut profile = SinusoidalProfile::setup(1.0, 0.3, 4.0).unwrap();
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for _ in 0..5000 {
            let s = profile.update(0.001);
            min = min.min(s.position);
            max = max.max(s.position);
        }
        assert!(max <= 1.0 + 1e-12);
        assert!(min >= 1.0 - 0.6 - 1e-12);
        assert!((max - min - 0.6).abs() < 1e-3);
    }

    #[test]
    fn test_half_period_is_far_extreme() {
        let profile = SinusoidalProfile::setup(0.0, 0.5, 2.0).unwrap();
        let s = profile.evaluate(profile.period() / 2.0);
        assert!((s.position + 1.0).abs() < 1e-12);
        assert!(s.velocity.abs() < 1e-12);
    }

    #[test]
    fn test_never_finishes() {
        let mut profile = SinusoidalProfile::setup(0.0, 0.1, 2.0).unwrap();
        for _ in 0..10_000 {
            profile.update(0.01);
        }
        assert!(!profile.is_finished());
        assert_eq!(profile.total_duration(), None);
    }

    #[test]
    fn test_restart_with_fresh_setup() {
        let mut profile = SinusoidalProfile::setup(0.0, 0.1, 2.0).unwrap();
        profile.update(1.0);
        let restarted = SinusoidalProfile::setup(0.0, 0.1, 2.0).unwrap();
        assert_eq!(restarted.elapsed(), 0.0);
        assert_eq!(restarted.sample().position, 0.0);
    }

    #[test]
    fn test_velocity_is_derivative_of_position() {
        let profile = SinusoidalProfile::setup(0.2, 0.4, 3.0).unwrap();
        let h = 1e-6;
        for i in 0..50 {
            let t = i as f64 * 0.07;
            let numeric = (profile.evaluate(t + h).position - profile.evaluate(t - h).position)
                / (2.0 * h);
            assert!((numeric - profile.evaluate(t).velocity).abs() < 1e-5);
        }
    }
}
