//! 轨迹生成的属性测试
//!
//! 使用 proptest 验证边界条件、连续性、对称性和周期性。

use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};
use trajex_profile::{
    AXIS_COUNT, AxisArray, MotionProfile, ProfileError, SinusoidalProfile, TrapezoidalProfile,
    inject,
};

proptest! {
    /// t = 0 时位于起点且静止；t >= t_total 时位于终点且静止
    #[test]
    fn trapezoidal_endpoints(
        start in -3.0..3.0f64,
        goal in -3.0..3.0f64,
        v_max in 0.1..5.0f64,
        a_max in 0.1..10.0f64,
        overrun in 0.0..5.0f64,
    ) {
        let ramp = TrapezoidalProfile::new(start, goal, v_max, a_max).unwrap();
        let total = ramp.total_duration().unwrap();

        let s0 = ramp.evaluate(0.0);
        prop_assert_eq!(s0.position, start);
        prop_assert_eq!(s0.velocity, 0.0);

        let end = ramp.evaluate(total + overrun);
        prop_assert_eq!(end.position, goal);
        prop_assert_eq!(end.velocity, 0.0);
        prop_assert_eq!(end.acceleration, 0.0);
    }

    /// t_total = 2 * t_accel + t_const，且各段时长非负
    #[test]
    fn trapezoidal_timing_consistent(
        start in -3.0..3.0f64,
        goal in -3.0..3.0f64,
        v_max in 0.1..5.0f64,
        a_max in 0.1..10.0f64,
    ) {
        let ramp = TrapezoidalProfile::new(start, goal, v_max, a_max).unwrap();
        let t = ramp.timing();
        prop_assert!(t.t_accel >= 0.0);
        prop_assert!(t.t_const >= 0.0);
        prop_assert!(t.peak_velocity <= v_max);
        prop_assert!((t.t_total - (2.0 * t.t_accel + t.t_const)).abs() < 1e-12);
    }

    /// 位置和速度在分段交界处连续
    #[test]
    fn trapezoidal_continuity(
        start in -3.0..3.0f64,
        goal in -3.0..3.0f64,
        v_max in 0.1..5.0f64,
        a_max in 0.1..10.0f64,
    ) {
        let ramp = TrapezoidalProfile::new(start, goal, v_max, a_max).unwrap();
        let t = *ramp.timing();
        let eps = 1e-7;

        for boundary in [t.t_accel, t.t_accel + t.t_const, t.t_total] {
            let before = ramp.evaluate(boundary - eps);
            let after = ramp.evaluate(boundary + eps);
            prop_assert!((before.position - after.position).abs() < 1e-5);
            prop_assert!((before.velocity - after.velocity).abs() < a_max * 4.0 * eps + 1e-9);
        }
    }

    /// 速度永不超过峰值速度
    #[test]
    fn trapezoidal_velocity_bounded(
        goal in -3.0..3.0f64,
        v_max in 0.1..5.0f64,
        a_max in 0.1..10.0f64,
        fraction in 0.0..1.2f64,
    ) {
        let ramp = TrapezoidalProfile::new(0.0, goal, v_max, a_max).unwrap();
        let s = ramp.evaluate(ramp.total_duration().unwrap() * fraction);
        prop_assert!(s.velocity.abs() <= ramp.timing().peak_velocity + 1e-12);
        prop_assert!(s.acceleration.abs() <= a_max);
    }

    /// 反向运动是正向运动的精确取反
    #[test]
    fn trapezoidal_symmetry(
        distance in 0.0..3.0f64,
        v_max in 0.1..5.0f64,
        a_max in 0.1..10.0f64,
        fraction in 0.0..1.2f64,
    ) {
        let forward = TrapezoidalProfile::new(0.0, distance, v_max, a_max).unwrap();
        let backward = TrapezoidalProfile::new(0.0, -distance, v_max, a_max).unwrap();
        let t = forward.total_duration().unwrap() * fraction;

        let f = forward.evaluate(t);
        let b = backward.evaluate(t);
        prop_assert_eq!(b.position, -f.position);
        prop_assert_eq!(b.velocity, -f.velocity);
        prop_assert_eq!(b.acceleration, -f.acceleration);
    }

    /// 按固定周期步进 ceil(1.5 * t_total / dt) 次后严格到达终点
    #[test]
    fn trapezoidal_stepping_settles_at_goal(
        start in -2.0..2.0f64,
        goal in -2.0..2.0f64,
        v_max in 0.2..4.0f64,
        a_max in 0.5..8.0f64,
    ) {
        let dt = 0.002;
        let mut ramp = TrapezoidalProfile::new(start, goal, v_max, a_max).unwrap();
        let ticks = (1.5 * ramp.total_duration().unwrap() / dt).ceil() as usize;
        for _ in 0..ticks {
            ramp.update(dt);
        }
        prop_assert_eq!(ramp.sample().position, goal);
        prop_assert_eq!(ramp.sample().velocity, 0.0);
    }

    /// 振荡轨迹周期性：position(t + T) == position(t)
    #[test]
    fn sinusoidal_periodicity(
        base in -2.0..2.0f64,
        amplitude in -1.0..1.0f64,
        omega in 0.1..20.0f64,
        t in 0.0..100.0f64,
    ) {
        let profile = SinusoidalProfile::setup(base, amplitude, omega).unwrap();
        let period = profile.period();
        let a = profile.evaluate(t);
        let b = profile.evaluate(t + period);
        prop_assert!((a.position - b.position).abs() < 1e-9);
        prop_assert!((a.velocity - b.velocity).abs() < 1e-7);
    }

    /// 振荡轨迹初始条件严格成立
    #[test]
    fn sinusoidal_initial_condition(
        base in -2.0..2.0f64,
        amplitude in -1.0..1.0f64,
        omega in 0.1..20.0f64,
    ) {
        let profile = SinusoidalProfile::setup(base, amplitude, omega).unwrap();
        prop_assert_eq!(profile.sample().position, base);
        prop_assert_eq!(profile.sample().velocity, 0.0);
    }

    /// 注入只改变目标分量；越界索引报错
    #[test]
    fn injector_replaces_single_component(
        values in prop::array::uniform6(-10.0..10.0f64),
        index in 0usize..12,
        value in -10.0..10.0f64,
    ) {
        let baseline = AxisArray::new(values);
        match inject(&baseline, index, value) {
            Ok(cmd) => {
                prop_assert!(index < AXIS_COUNT);
                for i in 0..AXIS_COUNT {
                    let expected = if i == index { value } else { values[i] };
                    prop_assert_eq!(cmd.as_array()[i], expected);
                }
            },
            Err(err) => {
                prop_assert!(index >= AXIS_COUNT);
                prop_assert_eq!(err, ProfileError::IndexOutOfRange { index, dimension: AXIS_COUNT });
            },
        }
    }
}

/// 参考场景：setup(0, π/2, π/2, π)
#[test]
fn reference_scenario_end_to_end() {
    let mut ramp = TrapezoidalProfile::new(0.0, FRAC_PI_2, FRAC_PI_2, PI).unwrap();

    let expected = 2.0 * (FRAC_PI_2 / PI) + (FRAC_PI_2 - FRAC_PI_2 * FRAC_PI_2 / PI) / FRAC_PI_2;
    let total = ramp.total_duration().unwrap();
    assert!((total - expected).abs() < 1e-12);

    let dt = 0.002;
    let ticks = (1.5 * total / dt) as usize;
    for _ in 0..ticks {
        ramp.update(dt);
    }
    assert_eq!(ramp.sample().position, FRAC_PI_2);
    assert_eq!(ramp.sample().velocity, 0.0);
}

#[test]
fn invalid_limits_fail_fast() {
    assert!(matches!(
        TrapezoidalProfile::new(0.0, 1.0, 0.0, 1.0),
        Err(ProfileError::InvalidBoundaryConditions { .. })
    ));
    assert!(matches!(
        TrapezoidalProfile::new(0.0, 1.0, 1.0, -1.0),
        Err(ProfileError::InvalidBoundaryConditions { .. })
    ));
}
