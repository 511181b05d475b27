//! 逆动力学接口
//!
//! 前馈力矩由外部刚体模型计算，运行时只依赖此 trait。

use trajex_profile::AxisArray;

/// 逆动力学模型：`tau = ID(q, qd, qdd)`
pub trait InverseDynamics {
    /// 计算关节力矩（N·m）
    fn inverse_dynamics(
        &self,
        position: &AxisArray<f64>,
        velocity: &AxisArray<f64>,
        acceleration: &AxisArray<f64>,
    ) -> AxisArray<f64>;

    /// 重力补偿力矩：`ID(q, 0, 0)`
    fn gravity(&self, position: &AxisArray<f64>) -> AxisArray<f64> {
        self.inverse_dynamics(position, &AxisArray::ZERO, &AxisArray::ZERO)
    }
}

/// 无模型（前馈力矩恒为零）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDynamics;

impl InverseDynamics for NoDynamics {
    fn inverse_dynamics(
        &self,
        _position: &AxisArray<f64>,
        _velocity: &AxisArray<f64>,
        _acceleration: &AxisArray<f64>,
    ) -> AxisArray<f64> {
        AxisArray::ZERO
    }
}

impl<F> InverseDynamics for F
where
    F: Fn(&AxisArray<f64>, &AxisArray<f64>, &AxisArray<f64>) -> AxisArray<f64>,
{
    fn inverse_dynamics(
        &self,
        position: &AxisArray<f64>,
        velocity: &AxisArray<f64>,
        acceleration: &AxisArray<f64>,
    ) -> AxisArray<f64> {
        self(position, velocity, acceleration)
    }
}
