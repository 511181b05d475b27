//! 轨迹层错误类型定义

use thiserror::Error;

/// 轨迹层错误类型
///
/// 所有错误都在 `setup` / 构造阶段立即返回，运动开始后不会再产生错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// 边界条件无效（限速/限加速度非正、参数非有限值等）
    #[error("Invalid boundary conditions: {reason}")]
    InvalidBoundaryConditions {
        /// 原因
        reason: String,
    },

    /// 轴索引越界
    #[error("Axis index {index} out of range (dimension: {dimension})")]
    IndexOutOfRange {
        /// 请求的索引
        index: usize,
        /// 向量维度
        dimension: usize,
    },
}

impl ProfileError {
    /// 创建边界条件错误
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidBoundaryConditions {
            reason: reason.into(),
        }
    }

    /// 是否为边界条件错误
    pub fn is_boundary_error(&self) -> bool {
        matches!(self, Self::InvalidBoundaryConditions { .. })
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ProfileError>;

/// 检查参数为严格正的有限值
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ProfileError::invalid(format!(
            "{} must be a positive finite value, got: {}",
            name, value
        )));
    }
    Ok(())
}

/// 检查参数为有限值
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProfileError::invalid(format!(
            "{} must be finite, got: {}",
            name, value
        )));
    }
    Ok(())
}
