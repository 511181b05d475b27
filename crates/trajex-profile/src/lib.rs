//! # Trajex Profile - 运动轨迹生成
//!
//! 固定控制周期下的单轴/多轴轨迹生成，纯计算、无 IO、无全局状态。
//!
//! ## 包含模块
//!
//! - `axis` - 6 轴索引和命令向量（带范围检查的访问）
//! - `profile` - `MotionProfile` trait 和采样类型
//! - `trapezoidal` - 梯形速度轨迹（含三角形退化）
//! - `sinusoidal` - 余弦振荡轨迹
//! - `blend` - 多轴线性插值到目标位姿
//! - `injector` - 单轴注入
//!
//! ## 使用示例
//!
//! ```rust
//! use trajex_profile::{Axis, AxisArray, MotionProfile, TrapezoidalProfile, inject_sample};
//!
//! let baseline = AxisArray::new([0.0, 1.1, -1.1, 1.57, 0.0, 0.0]);
//! let mut ramp = TrapezoidalProfile::new(0.0, 1.0, 1.0, 2.0)?;
//!
//! let sample = ramp.update(0.002);
//! let cmd = inject_sample(&baseline, &AxisArray::ZERO, Axis::A1, sample);
//! assert_eq!(cmd.position[Axis::A2], 1.1);
//! # Ok::<(), trajex_profile::ProfileError>(())
//! ```

pub mod axis;
pub mod blend;
pub mod error;
pub mod injector;
pub mod profile;
pub mod sinusoidal;
pub mod trapezoidal;

// 重新导出常用类型
pub use axis::{AXIS_COUNT, Axis, AxisArray};
pub use blend::{BlendStep, LinearBlend};
pub use error::{ProfileError, Result};
pub use injector::{SingleAxisCommand, inject, inject_axis, inject_sample};
pub use profile::{MotionProfile, ProfileSample};
pub use sinusoidal::SinusoidalProfile;
pub use trapezoidal::{MotionBoundaryConditions, TrapezoidalProfile, TrapezoidalTiming};
