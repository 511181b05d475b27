//! # Trajex Client - 固定周期实验运行时
//!
//! 在真实时钟（或虚拟时钟）上按固定控制周期执行轨迹实验。
//!
//! ## 包含模块
//!
//! - `control` - 节拍器（绝对边界定时）和实验运行器
//! - `transport` - 机械臂传输层接口
//! - `dynamics` - 逆动力学接口（前馈力矩）
//! - `recording` - 采样录制（文本、内存、通道）
//! - `sim` - 模拟机械臂
//! - `error` - 错误类型
//!
//! ## 使用示例
//!
//! ```rust
//! use trajex_client::{ExperimentRunner, ManualClock, MemoryRecorderFactory, NoDynamics, SimulatedArm};
//! use trajex_tools::ExperimentConfig;
//!
//! let mut config = ExperimentConfig::default_config();
//! config.axes = vec![0];
//! config.ramp.reversals = 2;
//! config.oscillation.params = vec![[0.1, 20.0]];
//! config.poses.blend_ticks = 10;
//!
//! let arm = SimulatedArm::new(config.control_period());
//! let mut runner = ExperimentRunner::new(arm, NoDynamics, ManualClock::new())?;
//! let mut logs = MemoryRecorderFactory::new();
//!
//! let report = runner.run_plan(&config, &mut logs)?;
//! assert_eq!(report.aborted().count(), 0);
//! assert!(logs.log("data_trapezoidal_joint_0.txt").is_some());
//! # Ok::<(), trajex_client::ExperimentError>(())
//! ```

pub mod control;
pub mod dynamics;
pub mod error;
pub mod recording;
pub mod sim;
pub mod transport;

// 重新导出常用类型
pub use control::{
    ExperimentRunner, LoopPacer, ManualClock, MonotonicClock, PlanReport, SegmentOutcome,
    SegmentReport, SegmentSpec, SpinClock, TickReport,
};
pub use dynamics::{InverseDynamics, NoDynamics};
pub use error::{ExperimentError, RecordingError, Result, TransportError};
pub use recording::{
    ChannelRecorder, ChannelRecorderFactory, MemoryRecorder, MemoryRecorderFactory,
    RecorderFactory, RecordingStats, SampleRecorder, TextRecorder, TextRecorderFactory,
};
pub use sim::SimulatedArm;
pub use transport::{ArmTransport, GainMode};
