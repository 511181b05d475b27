//! 控制循环模块
//!
//! - `pacer` - 固定周期节拍器（绝对边界定时）和时钟
//! - `runner` - 实验运行器（插值、往复、振荡、力矩激励）

pub mod pacer;
pub mod runner;

// 重新导出常用类型
pub use pacer::{LoopPacer, MAX_PERIOD, MIN_PERIOD, ManualClock, MonotonicClock, SpinClock, TickReport};
pub use runner::{
    ExperimentRunner, PlanReport, SegmentOutcome, SegmentReport, SegmentSpec,
};
