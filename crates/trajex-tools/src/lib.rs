//! # Trajex Tools - 实验共享数据结构
//!
//! 被 CLI 和运行时共用的纯数据定义，不包含任何 IO 循环。
//!
//! ## 包含模块
//!
//! - `config` - 实验计划配置（TOML）
//! - `state` - 每周期的命令与实测状态
//! - `recording` - 采样记录、日志行布局、文件命名

pub mod config;
pub mod recording;
pub mod state;

// 重新导出常用类型
pub use config::{
    CONFIG_FILE_NAME, ControlSettings, ExperimentConfig, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ,
    OscillationSettings, PoseSettings, RampSettings, TorqueSettings,
};
pub use recording::{ExperimentKind, RecordLayout, SampleRecord};
pub use state::{ArmCommand, ArmState};
