//! 运行时错误类型
//!
//! 三层错误：
//! - [`TransportError`]：与机械臂通信失败（整段中止，不重试）
//! - [`RecordingError`]：日志写入失败
//! - [`ExperimentError`]：实验计划层面的聚合错误

use thiserror::Error;
use trajex_profile::ProfileError;

/// 传输层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// 连接断开
    #[error("Transport disconnected")]
    Disconnected,

    /// 等待反馈超时
    #[error("Transport timeout after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// 命令被拒绝（如状态机不允许）
    #[error("Command rejected: {0}")]
    Rejected(String),

    /// 底层 IO 错误
    #[error("Transport IO error: {0}")]
    Io(String),
}

/// 录制错误
#[derive(Error, Debug)]
pub enum RecordingError {
    /// 文件 IO 错误
    #[error("Recording IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 录制通道已关闭（写线程退出）
    #[error("Recording channel closed")]
    ChannelClosed,

    /// 写线程 panic
    #[error("Recording writer thread panicked")]
    WriterPanicked,

    /// 关闭了不是由该工厂打开的录制
    #[error("Recorder was not opened by this factory")]
    NotOpenedByFactory,
}

/// 实验错误
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// 轨迹参数错误
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// 传输错误
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// 录制错误
    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 参数无效
    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParameter { param: String, reason: String },
}

impl ExperimentError {
    /// 创建配置错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// 创建参数错误
    pub fn invalid_parameter(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// 是否为致命错误（整个计划无法继续）
    ///
    /// 配置/参数/录制错误会影响后续所有段。
    pub fn is_fatal(&self) -> bool {
        !self.is_segment_local()
    }

    /// 是否只影响当前段（计划继续执行下一段）
    pub fn is_segment_local(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Profile(_) => true,
            Self::Recording(_) | Self::ConfigError(_) | Self::InvalidParameter { .. } => false,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ExperimentError>;
