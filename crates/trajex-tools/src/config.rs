//! # 实验配置
//!
//! 一次完整实验计划的参数，保存为 TOML 文件：
//!
//! ```toml
//! axes = [0, 5]
//! output_dir = "data"
//!
//! [control]
//! frequency_hz = 500.0
//! spin = true
//!
//! [poses]
//! stow = [0.0, 1.09955743, -1.09955743, 1.57079633, 0.0, 0.0]
//! candle = [0.0, 1.57079633, -2.7925268, -0.34906585, 0.0, 0.0]
//! blend_ticks = 1000
//!
//! [ramp]
//! displacement = 1.5707963267948966
//! max_velocity = 1.5707963267948966
//! max_acceleration = 3.141592653589793
//! reversals = 10
//! settle_factor = 1.5
//! return_home = true
//!
//! [oscillation]
//! params = [[0.2, 0.2], [0.1, 2.0]]
//! periods = 6.0
//!
//! [torque]
//! enabled = false
//! params = [[0.5, 2.0], [1.0, 6.0]]
//! ticks = 5000
//! ```
//!
//! 所有字段都有默认值，缺省的字段使用默认值。

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs;
use std::path::{Path, PathBuf};
use trajex_profile::{AXIS_COUNT, AxisArray};

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "experiment.toml";

/// 允许的最低控制频率（Hz）
pub const MIN_FREQUENCY_HZ: f64 = 0.001;

/// 允许的最高控制频率（Hz）
pub const MAX_FREQUENCY_HZ: f64 = 100_000.0;

/// 实验计划配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// 参与实验的轴（按顺序执行）
    pub axes: Vec<usize>,

    /// 日志输出目录
    pub output_dir: PathBuf,

    /// 控制循环设置
    pub control: ControlSettings,

    /// 初始位姿
    pub poses: PoseSettings,

    /// 梯形往复实验
    pub ramp: RampSettings,

    /// 位置振荡实验
    pub oscillation: OscillationSettings,

    /// 力矩激励实验
    pub torque: TorqueSettings,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ExperimentConfig {
    /// 创建默认配置
    pub fn default_config() -> Self {
        Self {
            axes: vec![0, 5],
            output_dir: PathBuf::from("data"),
            control: ControlSettings::default(),
            poses: PoseSettings::default(),
            ramp: RampSettings::default(),
            oscillation: OscillationSettings::default(),
            torque: TorqueSettings::default(),
        }
    }

    /// 默认配置文件路径
    ///
    /// - Linux: `~/.config/trajex/experiment.toml`
    /// - macOS: `~/Library/Application Support/trajex/experiment.toml`
    /// - Windows: `%APPDATA%\trajex\experiment.toml`
    pub fn default_path(config_dir: &Path) -> PathBuf {
        config_dir.join("trajex").join(CONFIG_FILE_NAME)
    }

    /// 从 TOML 文件加载配置并校验
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }

    /// 从 TOML 字符串解析配置并校验
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("TOML 格式错误")?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为 TOML 字符串
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("序列化配置失败")
    }

    /// 保存配置到文件（自动创建父目录）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建配置目录失败: {}", parent.display()))?;
        }
        let content = self.to_toml_string()?;
        fs::write(path, content)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;
        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.axes.is_empty(), "axes 不能为空");
        for &axis in &self.axes {
            ensure!(
                axis < AXIS_COUNT,
                "axis {} 超出范围 [0, {})",
                axis,
                AXIS_COUNT
            );
        }

        self.control.validate()?;
        self.poses.validate()?;
        self.ramp.validate()?;
        self.oscillation.validate()?;
        self.torque.validate()?;
        Ok(())
    }

    /// 控制周期（秒）
    pub fn control_period(&self) -> f64 {
        self.control.period()
    }
}

/// 控制循环设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// 控制频率（Hz）
    pub frequency_hz: f64,

    /// 落后超过多少个周期后重新锚定时间表（`None` 表示始终追赶）
    pub resync_after_periods: Option<u32>,

    /// 使用 spin_sleep 低抖动睡眠
    pub spin: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            frequency_hz: 500.0,
            resync_after_periods: None,
            spin: true,
        }
    }
}

impl ControlSettings {
    /// 控制周期（秒）
    pub fn period(&self) -> f64 {
        1.0 / self.frequency_hz
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.frequency_hz),
            "control.frequency_hz 必须在 [{}, {}] 内，实际为 {}",
            MIN_FREQUENCY_HZ,
            MAX_FREQUENCY_HZ,
            self.frequency_hz
        );
        if self.resync_after_periods == Some(0) {
            bail!("control.resync_after_periods 必须至少为 1");
        }
        Ok(())
    }
}

/// 初始位姿设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseSettings {
    /// 位置实验的初始位姿（rad）
    pub stow: AxisArray<f64>,

    /// 力矩激励实验的初始位姿（rad）
    pub candle: AxisArray<f64>,

    /// 插值到初始位姿的周期数
    pub blend_ticks: usize,
}

impl Default for PoseSettings {
    fn default() -> Self {
        Self {
            stow: AxisArray::new([0.0, 1.09955743, -1.09955743, 1.57079633, 0.0, 0.0]),
            candle: AxisArray::new([0.0, 1.57079633, -2.7925268, -0.34906585, 0.0, 0.0]),
            blend_ticks: 1000,
        }
    }
}

impl PoseSettings {
    fn validate(&self) -> Result<()> {
        ensure!(self.blend_ticks > 0, "poses.blend_ticks 必须至少为 1");
        for (name, pose) in [("stow", &self.stow), ("candle", &self.candle)] {
            ensure!(
                pose.iter().all(|v| v.is_finite()),
                "poses.{} 含有非有限值",
                name
            );
        }
        Ok(())
    }
}

/// 梯形往复实验设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampSettings {
    /// 是否执行
    pub enabled: bool,

    /// 往复位移（rad）
    pub displacement: f64,

    /// 最大速度（rad/s）
    pub max_velocity: f64,

    /// 最大加速度（rad/s²）
    pub max_acceleration: f64,

    /// 往复段数
    pub reversals: usize,

    /// 每段运行 `settle_factor * t_total` 秒（含稳定时间）
    pub settle_factor: f64,

    /// 最后一段回到绝对零位
    pub return_home: bool,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            displacement: FRAC_PI_2,
            max_velocity: FRAC_PI_2,
            max_acceleration: PI,
            reversals: 10,
            settle_factor: 1.5,
            return_home: true,
        }
    }
}

impl RampSettings {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.displacement.is_finite(),
            "ramp.displacement 必须为有限值"
        );
        ensure!(
            self.max_velocity.is_finite() && self.max_velocity > 0.0,
            "ramp.max_velocity 必须为正数，实际为 {}",
            self.max_velocity
        );
        ensure!(
            self.max_acceleration.is_finite() && self.max_acceleration > 0.0,
            "ramp.max_acceleration 必须为正数，实际为 {}",
            self.max_acceleration
        );
        ensure!(
            self.settle_factor.is_finite() && self.settle_factor >= 1.0,
            "ramp.settle_factor 必须 >= 1.0，实际为 {}",
            self.settle_factor
        );
        if self.enabled {
            ensure!(self.reversals > 0, "ramp.reversals 必须至少为 1");
        }
        Ok(())
    }
}

/// 位置振荡实验设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationSettings {
    /// 是否执行
    pub enabled: bool,

    /// `[振幅 rad, 角频率 rad/s]` 列表
    pub params: Vec<[f64; 2]>,

    /// 持续时间（振荡周期的倍数）
    pub periods: f64,
}

impl Default for OscillationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            params: vec![[0.2, 0.2], [0.1, 2.0]],
            periods: 6.0,
        }
    }
}

impl OscillationSettings {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        ensure!(!self.params.is_empty(), "oscillation.params 不能为空");
        validate_pairs("oscillation.params", &self.params)?;
        ensure!(
            self.periods.is_finite() && self.periods > 0.0,
            "oscillation.periods 必须为正数，实际为 {}",
            self.periods
        );
        Ok(())
    }
}

/// 力矩激励实验设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorqueSettings {
    /// 是否执行（需要零增益纯力矩模式）
    pub enabled: bool,

    /// `[振幅 N·m, 角频率 rad/s]` 列表
    pub params: Vec<[f64; 2]>,

    /// 每组参数的周期数
    pub ticks: usize,
}

impl Default for TorqueSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            params: vec![[0.5, 2.0], [1.0, 6.0]],
            ticks: 5000,
        }
    }
}

impl TorqueSettings {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        ensure!(!self.params.is_empty(), "torque.params 不能为空");
        validate_pairs("torque.params", &self.params)?;
        ensure!(self.ticks > 0, "torque.ticks 必须至少为 1");
        Ok(())
    }
}

fn validate_pairs(name: &str, params: &[[f64; 2]]) -> Result<()> {
    for (j, [amplitude, omega]) in params.iter().enumerate() {
        ensure!(
            amplitude.is_finite(),
            "{}[{}] 振幅必须为有限值",
            name,
            j
        );
        ensure!(
            omega.is_finite() && *omega > 0.0,
            "{}[{}] 角频率必须为正数，实际为 {}",
            name,
            j,
            omega
        );
    }
    Ok(())
}
