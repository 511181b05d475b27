//! Loop Pacer - 固定周期节拍器
//!
//! 每个周期结束时调用 [`LoopPacer::pace`]，阻塞到下一个**绝对**周期边界
//! `anchor + k * period`，而不是睡眠一个相对时长，因此循环体的耗时抖动不会累积成漂移。
//!
//! # 超时策略
//!
//! 循环体超过一个周期时不算错误：`pace()` 立即返回（追赶），并在 [`TickReport`] 中报告
//! 目标时刻与实际时刻。设置了重新锚定阈值时，落后超过阈值的时间表会以当前时刻为新锚点。
//!
//! # 示例
//!
//! ```rust
//! use std::time::Duration;
//! use trajex_client::control::{LoopPacer, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut pacer = LoopPacer::new(clock.clone(), 0.002).unwrap();
//!
//! pacer.start();
//! for _ in 0..3 {
//!     clock.advance(Duration::from_micros(500)); // 循环体
//!     let report = pacer.pace();
//!     assert!(!report.is_overrun());
//! }
//! assert_eq!(clock.now(), Duration::from_millis(6));
//! ```

use crate::error::{ExperimentError, Result};
use spin_sleep::SpinSleeper;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// 单调时钟
///
/// 时间以自时钟起点经过的 `Duration` 表示。
pub trait MonotonicClock {
    /// 当前时刻
    fn now(&self) -> Duration;

    /// 阻塞到 `deadline`；已过期则立即返回
    fn sleep_until(&self, deadline: Duration);
}

/// 真实时钟（`Instant` + 可选 `spin_sleep`）
#[derive(Debug)]
pub struct SpinClock {
    origin: Instant,
    sleeper: Option<SpinSleeper>,
}

impl SpinClock {
    /// 使用 spin_sleep 的低抖动时钟
    ///
    /// ⚠️ spin_sleep 会占用更多 CPU。
    pub fn spin() -> Self {
        Self {
            origin: Instant::now(),
            sleeper: Some(SpinSleeper::default()),
        }
    }

    /// 使用 `std::thread::sleep` 的时钟
    pub fn standard() -> Self {
        Self {
            origin: Instant::now(),
            sleeper: None,
        }
    }

    /// 根据配置选择
    pub fn new(spin: bool) -> Self {
        if spin { Self::spin() } else { Self::standard() }
    }
}

impl MonotonicClock for SpinClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&self, deadline: Duration) {
        let now = self.now();
        if deadline <= now {
            return;
        }
        let remaining = deadline - now;
        match &self.sleeper {
            Some(sleeper) => sleeper.sleep(remaining),
            None => std::thread::sleep(remaining),
        }
    }
}

/// 虚拟时钟（测试和离线运行）
///
/// `sleep_until` 直接把时间拨到 deadline，不真正睡眠。克隆共享同一时间。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// 从 0 开始的虚拟时钟
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前虚拟时刻
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// 推进虚拟时间（模拟循环体耗时）
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep_until(&self, deadline: Duration) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}

/// 一次 `pace()` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// 已完成的周期数（从 1 开始）
    pub tick: u64,
    /// 目标边界时刻
    pub target: Duration,
    /// `pace()` 返回时的实际时刻
    pub actual: Duration,
    /// 到达边界时已落后的时长（未超时为 0）
    pub lateness: Duration,
    /// 本次是否重新锚定了时间表
    pub resynced: bool,
}

impl TickReport {
    /// 循环体是否超过了周期边界
    pub fn is_overrun(&self) -> bool {
        !self.lateness.is_zero()
    }
}

/// 允许的最短控制周期
pub const MIN_PERIOD: Duration = Duration::from_micros(1);

/// 允许的最长控制周期
pub const MAX_PERIOD: Duration = Duration::from_secs(3600);

/// 固定周期节拍器
#[derive(Debug)]
pub struct LoopPacer<C: MonotonicClock> {
    clock: C,
    period: Duration,
    anchor: Option<Duration>,
    ticks_since_anchor: u32,
    tick: u64,
    resync_after_periods: Option<u32>,
}

impl<C: MonotonicClock> LoopPacer<C> {
    /// 创建节拍器
    ///
    /// # 错误
    ///
    /// `period` 非有限或不在 [`MIN_PERIOD`, `MAX_PERIOD`] 内 → `InvalidParameter`
    pub fn new(clock: C, period: f64) -> Result<Self> {
        let duration = Duration::try_from_secs_f64(period)
            .ok()
            .filter(|d| (MIN_PERIOD..=MAX_PERIOD).contains(d))
            .ok_or_else(|| {
                ExperimentError::invalid_parameter(
                    "period",
                    format!(
                        "must be between {:?} and {:?}, got {} s",
                        MIN_PERIOD, MAX_PERIOD, period
                    ),
                )
            })?;
        let frequency_hz = 1.0 / period;
        if frequency_hz > 10000.0 {
            tracing::warn!(
                "Very high control frequency: {} Hz. This may cause performance issues.",
                frequency_hz
            );
        }

        Ok(Self {
            clock,
            period: duration,
            anchor: None,
            ticks_since_anchor: 0,
            tick: 0,
            resync_after_periods: None,
        })
    }

    /// 落后超过 `periods` 个周期时重新锚定（`None`：始终追赶）
    pub fn with_resync_threshold(mut self, periods: Option<u32>) -> Self {
        self.resync_after_periods = periods.filter(|&p| p > 0);
        self
    }

    /// 控制周期
    pub fn period(&self) -> Duration {
        self.period
    }

    /// 时钟
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// 已完成的周期数
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// 以当前时刻为锚点开始（重新开始）计时
    pub fn start(&mut self) {
        self.anchor = Some(self.clock.now());
        self.ticks_since_anchor = 0;
    }

    /// 阻塞到下一个周期边界
    ///
    /// 未调用 [`start`](Self::start) 时，以本次调用时刻为锚点。
    pub fn pace(&mut self) -> TickReport {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let now = self.clock.now();
                self.anchor = Some(now);
                now
            },
        };

        self.tick += 1;
        self.ticks_since_anchor = self.ticks_since_anchor.saturating_add(1);
        let target = anchor + self.period * self.ticks_since_anchor;

        let now = self.clock.now();
        if now <= target {
            self.clock.sleep_until(target);
            return TickReport {
                tick: self.tick,
                target,
                actual: self.clock.now(),
                lateness: Duration::ZERO,
                resynced: false,
            };
        }

        let lateness = now - target;
        let mut resynced = false;
        if let Some(periods) = self.resync_after_periods
            && lateness > self.period * periods
        {
            self.anchor = Some(now);
            self.ticks_since_anchor = 0;
            resynced = true;
        }

        tracing::debug!(
            tick = self.tick,
            lateness_us = lateness.as_micros() as u64,
            resynced,
            "control period overrun"
        );

        TickReport {
            tick: self.tick,
            target,
            actual: now,
            lateness,
            resynced,
        }
    }
}
