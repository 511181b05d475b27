//! 采样录制
//!
//! 控制循环每个周期调用一次 [`SampleRecorder::record`]。
//!
//! # 实现
//!
//! - [`TextRecorder`]：带缓冲的文本文件，每条记录一行
//! - [`MemoryRecorder`]：保存在内存中（测试、离线分析）
//! - [`ChannelRecorder`]：实时友好，记录推入有界通道由写线程落盘；通道满时丢弃并计数
//!
//! 实验运行器通过 [`RecorderFactory`] 为每个日志文件打开一个录制器。
//!
//! # 示例
//!
//! ```rust
//! use trajex_client::recording::{MemoryRecorder, SampleRecorder};
//! use trajex_tools::SampleRecord;
//! # use trajex_tools::{ArmCommand, ArmState};
//! # use trajex_profile::AxisArray;
//!
//! let mut recorder = MemoryRecorder::new();
//! # let record = SampleRecord {
//! #     command: ArmCommand::default(),
//! #     feedforward_torque: AxisArray::ZERO,
//! #     measured: ArmState::default(),
//! #     elapsed_time: 0.0,
//! # };
//! recorder.record(&record)?;
//! assert_eq!(recorder.records().len(), 1);
//! # Ok::<(), trajex_client::RecordingError>(())
//! ```

use crate::error::RecordingError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use trajex_tools::{ExperimentKind, RecordLayout, SampleRecord};

/// 采样记录接收端
pub trait SampleRecorder {
    /// 记录一个周期
    fn record(&mut self, record: &SampleRecord) -> Result<(), RecordingError>;

    /// 刷新缓冲
    fn flush(&mut self) -> Result<(), RecordingError> {
        Ok(())
    }
}

impl<R: SampleRecorder + ?Sized> SampleRecorder for &mut R {
    fn record(&mut self, record: &SampleRecord) -> Result<(), RecordingError> {
        (**self).record(record)
    }

    fn flush(&mut self) -> Result<(), RecordingError> {
        (**self).flush()
    }
}

impl<R: SampleRecorder + ?Sized> SampleRecorder for Box<R> {
    fn record(&mut self, record: &SampleRecord) -> Result<(), RecordingError> {
        (**self).record(record)
    }

    fn flush(&mut self) -> Result<(), RecordingError> {
        (**self).flush()
    }
}

/// 文本文件录制
pub struct TextRecorder {
    writer: BufWriter<File>,
    layout: RecordLayout,
    path: PathBuf,
    lines: usize,
}

impl TextRecorder {
    /// 创建（覆盖）日志文件
    pub fn create<P: AsRef<Path>>(path: P, layout: RecordLayout) -> Result<Self, RecordingError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            layout,
            path,
            lines: 0,
        })
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 已写入的行数
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl SampleRecorder for TextRecorder {
    fn record(&mut self, record: &SampleRecord) -> Result<(), RecordingError> {
        writeln!(self.writer, "{}", self.layout.format(record))?;
        self.lines += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RecordingError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for TextRecorder {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush {}: {}", self.path.display(), e);
        }
    }
}

/// 内存录制
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    records: Vec<SampleRecord>,
    file_name: Option<String>,
}

impl MemoryRecorder {
    /// 创建匿名的内存录制
    pub fn new() -> Self {
        Self::default()
    }

    fn named(file_name: String) -> Self {
        Self {
            records: Vec::new(),
            file_name: Some(file_name),
        }
    }

    /// 由 [`MemoryRecorderFactory`] 打开时对应的文件名
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// 所有记录
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// 取出所有记录
    pub fn into_records(self) -> Vec<SampleRecord> {
        self.records
    }
}

impl SampleRecorder for MemoryRecorder {
    fn record(&mut self, record: &SampleRecord) -> Result<(), RecordingError> {
        self.records.push(*record);
        Ok(())
    }
}

/// 通道录制统计
#[derive(Debug, Clone)]
pub struct RecordingStats {
    /// 写入文件的记录数
    pub record_count: usize,
    /// 录制时长
    pub duration: Duration,
    /// 通道满时丢弃的记录数
    pub dropped_records: u64,
    /// 输出文件路径
    pub output_path: PathBuf,
}

/// 通道录制（写线程落盘）
///
/// `record()` 从不阻塞：通道满时丢弃记录并增加丢弃计数。
///
/// # Drop 语义
///
/// 丢弃时关闭发送端并等待写线程结束，但会忽略写线程的错误。
/// 建议显式调用 [`finish`](Self::finish) 以获取错误结果。
pub struct ChannelRecorder {
    tx: Option<crossbeam_channel::Sender<SampleRecord>>,
    writer: Option<JoinHandle<Result<usize, RecordingError>>>,
    dropped_records: Arc<AtomicU64>,
    output_path: PathBuf,
    start_time: Instant,
}

impl ChannelRecorder {
    /// 默认通道容量（500Hz 下约 2 秒）
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// 创建日志文件并启动写线程
    pub fn spawn<P: AsRef<Path>>(
        path: P,
        layout: RecordLayout,
        capacity: usize,
    ) -> Result<Self, RecordingError> {
        let output_path = path.as_ref().to_path_buf();
        let mut file = TextRecorder::create(&output_path, layout)?;
        let (tx, rx) = crossbeam_channel::bounded::<SampleRecord>(capacity.max(1));

        let writer = std::thread::Builder::new()
            .name("trajex-recorder".to_string())
            .spawn(move || -> Result<usize, RecordingError> {
                for record in rx.iter() {
                    file.record(&record)?;
                }
                file.flush()?;
                Ok(file.lines())
            })?;

        Ok(Self {
            tx: Some(tx),
            writer: Some(writer),
            dropped_records: Arc::new(AtomicU64::new(0)),
            output_path,
            start_time: Instant::now(),
        })
    }

    /// 当前丢弃数量
    pub fn dropped_count(&self) -> u64 {
        self.dropped_records.load(Ordering::Relaxed)
    }

    /// 输出文件路径
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 关闭通道，等待写线程写完剩余记录
    pub fn finish(mut self) -> Result<RecordingStats, RecordingError> {
        let record_count = self.join_writer()?;
        Ok(RecordingStats {
            record_count,
            duration: self.start_time.elapsed(),
            dropped_records: self.dropped_count(),
            output_path: self.output_path.clone(),
        })
    }

    fn join_writer(&mut self) -> Result<usize, RecordingError> {
        // 先关闭发送端，写线程的 rx.iter() 才会结束
        drop(self.tx.take());
        match self.writer.take() {
            Some(handle) => handle.join().map_err(|_| RecordingError::WriterPanicked)?,
            None => Ok(0),
        }
    }
}

impl SampleRecorder for ChannelRecorder {
    fn record(&mut self, record: &SampleRecord) -> Result<(), RecordingError> {
        let tx = self.tx.as_ref().ok_or(RecordingError::ChannelClosed)?;
        match tx.try_send(*record) {
            Ok(()) => Ok(()),
            Err(crossbeam_channel::TrySendError::Full(_)) => {
                self.dropped_records.fetch_add(1, Ordering::Relaxed);
                Ok(())
            },
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => {
                Err(RecordingError::ChannelClosed)
            },
        }
    }
}

impl Drop for ChannelRecorder {
    fn drop(&mut self) {
        if let Err(e) = self.join_writer() {
            tracing::warn!("Recorder for {} failed: {}", self.output_path.display(), e);
        }
    }
}

/// 按（实验类型 × 参数组 × 轴）打开录制器
pub trait RecorderFactory {
    /// 录制器类型
    type Recorder: SampleRecorder;

    /// 打开一个日志
    fn open(
        &mut self,
        kind: ExperimentKind,
        param_index: usize,
        axis: usize,
    ) -> Result<Self::Recorder, RecordingError>;

    /// 关闭日志（刷新、收尾）
    fn close(&mut self, recorder: Self::Recorder) -> Result<(), RecordingError>;
}

/// 每个日志一个文本文件
#[derive(Debug, Clone)]
pub struct TextRecorderFactory {
    output_dir: PathBuf,
}

impl TextRecorderFactory {
    /// 创建输出目录
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, RecordingError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// 输出目录
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl RecorderFactory for TextRecorderFactory {
    type Recorder = TextRecorder;

    fn open(
        &mut self,
        kind: ExperimentKind,
        param_index: usize,
        axis: usize,
    ) -> Result<TextRecorder, RecordingError> {
        let path = self.output_dir.join(kind.file_name(param_index, axis));
        tracing::debug!("Opening log {}", path.display());
        TextRecorder::create(path, kind.layout())
    }

    fn close(&mut self, mut recorder: TextRecorder) -> Result<(), RecordingError> {
        recorder.flush()
    }
}

/// 每个日志一个写线程
#[derive(Debug, Clone)]
pub struct ChannelRecorderFactory {
    output_dir: PathBuf,
    capacity: usize,
    dropped_records: u64,
}

impl ChannelRecorderFactory {
    /// 创建输出目录
    pub fn new<P: AsRef<Path>>(output_dir: P, capacity: usize) -> Result<Self, RecordingError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            capacity,
            dropped_records: 0,
        })
    }

    /// 所有已关闭日志的丢弃总数
    pub fn dropped_records(&self) -> u64 {
        self.dropped_records
    }
}

impl RecorderFactory for ChannelRecorderFactory {
    type Recorder = ChannelRecorder;

    fn open(
        &mut self,
        kind: ExperimentKind,
        param_index: usize,
        axis: usize,
    ) -> Result<ChannelRecorder, RecordingError> {
        let path = self.output_dir.join(kind.file_name(param_index, axis));
        ChannelRecorder::spawn(path, kind.layout(), self.capacity)
    }

    fn close(&mut self, recorder: ChannelRecorder) -> Result<(), RecordingError> {
        let stats = recorder.finish()?;
        if stats.dropped_records > 0 {
            tracing::warn!(
                "{} records dropped while writing {}",
                stats.dropped_records,
                stats.output_path.display()
            );
        }
        self.dropped_records += stats.dropped_records;
        Ok(())
    }
}

/// 内存日志：按文件名保存所有记录
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorderFactory {
    logs: Vec<(String, Vec<SampleRecord>)>,
}

impl MemoryRecorderFactory {
    /// 创建空的内存日志
    pub fn new() -> Self {
        Self::default()
    }

    /// 已关闭的日志（文件名，记录），按关闭顺序
    pub fn logs(&self) -> &[(String, Vec<SampleRecord>)] {
        &self.logs
    }

    /// 按文件名查找日志
    pub fn log(&self, file_name: &str) -> Option<&[SampleRecord]> {
        self.logs
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, records)| records.as_slice())
    }
}

impl RecorderFactory for MemoryRecorderFactory {
    type Recorder = MemoryRecorder;

    fn open(
        &mut self,
        kind: ExperimentKind,
        param_index: usize,
        axis: usize,
    ) -> Result<MemoryRecorder, RecordingError> {
        Ok(MemoryRecorder::named(kind.file_name(param_index, axis)))
    }

    fn close(&mut self, recorder: MemoryRecorder) -> Result<(), RecordingError> {
        let MemoryRecorder { records, file_name } = recorder;
        let name = file_name.ok_or(RecordingError::NotOpenedByFactory)?;
        self.logs.push((name, records));
        Ok(())
    }
}
