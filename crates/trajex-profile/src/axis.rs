//! 轴索引和命令向量
//!
//! 提供 6 轴机械臂的定长向量容器。所有带索引的访问都有带范围检查的版本，
//! 越界时返回 [`ProfileError::IndexOutOfRange`]，而不是 panic。
//!
//! # 示例
//!
//! ```rust
//! use trajex_profile::{Axis, AxisArray};
//!
//! let positions = AxisArray::new([0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
//!
//! assert_eq!(positions[Axis::A1], 0.0);
//! assert_eq!(*positions.try_get(5).unwrap(), 0.5);
//! assert!(positions.try_get(6).is_err());
//!
//! let doubled = positions.map(|q| q * 2.0);
//! assert_eq!(doubled[Axis::A6], 1.0);
//! ```

use crate::error::{ProfileError, Result};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// 轴数（命令向量维度）
pub const AXIS_COUNT: usize = 6;

/// 轴枚举
///
/// 表示机械臂的 6 个关节轴。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// 轴 1（基座旋转）
    A1 = 0,
    /// 轴 2（肩部俯仰）
    A2 = 1,
    /// 轴 3（肘部俯仰）
    A3 = 2,
    /// 轴 4（腕部旋转）
    A4 = 3,
    /// 轴 5（腕部俯仰）
    A5 = 4,
    /// 轴 6（末端旋转）
    A6 = 5,
}

impl Axis {
    /// 所有轴的数组
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::A1, Axis::A2, Axis::A3, Axis::A4, Axis::A5, Axis::A6];

    /// 获取轴索引（0-5）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 从索引创建轴（范围检查）
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 从索引创建轴，越界时返回 `IndexOutOfRange`
    pub fn try_from_index(index: usize) -> Result<Self> {
        Self::from_index(index).ok_or(ProfileError::IndexOutOfRange {
            index,
            dimension: AXIS_COUNT,
        })
    }

    /// 获取轴名称
    pub const fn name(self) -> &'static str {
        match self {
            Axis::A1 => "A1",
            Axis::A2 => "A2",
            Axis::A3 => "A3",
            Axis::A4 => "A4",
            Axis::A5 => "A5",
            Axis::A6 => "A6",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<usize> for Axis {
    type Error = ProfileError;

    fn try_from(index: usize) -> Result<Self> {
        Self::try_from_index(index)
    }
}

/// 轴数组
///
/// 定长 6 轴容器，用作位置、速度、力矩命令向量。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AxisArray<T> {
    data: [T; AXIS_COUNT],
}

impl<T: Copy> Copy for AxisArray<T> {}

impl<T> AxisArray<T> {
    /// 创建新的轴数组
    #[inline]
    pub const fn new(data: [T; AXIS_COUNT]) -> Self {
        AxisArray { data }
    }

    /// 获取内部数组的引用
    #[inline]
    pub fn as_array(&self) -> &[T; AXIS_COUNT] {
        &self.data
    }

    /// 获取内部数组（消耗 self）
    #[inline]
    pub fn into_array(self) -> [T; AXIS_COUNT] {
        self.data
    }

    /// 向量维度
    #[inline]
    pub const fn len(&self) -> usize {
        AXIS_COUNT
    }

    /// 固定维度，永不为空
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// 带范围检查的索引访问
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.data.get(index).ok_or(ProfileError::IndexOutOfRange {
            index,
            dimension: AXIS_COUNT,
        })
    }

    /// 带范围检查的可变索引访问
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.data.get_mut(index).ok_or(ProfileError::IndexOutOfRange {
            index,
            dimension: AXIS_COUNT,
        })
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// 映射转换
    pub fn map<U, F>(self, f: F) -> AxisArray<U>
    where
        F: FnMut(T) -> U,
    {
        AxisArray::new(self.data.map(f))
    }

    /// 按轴和另一个数组的元素执行映射
    pub fn map_with<U, V, F>(self, other: AxisArray<U>, mut f: F) -> AxisArray<V>
    where
        F: FnMut(T, U) -> V,
    {
        let [a1, b1, c1, d1, e1, f1] = self.data;
        let [a2, b2, c2, d2, e2, f2] = other.data;
        AxisArray::new([
            f(a1, a2),
            f(b1, b2),
            f(c1, c2),
            f(d1, d2),
            f(e1, e2),
            f(f1, f2),
        ])
    }
}

impl<T: Copy> AxisArray<T> {
    /// 创建所有元素相同的数组
    #[inline]
    pub const fn splat(value: T) -> Self {
        AxisArray::new([value, value, value, value, value, value])
    }
}

impl AxisArray<f64> {
    /// 全零向量
    pub const ZERO: Self = AxisArray::splat(0.0);

    /// 所有元素的最大绝对值
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

// 运算符重载
impl Add for AxisArray<f64> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.map_with(rhs, |a, b| a + b)
    }
}

impl Sub for AxisArray<f64> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.map_with(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for AxisArray<f64> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl<T: Default> Default for AxisArray<T> {
    fn default() -> Self {
        AxisArray::new(std::array::from_fn(|_| T::default()))
    }
}

// 按轴枚举的索引访问永不越界；usize 索引请优先使用 try_get
impl<T> Index<Axis> for AxisArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, axis: Axis) -> &T {
        &self.data[axis.index()]
    }
}

impl<T> IndexMut<Axis> for AxisArray<T> {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.data[axis.index()]
    }
}

impl<T> From<[T; AXIS_COUNT]> for AxisArray<T> {
    #[inline]
    fn from(data: [T; AXIS_COUNT]) -> Self {
        AxisArray::new(data)
    }
}

impl<T> From<AxisArray<T>> for [T; AXIS_COUNT] {
    #[inline]
    fn from(arr: AxisArray<T>) -> Self {
        arr.data
    }
}

impl<T> IntoIterator for AxisArray<T> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, AXIS_COUNT>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a AxisArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
