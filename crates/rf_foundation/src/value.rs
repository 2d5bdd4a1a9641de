// crates/rf_foundation/src/value.rs

//! 场值类型
//!
//! 单元场、面场和边界系数的元素类型统一由 [`FieldValue`] 描述：
//!
//! | 类型 | 分量数 | 用途 |
//! |------|--------|------|
//! | `f64` / `f32` | 1 | 标量场（浓度、扩散系数、阻滞因子） |
//! | `DVec2` | 2 | 二维向量场 |
//! | `DVec3` | 3 | 三维向量场 |
//! | `DMat3` | 9 | 二阶张量场 |
//!
//! # 排序约定
//!
//! 迎风取大格式需要对非标量类型比较大小。本模块统一采用**按分量字典序**：
//! 先比较第一个分量，相等时比较下一个，分量之间使用 IEEE 偏序
//! (`partial_cmp`)。对标量即为 `>` 本身：+0 与 -0 相等，含 NaN 的比较
//! 没有结果，此时取邻居侧。

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Sub};

use glam::{DMat3, DVec2, DVec3};

/// 场值 trait
pub trait FieldValue:
    Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
{
    /// 分量数
    const N_COMPONENTS: usize;

    /// 零值
    fn zero() -> Self;

    /// 所有分量取同一标量值
    fn splat(s: f64) -> Self;

    /// 数乘
    fn scale(self, s: f64) -> Self;

    /// 第 i 个分量
    fn component(&self, i: usize) -> f64;

    /// 是否所有分量均有限
    fn is_finite(&self) -> bool;

    /// 按分量字典序比较，遇到不可比较的分量（NaN）返回 `None`
    #[inline]
    fn upwind_cmp(&self, other: &Self) -> Option<Ordering> {
        for i in 0..Self::N_COMPONENTS {
            match self.component(i).partial_cmp(&other.component(i))? {
                Ordering::Equal => continue,
                ord => return Some(ord),
            }
        }
        Some(Ordering::Equal)
    }

    /// 迎风取大：严格大于时取 self，否则（含相等与不可比较）取 other
    #[inline]
    fn upwind_max(self, other: Self) -> Self {
        if self.upwind_cmp(&other) == Some(Ordering::Greater) {
            self
        } else {
            other
        }
    }
}

impl FieldValue for f64 {
    const N_COMPONENTS: usize = 1;

    #[inline]
    fn zero() -> Self {
        0.0
    }
    #[inline]
    fn splat(s: f64) -> Self {
        s
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        self * s
    }
    #[inline]
    fn component(&self, _i: usize) -> f64 {
        *self
    }
    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl FieldValue for f32 {
    const N_COMPONENTS: usize = 1;

    #[inline]
    fn zero() -> Self {
        0.0
    }
    #[inline]
    fn splat(s: f64) -> Self {
        s as f32
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        (self as f64 * s) as f32
    }
    #[inline]
    fn component(&self, _i: usize) -> f64 {
        *self as f64
    }
    #[inline]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl FieldValue for DVec2 {
    const N_COMPONENTS: usize = 2;

    #[inline]
    fn zero() -> Self {
        DVec2::ZERO
    }
    #[inline]
    fn splat(s: f64) -> Self {
        DVec2::splat(s)
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        self * s
    }
    #[inline]
    fn component(&self, i: usize) -> f64 {
        self[i]
    }
    #[inline]
    fn is_finite(&self) -> bool {
        DVec2::is_finite(*self)
    }
}

impl FieldValue for DVec3 {
    const N_COMPONENTS: usize = 3;

    #[inline]
    fn zero() -> Self {
        DVec3::ZERO
    }
    #[inline]
    fn splat(s: f64) -> Self {
        DVec3::splat(s)
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        self * s
    }
    #[inline]
    fn component(&self, i: usize) -> f64 {
        self[i]
    }
    #[inline]
    fn is_finite(&self) -> bool {
        DVec3::is_finite(*self)
    }
}

impl FieldValue for DMat3 {
    const N_COMPONENTS: usize = 9;

    #[inline]
    fn zero() -> Self {
        DMat3::ZERO
    }
    #[inline]
    fn splat(s: f64) -> Self {
        DMat3::from_cols(DVec3::splat(s), DVec3::splat(s), DVec3::splat(s))
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        self * s
    }
    /// 按行主序编号：i = 3*row + col
    #[inline]
    fn component(&self, i: usize) -> f64 {
        self.row(i / 3)[i % 3]
    }
    #[inline]
    fn is_finite(&self) -> bool {
        DMat3::is_finite(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_order() {
        assert_eq!(1.0f64.upwind_max(3.0), 3.0);
        assert_eq!(3.0f64.upwind_max(1.0), 3.0);
        assert_eq!((-2.0f64).upwind_max(-5.0), -2.0);
    }

    #[test]
    fn test_vector_lexicographic() {
        let a = DVec3::new(1.0, 5.0, 0.0);
        let b = DVec3::new(1.0, 2.0, 9.0);
        // 第一分量相等，比较第二分量
        assert_eq!(a.upwind_cmp(&b), Some(Ordering::Greater));
        assert_eq!(a.upwind_max(b), a);
        assert_eq!(b.upwind_max(a), a);
    }

    #[test]
    fn test_equal_values_take_other() {
        let a = DVec2::new(1.0, 1.0);
        assert_eq!(a.upwind_cmp(&a), Some(Ordering::Equal));
        assert_eq!(a.upwind_max(a), a);
    }

    #[test]
    fn test_nan_and_signed_zero_take_other() {
        // 与 `own > nei` 一致：NaN 和 ±0 相等时都取邻居侧
        assert!(f64::NAN.upwind_max(1.0) == 1.0);
        assert!(1.0f64.upwind_max(f64::NAN).is_nan());
        assert!(0.0f64.upwind_max(-0.0).is_sign_negative());
        assert!((-0.0f64).upwind_max(0.0).is_sign_positive());
        assert_eq!(f64::NAN.upwind_cmp(&1.0), None);

        let a = DVec3::new(1.0, f64::NAN, 5.0);
        let b = DVec3::new(1.0, 0.0, 0.0);
        assert_eq!(a.upwind_max(b), b);
        assert!(b.upwind_max(a).y.is_nan());
    }

    #[test]
    fn test_tensor_components() {
        let m = DMat3::from_cols(
            DVec3::new(1.0, 4.0, 7.0),
            DVec3::new(2.0, 5.0, 8.0),
            DVec3::new(3.0, 6.0, 9.0),
        );
        assert_eq!(m.component(0), 1.0);
        assert_eq!(m.component(1), 2.0);
        assert_eq!(m.component(5), 6.0);
        assert_eq!(<DMat3 as FieldValue>::zero(), DMat3::ZERO);
    }

    #[test]
    fn test_splat_and_scale() {
        assert_eq!(DVec3::splat(2.0).scale(0.5), DVec3::ONE);
        assert_eq!(<f64 as FieldValue>::splat(4.0).scale(0.25), 1.0);
        assert_eq!(<DMat3 as FieldValue>::splat(1.0).component(4), 1.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(FieldValue::is_finite(&DVec3::ONE));
        assert!(!FieldValue::is_finite(&DVec3::new(f64::NAN, 0.0, 0.0)));
        assert!(!FieldValue::is_finite(&f64::INFINITY));
    }
}
