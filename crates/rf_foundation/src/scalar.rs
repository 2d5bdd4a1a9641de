// crates/rf_foundation/src/scalar.rs

//! RuntimeScalar - 密封的标量类型抽象
//!
//! 标量插值格式（调和平均）只对 f32/f64 有意义，本 trait 提供两者之间
//! 零成本切换的唯一接口。
//!
//! # 设计原则
//!
//! 1. **密封 Trait**: 只有 f32 和 f64 可以实现（通过 private::Sealed）
//! 2. **从配置转换**: `from_config(f64)` 用于从配置层（全 f64）转换
//!
//! ```rust
//! use rf_foundation::RuntimeScalar;
//!
//! fn reciprocal<S: RuntimeScalar>(x: S, eps: S) -> S {
//!     S::ONE / (x + eps)
//! }
//! assert_eq!(reciprocal(0.5f64, 0.0), 2.0);
//! ```

use num_traits::Float;

/// 密封模块，禁止外部实现
mod private {
    /// 密封 trait
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// 运行时标量类型（密封，仅 f32/f64 可实现）
pub trait RuntimeScalar: private::Sealed + Float + Send + Sync + 'static {
    /// 一
    const ONE: Self;
    /// 最小正规数
    const MIN_POSITIVE: Self;

    /// 从配置层 f64 转换
    fn from_config(v: f64) -> Self;
}

impl RuntimeScalar for f32 {
    const ONE: f32 = 1.0;
    const MIN_POSITIVE: f32 = f32::MIN_POSITIVE;

    #[inline]
    fn from_config(v: f64) -> Self {
        v as f32
    }
}

impl RuntimeScalar for f64 {
    const ONE: f64 = 1.0;
    const MIN_POSITIVE: f64 = f64::MIN_POSITIVE;

    #[inline]
    fn from_config(v: f64) -> Self {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(<f32 as RuntimeScalar>::MIN_POSITIVE, f32::MIN_POSITIVE);
        assert_eq!(<f64 as RuntimeScalar>::ONE, 1.0f64);
    }

    #[test]
    fn test_from_config() {
        assert_eq!(f32::from_config(9.81), 9.81f32);
        assert_eq!(f64::from_config(9.81), 9.81f64);
        // 超出 f32 范围的配置值变为无穷
        assert!(f32::from_config(1e300).is_infinite());
    }
}
