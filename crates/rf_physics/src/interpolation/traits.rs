// crates/rf_physics/src/interpolation/traits.rs

//! 插值格式 trait 定义
//!
//! 直接插值格式由单元场一次性算出面场，不提供插值权重。
//! 装配器通过 [`SurfaceInterpolationScheme::supports_weights`] 判断是否可以
//! 调用 `weights()`；对直接格式调用 `weights()` 属于误用，直接 panic。

use std::fmt::Debug;

use rf_foundation::{FieldValue, RfResult};

use crate::field::{CellField, FaceField};
use crate::mesh::FvMesh;

/// 直接插值：单元场 → 面场
pub trait DirectInterpolationScheme<T: FieldValue>: Debug + Send + Sync {
    /// 格式名称（与注册表标签一致）
    fn name(&self) -> &'static str;

    /// 计算面值
    fn interpolate(&self, mesh: &dyn FvMesh, field: &CellField<T>) -> RfResult<FaceField<T>>;
}

/// 完整的面插值格式接口
pub trait SurfaceInterpolationScheme<T: FieldValue>: DirectInterpolationScheme<T> {
    /// 是否提供插值权重
    fn supports_weights(&self) -> bool;

    /// 插值权重（作用于 owner）
    ///
    /// # Panics
    ///
    /// 当 `supports_weights()` 为 `false` 时调用会 panic。
    fn weights(&self, mesh: &dyn FvMesh, field: &CellField<T>) -> FaceField<f64>;
}

/// 直接格式调用 `weights()` 时的统一处理
#[cold]
#[track_caller]
pub(crate) fn weights_unsupported(scheme: &str) -> ! {
    panic!(
        "插值格式 '{}' 是直接格式，不提供插值权重；请先检查 supports_weights()",
        scheme
    )
}
