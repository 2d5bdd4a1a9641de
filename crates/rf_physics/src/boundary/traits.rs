// crates/rf_physics/src/boundary/traits.rs

//! Robin 系数提供者接口
//!
//! 外部装配器在每次组装时的调用顺序：
//!
//! 1. `update_coeffs(ctx)` - 唯一的状态变更点，读取内侧单元值及其它场
//! 2. 四个系数访问器 - 返回新分配的逐面数组
//! 3. 可选 `sn_grad()` / `evaluate()`
//!
//! 隐式离散时，边界面值与法向梯度写作：
//!
//! ```text
//! φ_b     = valueInternalCoeffs·φ_C    + valueBoundaryCoeffs
//! ∂φ/∂n   = gradientInternalCoeffs·φ_C + gradientBoundaryCoeffs
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use rf_foundation::{FieldValue, RfResult};

use super::mapper::PatchFieldMapper;
use crate::fields::FieldLookup;
use crate::mesh::BoundaryPatch;

/// 系数更新上下文
#[derive(Clone, Copy)]
pub struct UpdateContext<'a, T> {
    /// 边界相邻单元的值（长度等于边界面数）
    pub patch_internal: &'a [T],
    /// 场查找接口（需要其它场的边界条件使用）
    pub fields: Option<&'a dyn FieldLookup>,
}

impl<'a, T> UpdateContext<'a, T> {
    /// 只携带内侧值
    pub fn new(patch_internal: &'a [T]) -> Self {
        Self {
            patch_internal,
            fields: None,
        }
    }

    /// 附加场查找接口
    pub fn with_fields(mut self, fields: &'a dyn FieldLookup) -> Self {
        self.fields = Some(fields);
        self
    }
}

impl<T> Debug for UpdateContext<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("patch_internal_len", &self.patch_internal.len())
            .field("has_fields", &self.fields.is_some())
            .finish()
    }
}

/// Robin 系数提供者
pub trait RobinCoefficientProvider<T: FieldValue>: Debug + Send + Sync {
    /// 类型标签
    fn type_name(&self) -> &'static str;

    /// 所在边界
    fn patch(&self) -> &Arc<dyn BoundaryPatch>;

    /// 内部场名称
    fn field_name(&self) -> &str;

    /// 边界面数量
    #[inline]
    fn size(&self) -> usize {
        self.patch().size()
    }

    /// 自上次 `evaluate` 以来是否已更新
    fn updated(&self) -> bool;

    /// 更新系数
    fn update_coeffs(&mut self, ctx: &UpdateContext<'_, T>) -> RfResult<()>;

    /// 值系数（内侧）
    fn value_internal_coeffs(&self) -> RfResult<Vec<T>>;

    /// 值系数（边界源项）
    fn value_boundary_coeffs(&self) -> RfResult<Vec<T>>;

    /// 梯度系数（内侧）
    fn gradient_internal_coeffs(&self) -> RfResult<Vec<T>>;

    /// 梯度系数（边界源项）
    fn gradient_boundary_coeffs(&self) -> RfResult<Vec<T>>;

    /// 法向梯度（使用最近一次更新时的内侧值）
    fn sn_grad(&self) -> RfResult<Vec<T>>;

    /// 计算并保存边界面值
    fn evaluate(&mut self) -> RfResult<()>;

    /// 当前边界面值
    fn values(&self) -> &[T];
}

/// 拓扑变化时的映射操作
pub trait PatchMapping: Sized + Clone {
    /// 绑定到新边界并按映射器重建逐面数组
    ///
    /// 映射器尺寸必须等于新边界面数。
    fn auto_map(
        &mut self,
        patch: Arc<dyn BoundaryPatch>,
        mapper: &dyn PatchFieldMapper,
    ) -> RfResult<()>;

    /// 反向映射：`self[addressing[i]] = other[i]`
    fn rmap(&mut self, other: &Self, addressing: &[usize]) -> RfResult<()>;

    /// 复制并改为引用另一个内部场
    fn clone_for_field(&self, field_name: &str) -> Self;

    /// 映射到新边界，返回新实例
    fn map_onto(
        &self,
        patch: Arc<dyn BoundaryPatch>,
        mapper: &dyn PatchFieldMapper,
    ) -> RfResult<Self> {
        let mut mapped = self.clone();
        mapped.auto_map(patch, mapper)?;
        Ok(mapped)
    }
}
