// crates/rf_physics/src/interpolation/harmonic_zero.rs

//! 可处理零值的调和平均插值 (`harmonic0`)
//!
//! 对标量单元场 v：
//!
//! ```text
//! r     = 1 / (v + ε)          单元倒数场（边界值同样取倒数）
//! r_f   = lerp(r)              倒数空间内的线性插值
//! v_f   = 1 / r_f
//! ```
//!
//! ε 取标量类型最小正规数量级，使 v = 0 时倒数有限，面值趋于零而不产生
//! 除零。倒数空间默认使用网格线性权重；也可切换为反向线性
//! （[`LinearWeighting::ReverseLinear`]，权重 1-w）。
//!
//! 负值且接近 -ε 的单元会放大倒数，属于已知限制，不做特殊处理。

use rf_foundation::{FieldValue, RfError, RfResult, RuntimeScalar};

use super::linear::{blend, LinearWeighting};
use super::traits::{weights_unsupported, DirectInterpolationScheme, SurfaceInterpolationScheme};
use crate::field::{CellField, FaceField};
use crate::mesh::FvMesh;

/// 调和平均格式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicZero {
    epsilon: Option<f64>,
    weighting: LinearWeighting,
}

impl Default for HarmonicZero {
    fn default() -> Self {
        Self {
            epsilon: None,
            weighting: LinearWeighting::Linear,
        }
    }
}

impl HarmonicZero {
    /// 注册表标签
    pub const TYPE_NAME: &'static str = "harmonic0";

    /// 默认格式（ε 取类型最小正规数，线性权重）
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定正则化小量
    pub fn with_epsilon(mut self, epsilon: f64) -> RfResult<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(RfError::invalid_config(
                "epsilon",
                epsilon.to_string(),
                "必须为有限正数",
            ));
        }
        self.epsilon = Some(epsilon);
        Ok(self)
    }

    /// 指定倒数空间的权重取法
    pub fn with_weighting(mut self, weighting: LinearWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// 权重取法
    pub fn weighting(&self) -> LinearWeighting {
        self.weighting
    }

    /// 标量类型 S 下的 ε
    pub fn epsilon<S: RuntimeScalar>(&self) -> S {
        match self.epsilon {
            Some(eps) => S::from_config(eps).max(S::MIN_POSITIVE),
            None => S::MIN_POSITIVE,
        }
    }
}

impl<S> DirectInterpolationScheme<S> for HarmonicZero
where
    S: RuntimeScalar + FieldValue,
{
    fn name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn interpolate(&self, mesh: &dyn FvMesh, field: &CellField<S>) -> RfResult<FaceField<S>> {
        let eps = self.epsilon::<S>();
        let reciprocal = field.map(|v| S::ONE / (v + eps));
        let blended = blend(mesh, &reciprocal, self.weighting, Self::TYPE_NAME)?;
        let face = blended.map(|r| S::ONE / r);

        for (i, v) in face.internal().iter().enumerate() {
            if !FieldValue::is_finite(v) {
                log::warn!("harmonic0: 字段 '{}' 内部面 {} 结果非有限", field.name(), i);
                return Err(RfError::non_finite("harmonic0", i));
            }
        }
        for (patch, values) in mesh.patches().iter().zip(face.boundary()) {
            if let Some(i) = values.iter().position(|v| !FieldValue::is_finite(v)) {
                log::warn!(
                    "harmonic0: 字段 '{}' 边界 '{}' 面 {} 结果非有限",
                    field.name(),
                    patch.name(),
                    i
                );
                return Err(RfError::non_finite("harmonic0", i));
            }
        }
        log::trace!(
            "harmonic0: 字段 '{}' 插值 {} 个内部面",
            field.name(),
            face.internal().len()
        );
        Ok(face)
    }
}

impl<S> SurfaceInterpolationScheme<S> for HarmonicZero
where
    S: RuntimeScalar + FieldValue,
{
    fn supports_weights(&self) -> bool {
        false
    }

    fn weights(&self, _mesh: &dyn FvMesh, _field: &CellField<S>) -> FaceField<f64> {
        weights_unsupported(Self::TYPE_NAME)
    }
}
