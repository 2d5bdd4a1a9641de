// crates/rf_physics/src/interpolation/upwind_max.rs

//! 迎风取大插值 (`hinderedDiffusion`)
//!
//! 面值取两侧单元值中较大者：
//!
//! - 内部面：`φ_o > φ_n` 时取 φ_o，否则取 φ_n（相等时取 φ_n）
//! - 耦合边界：内侧值与邻居侧值取大
//! - 非耦合边界：沿用边界值
//!
//! 向量与张量按分量字典序比较（见 [`FieldValue::upwind_cmp`]）。
//! 常用于阻滞扩散因子：扩散在两侧中阻滞较弱的一侧起控制作用。

use rf_foundation::{FieldValue, RfError, RfResult};

use super::traits::{weights_unsupported, DirectInterpolationScheme, SurfaceInterpolationScheme};
use crate::field::{CellField, FaceField};
use crate::mesh::FvMesh;
use crate::parallel::{map_faces_infallible, DEFAULT_PARALLEL_THRESHOLD};

/// 迎风取大格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpwindMax;

impl UpwindMax {
    /// 注册表标签
    pub const TYPE_NAME: &'static str = "hinderedDiffusion";

    /// 创建格式
    pub fn new() -> Self {
        Self
    }
}

impl<T: FieldValue> DirectInterpolationScheme<T> for UpwindMax {
    fn name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn interpolate(&self, mesh: &dyn FvMesh, field: &CellField<T>) -> RfResult<FaceField<T>> {
        field.validate(mesh)?;
        let owner = mesh.owner();
        let neighbour = mesh.neighbour();
        let vf = field.internal();

        let internal = map_faces_infallible(
            mesh.n_internal_faces(),
            DEFAULT_PARALLEL_THRESHOLD,
            |f| vf[owner[f]].upwind_max(vf[neighbour[f]]),
        );

        let mut boundary = Vec::with_capacity(mesh.patches().len());
        for (patch, values) in mesh.patches().iter().zip(field.boundary()) {
            if patch.is_coupled() {
                let nbr = values
                    .neighbour
                    .as_ref()
                    .ok_or_else(|| {
                        log::warn!("耦合边界 '{}' 缺少邻居侧值", patch.name());
                        RfError::coupled_values_missing(patch.name())
                    })?;
                let own = field.patch_internal_field(patch.as_ref())?;
                boundary.push(
                    own.iter()
                        .zip(nbr)
                        .map(|(&pi, &pn)| pi.upwind_max(pn))
                        .collect(),
                );
            } else {
                boundary.push(values.values.clone());
            }
        }

        Ok(FaceField::new(
            format!("{}({})", Self::TYPE_NAME, field.name()),
            internal,
            boundary,
        ))
    }
}

impl<T: FieldValue> SurfaceInterpolationScheme<T> for UpwindMax {
    fn supports_weights(&self) -> bool {
        false
    }

    fn weights(&self, _mesh: &dyn FvMesh, _field: &CellField<T>) -> FaceField<f64> {
        weights_unsupported(Self::TYPE_NAME)
    }
}
