// crates/rf_physics/src/interpolation/linear.rs

//! 线性插值
//!
//! 内部面：`φ_f = w·φ_o + (1-w)·φ_n`，w 取网格权重。
//!
//! 边界面：
//! - 耦合边界：`w_p·φ_内侧 + (1-w_p)·φ_邻居`
//! - 非耦合边界：直接沿用边界值
//!
//! 反向线性（`ReverseLinear`）在内部面和耦合边界上使用 `1-w`，
//! 即把较大权重给较远的单元。调和平均格式在倒数空间内默认使用它。

use rf_foundation::{FieldValue, RfError, RfResult};
use serde::{Deserialize, Serialize};

use super::traits::{DirectInterpolationScheme, SurfaceInterpolationScheme};
use crate::field::{CellField, FaceField};
use crate::mesh::FvMesh;
use crate::parallel::{map_faces_infallible, DEFAULT_PARALLEL_THRESHOLD};

/// 权重取法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinearWeighting {
    /// 网格权重 w
    #[default]
    Linear,
    /// 反向权重 1-w
    ReverseLinear,
}

impl LinearWeighting {
    #[inline]
    fn apply(self, w: f64) -> f64 {
        match self {
            Self::Linear => w,
            Self::ReverseLinear => 1.0 - w,
        }
    }
}

/// 线性插值格式
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearInterpolation {
    weighting: LinearWeighting,
}

impl LinearInterpolation {
    /// 正向线性插值
    pub fn new() -> Self {
        Self::default()
    }

    /// 反向线性插值
    pub fn reverse() -> Self {
        Self {
            weighting: LinearWeighting::ReverseLinear,
        }
    }

    /// 指定权重取法
    pub fn with_weighting(weighting: LinearWeighting) -> Self {
        Self { weighting }
    }

    /// 权重取法
    pub fn weighting(&self) -> LinearWeighting {
        self.weighting
    }
}

/// 按权重取法做线性插值
pub(crate) fn blend<T: FieldValue>(
    mesh: &dyn FvMesh,
    field: &CellField<T>,
    weighting: LinearWeighting,
    name: &str,
) -> RfResult<FaceField<T>> {
    field.validate(mesh)?;
    let owner = mesh.owner();
    let neighbour = mesh.neighbour();
    let w = mesh.weights();
    let vf = field.internal();

    let internal = map_faces_infallible(mesh.n_internal_faces(), DEFAULT_PARALLEL_THRESHOLD, |f| {
        let wf = weighting.apply(w[f]);
        vf[owner[f]].scale(wf) + vf[neighbour[f]].scale(1.0 - wf)
    });

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
            let pw = patch.weights();
            RfError::check_size("patchWeights", patch.size(), pw.len())?;
            boundary.push(
                own.iter()
                    .zip(nbr)
                    .zip(pw)
                    .map(|((&pi, &pn), &wp)| {
                        let wf = weighting.apply(wp);
                        pi.scale(wf) + pn.scale(1.0 - wf)
                    })
                    .collect(),
            );
        } else {
            boundary.push(values.values.clone());
        }
    }

    Ok(FaceField::new(
        format!("{}({})", name, field.name()),
        internal,
        boundary,
    ))
}

/// 插值权重场
pub(crate) fn blend_weights(mesh: &dyn FvMesh, weighting: LinearWeighting) -> FaceField<f64> {
    let internal = mesh.weights().iter().map(|&w| weighting.apply(w)).collect();
    let boundary = mesh
        .patches()
        .iter()
        .map(|p| {
            if p.is_coupled() {
                p.weights().iter().map(|&w| weighting.apply(w)).collect()
            } else {
                vec![1.0; p.size()]
            }
        })
        .collect();
    FaceField::new("weights", internal, boundary)
}

impl<T: FieldValue> DirectInterpolationScheme<T> for LinearInterpolation {
    fn name(&self) -> &'static str {
        match self.weighting {
            LinearWeighting::Linear => "linear",
            LinearWeighting::ReverseLinear => "reverseLinear",
        }
    }

    fn interpolate(&self, mesh: &dyn FvMesh, field: &CellField<T>) -> RfResult<FaceField<T>> {
        let name = <Self as DirectInterpolationScheme<T>>::name(self);
        blend(mesh, field, self.weighting, name)
    }
}

impl<T: FieldValue> SurfaceInterpolationScheme<T> for LinearInterpolation {
    fn supports_weights(&self) -> bool {
        true
    }

    fn weights(&self, mesh: &dyn FvMesh, _field: &CellField<T>) -> FaceField<f64> {
        blend_weights(mesh, self.weighting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{StaticMesh, StaticPatch};

    #[test]
    fn test_linear_internal_faces() {
        let mesh = StaticMesh::line(3, 1.0).unwrap();
        let field = CellField::from_internal("c", &mesh, vec![1.0f64, 3.0, 7.0]).unwrap();
        let face = LinearInterpolation::new().interpolate(&mesh, &field).unwrap();
        assert_eq!(face.internal(), &[2.0, 5.0]);
        // 非耦合边界沿用边界值
        assert_eq!(face.patch(0).unwrap(), &[1.0]);
        assert_eq!(face.patch(1).unwrap(), &[7.0]);
    }

    #[test]
    fn test_reverse_weights() {
        let p = StaticPatch::new("wall", vec![0], vec![0.5]).unwrap();
        let mesh = StaticMesh::new(2, vec![0], vec![1], vec![0.75], vec![p]).unwrap();
        let field = CellField::from_internal("c", &mesh, vec![4.0f64, 8.0]).unwrap();

        let fwd = LinearInterpolation::new().interpolate(&mesh, &field).unwrap();
        let rev = LinearInterpolation::reverse().interpolate(&mesh, &field).unwrap();
        assert!((fwd.internal()[0] - 5.0).abs() < 1e-14);
        assert!((rev.internal()[0] - 7.0).abs() < 1e-14);

        let w = SurfaceInterpolationScheme::<f64>::weights(&LinearInterpolation::reverse(), &mesh, &field);
        assert!((w.internal()[0] - 0.25).abs() < 1e-14);
        assert_eq!(w.patch(0).unwrap(), &[1.0]);
    }

    #[test]
    fn test_coupled_patch_requires_neighbour() {
        let p = StaticPatch::new("proc", vec![1], vec![0.5])
            .unwrap()
            .coupled(vec![0.5])
            .unwrap();
        let mesh = StaticMesh::new(2, vec![0], vec![1], vec![0.5], vec![p]).unwrap();
        let mut field = CellField::from_internal("c", &mesh, vec![1.0f64, 2.0]).unwrap();
        assert!(matches!(
            LinearInterpolation::new().interpolate(&mesh, &field),
            Err(RfError::CoupledValuesMissing { .. })
        ));

        field.set_neighbour_values(0, vec![6.0]).unwrap();
        let face = LinearInterpolation::new().interpolate(&mesh, &field).unwrap();
        assert!((face.patch(0).unwrap()[0] - 4.0).abs() < 1e-14);
    }

    #[test]
    fn test_coupled_patch_reads_adjacent_cells() {
        let p = StaticPatch::new("proc", vec![1], vec![0.5])
            .unwrap()
            .coupled(vec![0.5])
            .unwrap();
        let mesh = StaticMesh::new(2, vec![0], vec![1], vec![0.5], vec![p]).unwrap();
        let mut field = CellField::from_internal("c", &mesh, vec![1.0f64, 2.0]).unwrap();
        field.set_patch_values(0, vec![50.0]).unwrap();
        field.set_neighbour_values(0, vec![6.0]).unwrap();
        let face = LinearInterpolation::new().interpolate(&mesh, &field).unwrap();
        // 0.5·2 + 0.5·6，与覆盖的边界值无关
        assert!((face.patch(0).unwrap()[0] - 4.0).abs() < 1e-14);
    }
}
