// crates/rf_physics/src/mesh.rs

//! 网格访问接口
//!
//! 网格拓扑与几何由外部求解器拥有，本模块只定义核心算法需要的只读接口：
//!
//! - [`FvMesh`]: 内部面的 owner/neighbour、线性插值权重、边界列表
//! - [`BoundaryPatch`]: 单个边界的面-单元映射、法向距离 dn、单位外法向、
//!   面积、耦合标志
//!
//! 同时提供内存实现 [`StaticMesh`] / [`StaticPatch`]，用于测试和小规模
//! 直接调用。
//!
//! # 约定
//!
//! - 内部面编号 `0..n_internal_faces`，owner 与 neighbour 均为单元索引
//! - 内部面权重 w 作用于 owner：`φ_f = w·φ_o + (1-w)·φ_n`
//! - 边界距离 dn 为单元中心到面中心的法向距离，严格为正

use std::fmt::Debug;
use std::sync::Arc;

use glam::DVec3;
use rf_foundation::{ensure, RfError, RfResult};

/// 有限体积网格只读接口
pub trait FvMesh: Send + Sync {
    /// 单元数量
    fn n_cells(&self) -> usize;

    /// 内部面 owner 单元
    fn owner(&self) -> &[usize];

    /// 内部面 neighbour 单元
    fn neighbour(&self) -> &[usize];

    /// 内部面线性插值权重（作用于 owner）
    fn weights(&self) -> &[f64];

    /// 边界列表
    fn patches(&self) -> &[Arc<dyn BoundaryPatch>];

    /// 内部面数量
    #[inline]
    fn n_internal_faces(&self) -> usize {
        self.owner().len()
    }

    /// 按名称查找边界
    fn find_patch(&self, name: &str) -> Option<&Arc<dyn BoundaryPatch>> {
        self.patches().iter().find(|p| p.name() == name)
    }
}

/// 边界几何接口
pub trait BoundaryPatch: Debug + Send + Sync {
    /// 边界名称
    fn name(&self) -> &str;

    /// 边界在网格边界列表中的位置
    fn index(&self) -> usize;

    /// 边界面数量
    fn size(&self) -> usize;

    /// 每个边界面所属的内部单元
    fn face_cells(&self) -> &[usize];

    /// 单元中心到面的法向距离 dn
    fn normal_distances(&self) -> &[f64];

    /// 单位外法向
    fn unit_normals(&self) -> &[DVec3];

    /// 面积 |Sf|
    fn face_areas(&self) -> &[f64];

    /// 耦合边界的内侧插值权重
    fn weights(&self) -> &[f64];

    /// 是否为耦合边界（处理器边界、周期边界）
    fn is_coupled(&self) -> bool;
}

// ============================================================
// 内存实现
// ============================================================

/// 内存边界
#[derive(Debug, Clone)]
pub struct StaticPatch {
    name: String,
    index: usize,
    face_cells: Vec<usize>,
    distances: Vec<f64>,
    normals: Vec<DVec3>,
    areas: Vec<f64>,
    weights: Vec<f64>,
    coupled: bool,
}

impl StaticPatch {
    /// 创建非耦合边界
    ///
    /// 法向默认 +x，面积默认 1，权重默认 0.5。
    pub fn new(
        name: impl Into<String>,
        face_cells: Vec<usize>,
        distances: Vec<f64>,
    ) -> RfResult<Self> {
        RfError::check_size("normalDistances", face_cells.len(), distances.len())?;
        for (i, &dn) in distances.iter().enumerate() {
            ensure!(
                dn.is_finite() && dn > 0.0,
                RfError::invalid_input(format!("边界面 {} 的法向距离必须为正: {}", i, dn))
            );
        }
        let n = face_cells.len();
        Ok(Self {
            name: name.into(),
            index: 0,
            face_cells,
            distances,
            normals: vec![DVec3::X; n],
            areas: vec![1.0; n],
            weights: vec![0.5; n],
            coupled: false,
        })
    }

    /// 设置单位外法向
    pub fn with_normals(mut self, normals: Vec<DVec3>) -> RfResult<Self> {
        RfError::check_size("unitNormals", self.face_cells.len(), normals.len())?;
        self.normals = normals;
        Ok(self)
    }

    /// 设置面积
    pub fn with_areas(mut self, areas: Vec<f64>) -> RfResult<Self> {
        RfError::check_size("faceAreas", self.face_cells.len(), areas.len())?;
        self.areas = areas;
        Ok(self)
    }

    /// 标记为耦合边界并设置内侧权重
    pub fn coupled(mut self, weights: Vec<f64>) -> RfResult<Self> {
        RfError::check_size("patchWeights", self.face_cells.len(), weights.len())?;
        self.weights = weights;
        self.coupled = true;
        Ok(self)
    }
}

impl BoundaryPatch for StaticPatch {
    fn name(&self) -> &str {
        &self.name
    }
    fn index(&self) -> usize {
        self.index
    }
    fn size(&self) -> usize {
        self.face_cells.len()
    }
    fn face_cells(&self) -> &[usize] {
        &self.face_cells
    }
    fn normal_distances(&self) -> &[f64] {
        &self.distances
    }
    fn unit_normals(&self) -> &[DVec3] {
        &self.normals
    }
    fn face_areas(&self) -> &[f64] {
        &self.areas
    }
    fn weights(&self) -> &[f64] {
        &self.weights
    }
    fn is_coupled(&self) -> bool {
        self.coupled
    }
}

/// 内存网格
#[derive(Debug, Clone)]
pub struct StaticMesh {
    n_cells: usize,
    owner: Vec<usize>,
    neighbour: Vec<usize>,
    weights: Vec<f64>,
    patches: Vec<Arc<dyn BoundaryPatch>>,
}

impl StaticMesh {
    /// 从拓扑数组创建网格
    ///
    /// 边界按给定顺序编号。
    pub fn new(
        n_cells: usize,
        owner: Vec<usize>,
        neighbour: Vec<usize>,
        weights: Vec<f64>,
        patches: Vec<StaticPatch>,
    ) -> RfResult<Self> {
        RfError::check_size("neighbour", owner.len(), neighbour.len())?;
        RfError::check_size("weights", owner.len(), weights.len())?;
        for (&o, &n) in owner.iter().zip(&neighbour) {
            RfError::check_index("Cell", o, n_cells)?;
            RfError::check_index("Cell", n, n_cells)?;
        }

        let mut shared: Vec<Arc<dyn BoundaryPatch>> = Vec::with_capacity(patches.len());
        for (i, mut patch) in patches.into_iter().enumerate() {
            for &c in &patch.face_cells {
                RfError::check_index("Cell", c, n_cells)?;
            }
            patch.index = i;
            shared.push(Arc::new(patch));
        }

        Ok(Self {
            n_cells,
            owner,
            neighbour,
            weights,
            patches: shared,
        })
    }

    /// 一维均匀网格
    ///
    /// `n_cells` 个长度为 `dx` 的单元，左右两端各一个边界 `left` / `right`，
    /// 法向距离 dx/2。
    pub fn line(n_cells: usize, dx: f64) -> RfResult<Self> {
        ensure!(n_cells > 0, RfError::invalid_input("单元数必须为正"));
        let n_faces = n_cells - 1;
        let owner: Vec<usize> = (0..n_faces).collect();
        let neighbour: Vec<usize> = (1..n_cells).collect();
        let weights = vec![0.5; n_faces];

        let left = StaticPatch::new("left", vec![0], vec![0.5 * dx])?
            .with_normals(vec![DVec3::NEG_X])?;
        let right = StaticPatch::new("right", vec![n_cells - 1], vec![0.5 * dx])?;

        Self::new(n_cells, owner, neighbour, weights, vec![left, right])
    }
}

impl FvMesh for StaticMesh {
    fn n_cells(&self) -> usize {
        self.n_cells
    }
    fn owner(&self) -> &[usize] {
        &self.owner
    }
    fn neighbour(&self) -> &[usize] {
        &self.neighbour
    }
    fn weights(&self) -> &[f64] {
        &self.weights
    }
    fn patches(&self) -> &[Arc<dyn BoundaryPatch>] {
        &self.patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mesh() {
        let mesh = StaticMesh::line(4, 1.0).unwrap();
        assert_eq!(mesh.n_cells(), 4);
        assert_eq!(mesh.n_internal_faces(), 3);
        assert_eq!(mesh.owner(), &[0, 1, 2]);
        assert_eq!(mesh.neighbour(), &[1, 2, 3]);

        let right = mesh.find_patch("right").unwrap();
        assert_eq!(right.index(), 1);
        assert_eq!(right.face_cells(), &[3]);
        assert!((right.normal_distances()[0] - 0.5).abs() < 1e-14);
        assert!(!right.is_coupled());

        let left = mesh.find_patch("left").unwrap();
        assert_eq!(left.unit_normals()[0], DVec3::NEG_X);
    }

    #[test]
    fn test_patch_rejects_non_positive_distance() {
        assert!(StaticPatch::new("wall", vec![0, 1], vec![0.5, 0.0]).is_err());
        assert!(StaticPatch::new("wall", vec![0], vec![-1.0]).is_err());
        assert!(StaticPatch::new("wall", vec![0], vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_patch_size_checks() {
        let p = StaticPatch::new("wall", vec![0, 1], vec![0.5, 0.5]).unwrap();
        assert!(p.clone().with_areas(vec![1.0]).is_err());
        assert!(p.clone().coupled(vec![0.5, 0.5]).unwrap().is_coupled());
    }

    #[test]
    fn test_mesh_rejects_bad_cell_index() {
        let p = StaticPatch::new("wall", vec![5], vec![0.5]).unwrap();
        assert!(StaticMesh::new(2, vec![0], vec![1], vec![0.5], vec![p]).is_err());
        assert!(StaticMesh::new(2, vec![0], vec![2], vec![0.5], vec![]).is_err());
    }
}
