// crates/rf_physics/src/field.rs

//! 单元场与面场容器
//!
//! - [`CellField`]: 单元中心值 + 每个边界的边界值（耦合边界额外携带邻居侧值）
//! - [`FaceField`]: 内部面值 + 每个边界的面值
//!
//! 两者只是数据容器，数值格式与边界条件在其它模块中实现。

use rf_foundation::{FieldValue, RfError, RfResult};

use crate::mesh::{BoundaryPatch, FvMesh};

/// 单个边界上的场值
#[derive(Debug, Clone, PartialEq)]
pub struct PatchValues<T> {
    /// 边界面上的值（耦合边界为内侧单元值）
    pub values: Vec<T>,
    /// 耦合边界邻居侧的值
    pub neighbour: Option<Vec<T>>,
}

impl<T: FieldValue> PatchValues<T> {
    /// 非耦合边界值
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            neighbour: None,
        }
    }

    /// 耦合边界值
    pub fn coupled(values: Vec<T>, neighbour: Vec<T>) -> Self {
        Self {
            values,
            neighbour: Some(neighbour),
        }
    }

    /// 面数量
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 单元中心场
#[derive(Debug, Clone, PartialEq)]
pub struct CellField<T> {
    name: String,
    internal: Vec<T>,
    boundary: Vec<PatchValues<T>>,
}

impl<T: FieldValue> CellField<T> {
    /// 从完整数据创建，并按网格校验尺寸
    pub fn new(
        name: impl Into<String>,
        mesh: &dyn FvMesh,
        internal: Vec<T>,
        boundary: Vec<PatchValues<T>>,
    ) -> RfResult<Self> {
        let field = Self {
            name: name.into(),
            internal,
            boundary,
        };
        field.validate(mesh)?;
        Ok(field)
    }

    /// 全场均匀值
    pub fn uniform(name: impl Into<String>, mesh: &dyn FvMesh, value: T) -> Self {
        let boundary = mesh
            .patches()
            .iter()
            .map(|p| {
                let values = vec![value; p.size()];
                if p.is_coupled() {
                    PatchValues::coupled(values.clone(), values)
                } else {
                    PatchValues::new(values)
                }
            })
            .collect();
        Self {
            name: name.into(),
            internal: vec![value; mesh.n_cells()],
            boundary,
        }
    }

    /// 由单元值创建，边界值取相邻单元值（零梯度）
    ///
    /// 耦合边界的邻居侧值需通过 [`CellField::set_neighbour_values`] 补充。
    pub fn from_internal(
        name: impl Into<String>,
        mesh: &dyn FvMesh,
        internal: Vec<T>,
    ) -> RfResult<Self> {
        RfError::check_size("internalField", mesh.n_cells(), internal.len())?;
        let boundary = mesh
            .patches()
            .iter()
            .map(|p| gather(p.as_ref(), &internal).map(PatchValues::new))
            .collect::<RfResult<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            internal,
            boundary,
        })
    }

    /// 字段名
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 单元值
    #[inline]
    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    /// 可变单元值
    #[inline]
    pub fn internal_mut(&mut self) -> &mut [T] {
        &mut self.internal
    }

    /// 全部边界值
    #[inline]
    pub fn boundary(&self) -> &[PatchValues<T>] {
        &self.boundary
    }

    /// 指定边界的值
    pub fn patch(&self, patch_index: usize) -> RfResult<&PatchValues<T>> {
        RfError::check_index("Patch", patch_index, self.boundary.len())?;
        Ok(&self.boundary[patch_index])
    }

    /// 覆盖指定边界面值
    pub fn set_patch_values(&mut self, patch_index: usize, values: Vec<T>) -> RfResult<()> {
        RfError::check_index("Patch", patch_index, self.boundary.len())?;
        let slot = &mut self.boundary[patch_index];
        RfError::check_size("patchValues", slot.values.len(), values.len())?;
        slot.values = values;
        Ok(())
    }

    /// 设置耦合边界邻居侧的值
    pub fn set_neighbour_values(&mut self, patch_index: usize, values: Vec<T>) -> RfResult<()> {
        RfError::check_index("Patch", patch_index, self.boundary.len())?;
        let slot = &mut self.boundary[patch_index];
        RfError::check_size("patchNeighbourField", slot.values.len(), values.len())?;
        slot.neighbour = Some(values);
        Ok(())
    }

    /// 边界相邻单元的值
    pub fn patch_internal_field(&self, patch: &dyn BoundaryPatch) -> RfResult<Vec<T>> {
        gather(patch, &self.internal)
    }

    /// 逐元素变换（边界值一并变换）
    pub fn map<U: FieldValue>(&self, f: impl Fn(T) -> U) -> CellField<U> {
        let apply = |v: &[T]| v.iter().map(|&x| f(x)).collect::<Vec<U>>();
        CellField {
            name: self.name.clone(),
            internal: apply(&self.internal),
            boundary: self
                .boundary
                .iter()
                .map(|p| PatchValues {
                    values: apply(&p.values),
                    neighbour: p.neighbour.as_deref().map(apply),
                })
                .collect(),
        }
    }

    /// 按网格校验尺寸
    pub fn validate(&self, mesh: &dyn FvMesh) -> RfResult<()> {
        RfError::check_size("internalField", mesh.n_cells(), self.internal.len())?;
        RfError::check_size("boundaryField", mesh.patches().len(), self.boundary.len())?;
        for (patch, values) in mesh.patches().iter().zip(&self.boundary) {
            RfError::check_size("patchValues", patch.size(), values.len())?;
            if let Some(nbr) = &values.neighbour {
                RfError::check_size("patchNeighbourField", patch.size(), nbr.len())?;
            }
        }
        Ok(())
    }
}

/// 面场
#[derive(Debug, Clone, PartialEq)]
pub struct FaceField<T> {
    name: String,
    internal: Vec<T>,
    boundary: Vec<Vec<T>>,
}

impl<T: FieldValue> FaceField<T> {
    /// 从内部面值和边界面值创建
    pub fn new(name: impl Into<String>, internal: Vec<T>, boundary: Vec<Vec<T>>) -> Self {
        Self {
            name: name.into(),
            internal,
            boundary,
        }
    }

    /// 全场均匀值
    pub fn uniform(name: impl Into<String>, mesh: &dyn FvMesh, value: T) -> Self {
        Self {
            name: name.into(),
            internal: vec![value; mesh.n_internal_faces()],
            boundary: mesh.patches().iter().map(|p| vec![value; p.size()]).collect(),
        }
    }

    /// 字段名
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 内部面值
    #[inline]
    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    /// 全部边界面值
    #[inline]
    pub fn boundary(&self) -> &[Vec<T>] {
        &self.boundary
    }

    /// 指定边界的面值
    pub fn patch(&self, patch_index: usize) -> RfResult<&[T]> {
        RfError::check_index("Patch", patch_index, self.boundary.len())?;
        Ok(&self.boundary[patch_index])
    }

    /// 可变边界面值
    pub fn patch_mut(&mut self, patch_index: usize) -> RfResult<&mut Vec<T>> {
        RfError::check_index("Patch", patch_index, self.boundary.len())?;
        Ok(&mut self.boundary[patch_index])
    }

    /// 逐元素变换
    pub fn map<U: FieldValue>(&self, f: impl Fn(T) -> U) -> FaceField<U> {
        let apply = |v: &[T]| v.iter().map(|&x| f(x)).collect::<Vec<U>>();
        FaceField {
            name: self.name.clone(),
            internal: apply(&self.internal),
            boundary: self.boundary.iter().map(|p| apply(p)).collect(),
        }
    }

    /// 按网格校验尺寸
    pub fn validate(&self, mesh: &dyn FvMesh) -> RfResult<()> {
        RfError::check_size("internalFaces", mesh.n_internal_faces(), self.internal.len())?;
        RfError::check_size("boundaryField", mesh.patches().len(), self.boundary.len())?;
        for (patch, values) in mesh.patches().iter().zip(&self.boundary) {
            RfError::check_size("patchValues", patch.size(), values.len())?;
        }
        Ok(())
    }
}

/// 按边界面-单元映射取单元值
fn gather<T: FieldValue>(patch: &dyn BoundaryPatch, internal: &[T]) -> RfResult<Vec<T>> {
    patch
        .face_cells()
        .iter()
        .map(|&c| {
            RfError::check_index("Cell", c, internal.len())?;
            Ok(internal[c])
        })
        .collect()
}
