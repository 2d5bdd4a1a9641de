// crates/rf_physics/src/fields.rs

//! 字段注册与按名查找
//!
//! 边界条件在更新时需要按名称读取其它场在本边界上的值（通量 `phi`、
//! 密度 `rho`）。本模块提供：
//!
//! - [`FieldLookup`]: 按名称 + 边界取边界值的只读接口
//! - [`FieldRegistry`]: 内存注册表，持有场数据及元数据
//!
//! # 设计原则
//!
//! 1. **元数据驱动**：字段携带类型、位置、单位信息，查找时据此分派
//! 2. **名称验证**：字段名必须以字母开头，仅含字母、数字、`_`、`.`
//! 3. **注册顺序稳定**：重复注册替换数据但保留原顺序
//!
//! # 示例
//!
//! ```rust
//! use rf_physics::fields::{FieldLookup, FieldRegistry, FieldKind};
//! use rf_physics::field::FaceField;
//! use rf_physics::mesh::{FvMesh, StaticMesh};
//!
//! let mesh = StaticMesh::line(3, 1.0).unwrap();
//! let mut registry = FieldRegistry::new();
//! registry.register_face_scalar(FaceField::uniform("phi", &mesh, 2.0)).unwrap();
//!
//! let right = mesh.find_patch("right").unwrap();
//! assert_eq!(registry.field_kind("phi"), Some(FieldKind::Scalar));
//! assert_eq!(registry.patch_scalar("phi", right.as_ref()).unwrap(), &[2.0]);
//! ```

use std::collections::HashMap;

use glam::DVec3;
use rf_foundation::{RfError, RfResult};
use serde::{Deserialize, Serialize};

use crate::field::{CellField, FaceField};
use crate::mesh::BoundaryPatch;

/// 字段数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// 标量场
    Scalar,
    /// 三维向量场
    Vector,
}

impl FieldKind {
    /// 类型名称
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vector => "vector",
        }
    }
}

/// 字段存储位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldLocation {
    /// 单元中心
    #[default]
    Cell,
    /// 面中心（通量）
    Face,
}

/// 字段元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// 字段名称
    pub name: String,
    /// 数据类型
    pub kind: FieldKind,
    /// 存储位置
    #[serde(default)]
    pub location: FieldLocation,
    /// 物理单位
    #[serde(default)]
    pub unit: String,
    /// 描述文本
    #[serde(default)]
    pub description: String,
}

impl FieldMeta {
    fn new(name: &str, kind: FieldKind, location: FieldLocation) -> Self {
        Self {
            name: name.to_string(),
            kind,
            location,
            unit: String::new(),
            description: String::new(),
        }
    }
}

/// 按名称读取边界值
pub trait FieldLookup: Send + Sync {
    /// 字段类型，未注册返回 `None`
    fn field_kind(&self, field: &str) -> Option<FieldKind>;

    /// 标量场在边界上的值
    fn patch_scalar(&self, field: &str, patch: &dyn BoundaryPatch) -> RfResult<&[f64]>;

    /// 向量场在边界上的值
    fn patch_vector(&self, field: &str, patch: &dyn BoundaryPatch) -> RfResult<&[DVec3]>;
}

#[derive(Debug, Clone)]
enum FieldData {
    CellScalar(CellField<f64>),
    CellVector(CellField<DVec3>),
    FaceScalar(FaceField<f64>),
    FaceVector(FaceField<DVec3>),
}

#[derive(Debug, Clone)]
struct RegisteredField {
    meta: FieldMeta,
    data: FieldData,
}

/// 验证字段名
///
/// # 规则
/// - 必须以 ASCII 字母开头
/// - 仅允许字母、数字、下划线 `_` 与点 `.`
fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// 字段注册表
///
/// 持有场数据，供边界条件在更新系数时按名称查找。
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashMap<String, RegisteredField>,
    order: Vec<String>,
}

impl FieldRegistry {
    /// 创建空注册表
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, meta: FieldMeta, data: FieldData) -> RfResult<()> {
        let name = meta.name.clone();
        if !is_valid_field_name(&name) {
            return Err(RfError::invalid_config(
                "field",
                name,
                "字段名必须以字母开头，仅含字母、数字、'_'、'.'",
            ));
        }

        if let Some(slot) = self.fields.get_mut(&name) {
            log::debug!("字段 '{}' 已存在，替换数据", name);
            *slot = RegisteredField { meta, data };
            return Ok(());
        }

        self.order.push(name.clone());
        self.fields.insert(name, RegisteredField { meta, data });
        Ok(())
    }

    /// 注册单元标量场
    pub fn register_cell_scalar(&mut self, field: CellField<f64>) -> RfResult<()> {
        let meta = FieldMeta::new(field.name(), FieldKind::Scalar, FieldLocation::Cell);
        self.insert(meta, FieldData::CellScalar(field))
    }

    /// 注册单元向量场
    pub fn register_cell_vector(&mut self, field: CellField<DVec3>) -> RfResult<()> {
        let meta = FieldMeta::new(field.name(), FieldKind::Vector, FieldLocation::Cell);
        self.insert(meta, FieldData::CellVector(field))
    }

    /// 注册面标量场（体积通量）
    pub fn register_face_scalar(&mut self, field: FaceField<f64>) -> RfResult<()> {
        let meta = FieldMeta::new(field.name(), FieldKind::Scalar, FieldLocation::Face);
        self.insert(meta, FieldData::FaceScalar(field))
    }

    /// 注册面向量场（面速度）
    pub fn register_face_vector(&mut self, field: FaceField<DVec3>) -> RfResult<()> {
        let meta = FieldMeta::new(field.name(), FieldKind::Vector, FieldLocation::Face);
        self.insert(meta, FieldData::FaceVector(field))
    }

    /// 为已注册字段补充单位和描述
    pub fn describe(
        &mut self,
        name: &str,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> RfResult<()> {
        let entry = self
            .fields
            .get_mut(name)
            .ok_or_else(|| RfError::field_not_found(name, "*"))?;
        entry.meta.unit = unit.into();
        entry.meta.description = description.into();
        Ok(())
    }

    /// 移除字段
    pub fn remove(&mut self, name: &str) -> bool {
        if self.fields.remove(name).is_some() {
            self.order.retain(|n| n != name);
            true
        } else {
            false
        }
    }

    /// 字段元数据
    #[inline]
    pub fn meta(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.get(name).map(|f| &f.meta)
    }

    /// 检查字段是否存在
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// 所有字段名（按注册顺序）
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// 字段数量
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn entry(&self, field: &str, patch: &dyn BoundaryPatch) -> RfResult<&RegisteredField> {
        self.fields
            .get(field)
            .ok_or_else(|| RfError::field_not_found(field, patch.name()))
    }
}

fn checked<'a, T>(values: &'a [T], field: &str, patch: &dyn BoundaryPatch) -> RfResult<&'a [T]> {
    if values.len() != patch.size() {
        log::warn!(
            "字段 '{}' 在边界 '{}' 上有 {} 个值，边界有 {} 个面",
            field,
            patch.name(),
            values.len(),
            patch.size()
        );
        return Err(RfError::size_mismatch("patchField", patch.size(), values.len()));
    }
    Ok(values)
}

impl FieldLookup for FieldRegistry {
    fn field_kind(&self, field: &str) -> Option<FieldKind> {
        self.fields.get(field).map(|f| f.meta.kind)
    }

    fn patch_scalar(&self, field: &str, patch: &dyn BoundaryPatch) -> RfResult<&[f64]> {
        let entry = self.entry(field, patch)?;
        let values: &[f64] = match &entry.data {
            FieldData::CellScalar(f) => &f.patch(patch.index())?.values,
            FieldData::FaceScalar(f) => f.patch(patch.index())?,
            FieldData::CellVector(_) | FieldData::FaceVector(_) => {
                return Err(RfError::field_type_mismatch(field, "scalar", "vector"));
            }
        };
        checked(values, field, patch)
    }

    fn patch_vector(&self, field: &str, patch: &dyn BoundaryPatch) -> RfResult<&[DVec3]> {
        let entry = self.entry(field, patch)?;
        let values: &[DVec3] = match &entry.data {
            FieldData::CellVector(f) => &f.patch(patch.index())?.values,
            FieldData::FaceVector(f) => f.patch(patch.index())?,
            FieldData::CellScalar(_) | FieldData::FaceScalar(_) => {
                return Err(RfError::field_type_mismatch(field, "vector", "scalar"));
            }
        };
        checked(values, field, patch)
    }
}
