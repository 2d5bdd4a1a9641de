// crates/rf_physics/src/boundary/ghost_robin.rs

//! 幽灵点 Robin 边界条件
//!
//! 在边界外虚拟一个幽灵点 G，使边界面值取内侧单元 C 与 G 的平均，
//! 再由 Robin 平衡 `K·P - D·∂φ/∂n + F = 0` 消去 G，得到隐式离散所需的
//! 四个系数（代数见 [`super::robin`]）。
//!
//! # 状态
//!
//! - 逐面参数 D, K, F：只在 `update_coeffs` 或显式 setter 中修改
//! - 惰性面标记：被标记的面四个系数恒为零，跳过代数
//! - 最近一次更新时的内侧单元值：供 `sn_grad` / `evaluate` 使用
//!
//! 系数访问器不修改状态，每次返回新数组；参数退化时返回错误，
//! 不会把 NaN/Inf 交给装配器。

use std::sync::Arc;

use rf_foundation::{ensure, FieldValue, RfError, RfResult};

use super::config::{FieldSpec, RobinPatchConfig};
use super::mapper::{check_rmap, map_flags, map_values, PatchFieldMapper};
use super::robin::{GhostCoefficients, RobinParameters, DEFAULT_SINGULAR_TOLERANCE};
use super::traits::{PatchMapping, RobinCoefficientProvider, UpdateContext};
use crate::mesh::BoundaryPatch;
use crate::parallel::{map_faces, DEFAULT_PARALLEL_THRESHOLD};

/// 幽灵点 Robin 边界
#[derive(Debug, Clone)]
pub struct GhostRobinBoundary<T: FieldValue> {
    patch: Arc<dyn BoundaryPatch>,
    field_name: String,
    params: RobinParameters<T>,
    inert: Vec<bool>,
    values: Vec<T>,
    patch_internal: Vec<T>,
    updated: bool,
    singular_tolerance: f64,
}

impl<T: FieldValue> GhostRobinBoundary<T> {
    /// 类型标签
    pub const TYPE_NAME: &'static str = "ghostRobin";

    /// 参数全零的边界
    pub fn new(patch: Arc<dyn BoundaryPatch>, field_name: impl Into<String>) -> Self {
        let n = patch.size();
        let field_name = field_name.into();
        log::debug!(
            "{}: 边界 '{}' 场 '{}' 创建, {} 个面",
            Self::TYPE_NAME,
            patch.name(),
            field_name,
            n
        );
        Self {
            patch,
            field_name,
            params: RobinParameters::zeros(n),
            inert: vec![false; n],
            values: vec![T::zero(); n],
            patch_internal: Vec::new(),
            updated: false,
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }

    /// 从配置创建
    pub fn from_config(
        patch: Arc<dyn BoundaryPatch>,
        field_name: impl Into<String>,
        config: &RobinPatchConfig<T>,
    ) -> RfResult<Self> {
        let n = patch.size();
        let params = RobinParameters {
            d: config.robin_d.expand("RobinD", n)?,
            k: config.robin_k.expand("RobinK", n)?,
            f: config.robin_f.expand("RobinF", n)?,
        };
        let values = match &config.value {
            Some(spec) => spec.expand("value", n)?,
            None => vec![T::zero(); n],
        };
        let singular_tolerance = config.singular_tolerance_or_default()?;

        let mut bc = Self::new(patch, field_name);
        bc.params = params;
        bc.values = values;
        bc.singular_tolerance = singular_tolerance;
        Ok(bc)
    }

    /// 导出可序列化配置
    pub fn to_config(&self) -> RobinPatchConfig<T> {
        let mut config = RobinPatchConfig::new(Self::TYPE_NAME);
        self.write_parameters(&mut config, &self.params);
        config
    }

    pub(crate) fn write_parameters(&self, config: &mut RobinPatchConfig<T>, params: &RobinParameters<T>) {
        config.robin_d = FieldSpec::from_values(&params.d);
        config.robin_k = FieldSpec::from_values(&params.k);
        config.robin_f = FieldSpec::from_values(&params.f);
        config.value = Some(FieldSpec::from_values(&self.values));
        if self.singular_tolerance != DEFAULT_SINGULAR_TOLERANCE {
            config.singular_tolerance = Some(self.singular_tolerance);
        }
    }

    /// 扩散系数 D
    #[inline]
    pub fn robin_d(&self) -> &[f64] {
        &self.params.d
    }

    /// 可变扩散系数 D
    #[inline]
    pub fn robin_d_mut(&mut self) -> &mut [f64] {
        &mut self.params.d
    }

    /// 反应系数 K
    #[inline]
    pub fn robin_k(&self) -> &[f64] {
        &self.params.k
    }

    /// 可变反应系数 K
    #[inline]
    pub fn robin_k_mut(&mut self) -> &mut [f64] {
        &mut self.params.k
    }

    /// 源项 F
    #[inline]
    pub fn robin_f(&self) -> &[T] {
        &self.params.f
    }

    /// 可变源项 F
    #[inline]
    pub fn robin_f_mut(&mut self) -> &mut [T] {
        &mut self.params.f
    }

    /// 全部参数
    #[inline]
    pub fn parameters(&self) -> &RobinParameters<T> {
        &self.params
    }

    /// 设置单个面的参数
    pub fn set_parameters(&mut self, face: usize, d: f64, k: f64, f: T) -> RfResult<()> {
        self.params.set(face, d, k, f)
    }

    /// 整体替换参数
    pub fn replace_parameters(&mut self, params: RobinParameters<T>) -> RfResult<()> {
        params.check_size(self.patch.size())?;
        self.params = params;
        Ok(())
    }

    /// 惰性面标记
    #[inline]
    pub fn inert_faces(&self) -> &[bool] {
        &self.inert
    }

    /// 设置单个面是否惰性
    pub fn set_inert(&mut self, face: usize, inert: bool) -> RfResult<()> {
        RfError::check_index("PatchFace", face, self.inert.len())?;
        self.inert[face] = inert;
        Ok(())
    }

    /// 整体替换惰性面标记
    pub fn replace_inert(&mut self, inert: Vec<bool>) -> RfResult<()> {
        RfError::check_size("inertFaces", self.patch.size(), inert.len())?;
        self.inert = inert;
        Ok(())
    }

    /// 退化判定相对容差
    #[inline]
    pub fn singular_tolerance(&self) -> f64 {
        self.singular_tolerance
    }

    /// 设置退化判定相对容差
    pub fn set_singular_tolerance(&mut self, tol: f64) -> RfResult<()> {
        ensure!(
            tol.is_finite() && tol >= 0.0,
            RfError::invalid_config("singularTolerance", tol.to_string(), "必须为非负有限数")
        );
        self.singular_tolerance = tol;
        Ok(())
    }

    /// 覆盖边界面值
    pub fn set_values(&mut self, values: Vec<T>) -> RfResult<()> {
        RfError::check_size("patchValues", self.patch.size(), values.len())?;
        self.values = values;
        Ok(())
    }

    /// 最近一次更新保存的内侧单元值
    #[inline]
    pub fn patch_internal(&self) -> &[T] {
        &self.patch_internal
    }

    /// 逐面系数
    pub fn face_coefficients(&self) -> RfResult<Vec<GhostCoefficients>> {
        let n = self.patch.size();
        self.params.check_size(n)?;
        RfError::check_size("inertFaces", n, self.inert.len())?;
        let dn = self.patch.normal_distances();
        RfError::check_size("normalDistances", n, dn.len())?;

        let tol = self.singular_tolerance;
        let result = map_faces(n, DEFAULT_PARALLEL_THRESHOLD, |i| {
            if self.inert[i] {
                Ok(GhostCoefficients::INERT)
            } else {
                GhostCoefficients::compute(i, self.params.d[i], self.params.k[i], dn[i], tol)
            }
        });
        if let Err(e) = &result {
            log::warn!(
                "{}: 边界 '{}' 场 '{}' 系数计算失败: {}",
                Self::TYPE_NAME,
                self.patch.name(),
                self.field_name,
                e
            );
        }
        result
    }

    fn scaled_source(
        &self,
        quantity: &'static str,
        pick: impl Fn(&GhostCoefficients) -> f64,
    ) -> RfResult<Vec<T>> {
        let coeffs = self.face_coefficients()?;
        coeffs
            .iter()
            .zip(&self.params.f)
            .enumerate()
            .map(|(i, (c, &f))| {
                let v = f.scale(pick(c));
                ensure!(v.is_finite(), RfError::non_finite(quantity, i));
                Ok(v)
            })
            .collect()
    }

    fn stored_internal(&self) -> RfResult<&[T]> {
        RfError::check_size(
            "patchInternalField",
            self.patch.size(),
            self.patch_internal.len(),
        )?;
        Ok(&self.patch_internal)
    }

    fn combine(
        &self,
        quantity: &'static str,
        internal: impl Fn(&GhostCoefficients) -> f64,
        source: impl Fn(&GhostCoefficients) -> f64,
    ) -> RfResult<Vec<T>> {
        let cells = self.stored_internal()?;
        let coeffs = self.face_coefficients()?;
        coeffs
            .iter()
            .zip(cells)
            .zip(&self.params.f)
            .enumerate()
            .map(|(i, ((c, &cell), &f))| {
                let v = cell.scale(internal(c)) + f.scale(source(c));
                ensure!(v.is_finite(), RfError::non_finite(quantity, i));
                Ok(v)
            })
            .collect()
    }
}

impl<T: FieldValue> RobinCoefficientProvider<T> for GhostRobinBoundary<T> {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn patch(&self) -> &Arc<dyn BoundaryPatch> {
        &self.patch
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn updated(&self) -> bool {
        self.updated
    }

    fn update_coeffs(&mut self, ctx: &UpdateContext<'_, T>) -> RfResult<()> {
        RfError::check_size(
            "patchInternalField",
            self.patch.size(),
            ctx.patch_internal.len(),
        )?;
        self.patch_internal.clear();
        self.patch_internal.extend_from_slice(ctx.patch_internal);
        self.updated = true;
        Ok(())
    }

    fn value_internal_coeffs(&self) -> RfResult<Vec<T>> {
        Ok(self
            .face_coefficients()?
            .iter()
            .map(|c| T::splat(c.value_internal))
            .collect())
    }

    fn value_boundary_coeffs(&self) -> RfResult<Vec<T>> {
        self.scaled_source("valueBoundaryCoeffs", |c| c.value_source)
    }

    fn gradient_internal_coeffs(&self) -> RfResult<Vec<T>> {
        Ok(self
            .face_coefficients()?
            .iter()
            .map(|c| T::splat(c.gradient_internal))
            .collect())
    }

    fn gradient_boundary_coeffs(&self) -> RfResult<Vec<T>> {
        self.scaled_source("gradientBoundaryCoeffs", |c| c.gradient_source)
    }

    fn sn_grad(&self) -> RfResult<Vec<T>> {
        self.combine("snGrad", |c| c.gradient_internal, |c| c.gradient_source)
    }

    fn evaluate(&mut self) -> RfResult<()> {
        self.values = self.combine("patchValue", |c| c.value_internal, |c| c.value_source)?;
        self.updated = false;
        Ok(())
    }

    fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: FieldValue> PatchMapping for GhostRobinBoundary<T> {
    fn auto_map(
        &mut self,
        patch: Arc<dyn BoundaryPatch>,
        mapper: &dyn PatchFieldMapper,
    ) -> RfResult<()> {
        RfError::check_size("mapper", patch.size(), mapper.size())?;
        let params = self.params.mapped(mapper)?;
        let inert = map_flags(mapper, &self.inert)?;
        let values = map_values(mapper, &self.values)?;

        log::debug!(
            "{}: 场 '{}' 从边界 '{}' ({} 面) 映射到 '{}' ({} 面)",
            Self::TYPE_NAME,
            self.field_name,
            self.patch.name(),
            self.patch.size(),
            patch.name(),
            patch.size()
        );
        self.patch = patch;
        self.params = params;
        self.inert = inert;
        self.values = values;
        self.patch_internal.clear();
        self.updated = false;
        Ok(())
    }

    fn rmap(&mut self, other: &Self, addressing: &[usize]) -> RfResult<()> {
        let n = self.patch.size();
        self.params.check_size(n)?;
        other.params.check_size(other.patch.size())?;
        check_rmap(n, other.patch.size(), addressing)?;
        check_rmap(self.inert.len(), other.inert.len(), addressing)?;
        check_rmap(self.values.len(), other.values.len(), addressing)?;

        self.params.rmap_from(&other.params, addressing)?;
        for (&a, (&flag, &v)) in addressing.iter().zip(other.inert.iter().zip(&other.values)) {
            self.inert[a] = flag;
            self.values[a] = v;
        }
        self.updated = false;
        Ok(())
    }

    fn clone_for_field(&self, field_name: &str) -> Self {
        let mut copy = self.clone();
        copy.field_name = field_name.to_string();
        copy
    }
}
