// crates/rf_physics/src/boundary/fixed_flux_transport.rs

//! 由通量场驱动的输运 Robin 边界
//!
//! 在 [`GhostRobinBoundary`] 之上，每次 `update_coeffs` 根据当前通量重新
//! 计算有效 Robin 参数：
//!
//! ```text
//! 通量为零的面:  D = K = F = 0，面为惰性，四个系数恒为零
//! 其余面:        D = D₀·ρ (useRho) 或 D₀
//!                K = K₀ + φn
//!                F = F₀
//! ```
//!
//! φn 为外法向通量速度：
//! - 面向量通量场：`φn = φ·n̂`
//! - 面标量通量场（体积通量 U·Sf）：`φn = φ/|Sf|`
//!
//! 配置的基准参数 (D₀, K₀, F₀) 与有效参数分开保存，反复更新不会累积。

use std::sync::Arc;

use rf_foundation::{require, RfError, RfResult};

use super::config::RobinPatchConfig;
use super::ghost_robin::GhostRobinBoundary;
use super::mapper::{check_rmap, PatchFieldMapper};
use super::robin::RobinParameters;
use super::traits::{PatchMapping, RobinCoefficientProvider, UpdateContext};
use crate::fields::{FieldKind, FieldLookup};
use crate::mesh::BoundaryPatch;

/// 默认通量场名称
pub const DEFAULT_FLUX_NAME: &str = "phi";

/// 默认密度场名称
pub const DEFAULT_RHO_NAME: &str = "rho";

/// 通量驱动的输运 Robin 边界（标量）
#[derive(Debug, Clone)]
pub struct FixedFluxTransportRobinBoundary {
    inner: GhostRobinBoundary<f64>,
    base: RobinParameters<f64>,
    phi_name: String,
    use_rho: bool,
    rho_name: String,
}

impl FixedFluxTransportRobinBoundary {
    /// 类型标签
    pub const TYPE_NAME: &'static str = "fixedFluxTransportRobin";

    /// 基准参数全零的边界
    pub fn new(patch: Arc<dyn BoundaryPatch>, field_name: impl Into<String>) -> Self {
        let n = patch.size();
        Self {
            inner: GhostRobinBoundary::new(patch, field_name),
            base: RobinParameters::zeros(n),
            phi_name: DEFAULT_FLUX_NAME.to_string(),
            use_rho: false,
            rho_name: DEFAULT_RHO_NAME.to_string(),
        }
    }

    /// 从配置创建
    pub fn from_config(
        patch: Arc<dyn BoundaryPatch>,
        field_name: impl Into<String>,
        config: &RobinPatchConfig<f64>,
    ) -> RfResult<Self> {
        let inner = GhostRobinBoundary::from_config(patch, field_name, config)?;
        let base = inner.parameters().clone();
        let bc = Self {
            inner,
            base,
            phi_name: config
                .phi
                .clone()
                .unwrap_or_else(|| DEFAULT_FLUX_NAME.to_string()),
            use_rho: config.use_rho,
            rho_name: config
                .rho
                .clone()
                .unwrap_or_else(|| DEFAULT_RHO_NAME.to_string()),
        };
        log::debug!(
            "{}: 边界 '{}' 通量场 '{}' useRho={}",
            Self::TYPE_NAME,
            bc.inner.patch().name(),
            bc.phi_name,
            bc.use_rho
        );
        Ok(bc)
    }

    /// 导出可序列化配置（写出基准参数）
    pub fn to_config(&self) -> RobinPatchConfig<f64> {
        let mut config = RobinPatchConfig::new(Self::TYPE_NAME);
        self.inner.write_parameters(&mut config, &self.base);
        config.phi = Some(self.phi_name.clone());
        config.use_rho = self.use_rho;
        if self.use_rho || self.rho_name != DEFAULT_RHO_NAME {
            config.rho = Some(self.rho_name.clone());
        }
        config
    }

    /// 设置通量场名称
    pub fn with_flux(mut self, phi_name: impl Into<String>) -> Self {
        self.phi_name = phi_name.into();
        self
    }

    /// 启用密度加权
    pub fn with_rho(mut self, rho_name: impl Into<String>) -> Self {
        self.use_rho = true;
        self.rho_name = rho_name.into();
        self
    }

    /// 通量场名称
    #[inline]
    pub fn flux_name(&self) -> &str {
        &self.phi_name
    }

    /// 是否密度加权
    #[inline]
    pub fn use_rho(&self) -> bool {
        self.use_rho
    }

    /// 密度场名称
    #[inline]
    pub fn rho_name(&self) -> &str {
        &self.rho_name
    }

    /// 基准参数 (D₀, K₀, F₀)
    #[inline]
    pub fn base_parameters(&self) -> &RobinParameters<f64> {
        &self.base
    }

    /// 设置单个面的基准参数
    pub fn set_base_parameters(&mut self, face: usize, d: f64, k: f64, f: f64) -> RfResult<()> {
        self.base.set(face, d, k, f)
    }

    /// 当前有效参数
    #[inline]
    pub fn effective_parameters(&self) -> &RobinParameters<f64> {
        self.inner.parameters()
    }

    /// 惰性面标记
    #[inline]
    pub fn inert_faces(&self) -> &[bool] {
        self.inner.inert_faces()
    }

    /// 内部的通用 Robin 边界
    #[inline]
    pub fn ghost(&self) -> &GhostRobinBoundary<f64> {
        &self.inner
    }

    /// 边界法向通量速度 φn 与原始通量值
    fn normal_flux(&self, fields: &dyn FieldLookup) -> RfResult<(Vec<f64>, Vec<bool>)> {
        let patch = self.inner.patch().as_ref();
        let n = patch.size();
        match fields.field_kind(&self.phi_name) {
            Some(FieldKind::Vector) => {
                let phi = fields.patch_vector(&self.phi_name, patch)?;
                let normals = patch.unit_normals();
                RfError::check_size("unitNormals", n, normals.len())?;
                RfError::check_size("phi", n, phi.len())?;
                let flux = phi.iter().zip(normals).map(|(p, nf)| p.dot(*nf)).collect();
                let zero = phi.iter().map(|p| p.length() == 0.0).collect();
                Ok((flux, zero))
            }
            Some(FieldKind::Scalar) => {
                let phi = fields.patch_scalar(&self.phi_name, patch)?;
                let areas = patch.face_areas();
                RfError::check_size("faceAreas", n, areas.len())?;
                RfError::check_size("phi", n, phi.len())?;
                let zero: Vec<bool> = phi.iter().map(|&p| p == 0.0).collect();
                let flux = phi
                    .iter()
                    .zip(areas)
                    .zip(&zero)
                    .map(|((&p, &a), &z)| if z { 0.0 } else { p / a })
                    .collect();
                Ok((flux, zero))
            }
            None => Err(RfError::field_not_found(&self.phi_name, patch.name())),
        }
    }
}

impl RobinCoefficientProvider<f64> for FixedFluxTransportRobinBoundary {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn patch(&self) -> &Arc<dyn BoundaryPatch> {
        self.inner.patch()
    }

    fn field_name(&self) -> &str {
        self.inner.field_name()
    }

    fn updated(&self) -> bool {
        self.inner.updated()
    }

    fn update_coeffs(&mut self, ctx: &UpdateContext<'_, f64>) -> RfResult<()> {
        let fields = require!(
            ctx.fields,
            RfError::config(format!(
                "{} 在边界 '{}' 上需要场查找接口",
                Self::TYPE_NAME,
                self.inner.patch().name()
            ))
        );
        let n = self.inner.patch().size();
        RfError::check_size("patchInternalField", n, ctx.patch_internal.len())?;
        self.base.check_size(n)?;

        let (flux, zero) = self.normal_flux(fields)?;
        let rho = if self.use_rho {
            let rho = fields.patch_scalar(&self.rho_name, self.inner.patch().as_ref())?;
            RfError::check_size("rho", n, rho.len())?;
            Some(rho)
        } else {
            None
        };

        let mut params = RobinParameters::zeros(n);
        for i in 0..n {
            if zero[i] {
                continue;
            }
            let rho_i = rho.map_or(1.0, |r| r[i]);
            params.d[i] = self.base.d[i] * rho_i;
            params.k[i] = self.base.k[i] + flux[i];
            params.f[i] = self.base.f[i];
        }

        log::trace!(
            "{}: 边界 '{}' 更新, 惰性面 {}/{}",
            Self::TYPE_NAME,
            self.inner.patch().name(),
            zero.iter().filter(|&&z| z).count(),
            n
        );

        self.inner.replace_parameters(params)?;
        self.inner.replace_inert(zero)?;
        self.inner.update_coeffs(ctx)
    }

    fn value_internal_coeffs(&self) -> RfResult<Vec<f64>> {
        self.inner.value_internal_coeffs()
    }

    fn value_boundary_coeffs(&self) -> RfResult<Vec<f64>> {
        self.inner.value_boundary_coeffs()
    }

    fn gradient_internal_coeffs(&self) -> RfResult<Vec<f64>> {
        self.inner.gradient_internal_coeffs()
    }

    fn gradient_boundary_coeffs(&self) -> RfResult<Vec<f64>> {
        self.inner.gradient_boundary_coeffs()
    }

    fn sn_grad(&self) -> RfResult<Vec<f64>> {
        self.inner.sn_grad()
    }

    fn evaluate(&mut self) -> RfResult<()> {
        self.inner.evaluate()
    }

    fn values(&self) -> &[f64] {
        self.inner.values()
    }
}

impl PatchMapping for FixedFluxTransportRobinBoundary {
    fn auto_map(
        &mut self,
        patch: Arc<dyn BoundaryPatch>,
        mapper: &dyn PatchFieldMapper,
    ) -> RfResult<()> {
        RfError::check_size("mapper", patch.size(), mapper.size())?;
        let base = self.base.mapped(mapper)?;
        self.inner.auto_map(patch, mapper)?;
        self.base = base;
        Ok(())
    }

    fn rmap(&mut self, other: &Self, addressing: &[usize]) -> RfResult<()> {
        self.base.check_size(self.inner.size())?;
        check_rmap(self.base.len(), other.base.len(), addressing)?;
        self.inner.rmap(&other.inner, addressing)?;
        self.base.rmap_from(&other.base, addressing)
    }

    fn clone_for_field(&self, field_name: &str) -> Self {
        Self {
            inner: self.inner.clone_for_field(field_name),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FaceField;
    use crate::fields::FieldRegistry;
    use crate::mesh::{FvMesh, StaticMesh, StaticPatch};
    use glam::DVec3;

    fn mesh() -> StaticMesh {
        let outlet = StaticPatch::new("outlet", vec![0, 1, 2], vec![0.5; 3])
            .unwrap()
            .with_areas(vec![2.0; 3])
            .unwrap();
        StaticMesh::new(3, vec![0, 1], vec![1, 2], vec![0.5, 0.5], vec![outlet]).unwrap()
    }

    fn bc(mesh: &StaticMesh) -> FixedFluxTransportRobinBoundary {
        let config = RobinPatchConfig::new("fixedFluxTransportRobin").with_uniform(2.0, 1.0, 3.0);
        FixedFluxTransportRobinBoundary::from_config(mesh.patches()[0].clone(), "T", &config)
            .unwrap()
    }

    #[test]
    fn test_scalar_flux() {
        let mesh = mesh();
        let mut reg = FieldRegistry::new();
        let mut phi = FaceField::uniform("phi", &mesh, 0.0);
        *phi.patch_mut(0).unwrap() = vec![0.0, 2.0, -4.0];
        reg.register_face_scalar(phi).unwrap();

        let mut bc = bc(&mesh);
        let cells = [1.0, 1.0, 1.0];
        bc.update_coeffs(&UpdateContext::new(&cells).with_fields(&reg))
            .unwrap();

        let eff = bc.effective_parameters();
        assert_eq!(bc.inert_faces(), &[true, false, false]);
        assert_eq!((eff.d[0], eff.k[0], eff.f[0]), (0.0, 0.0, 0.0));
        // φn = φ/|Sf|
        assert!((eff.k[1] - 2.0).abs() < 1e-14);
        assert!((eff.k[2] + 1.0).abs() < 1e-14);
        assert_eq!(eff.d[1], 2.0);
        assert_eq!(eff.f[2], 3.0);

        let vic = bc.value_internal_coeffs().unwrap();
        assert_eq!(vic[0], 0.0);
        assert_eq!(bc.gradient_boundary_coeffs().unwrap()[0], 0.0);
        // 面 2：r = 4, K = -1 → A = 3/5
        assert!((vic[2] - 0.8).abs() < 1e-14);

        // 基准参数不变
        assert_eq!(bc.base_parameters().k, vec![1.0; 3]);
    }

    #[test]
    fn test_repeated_update_does_not_accumulate() {
        let mesh = mesh();
        let mut reg = FieldRegistry::new();
        reg.register_face_scalar(FaceField::uniform("phi", &mesh, 1.0))
            .unwrap();
        let mut bc = bc(&mesh);
        let cells = [0.0; 3];
        let ctx = UpdateContext::new(&cells).with_fields(&reg);
        bc.update_coeffs(&ctx).unwrap();
        bc.update_coeffs(&ctx).unwrap();
        assert!((bc.effective_parameters().k[0] - 1.5).abs() < 1e-14);
    }

    #[test]
    fn test_vector_flux_with_rho() {
        let mesh = mesh();
        let mut reg = FieldRegistry::new();
        let mut u = FaceField::uniform("Uf", &mesh, DVec3::ZERO);
        *u.patch_mut(0).unwrap() = vec![DVec3::new(0.5, 3.0, 0.0), DVec3::ZERO, DVec3::NEG_X];
        reg.register_face_vector(u).unwrap();
        let mut rho = FaceField::uniform("rho", &mesh, 1.0);
        *rho.patch_mut(0).unwrap() = vec![10.0, 20.0, 30.0];
        reg.register_face_scalar(rho).unwrap();

        let mut bc = bc(&mesh).with_flux("Uf").with_rho("rho");
        let cells = [0.0; 3];
        bc.update_coeffs(&UpdateContext::new(&cells).with_fields(&reg))
            .unwrap();

        let eff = bc.effective_parameters();
        assert_eq!(bc.inert_faces(), &[false, true, false]);
        // 法向为 +x
        assert!((eff.k[0] - 1.5).abs() < 1e-14);
        assert!((eff.k[2] - 0.0).abs() < 1e-14);
        assert_eq!(eff.d[0], 20.0);
        assert_eq!(eff.d[2], 60.0);
        assert_eq!(eff.d[1], 0.0);
    }

    #[test]
    fn test_failed_update_keeps_previous_state() {
        let mesh = mesh();
        let mut reg = FieldRegistry::new();
        reg.register_face_scalar(FaceField::uniform("phi", &mesh, 2.0))
            .unwrap();
        let mut bc = bc(&mesh);
        let cells = [10.0; 3];
        bc.update_coeffs(&UpdateContext::new(&cells).with_fields(&reg))
            .unwrap();
        let params = bc.effective_parameters().clone();
        let grad = bc.sn_grad().unwrap();

        let mut zero_flux = FieldRegistry::new();
        zero_flux
            .register_face_scalar(FaceField::uniform("phi", &mesh, 0.0))
            .unwrap();
        let short = [1.0; 2];
        let err = bc
            .update_coeffs(&UpdateContext::new(&short).with_fields(&zero_flux))
            .unwrap_err();
        assert!(matches!(err, RfError::SizeMismatch { .. }));

        assert_eq!(bc.effective_parameters(), &params);
        assert_eq!(bc.inert_faces(), &[false; 3]);
        assert!(bc.updated());
        assert_eq!(bc.sn_grad().unwrap(), grad);
    }

    #[test]
    fn test_missing_registry() {
        let mesh = mesh();
        let mut bc = bc(&mesh);
        let cells = [0.0; 3];
        let err = bc.update_coeffs(&UpdateContext::new(&cells)).unwrap_err();
        assert!(matches!(err, RfError::Config { .. }));
    }

    #[test]
    fn test_missing_flux_field() {
        let mesh = mesh();
        let reg = FieldRegistry::new();
        let mut bc = bc(&mesh);
        let cells = [0.0; 3];
        let err = bc
            .update_coeffs(&UpdateContext::new(&cells).with_fields(&reg))
            .unwrap_err();
        assert_eq!(err, RfError::field_not_found("phi", "outlet"));
        assert!(!bc.updated());
    }

    #[test]
    fn test_missing_rho_field() {
        let mesh = mesh();
        let mut reg = FieldRegistry::new();
        reg.register_face_scalar(FaceField::uniform("phi", &mesh, 1.0))
            .unwrap();
        let mut bc = bc(&mesh).with_rho("rho");
        let cells = [0.0; 3];
        assert!(bc
            .update_coeffs(&UpdateContext::new(&cells).with_fields(&reg))
            .is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let mesh = mesh();
        let bc = bc(&mesh).with_flux("phiv").with_rho("rhoMix");
        let config = bc.to_config();
        assert_eq!(config.type_name, "fixedFluxTransportRobin");
        assert_eq!(config.phi.as_deref(), Some("phiv"));
        assert!(config.use_rho);

        let back =
            FixedFluxTransportRobinBoundary::from_config(mesh.patches()[0].clone(), "T", &config)
                .unwrap();
        assert_eq!(back.rho_name(), "rhoMix");
        assert_eq!(back.base_parameters(), bc.base_parameters());
    }

    #[test]
    fn test_mapping_keeps_base() {
        let mesh = mesh();
        let mut bc = bc(&mesh);
        bc.set_base_parameters(2, 9.0, 8.0, 7.0).unwrap();

        let small: Arc<dyn BoundaryPatch> =
            Arc::new(StaticPatch::new("outlet", vec![0], vec![0.5]).unwrap());
        let mapped = bc
            .map_onto(small, &crate::boundary::DirectMapper::from_indices(vec![2]))
            .unwrap();
        assert_eq!(mapped.size(), 1);
        assert_eq!(mapped.base_parameters().d, vec![9.0]);

        let mut target = bc.clone_for_field("S");
        target.rmap(&mapped, &[0]).unwrap();
        assert_eq!(target.base_parameters().k[0], 8.0);
        assert_eq!(target.field_name(), "S");
        assert!(target.rmap(&mapped, &[3]).is_err());
    }
}
