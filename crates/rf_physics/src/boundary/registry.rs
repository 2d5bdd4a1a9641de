// crates/rf_physics/src/boundary/registry.rs

//! 标量 Robin 边界的封闭集合与按类型名创建
//!
//! [`ScalarRobinBoundary`] 把所有标量 Robin 提供者收拢为一个枚举，装配器
//! 通过它静态分派；[`BoundaryRegistry`] 根据配置中的 `type` 标签创建实例。

use std::collections::BTreeMap;
use std::sync::Arc;

use rf_foundation::{RfError, RfResult};

use super::config::{BoundaryFieldConfig, RobinPatchConfig};
use super::fixed_flux_transport::FixedFluxTransportRobinBoundary;
use super::ghost_robin::GhostRobinBoundary;
use super::mapper::PatchFieldMapper;
use super::traits::{PatchMapping, RobinCoefficientProvider, UpdateContext};
use crate::mesh::{BoundaryPatch, FvMesh};

/// 标量 Robin 边界
#[derive(Debug, Clone)]
pub enum ScalarRobinBoundary {
    /// 通用幽灵点 Robin
    GhostRobin(GhostRobinBoundary<f64>),
    /// 通量驱动的输运 Robin
    FixedFluxTransportRobin(FixedFluxTransportRobinBoundary),
}

impl ScalarRobinBoundary {
    /// 导出可序列化配置
    pub fn to_config(&self) -> RobinPatchConfig<f64> {
        match self {
            Self::GhostRobin(bc) => bc.to_config(),
            Self::FixedFluxTransportRobin(bc) => bc.to_config(),
        }
    }
}

impl From<GhostRobinBoundary<f64>> for ScalarRobinBoundary {
    fn from(bc: GhostRobinBoundary<f64>) -> Self {
        Self::GhostRobin(bc)
    }
}

impl From<FixedFluxTransportRobinBoundary> for ScalarRobinBoundary {
    fn from(bc: FixedFluxTransportRobinBoundary) -> Self {
        Self::FixedFluxTransportRobin(bc)
    }
}

macro_rules! dispatch {
    ($self:expr, $bc:ident => $body:expr) => {
        match $self {
            ScalarRobinBoundary::GhostRobin($bc) => $body,
            ScalarRobinBoundary::FixedFluxTransportRobin($bc) => $body,
        }
    };
}

impl RobinCoefficientProvider<f64> for ScalarRobinBoundary {
    fn type_name(&self) -> &'static str {
        dispatch!(self, bc => bc.type_name())
    }

    fn patch(&self) -> &Arc<dyn BoundaryPatch> {
        dispatch!(self, bc => bc.patch())
    }

    fn field_name(&self) -> &str {
        dispatch!(self, bc => bc.field_name())
    }

    fn updated(&self) -> bool {
        dispatch!(self, bc => bc.updated())
    }

    fn update_coeffs(&mut self, ctx: &UpdateContext<'_, f64>) -> RfResult<()> {
        dispatch!(self, bc => bc.update_coeffs(ctx))
    }

    fn value_internal_coeffs(&self) -> RfResult<Vec<f64>> {
        dispatch!(self, bc => bc.value_internal_coeffs())
    }

    fn value_boundary_coeffs(&self) -> RfResult<Vec<f64>> {
        dispatch!(self, bc => bc.value_boundary_coeffs())
    }

    fn gradient_internal_coeffs(&self) -> RfResult<Vec<f64>> {
        dispatch!(self, bc => bc.gradient_internal_coeffs())
    }

    fn gradient_boundary_coeffs(&self) -> RfResult<Vec<f64>> {
        dispatch!(self, bc => bc.gradient_boundary_coeffs())
    }

    fn sn_grad(&self) -> RfResult<Vec<f64>> {
        dispatch!(self, bc => bc.sn_grad())
    }

    fn evaluate(&mut self) -> RfResult<()> {
        dispatch!(self, bc => bc.evaluate())
    }

    fn values(&self) -> &[f64] {
        dispatch!(self, bc => bc.values())
    }
}

impl PatchMapping for ScalarRobinBoundary {
    fn auto_map(
        &mut self,
        patch: Arc<dyn BoundaryPatch>,
        mapper: &dyn PatchFieldMapper,
    ) -> RfResult<()> {
        dispatch!(self, bc => bc.auto_map(patch, mapper))
    }

    fn rmap(&mut self, other: &Self, addressing: &[usize]) -> RfResult<()> {
        match (self, other) {
            (Self::GhostRobin(a), Self::GhostRobin(b)) => a.rmap(b, addressing),
            (Self::FixedFluxTransportRobin(a), Self::FixedFluxTransportRobin(b)) => {
                a.rmap(b, addressing)
            }
            (a, b) => Err(RfError::invalid_input(format!(
                "无法把 {} 反向映射到 {}",
                b.type_name(),
                a.type_name()
            ))),
        }
    }

    fn clone_for_field(&self, field_name: &str) -> Self {
        match self {
            Self::GhostRobin(bc) => Self::GhostRobin(bc.clone_for_field(field_name)),
            Self::FixedFluxTransportRobin(bc) => {
                Self::FixedFluxTransportRobin(bc.clone_for_field(field_name))
            }
        }
    }
}

/// 边界工厂
pub type BoundaryFactory =
    fn(Arc<dyn BoundaryPatch>, &str, &RobinPatchConfig<f64>) -> RfResult<ScalarRobinBoundary>;

/// 边界条件注册表
#[derive(Debug, Clone)]
pub struct BoundaryRegistry {
    factories: BTreeMap<String, BoundaryFactory>,
}

impl Default for BoundaryRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl BoundaryRegistry {
    /// 空注册表
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// 含内置边界类型的注册表
    pub fn with_builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(
            GhostRobinBoundary::<f64>::TYPE_NAME,
            |patch, field, config| {
                GhostRobinBoundary::from_config(patch, field, config).map(Into::into)
            },
        );
        reg.register(
            FixedFluxTransportRobinBoundary::TYPE_NAME,
            |patch, field, config| {
                FixedFluxTransportRobinBoundary::from_config(patch, field, config).map(Into::into)
            },
        );
        reg
    }

    /// 注册边界类型，同名时覆盖
    pub fn register(&mut self, name: impl Into<String>, factory: BoundaryFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            log::debug!("边界类型 '{}' 被重新注册", name);
        }
    }

    /// 按配置中的类型标签创建
    pub fn create(
        &self,
        patch: Arc<dyn BoundaryPatch>,
        field_name: &str,
        config: &RobinPatchConfig<f64>,
    ) -> RfResult<ScalarRobinBoundary> {
        let factory = self.factories.get(&config.type_name).ok_or_else(|| {
            RfError::unknown_type("边界条件", config.type_name.clone(), self.names())
        })?;
        factory(patch, field_name, config)
    }

    /// 为网格所有边界创建，按网格边界顺序返回
    ///
    /// 每个边界都必须有配置。
    pub fn create_all(
        &self,
        mesh: &dyn FvMesh,
        field_name: &str,
        config: &BoundaryFieldConfig,
    ) -> RfResult<Vec<ScalarRobinBoundary>> {
        for name in config.patches.keys() {
            if mesh.find_patch(name).is_none() {
                log::warn!("场 '{}' 的配置包含未知边界 '{}'", field_name, name);
            }
        }
        mesh.patches()
            .iter()
            .map(|patch| {
                let cfg = config
                    .get(patch.name())
                    .ok_or_else(|| RfError::missing_config(format!("{}.{}", field_name, patch.name())))?;
                self.create(patch.clone(), field_name, cfg)
            })
            .collect()
    }

    /// 是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// 已注册的类型名（字典序）
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}
