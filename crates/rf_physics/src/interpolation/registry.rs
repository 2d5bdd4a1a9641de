// crates/rf_physics/src/interpolation/registry.rs

//! 插值格式注册表
//!
//! 装配器按配置中的字符串标签选择格式：
//!
//! | 标签 | 格式 |
//! |------|------|
//! | `harmonic0` | [`HarmonicZero`] |
//! | `hinderedDiffusion` | [`UpwindMax`] |
//! | `linear` | [`LinearInterpolation`] |
//! | `reverseLinear` | [`LinearInterpolation::reverse`] |
//!
//! 标量格式通过 [`ScalarInterpolationScheme`] 枚举静态分派。

use std::collections::BTreeMap;

use rf_foundation::{RfError, RfResult};

use super::harmonic_zero::HarmonicZero;
use super::linear::LinearInterpolation;
use super::traits::{DirectInterpolationScheme, SurfaceInterpolationScheme};
use super::upwind_max::UpwindMax;
use crate::field::{CellField, FaceField};
use crate::mesh::FvMesh;

/// 标量插值格式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarInterpolationScheme {
    /// 调和平均
    HarmonicZero(HarmonicZero),
    /// 迎风取大
    UpwindMax(UpwindMax),
    /// 线性
    Linear(LinearInterpolation),
}

impl DirectInterpolationScheme<f64> for ScalarInterpolationScheme {
    fn name(&self) -> &'static str {
        match self {
            Self::HarmonicZero(s) => DirectInterpolationScheme::<f64>::name(s),
            Self::UpwindMax(s) => DirectInterpolationScheme::<f64>::name(s),
            Self::Linear(s) => DirectInterpolationScheme::<f64>::name(s),
        }
    }

    fn interpolate(&self, mesh: &dyn FvMesh, field: &CellField<f64>) -> RfResult<FaceField<f64>> {
        match self {
            Self::HarmonicZero(s) => s.interpolate(mesh, field),
            Self::UpwindMax(s) => s.interpolate(mesh, field),
            Self::Linear(s) => s.interpolate(mesh, field),
        }
    }
}

impl SurfaceInterpolationScheme<f64> for ScalarInterpolationScheme {
    fn supports_weights(&self) -> bool {
        match self {
            Self::HarmonicZero(s) => SurfaceInterpolationScheme::<f64>::supports_weights(s),
            Self::UpwindMax(s) => SurfaceInterpolationScheme::<f64>::supports_weights(s),
            Self::Linear(s) => SurfaceInterpolationScheme::<f64>::supports_weights(s),
        }
    }

    fn weights(&self, mesh: &dyn FvMesh, field: &CellField<f64>) -> FaceField<f64> {
        match self {
            Self::HarmonicZero(s) => s.weights(mesh, field),
            Self::UpwindMax(s) => s.weights(mesh, field),
            Self::Linear(s) => s.weights(mesh, field),
        }
    }
}

/// 格式工厂
pub type SchemeFactory = fn() -> ScalarInterpolationScheme;

/// 插值格式注册表
#[derive(Debug, Clone)]
pub struct SchemeRegistry {
    factories: BTreeMap<String, SchemeFactory>,
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl SchemeRegistry {
    /// 空注册表
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// 含内置格式的注册表
    pub fn with_builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(HarmonicZero::TYPE_NAME, || {
            ScalarInterpolationScheme::HarmonicZero(HarmonicZero::new())
        });
        reg.register(UpwindMax::TYPE_NAME, || {
            ScalarInterpolationScheme::UpwindMax(UpwindMax)
        });
        reg.register("linear", || {
            ScalarInterpolationScheme::Linear(LinearInterpolation::new())
        });
        reg.register("reverseLinear", || {
            ScalarInterpolationScheme::Linear(LinearInterpolation::reverse())
        });
        reg
    }

    /// 注册格式，同名时覆盖
    pub fn register(&mut self, name: impl Into<String>, factory: SchemeFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            log::debug!("插值格式 '{}' 被重新注册", name);
        }
    }

    /// 按标签创建格式
    pub fn create(&self, name: &str) -> RfResult<ScalarInterpolationScheme> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(RfError::unknown_type("插值格式", name, self.names())),
        }
    }

    /// 是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// 已注册的标签（字典序）
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}
