// crates/rf_physics/src/boundary/config.rs

//! 边界条件配置
//!
//! 每个边界一段配置，键名与求解器字典保持一致：
//!
//! ```yaml
//! type: fixedFluxTransportRobin
//! phi: phi
//! useRho: true
//! rho: rho
//! RobinD: 1.0e-3          # 均匀值
//! RobinK: 0.0
//! RobinF: [0.0, 0.5, 1.0] # 逐面值
//! ```
//!
//! 逐面量可以写成单个值（均匀）或列表（长度须等于边界面数）。

use std::collections::BTreeMap;

use rf_foundation::{FieldValue, RfError, RfResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 逐面量：均匀值或逐面列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec<T> {
    /// 均匀值
    Uniform(T),
    /// 逐面列表
    NonUniform(Vec<T>),
}

impl<T: FieldValue> Default for FieldSpec<T> {
    fn default() -> Self {
        Self::Uniform(T::zero())
    }
}

impl<T: FieldValue> FieldSpec<T> {
    /// 展开为长度 n 的数组
    pub fn expand(&self, key: &str, n: usize) -> RfResult<Vec<T>> {
        match self {
            Self::Uniform(v) => Ok(vec![*v; n]),
            Self::NonUniform(values) if values.len() == n => Ok(values.clone()),
            Self::NonUniform(values) => Err(RfError::invalid_config(
                key,
                format!("{} 个值", values.len()),
                format!("边界有 {} 个面", n),
            )),
        }
    }

    /// 由逐面数组生成，所有值相同时压缩为均匀值
    pub fn from_values(values: &[T]) -> Self {
        match values.first() {
            Some(&first) if values.iter().all(|&v| v == first) => Self::Uniform(first),
            _ => Self::NonUniform(values.to_vec()),
        }
    }
}

/// 单个边界的 Robin 条件配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobinPatchConfig<T: FieldValue = f64> {
    /// 边界条件类型标签
    #[serde(rename = "type")]
    pub type_name: String,

    /// 扩散系数 D
    #[serde(rename = "RobinD", default)]
    pub robin_d: FieldSpec<f64>,

    /// 反应系数 K
    #[serde(rename = "RobinK", default)]
    pub robin_k: FieldSpec<f64>,

    /// 源项 F
    #[serde(rename = "RobinF", default)]
    pub robin_f: FieldSpec<T>,

    /// 初始边界面值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldSpec<T>>,

    /// 通量场名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<String>,

    /// 扩散系数是否乘密度
    #[serde(rename = "useRho", default, skip_serializing_if = "is_false")]
    pub use_rho: bool,

    /// 密度场名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho: Option<String>,

    /// 退化判定相对容差
    #[serde(
        rename = "singularTolerance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub singular_tolerance: Option<f64>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl<T: FieldValue> RobinPatchConfig<T> {
    /// 指定类型、其余取默认值
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            robin_d: FieldSpec::default(),
            robin_k: FieldSpec::default(),
            robin_f: FieldSpec::default(),
            value: None,
            phi: None,
            use_rho: false,
            rho: None,
            singular_tolerance: None,
        }
    }

    /// 均匀 D, K, F
    pub fn with_uniform(mut self, d: f64, k: f64, f: T) -> Self {
        self.robin_d = FieldSpec::Uniform(d);
        self.robin_k = FieldSpec::Uniform(k);
        self.robin_f = FieldSpec::Uniform(f);
        self
    }

    /// 退化容差，未配置时取默认值
    pub fn singular_tolerance_or_default(&self) -> RfResult<f64> {
        match self.singular_tolerance {
            None => Ok(super::robin::DEFAULT_SINGULAR_TOLERANCE),
            Some(tol) if tol.is_finite() && tol >= 0.0 => Ok(tol),
            Some(tol) => Err(RfError::invalid_config(
                "singularTolerance",
                tol.to_string(),
                "必须为非负有限数",
            )),
        }
    }
}

impl<T: FieldValue + Serialize + DeserializeOwned> RobinPatchConfig<T> {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> RfResult<Self> {
        serde_json::from_str(json).map_err(|e| RfError::serialization(e.to_string()))
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml(yaml: &str) -> RfResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RfError::serialization(e.to_string()))
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> RfResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RfError::serialization(e.to_string()))
    }

    /// 转换为 YAML 字符串
    pub fn to_yaml(&self) -> RfResult<String> {
        serde_yaml::to_string(self).map_err(|e| RfError::serialization(e.to_string()))
    }
}

/// 一个场在所有边界上的配置（边界名 → 配置）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryFieldConfig {
    /// 各边界配置
    pub patches: BTreeMap<String, RobinPatchConfig<f64>>,
}

impl BoundaryFieldConfig {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> RfResult<Self> {
        serde_json::from_str(json).map_err(|e| RfError::serialization(e.to_string()))
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml(yaml: &str) -> RfResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RfError::serialization(e.to_string()))
    }

    /// 转换为 YAML 字符串
    pub fn to_yaml(&self) -> RfResult<String> {
        serde_yaml::to_string(self).map_err(|e| RfError::serialization(e.to_string()))
    }

    /// 指定边界的配置
    pub fn get(&self, patch: &str) -> Option<&RobinPatchConfig<f64>> {
        self.patches.get(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_parse_json_uniform_and_list() {
        let cfg = RobinPatchConfig::<f64>::from_json(
            r#"{"type": "ghostRobin", "RobinD": 2.0, "RobinK": [1.0, 0.5], "RobinF": 0.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.type_name, "ghostRobin");
        assert_eq!(cfg.robin_d.expand("RobinD", 2).unwrap(), vec![2.0, 2.0]);
        assert_eq!(cfg.robin_k.expand("RobinK", 2).unwrap(), vec![1.0, 0.5]);
        assert!(cfg.robin_k.expand("RobinK", 3).is_err());
        assert!(!cfg.use_rho);
        assert!(cfg.value.is_none());
    }

    #[test]
    fn test_parse_yaml_transport() {
        let yaml = "\
type: fixedFluxTransportRobin
phi: phiv
useRho: true
RobinD: 1.0e-3
";
        let cfg = RobinPatchConfig::<f64>::from_yaml(yaml).unwrap();
        assert_eq!(cfg.phi.as_deref(), Some("phiv"));
        assert!(cfg.use_rho);
        assert_eq!(cfg.robin_k, FieldSpec::Uniform(0.0));
    }

    #[test]
    fn test_vector_source() {
        let cfg = RobinPatchConfig::<DVec3>::from_json(
            r#"{"type": "ghostRobin", "RobinF": [[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]]}"#,
        )
        .unwrap();
        let f = cfg.robin_f.expand("RobinF", 2).unwrap();
        assert_eq!(f[1], DVec3::new(0.0, 2.0, 0.0));

        let cfg = RobinPatchConfig::<DVec3>::from_json(r#"{"type": "ghostRobin", "RobinF": [1.0, 2.0, 3.0]}"#)
            .unwrap();
        assert_eq!(cfg.robin_f, FieldSpec::Uniform(DVec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RobinPatchConfig::<f64>::from_json(r#"{"type": "ghostRobin", "robinD": 1.0}"#)
            .unwrap_err();
        assert!(matches!(err, RfError::Serialization { .. }));
    }

    #[test]
    fn test_missing_type_rejected() {
        assert!(RobinPatchConfig::<f64>::from_json(r#"{"RobinD": 1.0}"#).is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut cfg = RobinPatchConfig::<f64>::new("fixedFluxTransportRobin").with_uniform(1.0, 0.5, 2.0);
        cfg.phi = Some("phi".into());
        cfg.robin_k = FieldSpec::NonUniform(vec![0.5, 0.25]);
        let json = cfg.to_json().unwrap();
        assert_eq!(RobinPatchConfig::<f64>::from_json(&json).unwrap(), cfg);
        let yaml = cfg.to_yaml().unwrap();
        assert_eq!(RobinPatchConfig::<f64>::from_yaml(&yaml).unwrap(), cfg);
    }

    #[test]
    fn test_from_values_compresses() {
        assert_eq!(FieldSpec::from_values(&[1.0, 1.0]), FieldSpec::Uniform(1.0));
        assert_eq!(
            FieldSpec::from_values(&[1.0, 2.0]),
            FieldSpec::NonUniform(vec![1.0, 2.0])
        );
        assert_eq!(FieldSpec::<f64>::from_values(&[]), FieldSpec::NonUniform(vec![]));
    }

    #[test]
    fn test_singular_tolerance() {
        let mut cfg = RobinPatchConfig::<f64>::new("ghostRobin");
        assert_eq!(cfg.singular_tolerance_or_default().unwrap(), 1e-12);
        cfg.singular_tolerance = Some(-1.0);
        assert!(cfg.singular_tolerance_or_default().is_err());
    }

    #[test]
    fn test_boundary_field_config() {
        let yaml = "\
inlet:
  type: ghostRobin
  RobinD: 1.0
  RobinK: 2.0
outlet:
  type: fixedFluxTransportRobin
";
        let cfg = BoundaryFieldConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.patches.len(), 2);
        assert_eq!(cfg.get("outlet").unwrap().type_name, "fixedFluxTransportRobin");
        let back = BoundaryFieldConfig::from_yaml(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
