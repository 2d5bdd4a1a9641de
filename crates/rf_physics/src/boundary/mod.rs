// crates/rf_physics/src/boundary/mod.rs

//! 边界条件模块
//!
//! 提供 Robin 型边界的隐式系数：
//!
//! - [`GhostRobinBoundary`] - 通用幽灵点 Robin 边界（任意场值类型）
//! - [`FixedFluxTransportRobinBoundary`] - 由通量场驱动的标量输运边界
//! - [`ScalarRobinBoundary`] / [`BoundaryRegistry`] - 封闭集合与按类型名创建
//! - [`mapper`] - 拓扑变化时的逐面数组映射
//!
//! # 使用示例
//!
//! ```
//! use rf_physics::boundary::{BoundaryRegistry, RobinCoefficientProvider, RobinPatchConfig, UpdateContext};
//! use rf_physics::mesh::{FvMesh, StaticMesh};
//!
//! let mesh = StaticMesh::line(4, 1.0).unwrap();
//! let config = RobinPatchConfig::from_yaml("type: ghostRobin\nRobinD: 2.0\nRobinK: 1.0\n").unwrap();
//!
//! let mut bc = BoundaryRegistry::with_builtin()
//!     .create(mesh.patches()[1].clone(), "T", &config)
//!     .unwrap();
//! bc.update_coeffs(&UpdateContext::new(&[10.0])).unwrap();
//!
//! // dn = 0.5 → r = 4, A = 5/3
//! let vic = bc.value_internal_coeffs().unwrap();
//! assert!((vic[0] - 4.0 / 3.0).abs() < 1e-12);
//! ```

mod config;
mod fixed_flux_transport;
mod ghost_robin;
pub mod mapper;
mod registry;
mod robin;
mod traits;

pub use config::{BoundaryFieldConfig, FieldSpec, RobinPatchConfig};
pub use fixed_flux_transport::{
    FixedFluxTransportRobinBoundary, DEFAULT_FLUX_NAME, DEFAULT_RHO_NAME,
};
pub use ghost_robin::GhostRobinBoundary;
pub use mapper::{DirectMapper, MapAddressing, PatchFieldMapper, WeightedMapper};
pub use registry::{BoundaryFactory, BoundaryRegistry, ScalarRobinBoundary};
pub use robin::{GhostCoefficients, RobinParameters, DEFAULT_SINGULAR_TOLERANCE};
pub use traits::{PatchMapping, RobinCoefficientProvider, UpdateContext};
