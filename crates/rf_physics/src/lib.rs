// crates/rf_physics/src/lib.rs

//! Physics Layer
//!
//! 物理层，提供有限体积求解器中两类与装配器对接的数值组件：
//!
//! - [`interpolation`]: 单元场到面场的直接插值格式（调和平均、迎风取大）
//! - [`boundary`]: 幽灵点 Robin 边界的隐式系数，以及由通量驱动的输运特化
//!
//! 网格、场容器与场查找只定义装配所需的最小接口（[`mesh`]、[`field`]、
//! [`fields`]），由外部求解器提供具体实现；内存实现用于测试与小规模调用。
//!
//! # 模块结构
//!
//! ```text
//! rf_physics
//! ├── mesh          网格/边界只读接口
//! ├── field         CellField / FaceField
//! ├── fields        按名称查找其它场
//! ├── interpolation 面插值格式与注册表
//! └── boundary      Robin 边界、映射、配置、注册表
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod field;
pub mod fields;
pub mod interpolation;
pub mod mesh;
mod parallel;

pub use parallel::DEFAULT_PARALLEL_THRESHOLD;

/// 常用类型
pub mod prelude {
    pub use crate::boundary::{
        BoundaryRegistry, FixedFluxTransportRobinBoundary, GhostRobinBoundary, PatchMapping,
        RobinCoefficientProvider, RobinPatchConfig, ScalarRobinBoundary, UpdateContext,
    };
    pub use crate::field::{CellField, FaceField, PatchValues};
    pub use crate::fields::{FieldLookup, FieldRegistry};
    pub use crate::interpolation::{
        DirectInterpolationScheme, HarmonicZero, SchemeRegistry, SurfaceInterpolationScheme,
        UpwindMax,
    };
    pub use crate::mesh::{BoundaryPatch, FvMesh, StaticMesh, StaticPatch};
    pub use rf_foundation::{FieldValue, RfError, RfResult};
}
