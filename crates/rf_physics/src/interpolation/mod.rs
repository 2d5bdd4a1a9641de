// crates/rf_physics/src/interpolation/mod.rs

//! # 面插值格式
//!
//! 把单元中心场插值到面：
//!
//! - [`HarmonicZero`] - 可处理零值的调和平均（`harmonic0`），用于扩散系数
//! - [`UpwindMax`] - 两侧取大（`hinderedDiffusion`），用于阻滞扩散因子
//! - [`LinearInterpolation`] - 线性/反向线性插值，提供权重
//!
//! 前两者为直接格式：一次算出面值，不提供权重。
//!
//! ## 使用方式
//!
//! ```
//! use rf_physics::interpolation::{DirectInterpolationScheme, SchemeRegistry};
//! use rf_physics::field::CellField;
//! use rf_physics::mesh::StaticMesh;
//!
//! let mesh = StaticMesh::line(3, 1.0).unwrap();
//! let field = CellField::from_internal("D", &mesh, vec![1.0, 0.0, 2.0]).unwrap();
//!
//! let scheme = SchemeRegistry::with_builtin().create("hinderedDiffusion").unwrap();
//! let face = scheme.interpolate(&mesh, &field).unwrap();
//! assert_eq!(face.internal(), &[1.0, 2.0]);
//! ```

mod harmonic_zero;
mod linear;
mod registry;
mod traits;
mod upwind_max;

pub use harmonic_zero::HarmonicZero;
pub use linear::{LinearInterpolation, LinearWeighting};
pub use registry::{ScalarInterpolationScheme, SchemeFactory, SchemeRegistry};
pub use traits::{DirectInterpolationScheme, SurfaceInterpolationScheme};
pub use upwind_max::UpwindMax;
