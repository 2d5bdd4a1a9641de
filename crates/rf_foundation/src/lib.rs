// crates/rf_foundation/src/lib.rs

//! Foundation Layer
//!
//! 基础层，提供整个工作区共用的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与错误分类
//! - [`scalar`]: RuntimeScalar trait（密封，仅 f32/f64 可实现）
//! - [`value`]: FieldValue trait，标量/向量/张量场值
//!
//! # 示例
//!
//! ```
//! use rf_foundation::{FieldValue, RfError, RfResult};
//! use glam::DVec3;
//!
//! fn check_len(values: &[DVec3], n: usize) -> RfResult<()> {
//!     RfError::check_size("values", n, values.len())
//! }
//!
//! assert!(check_len(&[DVec3::ZERO; 3], 3).is_ok());
//! assert_eq!(2.0f64.upwind_max(1.0), 2.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scalar;
pub mod value;

// 重导出常用类型
pub use error::{ErrorKind, RfError, RfResult};
pub use scalar::RuntimeScalar;
pub use value::FieldValue;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{ErrorKind, RfError, RfResult};
    pub use crate::scalar::RuntimeScalar;
    pub use crate::value::FieldValue;
    pub use crate::{ensure, require};
}
