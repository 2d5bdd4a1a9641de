// crates/rf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `RfError` 枚举和 `RfResult` 类型别名，用于整个项目的错误处理。
//!
//! # 错误分类
//!
//! 每个错误都可以通过 [`RfError::kind`] 归类为 [`ErrorKind`]，外部装配器据此
//! 决定是中止计算还是跳过受影响的边界：
//!
//! - 配置错误：字段缺失、类型不符、未知的边界/格式类型
//! - 数值退化：Robin 分母 `r - K` 趋零、系数出现 NaN/Inf
//! - 索引错误：映射地址越界、数组长度不一致
//!
//! 调用不支持的 `weights()` 属于误用，直接 panic，不经过本类型。
//!
//! # 示例
//!
//! ```
//! use rf_foundation::error::{RfError, RfResult};
//!
//! fn lookup_flux() -> RfResult<()> {
//!     Err(RfError::field_not_found("phi", "inlet"))
//! }
//! assert!(lookup_flux().is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type RfResult<T> = Result<T, RfError>;

/// 错误大类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 配置错误（建立或更新时致命）
    Configuration,
    /// 数值退化
    NumericalDegeneracy,
    /// 索引或尺寸不一致
    Indexing,
    /// 其它无效输入
    InvalidInput,
}

/// 核心错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RfError {
    // ========================================================================
    // 配置相关错误
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 缺少配置项
    #[error("缺少必需的配置项: {key}")]
    MissingConfig {
        /// 配置键名
        key: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 未注册的类型名
    #[error("未知的{category}类型 '{name}' (可用: {available:?})")]
    UnknownType {
        /// 类别（边界条件/插值格式）
        category: &'static str,
        /// 请求的类型名
        name: String,
        /// 已注册的类型名
        available: Vec<String>,
    },

    /// 字段未找到
    #[error("字段 '{field}' 在边界 '{patch}' 上未找到")]
    FieldNotFound {
        /// 字段名
        field: String,
        /// 边界名
        patch: String,
    },

    /// 字段类型不符
    #[error("字段 '{field}' 类型不符: 期望 {expected}, 实际 {actual}")]
    FieldTypeMismatch {
        /// 字段名
        field: String,
        /// 期望类型
        expected: &'static str,
        /// 实际类型
        actual: &'static str,
    },

    /// 耦合边界缺少邻居侧数值
    #[error("耦合边界 '{patch}' 缺少邻居侧数值")]
    CoupledValuesMissing {
        /// 边界名
        patch: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 数值错误
    // ========================================================================
    /// Robin 条件退化（r ≈ K）
    #[error("Robin 条件退化: 面 {face} 处 D/dn={r:e} 与 K={k:e} 相等")]
    DegenerateRobin {
        /// 边界局部面索引
        face: usize,
        /// r = D/dn
        r: f64,
        /// 反应系数
        k: f64,
    },

    /// 数值非有限
    #[error("数值非有限: {quantity} 在面 {face} 处")]
    NonFinite {
        /// 物理量名称
        quantity: &'static str,
        /// 面索引
        face: usize,
    },

    // ========================================================================
    // 索引错误
    // ========================================================================
    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    // ========================================================================
    // 其它
    // ========================================================================
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RfError {
    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 缺少配置
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 未知类型
    pub fn unknown_type(category: &'static str, name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownType {
            category,
            name: name.into(),
            available,
        }
    }

    /// 字段未找到
    pub fn field_not_found(field: impl Into<String>, patch: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
            patch: patch.into(),
        }
    }

    /// 字段类型不符
    pub fn field_type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::FieldTypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// 耦合边界缺少邻居值
    pub fn coupled_values_missing(patch: impl Into<String>) -> Self {
        Self::CoupledValuesMissing {
            patch: patch.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Robin 退化
    pub fn degenerate_robin(face: usize, r: f64, k: f64) -> Self {
        Self::DegenerateRobin { face, r, k }
    }

    /// 非有限数值
    pub fn non_finite(quantity: &'static str, face: usize) -> Self {
        Self::NonFinite { quantity, face }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 错误大类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. }
            | Self::MissingConfig { .. }
            | Self::InvalidConfig { .. }
            | Self::UnknownType { .. }
            | Self::FieldNotFound { .. }
            | Self::FieldTypeMismatch { .. }
            | Self::CoupledValuesMissing { .. }
            | Self::Serialization { .. } => ErrorKind::Configuration,
            Self::DegenerateRobin { .. } | Self::NonFinite { .. } => {
                ErrorKind::NumericalDegeneracy
            }
            Self::SizeMismatch { .. } | Self::IndexOutOfBounds { .. } => ErrorKind::Indexing,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl RfError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> RfResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> RfResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }

    /// 检查数值有限
    #[inline]
    pub fn check_finite(quantity: &'static str, face: usize, value: f64) -> RfResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::non_finite(quantity, face))
        }
    }
}

/// 条件不满足时返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// 从 `Option` 取值，为 `None` 时返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            Some(v) => v,
            None => return Err($err),
        }
    };
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RfError::config("测试配置错误");
        assert!(err.to_string().contains("配置错误"));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = RfError::index_out_of_bounds("PatchFace", 10, 5);
        assert!(err.to_string().contains("PatchFace"));
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("5"));
        assert_eq!(err.kind(), ErrorKind::Indexing);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            RfError::field_not_found("phi", "inlet").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            RfError::degenerate_robin(0, 1.0, 1.0).kind(),
            ErrorKind::NumericalDegeneracy
        );
        assert_eq!(
            RfError::size_mismatch("RobinD", 3, 4).kind(),
            ErrorKind::Indexing
        );
        assert_eq!(
            RfError::unknown_type("边界条件", "foo", vec![]).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_check_size() {
        assert!(RfError::check_size("test", 10, 10).is_ok());
        assert!(RfError::check_size("test", 10, 5).is_err());
    }

    #[test]
    fn test_check_index() {
        assert!(RfError::check_index("Cell", 5, 10).is_ok());
        assert!(RfError::check_index("Cell", 10, 10).is_err());
    }

    #[test]
    fn test_check_finite() {
        assert!(RfError::check_finite("coeff", 0, 1.0).is_ok());
        assert!(RfError::check_finite("coeff", 0, f64::NAN).is_err());
        assert!(RfError::check_finite("coeff", 0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> RfResult<()> {
            ensure!(value > 0, RfError::invalid_input("value must be positive"));
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }

    #[test]
    fn test_require_macro() {
        fn get_value(opt: Option<i32>) -> RfResult<i32> {
            let v = require!(opt, RfError::missing_config("value"));
            Ok(v)
        }

        assert_eq!(get_value(Some(42)).unwrap(), 42);
        assert!(get_value(None).is_err());
    }
}
