// crates/rf_physics/src/boundary/robin.rs

//! Robin 条件的幽灵点消元代数
//!
//! 边界面值 P 与幽灵点值 G、内侧单元值 C 满足：
//!
//! ```text
//! P = (C + G) / 2
//! K·P - D·(G - C)/(2·dn) + F = 0
//! ```
//!
//! 记 `r = D/dn`，`A = (r + K)/(r - K)`，消去 G 得：
//!
//! ```text
//! P      = (1 + A)/2 · C        + F/(r - K)
//! ∂P/∂n  = (A - 1)/(2·dn) · C   + F/(dn·(r - K))
//! ```
//!
//! 四个系数中只有源项系数与 F 成正比，因此这里只计算与 F 无关的部分，
//! 乘 F 的工作留给调用方（F 可能是向量或张量）。

use rf_foundation::{ensure, FieldValue, RfError, RfResult};

use super::mapper::{map_values, rmap_values, PatchFieldMapper};

/// 默认退化判定相对容差
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

/// 单个面的 Robin 系数（与 F 无关部分）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostCoefficients {
    /// 值系数（内侧）：(1 + A)/2
    pub value_internal: f64,
    /// 梯度系数（内侧）：(A - 1)/(2·dn)
    pub gradient_internal: f64,
    /// 值源项系数：1/(r - K)，乘 F 后为 valueBoundaryCoeff
    pub value_source: f64,
    /// 梯度源项系数：1/(dn·(r - K))，乘 F 后为 gradientBoundaryCoeff
    pub gradient_source: f64,
}

impl GhostCoefficients {
    /// 惰性面：四个系数均为零
    pub const INERT: Self = Self {
        value_internal: 0.0,
        gradient_internal: 0.0,
        value_source: 0.0,
        gradient_source: 0.0,
    };

    /// 计算第 `face` 个面的系数
    ///
    /// `|r - K| <= tol·max(|r|, |K|)` 视为退化。
    pub fn compute(face: usize, d: f64, k: f64, dn: f64, tol: f64) -> RfResult<Self> {
        ensure!(
            dn.is_finite() && dn > 0.0,
            RfError::invalid_input(format!("面 {} 的法向距离无效: {}", face, dn))
        );
        let r = d / dn;
        let denom = r - k;
        // NaN 也走退化分支
        if !(denom.abs() > tol * r.abs().max(k.abs())) {
            return Err(RfError::degenerate_robin(face, r, k));
        }

        let a = (r + k) / denom;
        let coeffs = Self {
            value_internal: 0.5 * (1.0 + a),
            gradient_internal: (a - 1.0) / (2.0 * dn),
            value_source: 1.0 / denom,
            gradient_source: 1.0 / (dn * denom),
        };
        RfError::check_finite("valueInternalCoeffs", face, coeffs.value_internal)?;
        RfError::check_finite("gradientInternalCoeffs", face, coeffs.gradient_internal)?;
        RfError::check_finite("valueBoundaryCoeffs", face, coeffs.value_source)?;
        RfError::check_finite("gradientBoundaryCoeffs", face, coeffs.gradient_source)?;
        Ok(coeffs)
    }
}

/// 逐面 Robin 参数 (D, K, F)
#[derive(Debug, Clone, PartialEq)]
pub struct RobinParameters<T> {
    /// 扩散系数 D
    pub d: Vec<f64>,
    /// 反应系数 K
    pub k: Vec<f64>,
    /// 源项 F
    pub f: Vec<T>,
}

impl<T: FieldValue> RobinParameters<T> {
    /// 全零参数
    pub fn zeros(n: usize) -> Self {
        Self {
            d: vec![0.0; n],
            k: vec![0.0; n],
            f: vec![T::zero(); n],
        }
    }

    /// 均匀参数
    pub fn uniform(n: usize, d: f64, k: f64, f: T) -> Self {
        Self {
            d: vec![d; n],
            k: vec![k; n],
            f: vec![f; n],
        }
    }

    /// 面数量
    #[inline]
    pub fn len(&self) -> usize {
        self.d.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// 校验三个数组长度均为 n
    pub fn check_size(&self, n: usize) -> RfResult<()> {
        RfError::check_size("RobinD", n, self.d.len())?;
        RfError::check_size("RobinK", n, self.k.len())?;
        RfError::check_size("RobinF", n, self.f.len())
    }

    /// 设置单个面
    pub fn set(&mut self, face: usize, d: f64, k: f64, f: T) -> RfResult<()> {
        RfError::check_index("PatchFace", face, self.len())?;
        self.d[face] = d;
        self.k[face] = k;
        self.f[face] = f;
        Ok(())
    }

    /// 按映射器重建
    pub fn mapped(&self, mapper: &dyn PatchFieldMapper) -> RfResult<Self> {
        Ok(Self {
            d: map_values(mapper, &self.d)?,
            k: map_values(mapper, &self.k)?,
            f: map_values(mapper, &self.f)?,
        })
    }

    /// 反向映射写入（寻址已校验）
    pub(crate) fn rmap_from(&mut self, other: &Self, addressing: &[usize]) -> RfResult<()> {
        rmap_values(&mut self.d, &other.d, addressing)?;
        rmap_values(&mut self.k, &other.k, addressing)?;
        rmap_values(&mut self.f, &other.f, addressing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::mapper::DirectMapper;

    #[test]
    fn test_reference_case() {
        // D=2, K=1, dn=0.5 → r=4, A=5/3
        let c = GhostCoefficients::compute(0, 2.0, 1.0, 0.5, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert!((c.value_internal - 4.0 / 3.0).abs() < 1e-14);
        assert!((c.gradient_internal - 2.0 / 3.0).abs() < 1e-14);
        assert!((c.value_source - 1.0 / 3.0).abs() < 1e-14);
        assert!((c.gradient_source - 2.0 / 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_balance_satisfied() {
        let (d, k, dn, f, cell) = (2.0, 1.0, 0.5, 3.0, 10.0);
        let c = GhostCoefficients::compute(0, d, k, dn, 0.0).unwrap();
        let p = c.value_internal * cell + c.value_source * f;
        let g = 2.0 * p - cell;
        let residual = k * p - d * (g - cell) / (2.0 * dn) + f;
        assert!(residual.abs() < 1e-12);
        assert!((p - 14.333_333_333_333_334).abs() < 1e-12);
        assert!((g - 18.666_666_666_666_668).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate() {
        // r = 2/0.5 = 4 = K
        let err = GhostCoefficients::compute(3, 2.0, 4.0, 0.5, DEFAULT_SINGULAR_TOLERANCE).unwrap_err();
        assert_eq!(err, RfError::degenerate_robin(3, 4.0, 4.0));

        // D = K = 0
        assert!(GhostCoefficients::compute(0, 0.0, 0.0, 1.0, DEFAULT_SINGULAR_TOLERANCE).is_err());
        // NaN
        assert!(GhostCoefficients::compute(0, f64::NAN, 1.0, 1.0, DEFAULT_SINGULAR_TOLERANCE).is_err());
    }

    #[test]
    fn test_invalid_distance() {
        for dn in [0.0, -1.0, f64::INFINITY] {
            let err = GhostCoefficients::compute(0, 1.0, 0.0, dn, DEFAULT_SINGULAR_TOLERANCE).unwrap_err();
            assert!(matches!(err, RfError::InvalidInput { .. }));
        }
    }

    #[test]
    fn test_pure_neumann_limit() {
        // K = 0 → A = 1，梯度内侧系数为零
        let c = GhostCoefficients::compute(0, 1.0, 0.0, 0.25, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert!((c.value_internal - 1.0).abs() < 1e-14);
        assert!(c.gradient_internal.abs() < 1e-14);
    }

    #[test]
    fn test_parameters_mapping() {
        let mut p = RobinParameters::<f64>::zeros(3);
        p.set(0, 1.0, 2.0, 3.0).unwrap();
        p.set(2, 4.0, 5.0, 6.0).unwrap();
        assert!(p.set(3, 0.0, 0.0, 0.0).is_err());

        let m = p.mapped(&DirectMapper::from_indices(vec![2, 0])).unwrap();
        assert_eq!(m.d, vec![4.0, 1.0]);
        assert_eq!(m.f, vec![6.0, 3.0]);
        assert!(m.check_size(2).is_ok());
        assert!(m.check_size(3).is_err());
    }
}
