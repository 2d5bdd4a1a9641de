// crates/rf_physics/src/parallel.rs

//! 面循环并行执行
//!
//! 面数达到阈值时使用 rayon 并行，否则串行。各面计算相互独立，
//! 两种路径结果逐位相同。

use rayon::prelude::*;
use rf_foundation::RfResult;

/// 默认并行阈值（面数）
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// 逐面计算，返回第一个错误
pub(crate) fn map_faces<T, F>(n: usize, threshold: usize, f: F) -> RfResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> RfResult<T> + Send + Sync,
{
    if n >= threshold {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}

/// 逐面计算（不会失败）
pub(crate) fn map_faces_infallible<T, F>(n: usize, threshold: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if n >= threshold {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_foundation::RfError;

    #[test]
    fn test_serial_and_parallel_agree() {
        let serial = map_faces_infallible(50, usize::MAX, |i| i as f64 * 0.5);
        let parallel = map_faces_infallible(50, 0, |i| i as f64 * 0.5);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_error_propagates() {
        let f = |i: usize| {
            if i == 7 {
                Err(RfError::non_finite("coeff", i))
            } else {
                Ok(i)
            }
        };
        assert!(map_faces(20, usize::MAX, f).is_err());
        assert!(map_faces(20, 0, f).is_err());
        assert_eq!(map_faces(5, 0, f).unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
