// crates/rf_physics/src/boundary/mapper.rs

//! 边界场映射
//!
//! 网格拓扑变化（加密、重分区、边界合并）后，边界上的逐面数组需要
//! 按新的面编号重建：
//!
//! - `auto_map`: 按映射器给出的寻址从旧数组生成新数组
//!   - 直接映射：新面 i 取旧面 `addr[i]`，`None` 表示新生面，置零
//!   - 加权映射：新面 i 取若干旧面的加权和
//! - `rmap`: 把另一个边界的值按寻址写回本边界 `self[addr[i]] = other[i]`
//!
//! 所有索引在写入之前统一校验，出错时目标数组保持不变。

use rf_foundation::{ensure, FieldValue, RfError, RfResult};

/// 映射寻址
#[derive(Debug, Clone, Copy)]
pub enum MapAddressing<'a> {
    /// 直接映射：每个新面对应至多一个旧面
    Direct(&'a [Option<usize>]),
    /// 加权映射：每个新面对应若干旧面及权重
    Weighted {
        /// 旧面索引
        addressing: &'a [Vec<usize>],
        /// 对应权重
        weights: &'a [Vec<f64>],
    },
}

/// 边界场映射器
pub trait PatchFieldMapper: Send + Sync {
    /// 映射后的面数量
    fn size(&self) -> usize;

    /// 寻址信息
    fn addressing(&self) -> MapAddressing<'_>;
}

/// 直接映射器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMapper {
    addressing: Vec<Option<usize>>,
}

impl DirectMapper {
    /// 从寻址创建
    pub fn new(addressing: Vec<Option<usize>>) -> Self {
        Self { addressing }
    }

    /// 每个新面都有来源
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self {
            addressing: indices.into_iter().map(Some).collect(),
        }
    }

    /// 恒等映射
    pub fn identity(n: usize) -> Self {
        Self::from_indices((0..n).collect())
    }
}

impl PatchFieldMapper for DirectMapper {
    fn size(&self) -> usize {
        self.addressing.len()
    }

    fn addressing(&self) -> MapAddressing<'_> {
        MapAddressing::Direct(&self.addressing)
    }
}

/// 加权映射器
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedMapper {
    addressing: Vec<Vec<usize>>,
    weights: Vec<Vec<f64>>,
}

impl WeightedMapper {
    /// 从寻址和权重创建，二者形状必须一致
    pub fn new(addressing: Vec<Vec<usize>>, weights: Vec<Vec<f64>>) -> RfResult<Self> {
        RfError::check_size("mapWeights", addressing.len(), weights.len())?;
        for (a, w) in addressing.iter().zip(&weights) {
            RfError::check_size("mapWeights", a.len(), w.len())?;
        }
        Ok(Self {
            addressing,
            weights,
        })
    }
}

impl PatchFieldMapper for WeightedMapper {
    fn size(&self) -> usize {
        self.addressing.len()
    }

    fn addressing(&self) -> MapAddressing<'_> {
        MapAddressing::Weighted {
            addressing: &self.addressing,
            weights: &self.weights,
        }
    }
}

/// 校验映射器的源索引都落在 `0..source_len` 内
pub fn check_map_source(mapper: &dyn PatchFieldMapper, source_len: usize) -> RfResult<()> {
    match mapper.addressing() {
        MapAddressing::Direct(addr) => {
            RfError::check_size("mapAddressing", mapper.size(), addr.len())?;
            for &j in addr.iter().flatten() {
                RfError::check_index("MapSource", j, source_len)?;
            }
        }
        MapAddressing::Weighted {
            addressing,
            weights,
        } => {
            RfError::check_size("mapAddressing", mapper.size(), addressing.len())?;
            RfError::check_size("mapWeights", addressing.len(), weights.len())?;
            for (a, w) in addressing.iter().zip(weights) {
                RfError::check_size("mapWeights", a.len(), w.len())?;
                for &j in a {
                    RfError::check_index("MapSource", j, source_len)?;
                }
            }
        }
    }
    Ok(())
}

/// 按映射器生成新数组
pub fn map_values<T: FieldValue>(mapper: &dyn PatchFieldMapper, source: &[T]) -> RfResult<Vec<T>> {
    check_map_source(mapper, source.len())?;
    let mapped = match mapper.addressing() {
        MapAddressing::Direct(addr) => addr
            .iter()
            .map(|a| a.map_or_else(T::zero, |j| source[j]))
            .collect(),
        MapAddressing::Weighted {
            addressing,
            weights,
        } => addressing
            .iter()
            .zip(weights)
            .map(|(a, w)| {
                a.iter()
                    .zip(w)
                    .fold(T::zero(), |acc, (&j, &wj)| acc + source[j].scale(wj))
            })
            .collect(),
    };
    Ok(mapped)
}

/// 按映射器生成标志数组
///
/// 直接映射复制来源标志，加权映射在所有来源均为 `true` 时取 `true`；
/// 无来源的新面取 `false`。
pub fn map_flags(mapper: &dyn PatchFieldMapper, source: &[bool]) -> RfResult<Vec<bool>> {
    check_map_source(mapper, source.len())?;
    let mapped = match mapper.addressing() {
        MapAddressing::Direct(addr) => addr
            .iter()
            .map(|a| a.map_or(false, |j| source[j]))
            .collect(),
        MapAddressing::Weighted { addressing, .. } => addressing
            .iter()
            .map(|a| !a.is_empty() && a.iter().all(|&j| source[j]))
            .collect(),
    };
    Ok(mapped)
}

/// 校验反向映射寻址
///
/// `addressing.len()` 必须等于来源长度，且每个目标索引小于 `target_len`。
pub fn check_rmap(target_len: usize, source_len: usize, addressing: &[usize]) -> RfResult<()> {
    ensure!(
        addressing.len() == source_len,
        RfError::size_mismatch("rmapAddressing", source_len, addressing.len())
    );
    for &a in addressing {
        RfError::check_index("RmapTarget", a, target_len)?;
    }
    Ok(())
}

/// 反向映射写入：`target[addressing[i]] = source[i]`
pub fn rmap_values<T: Copy>(target: &mut [T], source: &[T], addressing: &[usize]) -> RfResult<()> {
    check_rmap(target.len(), source.len(), addressing)?;
    for (&a, &v) in addressing.iter().zip(source) {
        target[a] = v;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_direct_map_with_new_faces() {
        let mapper = DirectMapper::new(vec![Some(2), None, Some(0)]);
        let mapped = map_values(&mapper, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(mapped, vec![3.0, 0.0, 1.0]);
    }

    #[test]
    fn test_weighted_map() {
        let mapper = WeightedMapper::new(
            vec![vec![0, 1], vec![1]],
            vec![vec![0.25, 0.75], vec![1.0]],
        )
        .unwrap();
        let mapped = map_values(&mapper, &[DVec3::X, DVec3::Y]).unwrap();
        assert_eq!(mapped[0], DVec3::new(0.25, 0.75, 0.0));
        assert_eq!(mapped[1], DVec3::Y);
    }

    #[test]
    fn test_weighted_shape_checked() {
        assert!(WeightedMapper::new(vec![vec![0, 1]], vec![vec![1.0]]).is_err());
        assert!(WeightedMapper::new(vec![vec![0]], vec![]).is_err());
    }

    #[test]
    fn test_map_source_out_of_range() {
        let mapper = DirectMapper::from_indices(vec![0, 5]);
        assert!(matches!(
            map_values(&mapper, &[1.0, 2.0]),
            Err(RfError::IndexOutOfBounds { index: 5, .. })
        ));
    }

    #[test]
    fn test_map_flags() {
        let direct = DirectMapper::new(vec![Some(1), None]);
        assert_eq!(map_flags(&direct, &[false, true]).unwrap(), vec![true, false]);

        let weighted =
            WeightedMapper::new(vec![vec![0, 1], vec![1]], vec![vec![0.5, 0.5], vec![1.0]])
                .unwrap();
        assert_eq!(map_flags(&weighted, &[false, true]).unwrap(), vec![false, true]);
    }

    #[test]
    fn test_rmap_writes_targets() {
        let mut target = vec![0.0; 4];
        rmap_values(&mut target, &[7.0, 8.0], &[3, 1]).unwrap();
        assert_eq!(target, vec![0.0, 8.0, 0.0, 7.0]);
    }

    #[test]
    fn test_rmap_rejects_without_writing() {
        let mut target = vec![1.0; 3];
        // 第二个目标越界，第一个不应被写入
        assert!(rmap_values(&mut target, &[5.0, 6.0], &[0, 3]).is_err());
        assert_eq!(target, vec![1.0; 3]);

        assert!(matches!(
            rmap_values(&mut target, &[5.0, 6.0], &[0]),
            Err(RfError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_identity() {
        let mapper = DirectMapper::identity(3);
        assert_eq!(mapper.size(), 3);
        assert_eq!(map_values(&mapper, &[4.0, 5.0, 6.0]).unwrap(), vec![4.0, 5.0, 6.0]);
    }
}
