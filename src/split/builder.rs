/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{BlockCountingSplitter, VertexId};
use derivative::Derivative;
use derive_setters::*;

/// Fatal configuration errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    #[error("The number of ids by partition ({0}) is not a power of two")]
    /// The partition size is not a power of two (zero included).
    PartitionSizeNotPowerOfTwo(u64),
    #[error("The number of ids by partition ({ids_by_partition}) is not a multiple of the number of ids in cache ({ids_cache})")]
    /// The cache size is nonzero and does not divide the partition size.
    CacheSizeNotDivisor {
        /// The partition size.
        ids_by_partition: u64,
        /// The cache size.
        ids_cache: u64,
    },
}

/// A builder for [`BlockCountingSplitter`].
///
/// All parameters have defaults, so the typical usage sets just the partition
/// size, and possibly the direction:
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use blocksplit::split::SplitterBuilder;
///
/// let mut splitter = SplitterBuilder::default()
///     .ids_by_partition(1 << 10)
///     .in_split(false)
///     .try_build::<u32>()?;
///
/// // Partitioned by destination
/// assert_eq!(splitter.count_edge(0, 3000), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Setters, Debug, Clone, Copy, Derivative)]
#[derivative(Default)]
#[setters(generate = false)]
pub struct SplitterBuilder {
    /// The number of vertex ids in a partition. It must be a power of two. The
    /// default is 2²⁰.
    #[setters(generate = true)]
    #[derivative(Default(value = "1 << 20"))]
    ids_by_partition: u64,

    /// Whether the partition of an edge is selected by its source (true) or
    /// by its destination (false). The default is true.
    #[setters(generate = true)]
    #[derivative(Default(value = "true"))]
    in_split: bool,

    /// An estimate of the number of partitions. Counters are allocated
    /// eagerly for this number of partitions, and grow anyway as needed.
    #[setters(generate = true)]
    partitions: usize,

    /// The number of vertex ids in a cache sub-partition, or zero to disable
    /// cache partitioning. If nonzero, it must divide
    /// [`ids_by_partition`](SplitterBuilder::ids_by_partition).
    #[setters(generate = true)]
    ids_cache: u64,
}

impl SplitterBuilder {
    /// Checks the configuration, returning the partition shift and the
    /// optional cache shift.
    pub(crate) fn shifts(&self) -> Result<(u32, Option<u32>), SplitError> {
        if !self.ids_by_partition.is_power_of_two() {
            log::error!(
                "The number of ids by partition must be a power of two, got {}",
                self.ids_by_partition
            );
            return Err(SplitError::PartitionSizeNotPowerOfTwo(
                self.ids_by_partition,
            ));
        }
        if self.ids_cache != 0 && self.ids_by_partition % self.ids_cache != 0 {
            log::error!(
                "The number of ids by partition ({}) must be a multiple of the number of ids in cache ({})",
                self.ids_by_partition,
                self.ids_cache
            );
            return Err(SplitError::CacheSizeNotDivisor {
                ids_by_partition: self.ids_by_partition,
                ids_cache: self.ids_cache,
            });
        }

        // A divisor of a power of two is a power of two
        let cache_shift = (self.ids_cache != 0).then(|| self.ids_cache.trailing_zeros());
        Ok((self.ids_by_partition.trailing_zeros(), cache_shift))
    }

    /// Builds a splitter for vertex ids of type `I`, checking the
    /// configuration.
    pub fn try_build<I: VertexId>(self) -> Result<BlockCountingSplitter<I>, SplitError> {
        let (partition_shift, cache_shift) = self.shifts()?;
        Ok(BlockCountingSplitter::from_parts(
            self.ids_by_partition,
            self.ids_cache,
            self.in_split,
            self.partitions,
            partition_shift,
            cache_shift,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shifts() {
        let builder = SplitterBuilder::default().ids_by_partition(16);
        assert_eq!(builder.shifts(), Ok((4, None)));
        assert_eq!(builder.ids_cache(4).shifts(), Ok((4, Some(2))));
        assert_eq!(builder.ids_cache(1).shifts(), Ok((4, Some(0))));
        assert_eq!(builder.ids_cache(16).shifts(), Ok((4, Some(4))));
    }

    #[test]
    fn test_rejects() {
        assert_eq!(
            SplitterBuilder::default().ids_by_partition(0).shifts(),
            Err(SplitError::PartitionSizeNotPowerOfTwo(0))
        );
        assert_eq!(
            SplitterBuilder::default()
                .ids_by_partition(8)
                .ids_cache(3)
                .shifts(),
            Err(SplitError::CacheSizeNotDivisor {
                ids_by_partition: 8,
                ids_cache: 3
            })
        );
        assert_eq!(
            SplitterBuilder::default()
                .ids_by_partition(8)
                .ids_cache(16)
                .shifts(),
            Err(SplitError::CacheSizeNotDivisor {
                ids_by_partition: 8,
                ids_cache: 16
            })
        );
    }
}
