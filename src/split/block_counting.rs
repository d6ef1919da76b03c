/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{BlockMatrix, SplitError, SplitterBuilder, VertexId};
use crate::utils::partition_file;
use dsi_progress_logger::ProgressLog;

/// Assigns edges to partitions and counts edges by partition and by block.
///
/// A splitter is configured with a number of vertex ids by partition, which
/// must be a power of two, so that the partition of an id is just the id
/// shifted to the right. An edge is assigned to the partition of its source if
/// [`is_in_split`](BlockCountingSplitter::is_in_split) is true, of its
/// destination otherwise. Optionally, partitions can be further divided in
/// cache sub-partitions, in which case the partition counters have the
/// granularity of the sub-partitions.
///
/// Besides the partition counters, the splitter keeps a [`BlockMatrix`] whose
/// cell (*r*, *c*) counts the edges whose selected endpoint is in partition *r*
/// and whose other endpoint is in partition *c*. The matrix uses always the
/// partition granularity, even when cache partitioning is enabled.
///
/// The range of ids is not known in advance: both the partition counters and
/// the block matrix grow as needed while [edges are
/// counted](BlockCountingSplitter::count_edge). Counting requires exclusive
/// access, as growth happens in place.
///
/// Instances are usually created with a [`SplitterBuilder`], or with
/// [`BlockCountingSplitter::new`].
///
/// # Examples
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use blocksplit::split::BlockCountingSplitter;
///
/// // Four ids by partition, partitioning by source
/// let mut splitter = BlockCountingSplitter::<u64>::new(4, true, 1, 0)?;
/// assert_eq!(splitter.count_edge(0, 5), 0);
/// assert_eq!(splitter.count_edge(3, 9), 0);
/// assert_eq!(splitter.count_edge(6, 1), 1);
///
/// assert_eq!(splitter.partition_counters(), &[2, 1]);
/// let blocks = splitter.block_counters();
/// assert_eq!(blocks.dim(), 3);
/// assert_eq!(blocks.get(0, 1), 1);
/// assert_eq!(blocks.get(0, 2), 1);
/// assert_eq!(blocks.get(1, 0), 1);
/// assert_eq!(splitter.max_id(), 9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BlockCountingSplitter<I: VertexId> {
    /// Whether the partition is selected by the source.
    in_split: bool,
    /// The number of ids by partition (a power of two).
    ids_by_partition: u64,
    /// The number of ids by cache sub-partition, or zero.
    ids_cache: u64,
    /// log₂ of `ids_by_partition`.
    partition_shift: u32,
    /// log₂ of `ids_cache`, if cache partitioning is enabled.
    cache_shift: Option<u32>,
    /// The shift used for partition counters.
    shift: u32,
    /// Edge counts by partition (or cache sub-partition).
    partition_counters: Vec<u64>,
    /// Edge counts by block.
    blocks: BlockMatrix,
    /// The largest id seen so far.
    max_id: I,
}

impl<I: VertexId> BlockCountingSplitter<I> {
    /// Creates a new splitter.
    ///
    /// # Arguments
    /// - `ids_by_partition`: the number of ids by partition; it must be a
    ///   power of two.
    /// - `in_split`: whether to partition by source (true) or destination
    ///   (false).
    /// - `partitions`: an estimate of the number of partitions, possibly
    ///   zero.
    /// - `ids_cache`: the number of ids by cache sub-partition, or zero to
    ///   disable cache partitioning; if nonzero, it must divide
    ///   `ids_by_partition`.
    pub fn new(
        ids_by_partition: u64,
        in_split: bool,
        partitions: usize,
        ids_cache: u64,
    ) -> Result<Self, SplitError> {
        SplitterBuilder::default()
            .ids_by_partition(ids_by_partition)
            .in_split(in_split)
            .partitions(partitions)
            .ids_cache(ids_cache)
            .try_build()
    }

    pub(crate) fn from_parts(
        ids_by_partition: u64,
        ids_cache: u64,
        in_split: bool,
        partitions: usize,
        partition_shift: u32,
        cache_shift: Option<u32>,
    ) -> Self {
        Self {
            in_split,
            ids_by_partition,
            ids_cache,
            partition_shift,
            cache_shift,
            shift: cache_shift.unwrap_or(partition_shift),
            partition_counters: vec![0; partitions],
            blocks: BlockMatrix::new(partitions),
            max_id: I::ZERO,
        }
    }

    /// Returns the partition of an edge at the granularity of partition
    /// counters (that is, of cache sub-partitions, if enabled).
    #[inline(always)]
    pub fn partition_id(&self, source: I, destination: I) -> usize {
        self.partition_id_with_shift(source, destination, self.shift)
    }

    /// Returns the partition of an edge using the given shift.
    ///
    /// The endpoint is selected as in
    /// [`partition_id`](BlockCountingSplitter::partition_id), but it is
    /// shifted by `shift`. Swapping the endpoints gives the partition of the
    /// endpoint not selected.
    #[inline(always)]
    pub fn partition_id_with_shift(&self, source: I, destination: I, shift: u32) -> usize {
        if self.in_split {
            source.shifted(shift)
        } else {
            destination.shifted(shift)
        }
    }

    /// Counts an edge, returning its partition at the granularity of
    /// partition counters.
    ///
    /// Partition counters and the block matrix are grown as needed. Under
    /// cache partitioning the returned value is the cache sub-partition,
    /// whereas the block matrix is always indexed by partitions.
    pub fn count_edge(&mut self, source: I, destination: I) -> usize {
        let partition = self.partition_id(source, destination);
        if partition >= self.partition_counters.len() {
            log::debug!("Increasing partitions to {}", partition + 1);
            self.partition_counters.resize(partition + 1, 0);
        }
        self.partition_counters[partition] += 1;

        // Recomputed at partition granularity, even if no cache is used
        let row = self.partition_id_with_shift(source, destination, self.partition_shift);
        let col = self.partition_id_with_shift(destination, source, self.partition_shift);

        self.max_id = self.max_id.max(source).max(destination);

        let needed = row.max(col) + 1;
        if needed > self.blocks.dim() {
            log::debug!(
                "Increasing block partitions from {} to {}",
                self.blocks.dim(),
                needed
            );
            self.blocks.grow(needed);
        }
        self.blocks.increment(row, col);

        partition
    }

    /// Counts all edges returned by an iterator, logging progress, and
    /// returns the number of edges counted.
    pub fn count_edges(
        &mut self,
        edges: impl IntoIterator<Item = (I, I)>,
        pl: &mut impl ProgressLog,
    ) -> u64 {
        pl.item_name("edge");
        pl.start(format!(
            "Counting edges in partitions of {} ids...",
            self.ids_by_partition
        ));
        let mut count = 0;
        for (source, destination) in edges {
            self.count_edge(source, destination);
            count += 1;
            pl.light_update();
        }
        pl.done();
        pl.info(format_args!(
            "{} partitions, {}x{} blocks, max id {}",
            self.partitions(),
            self.blocks.dim(),
            self.blocks.dim(),
            self.max_id
        ));
        count
    }

    /// Returns the number of partitions (at the granularity of partition
    /// counters).
    #[inline(always)]
    pub fn partitions(&self) -> usize {
        self.partition_counters.len()
    }

    /// Returns the number of edges by partition, in partition order.
    pub fn partition_counters(&self) -> &[u64] {
        &self.partition_counters
    }

    /// Returns a snapshot of the block matrix.
    pub fn block_counters(&self) -> BlockMatrix {
        self.blocks.clone()
    }

    /// Returns the block matrix.
    pub fn blocks(&self) -> &BlockMatrix {
        &self.blocks
    }

    /// Returns the dimension of the block matrix.
    pub fn block_partitions(&self) -> usize {
        self.blocks.dim()
    }

    /// Returns the number of edges counted so far.
    pub fn num_edges(&self) -> u64 {
        self.partition_counters.iter().sum()
    }

    /// Returns the largest id seen so far, or zero if no edge was counted.
    pub fn max_id(&self) -> I {
        self.max_id
    }

    /// Returns the number of ids by partition.
    pub fn ids_by_partition(&self) -> u64 {
        self.ids_by_partition
    }

    /// Returns the number of ids by cache sub-partition, or zero if cache
    /// partitioning is disabled.
    pub fn ids_cache(&self) -> u64 {
        self.ids_cache
    }

    /// Returns whether cache partitioning is enabled.
    pub fn is_cache_partitioning(&self) -> bool {
        self.cache_shift.is_some()
    }

    /// Returns whether edges are partitioned by source.
    pub fn is_in_split(&self) -> bool {
        self.in_split
    }

    /// Sets whether edges are partitioned by source.
    ///
    /// This makes it possible to reuse the splitter for a pass in the
    /// opposite direction. Counters are not reset.
    pub fn set_in_split(&mut self, in_split: bool) {
        self.in_split = in_split;
    }

    /// Returns the file key of the partition with the given id.
    ///
    /// If cache partitioning is enabled, `id` is a cache sub-partition, and
    /// the key is that of the partition containing it.
    pub fn partition_file(&self, id: usize) -> String {
        match self.cache_shift {
            Some(cache_shift) => {
                let ratio = 1_usize << (self.partition_shift - cache_shift);
                partition_file("", id / ratio, "")
            }
            None => partition_file("", id, ""),
        }
    }
}
