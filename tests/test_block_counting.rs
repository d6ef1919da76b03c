/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use blocksplit::prelude::*;
use dsi_progress_logger::no_logging;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_edges(n: usize, max_id: u64, seed: u64) -> Vec<(u64, u64)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.random_range(0..max_id), rng.random_range(0..max_id)))
        .collect()
}

#[test]
fn test_small_scenario() -> Result<()> {
    let mut splitter = BlockCountingSplitter::<u64>::new(4, true, 1, 0)?;
    assert_eq!(splitter.block_partitions(), 1);

    assert_eq!(splitter.count_edge(0, 5), 0);
    assert_eq!(splitter.block_partitions(), 2);
    assert_eq!(splitter.count_edge(3, 9), 0);
    assert_eq!(splitter.block_partitions(), 3);
    assert_eq!(splitter.count_edge(6, 1), 1);

    assert_eq!(splitter.partitions(), 2);
    assert_eq!(splitter.partition_counters(), &[2, 1]);
    assert_eq!(splitter.max_id(), 9);

    let blocks = splitter.block_counters();
    assert_eq!(
        blocks.as_slice(),
        &[
            0, 1, 1, //
            1, 0, 0, //
            0, 0, 0, //
        ]
    );
    Ok(())
}

#[test]
fn test_out_split() -> Result<()> {
    let mut splitter = BlockCountingSplitter::<u32>::new(4, false, 0, 0)?;
    assert_eq!(splitter.count_edge(0, 5), 1);
    assert_eq!(splitter.count_edge(3, 9), 2);
    assert_eq!(splitter.count_edge(6, 1), 0);
    assert_eq!(splitter.partition_counters(), &[1, 1, 1]);
    // Rows are given by destinations
    let blocks = splitter.block_counters();
    assert_eq!(blocks.dim(), 3);
    assert_eq!(blocks.get(1, 0), 1);
    assert_eq!(blocks.get(2, 0), 1);
    assert_eq!(blocks.get(0, 1), 1);
    assert_eq!(blocks.total(), 3);
    Ok(())
}

#[test]
fn test_direction_independence() -> Result<()> {
    let by_source = BlockCountingSplitter::<u64>::new(16, true, 0, 0)?;
    let by_destination = BlockCountingSplitter::<u64>::new(16, false, 0, 0)?;
    for (x, y) in random_edges(1000, 1 << 12, 0) {
        assert_eq!(by_source.partition_id(x, y), by_source.partition_id(x, 0));
        assert_eq!(by_source.partition_id(x, y), (x >> 4) as usize);
        assert_eq!(
            by_destination.partition_id(x, y),
            by_destination.partition_id(0, y)
        );
        assert_eq!(by_destination.partition_id(x, y), (y >> 4) as usize);
    }
    Ok(())
}

#[test]
fn test_sums_and_monotonicity() -> Result<()> {
    for in_split in [true, false] {
        let mut splitter = BlockCountingSplitter::<u64>::new(64, in_split, 0, 0)?;
        let edges = random_edges(10_000, 5_000, 1);
        let mut partitions = 0;
        let mut counters = vec![];
        for (i, &(x, y)) in edges.iter().enumerate() {
            splitter.count_edge(x, y);
            assert!(splitter.partitions() >= partitions);
            partitions = splitter.partitions();
            // Counters only grow
            for (old, new) in counters.iter().zip(splitter.partition_counters()) {
                assert!(new >= old);
            }
            counters = splitter.partition_counters().to_vec();
            assert_eq!(splitter.num_edges(), i as u64 + 1);
        }
        assert_eq!(splitter.partition_counters().iter().sum::<u64>(), 10_000);
        assert_eq!(splitter.block_counters().total(), 10_000);
        let max_id = edges.iter().map(|&(x, y)| x.max(y)).max().unwrap();
        assert_eq!(splitter.max_id(), max_id);
        assert_eq!(splitter.block_partitions(), (max_id >> 6) as usize + 1);
    }
    Ok(())
}

#[test]
fn test_blocks_match_naive() -> Result<()> {
    let edges = random_edges(5_000, 1_000, 2);
    for in_split in [true, false] {
        let mut splitter = BlockCountingSplitter::<u64>::new(32, in_split, 0, 0)?;
        splitter.count_edges(edges.iter().copied(), no_logging![]);
        let blocks = splitter.block_counters();
        let dim = blocks.dim();
        let mut naive = vec![0_u64; dim * dim];
        for &(x, y) in &edges {
            let (row, col) = if in_split { (x >> 5, y >> 5) } else { (y >> 5, x >> 5) };
            naive[row as usize * dim + col as usize] += 1;
        }
        assert_eq!(blocks.as_slice(), naive.as_slice());
    }
    Ok(())
}

#[test]
fn test_growth_preserves_counts() -> Result<()> {
    let mut splitter = BlockCountingSplitter::<u64>::new(2, true, 0, 0)?;
    splitter.count_edge(0, 1);
    splitter.count_edge(2, 0);
    splitter.count_edge(3, 3);
    let before = splitter.block_counters();
    assert_eq!(before.dim(), 2);

    // Forces growth to 50x50
    splitter.count_edge(99, 0);
    let after = splitter.block_counters();
    assert_eq!(after.dim(), 50);
    for row in 0..2 {
        for col in 0..2 {
            assert_eq!(after.get(row, col), before.get(row, col));
        }
    }
    assert_eq!(after.get(49, 0), 1);
    assert_eq!(after.total(), 4);

    // Within the allocated region, other cells are untouched
    splitter.count_edge(10, 20);
    let last = splitter.block_counters();
    assert_eq!(last.dim(), 50);
    for row in 0..50 {
        for col in 0..50 {
            let expected = after.get(row, col) + u64::from(row == 5 && col == 10);
            assert_eq!(last.get(row, col), expected);
        }
    }
    Ok(())
}

#[test]
fn test_replay_is_deterministic() -> Result<()> {
    let edges = random_edges(20_000, 1 << 16, 3);
    let builder = SplitterBuilder::default()
        .ids_by_partition(1 << 10)
        .ids_cache(1 << 8)
        .partitions(4);
    let mut first = builder.try_build::<u64>()?;
    let mut second = builder.try_build::<u64>()?;
    first.count_edges(edges.iter().copied(), no_logging![]);
    second.count_edges(edges.iter().copied(), no_logging![]);
    assert_eq!(first.partition_counters(), second.partition_counters());
    assert_eq!(first.block_counters(), second.block_counters());
    assert_eq!(first.max_id(), second.max_id());
    Ok(())
}

#[test]
fn test_cache_partitioning() -> Result<()> {
    // Four cache sub-partitions of 4 ids in each partition of 16 ids
    let mut splitter = BlockCountingSplitter::<u64>::new(16, true, 0, 4)?;
    assert!(splitter.is_cache_partitioning());
    assert_eq!(splitter.count_edge(5, 40), 1);
    assert_eq!(splitter.count_edge(17, 0), 4);
    assert_eq!(splitter.count_edge(63, 63), 15);
    assert_eq!(splitter.partitions(), 16);
    assert_eq!(splitter.num_edges(), 3);

    // Blocks are indexed by partitions, not by cache sub-partitions
    let blocks = splitter.block_counters();
    assert_eq!(blocks.dim(), 4);
    assert_eq!(blocks.get(0, 2), 1);
    assert_eq!(blocks.get(1, 0), 1);
    assert_eq!(blocks.get(3, 3), 1);
    assert_eq!(blocks.total(), 3);
    Ok(())
}

#[test]
fn test_cache_of_one_id() -> Result<()> {
    let mut splitter = BlockCountingSplitter::<u64>::new(8, true, 0, 1)?;
    assert_eq!(splitter.count_edge(9, 3), 9);
    let blocks = splitter.block_counters();
    assert_eq!(blocks.dim(), 2);
    assert_eq!(blocks.get(1, 0), 1);
    Ok(())
}

#[test]
fn test_partition_file() -> Result<()> {
    let splitter = BlockCountingSplitter::<u64>::new(16, true, 0, 0)?;
    assert_eq!(splitter.partition_file(7), "7");

    let ratio = 4;
    let splitter = BlockCountingSplitter::<u64>::new(16, true, 0, 16 / ratio)?;
    for partition in 0..10 {
        for id in partition * ratio..(partition + 1) * ratio {
            assert_eq!(splitter.partition_file(id as usize), partition.to_string());
        }
    }
    Ok(())
}

#[test]
fn test_set_in_split() -> Result<()> {
    let mut splitter = BlockCountingSplitter::<u64>::new(4, true, 0, 0)?;
    assert!(splitter.is_in_split());
    assert_eq!(splitter.partition_id(8, 0), 2);
    splitter.set_in_split(false);
    assert!(!splitter.is_in_split());
    assert_eq!(splitter.partition_id(8, 0), 0);
    assert_eq!(splitter.partition_id_with_shift(8, 0, 1), 0);
    assert_eq!(splitter.partition_id_with_shift(0, 8, 1), 4);
    assert_eq!(splitter.ids_by_partition(), 4);
    Ok(())
}

#[test]
fn test_invalid_configuration() {
    assert_eq!(
        BlockCountingSplitter::<u64>::new(6, true, 0, 0).unwrap_err(),
        SplitError::PartitionSizeNotPowerOfTwo(6)
    );
    assert!(matches!(
        BlockCountingSplitter::<u64>::new(16, true, 0, 3),
        Err(SplitError::CacheSizeNotDivisor {
            ids_by_partition: 16,
            ids_cache: 3
        })
    ));
    assert!(SplitterBuilder::default()
        .ids_by_partition(0)
        .try_build::<u32>()
        .is_err());
}

#[test]
fn test_large_shift() -> Result<()> {
    // A single partition covering all u32 ids
    let mut splitter = BlockCountingSplitter::<u32>::new(1 << 40, true, 0, 0)?;
    assert_eq!(splitter.count_edge(u32::MAX, 7), 0);
    assert_eq!(splitter.block_partitions(), 1);
    assert_eq!(splitter.max_id(), u32::MAX);
    Ok(())
}
