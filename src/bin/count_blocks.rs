/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use blocksplit::{
    init_env_logger,
    split::SplitterBuilder,
    utils::{open_edge_list, EdgeLender},
};
use clap::Parser;
use dsi_progress_logger::*;
use epserde::ser::Serialize;
use lender::Lender;

#[derive(Parser, Debug)]
#[command(about = "Counts the edges of an edge list by partition and by block, as needed to lay out partition files.", long_about = None)]
struct Args {
    /// An edge list with one edge per line (source and destination separated by whitespace), or - for standard input; files ending in .gz or .zst are decompressed.
    source: String,
    /// The number of vertex ids in a partition (a power of two).
    #[arg(short = 'p', long, default_value_t = 1 << 20)]
    ids_by_partition: u64,
    /// The number of vertex ids in a cache sub-partition (zero to disable cache partitioning).
    #[arg(short = 'c', long, default_value_t = 0)]
    ids_cache: u64,
    /// An estimate of the number of partitions.
    #[arg(short = 'n', long, default_value_t = 0)]
    partitions: usize,
    /// Select partitions by destination rather than by source.
    #[arg(long, default_value_t = false)]
    out_split: bool,
    /// Print the block matrix.
    #[arg(short, long, default_value_t = false)]
    blocks: bool,
    /// Store the block matrix, serialized with ε-serde, in this file.
    #[arg(long)]
    blocks_out: Option<String>,
}

#[allow(unused_unsafe)]
fn main() -> Result<()> {
    init_env_logger()?;

    let args = Args::parse();

    let mut splitter = SplitterBuilder::default()
        .ids_by_partition(args.ids_by_partition)
        .ids_cache(args.ids_cache)
        .partitions(args.partitions)
        .in_split(!args.out_split)
        .try_build::<u64>()?;

    let mut lender = EdgeLender::<_, u64>::new(
        open_edge_list(&args.source).with_context(|| format!("Cannot open {}", args.source))?,
    );

    let mut pl = ProgressLogger::default();
    pl.display_memory(true);
    pl.item_name("edge");
    pl.start("Counting edges...");

    while let Some(edge) = lender.next() {
        let (source, destination) = edge?;
        splitter.count_edge(source, destination);
        pl.light_update();
    }

    pl.done();

    println!("partitions\t{}", splitter.partitions());
    println!("block_partitions\t{}", splitter.block_partitions());
    println!("max_id\t{}", splitter.max_id());
    println!("edges\t{}", splitter.num_edges());
    for (id, count) in splitter.partition_counters().iter().enumerate() {
        println!("{}\t{}\t{}", id, splitter.partition_file(id), count);
    }

    let blocks = splitter.block_counters();
    if args.blocks {
        for row in blocks.rows() {
            let row: Vec<String> = row.iter().map(|count| count.to_string()).collect();
            println!("{}", row.join("\t"));
        }
    }

    if let Some(blocks_out) = args.blocks_out {
        let file = std::fs::File::create(&blocks_out)
            .with_context(|| format!("Cannot create {}", blocks_out))?;
        let mut file = std::io::BufWriter::new(file);
        unsafe {
            blocks
                .serialize(&mut file)
                .map_err(|e| anyhow::anyhow!("Cannot serialize block matrix: {}", e))?;
        }
    }

    Ok(())
}
