/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Edge partitioning and block counting.
//!
//! Before edges are written to disk-resident partitions, a sizing pass over
//! the edge stream counts, using a [`BlockCountingSplitter`], how many edges
//! fall into each partition and into each block of the block-adjacency
//! matrix. The sizes are then used to lay out partition files.

mod block_counting;
pub use block_counting::BlockCountingSplitter;

mod block_matrix;
pub use block_matrix::BlockMatrix;

mod builder;
pub use builder::{SplitError, SplitterBuilder};

mod vertex_id;
pub use vertex_id::VertexId;
