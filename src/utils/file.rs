/*
 *
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Partition file names and edge-list opening.

*/

use flate2::read::GzDecoder;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Returns the file key of a partition.
///
/// The key is the concatenation of `prefix`, the decimal representation of
/// `id`, and `suffix`. This function is pure, so it can be used to rebuild
/// keys at any time.
///
/// ```rust
/// use blocksplit::utils::partition_file;
///
/// assert_eq!(partition_file("graph.", 3, ".part"), "graph.3.part");
/// assert_eq!(partition_file("", 12, ""), "12");
/// ```
pub fn partition_file(prefix: &str, id: usize, suffix: &str) -> String {
    format!("{}{}{}", prefix, id, suffix)
}

/// Opens an edge list for buffered reading.
///
/// The path `-` denotes standard input. Files ending in `.gz` are decompressed
/// with gzip, and files ending in `.zst` with Zstandard.
pub fn open_edge_list(path: impl AsRef<Path>) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)?;
    Ok(match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Box::new(BufReader::new(GzDecoder::new(file))),
        Some("zst") => Box::new(BufReader::new(zstd::stream::read::Decoder::new(file)?)),
        _ => Box::new(BufReader::new(file)),
    })
}
