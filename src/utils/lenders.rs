/*
 *
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Lenders of edges read from text edge lists.
//!
//! An edge list contains one edge per line, given by the source and the
//! destination id separated by whitespace. Additional columns (e.g., weights)
//! are ignored, as are empty lines and lines starting with `#` or `%`.
//!
//! [`EdgeLender`] reads lines into a reusable internal buffer, so no string is
//! allocated by line.

use crate::split::VertexId;
use lender::*;
use std::io::{self, BufRead};
use std::marker::PhantomData;

/// A structure lending the edges of an edge list coming from a [`BufRead`].
///
/// Each item is a [`Result`] containing the source and the destination of the
/// edge; malformed lines generate an error of kind
/// [`InvalidData`](io::ErrorKind::InvalidData) reporting the line number.
///
/// ```rust
/// use blocksplit::utils::EdgeLender;
/// use lender::Lender;
///
/// let input = "# a comment\n0 1\n1\t2 0.5\n\n2 0\n";
/// let mut lender = EdgeLender::<_, u32>::new(input.as_bytes());
/// let mut edges = vec![];
/// while let Some(edge) = lender.next() {
///     edges.push(edge.unwrap());
/// }
/// assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
/// ```
pub struct EdgeLender<B, I> {
    buf: B,
    line: String,
    line_number: usize,
    _marker: PhantomData<I>,
}

impl<B, I> EdgeLender<B, I> {
    pub fn new(buf: B) -> Self {
        EdgeLender {
            buf,
            line: String::with_capacity(64),
            line_number: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<B, I> From<B> for EdgeLender<B, I> {
    fn from(buf: B) -> Self {
        EdgeLender::new(buf)
    }
}

fn invalid(line_number: usize, msg: impl AsRef<str>) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Line {}: {}", line_number, msg.as_ref()),
    )
}

fn parse_edge<I: VertexId>(line: &str, line_number: usize) -> io::Result<(I, I)> {
    let mut fields = line.split_whitespace();
    let mut parse = |what: &str| -> io::Result<I> {
        let field = fields
            .next()
            .ok_or_else(|| invalid(line_number, format!("missing {}", what)))?;
        field
            .parse::<I>()
            .map_err(|_| invalid(line_number, format!("invalid {} id {:?}", what, field)))
    };
    let source = parse("source")?;
    let destination = parse("destination")?;
    Ok((source, destination))
}

impl<'lend, B: BufRead, I: VertexId> Lending<'lend> for EdgeLender<B, I> {
    type Lend = io::Result<(I, I)>;
}

impl<B: BufRead, I: VertexId> Lender for EdgeLender<B, I> {
    fn next(&mut self) -> Option<Lend<'_, Self>> {
        loop {
            self.line.clear();
            match self.buf.read_line(&mut self.line) {
                Err(e) => return Some(Err(e)),
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.line.trim();
                    if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
                        continue;
                    }
                    return Some(parse_edge(line, self.line_number));
                }
            }
        }
    }
}
