use std::io::prelude::*;

use bstr::io::BufReadExt;
use bstr::ByteSlice;
use log::{debug, warn};

use crate::error::{LineError, Result};
use crate::graph::{Graph, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Edge(VertexId, VertexId),
    Blank,
    Done,
}

/// An input line that was skipped, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub line_no: usize,
    pub text: String,
    pub error: LineError,
}

#[derive(Debug, Default)]
pub struct EdgeInput {
    pub graph: Graph,
    pub rejected: Vec<Rejected>,
}

fn parse_id(token: &[u8]) -> std::result::Result<VertexId, LineError> {
    token
        .to_str()
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| LineError::Value(token.to_str_lossy().into_owned()))
}

/// Parses one line of the edge list: two whitespace separated vertex
/// ids, or `done` in any case.
pub fn parse_line(line: &[u8]) -> std::result::Result<Line, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line.eq_ignore_ascii_case(b"done") {
        return Ok(Line::Done);
    }

    let tokens: Vec<&[u8]> = line.fields().collect();
    if tokens.len() != 2 {
        return Err(LineError::Syntax(tokens.len()));
    }

    let a = parse_id(tokens[0])?;
    let b = parse_id(tokens[1])?;
    if a == b {
        return Err(LineError::Loop(a));
    }
    Ok(Line::Edge(a, b))
}

/// Reads vertex pairs until a `done` line or the end of the stream.
/// Malformed lines are logged, collected and skipped.
pub fn read_edges<R: BufRead>(reader: R) -> Result<EdgeInput> {
    let mut input = EdgeInput::default();

    for (ix, line) in reader.byte_lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Line::Edge(a, b)) => {
                input.graph.add_vertex(a);
                input.graph.add_vertex(b);
                if !input.graph.add_edge(a, b) {
                    debug!("line {}: edge {} {} already known", ix + 1, a, b);
                }
            }
            Ok(Line::Blank) => (),
            Ok(Line::Done) => break,
            Err(error) => {
                let text = line.to_str_lossy().trim().to_string();
                warn!("line {}: ({}) {}", ix + 1, text, error);
                input.rejected.push(Rejected {
                    line_no: ix + 1,
                    text,
                    error,
                });
            }
        }
    }

    Ok(input)
}
