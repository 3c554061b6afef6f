use std::io;

use thiserror::Error;

use crate::graph::VertexId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse GFA input: {0}")]
    Gfa(String),
    #[error("the graph has no vertices to start from")]
    EmptyGraph,
    #[error("root vertex `{0}` is not part of the graph")]
    UnknownRoot(VertexId),
}

/// Why a single input line was rejected. These never abort reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("syntax: expected two vertex ids, found {0} tokens")]
    Syntax(usize),
    #[error("value: `{0}` is not a vertex id")]
    Value(String),
    #[error("loop: vertex {0} cannot be joined to itself")]
    Loop(VertexId),
}
