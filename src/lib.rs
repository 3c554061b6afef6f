pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod report;
pub mod state;

pub use algorithm::analyze;
pub use config::{Config, RootRule};
pub use error::{Error, Result};
pub use graph::{Graph, VertexId};
pub use report::Analysis;
