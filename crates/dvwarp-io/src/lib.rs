//! File I/O, validation, and serialization for the dvwarp pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{ExperimentName, TracePair};
pub use error::IoError;
pub use reader::TraceReader;
pub use writer::ResultWriter;
