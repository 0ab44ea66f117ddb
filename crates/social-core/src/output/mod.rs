//! Output Generation
//!
//! Snapshot building and JSON file output.

pub mod snapshot;
pub mod writer;

pub use snapshot::*;
pub use writer::*;
