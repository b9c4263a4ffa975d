//! Tribar Labels
//!
//! Triple-barrier outcome labeling over an untransformed price series.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod barrier;
pub mod error;
pub mod outcome;
pub mod table;

pub use barrier::{TripleBarrier, label};
pub use error::LabelError;
pub use outcome::{ClassCounts, Outcome};
pub use table::{LabelTable, one_hot};
