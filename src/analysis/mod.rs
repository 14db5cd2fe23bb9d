//! Analysis modules.
//!
//! Platform filtering and progress aggregation over the task document.

pub mod aggregator;
pub mod filter;

pub use aggregator::*;
pub use filter::*;
