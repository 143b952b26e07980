pub mod arch;
pub mod config;
pub mod dataset;
mod error;
pub mod metrics;
pub mod optimization;
pub mod pipeline;
pub mod plot;
pub mod summary;
pub mod training;

pub use error::{Result, SgdErr};
