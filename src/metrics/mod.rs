mod report;

pub use report::{ClassScores, ClassificationReport};
