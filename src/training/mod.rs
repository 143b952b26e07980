mod builder;
mod history;
mod trainer;

pub use builder::{SgdTrainer, TrainerBuilder};
pub use history::LossHistory;
pub use trainer::Trainer;
