use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use super::Trainer;
use crate::{
    arch::{LogisticRegression, loss::SumSquaredError},
    config::TrainingConfig,
    error::Result,
    optimization::GradientDescent,
};

/// The trainer assembled from a `TrainingConfig`.
pub type SgdTrainer = Trainer<LogisticRegression, GradientDescent, SumSquaredError>;

/// Builds `Trainer`s given a configuration.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a config, with freshly initialized weights.
    ///
    /// # Arguments
    /// * `config` - The hyperparameters of the training.
    /// * `n_features` - The amount of columns of the training features, the bias column included.
    ///
    /// # Errors
    /// `SgdErr::InvalidParameter` if the config is invalid.
    pub fn build(&self, config: &TrainingConfig, n_features: usize) -> Result<SgdTrainer> {
        config.validate()?;

        let epochs = config.epoch_count()?;
        let batch_size = config.batch_size()?;

        let mut rng = self.generate_rng(config.seed);
        let model = LogisticRegression::random(n_features, &mut rng);
        debug!("initial weights: {}", model.weights());

        let optimizer = GradientDescent::new(config.alpha);
        let trainer = Trainer::new(model, optimizer, SumSquaredError::new(), epochs, batch_size);

        Ok(trainer)
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SgdErr;

    #[test]
    fn seeded_builds_share_their_weights() {
        let config = TrainingConfig {
            seed: Some(3),
            ..Default::default()
        };

        let a = TrainerBuilder::new().build(&config, 3).unwrap();
        let b = TrainerBuilder::new().build(&config, 3).unwrap();

        assert_eq!(a.model().weights(), b.model().weights());
        assert_eq!(a.model().weights().len(), 3);
    }

    #[test]
    fn invalid_config_is_not_built() {
        let config = TrainingConfig {
            batch_size: 0,
            ..Default::default()
        };

        let err = TrainerBuilder::new().build(&config, 3).err().unwrap();
        assert!(matches!(err, SgdErr::InvalidParameter(_)));
    }
}
