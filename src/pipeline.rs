use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    arch::LogisticRegression,
    config::{Config, DatasetConfig},
    dataset::{
        Dataset,
        blobs::{make_blobs, resolve_centers},
    },
    error::Result,
    metrics::ClassificationReport,
    plot,
    summary::RunSummary,
    training::{LossHistory, TrainerBuilder},
};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub train: Dataset,
    pub test: Dataset,
    pub model: LogisticRegression,
    pub history: LossHistory,
    pub report: ClassificationReport,
}

/// Generates the blobs, appends the bias column and splits them.
///
/// # Returns
/// A tuple with the train and test subsets.
///
/// # Errors
/// `SgdErr::InvalidParameter` if the config is invalid.
pub fn prepare_data(config: &DatasetConfig) -> Result<(Dataset, Dataset)> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let centers = resolve_centers(&config.centers, &mut rng)?;
    debug!("blob centers: {centers:?}");

    let dataset = make_blobs(config.samples, &centers, config.cluster_std, &mut rng)?.with_bias()?;

    let mut split_rng = StdRng::seed_from_u64(config.split_seed);
    dataset.split(config.test_fraction, &mut split_rng)
}

/// Runs the whole demo: data, training, evaluation and the figure, plus the summary when one
/// is configured.
///
/// # Errors
/// Any error of the steps above, the run stops at the first one.
pub fn run(config: &Config) -> Result<RunOutcome> {
    config.validate()?;

    let (train, test) = prepare_data(&config.dataset)?;
    info!("train rows={}, test rows={}", train.len(), test.len());

    let mut trainer = TrainerBuilder::new().build(&config.training, train.n_features())?;

    info!("training...");
    let history = trainer.train(&train)?;
    let model = trainer.into_model();
    debug!("final weights: {}", model.weights());

    info!("evaluating...");
    let y_pred = model.predict(test.x())?;
    let report = ClassificationReport::new(test.classes().view(), y_pred.view())?;

    plot::render(&config.figure, &test, &history)?;
    info!("figure written to {}", config.figure.display());

    if let Some(path) = &config.summary {
        let weights = model.weights().to_vec();
        RunSummary::new(&config.training, &weights, &history, &report)?.write(path)?;
        info!("summary written to {}", path.display());
    }

    Ok(RunOutcome {
        train,
        test,
        model,
        history,
        report,
    })
}
