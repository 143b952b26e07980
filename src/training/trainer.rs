use std::num::NonZeroUsize;

use log::{debug, info};

use super::LossHistory;
use crate::{arch::Model, arch::loss::LossFn, dataset::Dataset, error::Result, optimization::Optimizer};

/// Progress is reported on the first epoch and on every multiple of this.
const REPORT_EVERY: usize = 5;

/// A mini-batch `Trainer`. Contains the relevant components needed for training a model,
/// including the model itself.
pub struct Trainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    model: M,
    optimizer: O,
    loss_fn: L,

    epochs: usize,
    batch_size: NonZeroUsize,
}

impl<M, O, L> Trainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The optimizer applied after every batch.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output and the expected one.
    /// * `epochs` - The amount of passes over the dataset.
    /// * `batch_size` - The maximum amount of rows per batch.
    pub fn new(model: M, optimizer: O, loss_fn: L, epochs: usize, batch_size: NonZeroUsize) -> Self {
        Self {
            model,
            optimizer,
            loss_fn,
            epochs,
            batch_size,
        }
    }

    /// Trains the model over `dataset`, batches are taken in row order on every epoch.
    ///
    /// # Arguments
    /// * `dataset` - The training data.
    ///
    /// # Returns
    /// The loss of every epoch, that is, the mean of its batch losses.
    pub fn train(&mut self, dataset: &Dataset) -> Result<LossHistory> {
        let mut history = LossHistory::with_capacity(self.epochs);
        debug!(
            "training {} parameters for {} epochs over {} rows",
            self.model.size(),
            self.epochs,
            dataset.len()
        );

        for epoch in 0..self.epochs {
            let batches = dataset.batches(self.batch_size);
            let loss = self
                .model
                .backprop(&self.loss_fn, &mut self.optimizer, batches)?;

            history.push(loss);

            if epoch == 0 || (epoch + 1) % REPORT_EVERY == 0 {
                info!("epoch={}, loss={:.7}", epoch + 1, loss);
            }
        }

        Ok(history)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }
}
