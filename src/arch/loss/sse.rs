use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Sum of squared errors over a batch.
///
/// `loss_prime` is the raw signed error `y_pred - y`. Paired with a sigmoid output this is the
/// gradient factor of the logistic log-loss, which is the update rule the trainer applies.
#[derive(Default, Clone, Copy)]
pub struct SumSquaredError;

impl SumSquaredError {
    /// Returns a new `SumSquaredError`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for SumSquaredError {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        (&y_pred - &y).mapv(|e| e.powi(2)).sum()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        &y_pred - &y
    }
}
