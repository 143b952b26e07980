use ndarray::{Array1, ArrayView1};

pub trait LossFn {
    /// The loss of a whole batch.
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;

    /// The per-sample factor the features are multiplied by to obtain the gradient.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32>;
}
