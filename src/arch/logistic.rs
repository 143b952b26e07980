use ndarray::{Array1, ArrayView1, ArrayView2};
use ndarray_rand::{RandomExt, rand_distr::StandardNormal};
use rand::Rng;

use super::{
    Model,
    activations::{Sigmoid, Step},
    loss::LossFn,
};
use crate::{SgdErr, error::Result, optimization::Optimizer};

/// A linear binary classifier with a sigmoid link.
///
/// The bias is expected to be folded into the features as a constant column, so the model is
/// nothing more than its weight vector.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    weights: Array1<f32>,
    sigmoid: Sigmoid,
    step: Step,
}

impl LogisticRegression {
    /// Creates a new `LogisticRegression`.
    ///
    /// # Arguments
    /// * `weights` - One weight per feature, the bias column included.
    pub fn new(weights: Array1<f32>) -> Self {
        Self {
            weights,
            sigmoid: Sigmoid::new(),
            step: Step::binary(),
        }
    }

    /// Creates a new `LogisticRegression` with weights sampled from a standard normal.
    ///
    /// # Arguments
    /// * `dim` - The amount of features, the bias column included.
    /// * `rng` - A random number generator.
    pub fn random<R: Rng>(dim: usize, rng: &mut R) -> Self {
        Self::new(Array1::random_using(dim, StandardNormal, rng))
    }

    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.weights.view()
    }

    /// Computes `sigmoid(x · w)` for every row of `x`.
    ///
    /// # Errors
    /// `SgdErr::SizeMismatch` if the amount of columns in `x` differs from the weights'.
    pub fn predict_proba(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        if x.ncols() != self.weights.len() {
            return Err(SgdErr::SizeMismatch {
                what: "features and weights",
                got: x.ncols(),
                expected: self.weights.len(),
            });
        }

        let z = x.dot(&self.weights);
        Ok(self.sigmoid.forward(z))
    }

    /// Classifies every row of `x`: `1` when its score is above 0.5, `0` otherwise.
    ///
    /// # Errors
    /// `SgdErr::SizeMismatch` if the amount of columns in `x` differs from the weights'.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<u8>> {
        let scores = self.predict_proba(x)?;
        Ok(self.step.forward(scores).mapv(|class| class as u8))
    }
}

impl Model for LogisticRegression {
    fn size(&self) -> usize {
        self.weights.len()
    }

    // The epoch loss is the mean of the per-batch summed losses, so a smaller last batch weighs
    // as much as a full one.
    fn backprop<'a, L, O, I>(&mut self, loss_fn: &L, optimizer: &mut O, batches: I) -> Result<f32>
    where
        L: LossFn,
        O: Optimizer,
        I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView1<'a, f32>)>,
    {
        let mut total_loss = 0.0;
        let mut num_batches = 0;

        for (x, y) in batches {
            let y_pred = self.predict_proba(x)?;
            total_loss += loss_fn.loss(y_pred.view(), y);
            num_batches += 1;

            let d = loss_fn.loss_prime(y_pred.view(), y);
            let grad = x.t().dot(&d);
            optimizer.update_params(self.weights.view_mut(), grad.view());
        }

        if num_batches == 0 {
            return Err(SgdErr::InvalidParameter(
                "can't run an epoch without batches".into(),
            ));
        }

        Ok(total_loss / num_batches as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arch::loss::SumSquaredError, optimization::GradientDescent};
    use ndarray::{Array2, array};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn predict_is_binary() {
        let mut rng = StdRng::seed_from_u64(42);
        let model = LogisticRegression::random(3, &mut rng);
        let x: Array2<f32> = Array2::random_using((64, 3), StandardNormal, &mut rng) * 10.0_f32;

        let y_pred = model.predict(x.view()).unwrap();

        assert_eq!(y_pred.len(), 64);
        assert!(y_pred.iter().all(|&c| c == 0 || c == 1));
    }

    #[test]
    fn predict_thresholds_at_one_half() {
        let model = LogisticRegression::new(array![1.0, 0.0]);
        let x = array![[-0.1, 1.0], [0.0, 1.0], [0.1, 1.0]];

        let y_pred = model.predict(x.view()).unwrap();

        assert_eq!(y_pred, array![0, 0, 1]);
    }

    #[test]
    fn mismatched_features_are_rejected() {
        let model = LogisticRegression::new(array![1.0, 0.0, 0.0]);
        let x = array![[1.0, 2.0]];

        let err = model.predict(x.view()).unwrap_err();
        assert!(matches!(
            err,
            SgdErr::SizeMismatch {
                got: 2,
                expected: 3,
                ..
            }
        ));
    }

    #[test]
    fn backprop_applies_one_step_per_batch() {
        let mut model = LogisticRegression::new(array![0.0, 0.0]);
        let x = array![[1.0, 1.0], [2.0, 1.0]];
        let y = array![1.0, 0.0];
        let mut optimizer = GradientDescent::new(0.5);

        let batches = [(x.view(), y.view())].into_iter();
        let loss = model
            .backprop(&SumSquaredError, &mut optimizer, batches)
            .unwrap();

        // preds are 0.5 for both rows, errors are -0.5 and 0.5
        assert_eq!(loss, 0.5);
        // grad = x^T . error = [-0.5 + 1.0, -0.5 + 0.5]
        assert_eq!(model.weights(), array![-0.25, 0.0].view());
    }

    #[test]
    fn no_batches_is_an_error() {
        let mut model = LogisticRegression::new(array![0.5, -0.5]);
        let mut optimizer = GradientDescent::new(0.1);

        let err = model
            .backprop(&SumSquaredError, &mut optimizer, std::iter::empty())
            .unwrap_err();

        assert!(matches!(err, SgdErr::InvalidParameter(_)));
        assert_eq!(model.weights(), array![0.5, -0.5].view());
    }

    #[test]
    fn epoch_loss_is_mean_over_batches() {
        let mut model = LogisticRegression::new(array![0.0]);
        let x = array![[0.0], [0.0], [0.0]];
        let y = array![1.0, 1.0, 0.0];
        let mut optimizer = GradientDescent::new(0.1);

        let batches = [
            (x.slice(ndarray::s![..2, ..]), y.slice(ndarray::s![..2])),
            (x.slice(ndarray::s![2.., ..]), y.slice(ndarray::s![2..])),
        ]
        .into_iter();
        let loss = model
            .backprop(&SumSquaredError, &mut optimizer, batches)
            .unwrap();

        // batch losses are 0.5 and 0.25, the zero features leave the weight untouched
        assert_eq!(loss, 0.375);
        assert_eq!(model.weights()[0], 0.0);
    }
}
