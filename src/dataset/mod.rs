mod batches;
pub mod blobs;

use std::num::NonZeroUsize;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, concatenate};
use rand::{Rng, seq::SliceRandom};

pub use batches::Batches;

use crate::{SgdErr, error::Result};

/// An in-memory labeled dataset: one feature row per label.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array1<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one sample per row.
    /// * `y` - The labels, one per row of `x`.
    ///
    /// # Errors
    /// `SgdErr::SizeMismatch` if the amount of rows and labels differ, `SgdErr::InvalidParameter`
    /// if the dataset is empty.
    pub fn new(x: Array2<f32>, y: Array1<f32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(SgdErr::SizeMismatch {
                what: "feature rows and labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if y.is_empty() {
            return Err(SgdErr::InvalidParameter("dataset must be non-empty".into()));
        }

        Ok(Self { x, y })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    #[inline]
    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    #[inline]
    pub fn y(&self) -> ArrayView1<'_, f32> {
        self.y.view()
    }

    /// The labels as class indices.
    pub fn classes(&self) -> Array1<u8> {
        self.y.mapv(|y| y.round() as u8)
    }

    /// Appends a constant `1.0` column to the features, so a linear model can learn its bias as
    /// an ordinary weight.
    pub fn with_bias(self) -> Result<Self> {
        let ones = Array2::<f32>::ones((self.x.nrows(), 1));
        let x = concatenate(Axis(1), &[self.x.view(), ones.view()])?;
        Ok(Self { x, y: self.y })
    }

    /// Shuffles the rows and partitions them into a train and a test subset.
    ///
    /// # Arguments
    /// * `test_fraction` - The share of rows going to the test subset, rounded up.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// A tuple with the train and test subsets.
    ///
    /// # Errors
    /// `SgdErr::InvalidParameter` if the fraction is not in (0, 1) or one of the subsets would
    /// end up empty.
    pub fn split<R: Rng>(&self, test_fraction: f32, rng: &mut R) -> Result<(Self, Self)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(SgdErr::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {test_fraction}"
            )));
        }

        let n = self.len();
        let n_test = (test_fraction as f64 * n as f64).ceil() as usize;
        if n_test >= n {
            return Err(SgdErr::InvalidParameter(format!(
                "splitting {n} rows with test_fraction {test_fraction} leaves no training rows"
            )));
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        let (test_idx, train_idx) = order.split_at(n_test);

        Ok((self.select(train_idx), self.select(test_idx)))
    }

    /// Returns the batches of this dataset in row order, see [`Batches`].
    pub fn batches(&self, batch_size: NonZeroUsize) -> Batches<'_> {
        Batches::from_dataset(self, batch_size)
    }

    fn select(&self, rows: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), rows),
            y: self.y.select(Axis(0), rows),
        }
    }
}
