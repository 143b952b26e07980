use std::num::NonZeroUsize;

use ndarray::{ArrayView1, ArrayView2, s};

use super::Dataset;

/// Borrowed, in-order mini-batches over a feature matrix and its labels.
///
/// Every row is yielded exactly once, in contiguous chunks of `batch_size` rows; the last chunk
/// holds whatever is left. Nothing is shuffled, so iterating again yields the same batches.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    x: ArrayView2<'a, f32>,
    y: ArrayView1<'a, f32>,
    batch_size: usize,
    cursor: usize,
}

impl<'a> Batches<'a> {
    pub(super) fn from_dataset(dataset: &'a Dataset, batch_size: NonZeroUsize) -> Self {
        Self {
            x: dataset.x(),
            y: dataset.y(),
            batch_size: batch_size.get(),
            cursor: 0,
        }
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = (ArrayView2<'a, f32>, ArrayView1<'a, f32>);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.y.len();
        if self.cursor >= len {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(len);
        let x = self.x.slice_move(s![self.cursor..end, ..]);
        let y = self.y.slice_move(s![self.cursor..end]);

        self.cursor = end;
        Some((x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.y.len() - self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}
