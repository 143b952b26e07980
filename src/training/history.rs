use serde::Serialize;

/// The loss of every epoch, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LossHistory {
    losses: Vec<f32>,
}

impl LossHistory {
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            losses: Vec::with_capacity(epochs),
        }
    }

    pub fn push(&mut self, loss: f32) {
        self.losses.push(loss);
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn first(&self) -> Option<f32> {
        self.losses.first().copied()
    }

    pub fn last(&self) -> Option<f32> {
        self.losses.last().copied()
    }

    /// The largest finite loss, if any.
    pub fn max(&self) -> Option<f32> {
        self.losses
            .iter()
            .copied()
            .filter(|l| l.is_finite())
            .reduce(f32::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.losses.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_skips_non_finite_losses() {
        let mut history = LossHistory::default();
        assert_eq!(history.max(), None);

        history.push(2.0);
        history.push(f32::NAN);
        history.push(f32::INFINITY);
        history.push(3.0);

        assert_eq!(history.max(), Some(3.0));
        assert_eq!(history.first(), Some(2.0));
        assert_eq!(history.last(), Some(3.0));
        assert_eq!(history.len(), 4);
    }
}
