use ndarray::{Array, Dimension};

/// A step function: `top` when the input is strictly above `tresh`, `bottom` otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct Step {
    top: f32,
    bottom: f32,
    tresh: f32,
}

impl Step {
    pub fn new(top: f32, bottom: f32, tresh: f32) -> Self {
        Self { top, bottom, tresh }
    }

    /// The step used to turn sigmoid scores into binary class labels.
    pub fn binary() -> Self {
        Self::new(1., 0., 0.5)
    }

    pub fn f(&self, x: f32) -> f32 {
        if x > self.tresh {
            self.top
        } else {
            self.bottom
        }
    }

    pub fn forward<D: Dimension>(&self, x: Array<f32, D>) -> Array<f32, D> {
        x.mapv_into(|x| self.f(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_itself_maps_to_bottom() {
        let step = Step::binary();
        assert_eq!(step.f(0.5), 0.);
        assert_eq!(step.f(0.500_001), 1.);
        assert_eq!(step.f(0.1), 0.);
    }

    #[test]
    fn custom_levels() {
        let step = Step::new(5., -5., 0.);
        assert_eq!(step.f(1.), 5.);
        assert_eq!(step.f(-1.), -5.);
    }
}
