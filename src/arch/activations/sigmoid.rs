use ndarray::{Array, Dimension};

/// The logistic function, `1 / (1 + e^-z)`.
///
/// Overflow is not handled: for very negative inputs `e^-z` becomes infinite and the output
/// saturates to `0.0`, for very positive ones it saturates to `1.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f32) -> f32 {
        1. / (1. + (-z).exp())
    }

    /// Applies the function elementwise, consuming `z`.
    ///
    /// # Arguments
    /// * `z` - The pre-activation values.
    ///
    /// # Returns
    /// The activations, with the same shape as `z`.
    pub fn forward<D: Dimension>(&self, z: Array<f32, D>) -> Array<f32, D> {
        z.mapv_into(|z| self.f(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn sigmoid_of_zero_is_one_half() {
        assert_eq!(Sigmoid.f(0.), 0.5);
    }

    #[test]
    fn sigmoid_is_bounded_for_moderate_inputs() {
        for i in -150..=150 {
            let z = i as f32 / 10.;
            let s = Sigmoid.f(z);
            assert!(s > 0. && s < 1., "sigmoid({z}) = {s}");
        }
    }

    #[test]
    fn sigmoid_is_monotonic() {
        let mut prev = Sigmoid.f(-50.);
        for i in -499..=500 {
            let s = Sigmoid.f(i as f32 / 10.);
            assert!(s >= prev);
            prev = s;
        }
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(Sigmoid.f(-1000.), 0.);
        assert_eq!(Sigmoid.f(1000.), 1.);
    }

    #[test]
    fn forward_is_elementwise() {
        let a = Sigmoid.forward(array![-2., 0., 2.]);
        assert_eq!(a[1], 0.5);
        assert!((a[0] + a[2] - 1.).abs() < 1e-6);
    }
}
