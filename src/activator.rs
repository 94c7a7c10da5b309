//! Activation function types.

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
///
/// Every variant is a pure function of its input, so a network can evaluate
/// the same activator at every layer without any shared state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activator {
    /// Logistic sigmoid
    #[default]
    Sigmoid,
    /// Rectified Linear Unit
    #[serde(rename = "relu")]
    ReLU,
    /// Leaky Rectified Linear Unit
    ///
    /// Takes an `alpha` value to use for negative inputs.
    #[serde(rename = "leaky_relu")]
    LeakyReLU(f64),
    /// Hyperbolic tan function
    #[serde(rename = "tanh")]
    TanH,
    /// Passes the weighted input through unchanged.
    Identity,
}

impl Activator {
    /// Evaluates `f(x)` for the selected the activation function.
    pub fn f(&self, x: f64) -> f64 {
        match *self {
            Activator::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activator::ReLU => if x > 0.0 { x } else { 0.0 },
            Activator::LeakyReLU(alpha) => if x > 0.0 { x } else { alpha * x },
            Activator::TanH => x.tanh(),
            Activator::Identity => x,
        }
    }

    /// Evaluates the derivative `f'(x)`.
    ///
    /// Unlike the output-based shortcut some implementations use, `x` is the
    /// weighted input *before* activation, which each layer caches during its
    /// forward pass.
    pub fn derivative(&self, x: f64) -> f64 {
        match *self {
            Activator::Sigmoid => {
                let y = self.f(x);
                y * (1.0 - y)
            }
            Activator::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activator::LeakyReLU(alpha) => if x > 0.0 { 1.0 } else { alpha },
            Activator::TanH => {
                let y = x.tanh();
                1.0 - y * y
            }
            Activator::Identity => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const ALL: [Activator; 5] = [
        Activator::Sigmoid,
        Activator::ReLU,
        Activator::LeakyReLU(0.01),
        Activator::TanH,
        Activator::Identity,
    ];

    #[test]
    fn sigmoid_at_zero() {
        assert_eq!(Activator::Sigmoid.f(0.0), 0.5);
        assert_eq!(Activator::Sigmoid.derivative(0.0), 0.25);
    }

    #[test]
    fn rectifiers() {
        assert_eq!(Activator::ReLU.f(-2.0), 0.0);
        assert_eq!(Activator::ReLU.f(3.0), 3.0);
        assert_eq!(Activator::LeakyReLU(0.1).f(-2.0), -0.2);
        assert_eq!(Activator::LeakyReLU(0.1).derivative(-2.0), 0.1);
        assert_eq!(Activator::ReLU.derivative(-1.0), 0.0);
        assert_eq!(Activator::ReLU.derivative(1.0), 1.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for activator in ALL.iter() {
            // Stay clear of the rectifier kink at zero.
            for &x in &[-1.7, -0.4, 0.3, 1.2] {
                let numeric = (activator.f(x + h) - activator.f(x - h)) / (2.0 * h);
                assert_relative_eq!(
                    activator.derivative(x),
                    numeric,
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn defaults_to_sigmoid() {
        assert_eq!(Activator::default(), Activator::Sigmoid);
    }

    #[test]
    fn serde_names() {
        let parsed: Activator = serde_json::from_str("\"relu\"").unwrap();
        assert_eq!(parsed, Activator::ReLU);
        let parsed: Activator =
            serde_json::from_str("{\"leaky_relu\": 0.2}").unwrap();
        assert_eq!(parsed, Activator::LeakyReLU(0.2));
        let parsed: Activator = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(parsed, Activator::TanH);
    }

    proptest! {
        #[test]
        fn activators_are_pure(x in -50.0..50.0f64, idx in 0usize..5) {
            let activator = ALL[idx];
            let first = (activator.f(x), activator.derivative(x));
            for _ in 0..3 {
                prop_assert_eq!((activator.f(x), activator.derivative(x)), first);
            }
        }

        #[test]
        fn bounded_activators_stay_in_range(x in -50.0..50.0f64) {
            let y = Activator::Sigmoid.f(x);
            prop_assert!((0.0..=1.0).contains(&y));
            let y = Activator::TanH.f(x);
            prop_assert!((-1.0..=1.0).contains(&y));
        }
    }
}
