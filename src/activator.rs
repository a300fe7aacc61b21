//! The sigmoid transfer function used by every neuron.

/// Evaluates the [logistic sigmoid](https://en.wikipedia.org/wiki/Sigmoid_function)
/// `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Evaluates the derivative of the sigmoid at `x`, where `y = sigmoid(x)`.
///
/// Note that this function takes in the *output* of the sigmoid, rather than
/// its input. Layers only keep their activations, so the derivative is
/// recovered from them as `y * (1 - y)`.
#[inline]
pub fn sigmoid_prime(y: f64) -> f64 {
    y * (1.0 - y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_values() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert_relative_eq!(sigmoid(2.0), 0.8807970779778823, epsilon = 1e-12);
        assert_relative_eq!(sigmoid(-2.0), 1.0 - sigmoid(2.0), epsilon = 1e-12);
    }

    #[test]
    fn sigmoid_saturates() {
        assert!(sigmoid(40.0) <= 1.0);
        assert!(sigmoid(-40.0) >= 0.0);
    }

    #[test]
    fn prime_uses_activation() {
        assert_relative_eq!(sigmoid_prime(0.5), 0.25);
        assert_relative_eq!(sigmoid_prime(0.0), 0.0);
        assert_relative_eq!(sigmoid_prime(1.0), 0.0);

        // Matches the analytic derivative of the pre-activation.
        let x = 0.7;
        let h = 1e-6;
        let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
        assert_relative_eq!(sigmoid_prime(sigmoid(x)), numeric, epsilon = 1e-8);
    }
}
