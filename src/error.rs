//! Errors reported by network construction, inference and training.

use thiserror::Error;

/// The ways a network operation can be rejected.
///
/// Every check runs before any layer buffer is touched, so a call that
/// returns an `Error` leaves the network exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The layer sizes could not be turned into a network, or a buffer could
    /// not be allocated while building one.
    #[error("cannot build network: {0}")]
    Construction(String),
    /// A caller-supplied buffer does not match the width of the layer it
    /// feeds.
    #[error("{buffer} has length {actual}, expected {expected}")]
    ShapeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An argument outside of its valid domain, such as a learning rate that
    /// is not strictly positive.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns a `ShapeMismatch` error unless `actual == expected`.
pub(crate) fn check_len(buffer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::ShapeMismatch {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Rejects learning rates that are not finite and strictly positive.
pub(crate) fn check_learning_rate(rate: f64) -> Result<()> {
    if !(rate > 0.0 && rate.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "learning rate must be a finite value greater than zero, got {}",
            rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message() {
        let err = check_len("targets", 2, 3).unwrap_err();
        assert_eq!(err.to_string(), "targets has length 3, expected 2");
    }

    #[test]
    fn matching_len_is_ok() {
        assert!(check_len("inputs", 4, 4).is_ok());
    }

    #[test]
    fn learning_rate_domain() {
        assert!(check_learning_rate(0.5).is_ok());
        assert!(check_learning_rate(0.0).is_err());
        assert!(check_learning_rate(-0.1).is_err());
        assert!(check_learning_rate(std::f64::NAN).is_err());
        assert!(check_learning_rate(std::f64::INFINITY).is_err());
    }
}
