//! Probability validation.
use crate::error::DatasetError;
use num_traits::Float;
use std::fmt::Debug;

/// Validate a probability in the range ``[0.0, 1.0]``.
///
/// ## Arguments
///
/// - `field`: the config option being checked, for error reporting.
/// - `prob`: the prob to check.
///
/// ## Returns
///
/// The probability, or a `DatasetError::InvalidConfig` naming `field`.
pub fn try_probability<F: Float + Debug>(
    field: &str,
    prob: F,
) -> Result<F, DatasetError> {
    // NaN fails both comparisons, so test the accepting range.
    if prob >= F::zero() && prob <= F::one() {
        Ok(prob)
    } else {
        Err(DatasetError::invalid_config(
            field,
            format!("probability must be in [0.0, 1.0]: {prob:?}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability() {
        assert_eq!(try_probability("p", 0f32), Ok(0f32));
        assert_eq!(try_probability("p", 1f32), Ok(1f32));
        assert_eq!(try_probability("p", 0.5f64), Ok(0.5f64));

        assert!(try_probability("p", -1.0f32).is_err());
        assert!(try_probability("p", 2.0f64).is_err());
        assert!(try_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_probability_error_names_field() {
        let err = try_probability("flip_p", 1.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid config: flip_p: probability must be in [0.0, 1.0]: 1.5"
        );
    }
}
