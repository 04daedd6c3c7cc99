//! Binary predictive entropy, in bits.

use medal_core::errors::SelectionError;

/// `H(p) = -p·log2(p) - (1-p)·log2(1-p)`, with `H(0) = H(1) = 0`.
pub fn binary_entropy(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return 0.0;
    }
    -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
}

/// Entropy of the item at `position`, rejecting probabilities that are
/// non-finite or outside `[0, 1]`.
pub fn checked_entropy(position: usize, probability: f64) -> Result<f64, SelectionError> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(SelectionError::InvalidProbability {
            position,
            probability,
        });
    }
    let h = binary_entropy(probability);
    if !h.is_finite() {
        return Err(SelectionError::NonFiniteEntropy {
            position,
            probability,
        });
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_probabilities_have_zero_entropy() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
    }

    #[test]
    fn coin_flip_has_one_bit() {
        assert!((binary_entropy(0.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_is_symmetric() {
        for p in [0.01, 0.2, 0.37, 0.49] {
            assert!((binary_entropy(p) - binary_entropy(1.0 - p)).abs() < 1e-12);
        }
    }

    #[test]
    fn nan_probability_is_rejected() {
        let err = checked_entropy(4, f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::InvalidProbability { position: 4, .. }
        ));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        assert!(checked_entropy(0, 1.5).is_err());
        assert!(checked_entropy(0, -0.1).is_err());
        assert!(checked_entropy(0, f64::INFINITY).is_err());
    }
}
