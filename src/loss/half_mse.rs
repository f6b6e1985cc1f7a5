pub struct HalfMse;

impl HalfMse {
    /// Halved squared error: `0.5 · (output - target)²`.
    /// The ½ factor makes the derivative come out as a clean `output - target`.
    pub fn loss(output: f64, target: f64) -> f64 {
        let e = output - target;
        0.5 * e * e
    }

    /// `∂L/∂output = output - target`.
    pub fn error(output: f64, target: f64) -> f64 {
        output - target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_non_negative_and_zero_iff_equal() {
        assert_eq!(HalfMse::loss(0.7, 0.7), 0.0);
        assert!(HalfMse::loss(0.2, 1.0) > 0.0);
        assert!(HalfMse::loss(1.0, 0.2) > 0.0);
        assert!((HalfMse::loss(0.5849, 1.0) - 0.5 * 0.4151 * 0.4151).abs() < 1e-12);
    }

    #[test]
    fn error_is_signed() {
        assert_eq!(HalfMse::error(0.3, 1.0), -0.7);
        assert_eq!(HalfMse::error(1.0, 0.3), 0.7);
    }
}
