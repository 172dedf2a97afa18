//! Tests for incremental entropy sums

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wavetile::math::entropy::EntropyMemo;

    fn memo(frequencies: &[f64], cells: usize) -> EntropyMemo {
        let mut rng = StdRng::seed_from_u64(0);
        EntropyMemo::new(frequencies, cells, &mut rng)
    }

    #[test]
    fn test_uniform_entropy_is_log_count() {
        let memo = memo(&[2.0, 2.0, 2.0], 1);
        assert!((memo.entropy(0) - 3.0f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_remove_and_restore_are_inverse() {
        let mut memo = memo(&[1.0, 2.0, 4.0], 2);
        let before = memo.entropy(0);

        memo.remove(0, 1);
        assert!(memo.entropy(0) < before);
        memo.restore(0, 1);
        assert!((memo.entropy(0) - before).abs() < 1e-9);
        // The other cell never moved
        assert!((memo.entropy(1) - before).abs() < 1e-9);
    }

    #[test]
    fn test_single_weight_entropy_is_zero() {
        let mut memo = memo(&[1.0, 1.0], 1);
        memo.remove(0, 0);
        assert!(memo.entropy(0).abs() < 1e-9);
    }

    // Noise separates equal cells but stays tiny
    #[test]
    fn test_noise_breaks_ties_without_distortion() {
        let memo = memo(&[1.0, 1.0], 2);
        let key0 = memo.entropy_key(0);
        let key1 = memo.entropy_key(1);
        assert_ne!(key0, key1);
        assert!((key0 - memo.entropy(0)).abs() < 1e-5);
        assert!((key1 - memo.entropy(1)).abs() < 1e-5);
    }

    #[test]
    fn test_sum_weights_tracks_removals() {
        let mut memo = memo(&[1.5, 2.5], 1);
        assert!((memo.sum_weights(0) - 4.0).abs() < 1e-12);
        memo.remove(0, 0);
        assert!((memo.sum_weights(0) - 2.5).abs() < 1e-12);
    }
}
