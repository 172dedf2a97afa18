//! Tests for wave counters and entropy bookkeeping

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wavetile::algorithm::wave::Wave;

    fn wave(frequencies: &[f64], cells: usize) -> Wave {
        let mut rng = StdRng::seed_from_u64(0);
        Wave::new(frequencies, vec![true; cells], &mut rng)
    }

    #[test]
    fn test_fresh_wave_counters() {
        let wave = wave(&[1.0, 1.0, 1.0], 4);
        assert_eq!(wave.pattern_count(), 3);
        assert_eq!(wave.cell_count(), 4);
        assert_eq!(wave.active_cells(), 4);
        assert_eq!(wave.undecided_cells(), 4);
        assert_eq!(wave.empty_cells(), 0);
        assert_eq!(wave.decided_cells(), 0);
        for cell in 0..4 {
            assert_eq!(wave.remaining(cell), 3);
        }
    }

    #[test]
    fn test_ban_tracks_decided_and_empty() {
        let mut wave = wave(&[1.0, 1.0], 2);

        assert!(!wave.ban(0, 0));
        assert_eq!(wave.remaining(0), 1);
        assert_eq!(wave.undecided_cells(), 1);
        assert_eq!(wave.decided_cells(), 1);
        assert_eq!(wave.first_pattern(0), Some(1));

        // Emptying the cell reports the contradiction
        assert!(wave.ban(0, 1));
        assert_eq!(wave.empty_cells(), 1);
        assert_eq!(wave.decided_cells(), 0);
    }

    #[test]
    fn test_unban_restores_counters() {
        let mut wave = wave(&[1.0, 2.0], 2);
        let entropy_before = wave.entropy(0);

        wave.ban(0, 0);
        wave.ban(0, 1);
        assert_eq!(wave.empty_cells(), 1);

        wave.unban(0, 1);
        assert_eq!(wave.empty_cells(), 0);
        assert_eq!(wave.remaining(0), 1);
        wave.unban(0, 0);
        assert_eq!(wave.undecided_cells(), 2);
        assert!((wave.entropy(0) - entropy_before).abs() < 1e-9);
    }

    // Masked cells are born decided and never counted
    #[test]
    fn test_masked_cells_excluded() {
        let mut rng = StdRng::seed_from_u64(0);
        let wave = Wave::new(&[1.0, 1.0], vec![true, false, true], &mut rng);
        assert_eq!(wave.active_cells(), 2);
        assert_eq!(wave.undecided_cells(), 2);
        assert!(!wave.is_active(1));
    }

    #[test]
    fn test_uniform_entropy_value() {
        let wave = wave(&[1.0, 1.0, 1.0, 1.0], 1);
        // Uniform weights give ln(n)
        assert!((wave.entropy(0) - 4.0f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_single_pattern_wave_is_decided() {
        let wave = wave(&[1.0], 3);
        assert_eq!(wave.undecided_cells(), 0);
        assert_eq!(wave.decided_cells(), 3);
    }
}
