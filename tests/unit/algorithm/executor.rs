//! Tests for the tile-space propagator facade

#[cfg(test)]
mod tests {
    use wavetile::model::adjacent::AdjacentModel;
    use wavetile::model::tiles::Tile;
    use wavetile::spatial::directions::DirectionSet;
    use wavetile::spatial::topology::GridTopology;
    use wavetile::{Status, TilePropagator, TilePropagatorOptions};

    /// Three tiles with every pair allowed in every direction
    fn permissive_model() -> AdjacentModel<char> {
        let mut model = AdjacentModel::new(DirectionSet::Cartesian2d);
        for &a in &['a', 'b', 'c'] {
            for &b in &['a', 'b', 'c'] {
                model.add_adjacency(&Tile::atom(a), &Tile::atom(b), 0).unwrap();
                model.add_adjacency(&Tile::atom(a), &Tile::atom(b), 2).unwrap();
            }
        }
        model
    }

    fn propagator(width: usize, height: usize) -> TilePropagator<char> {
        TilePropagator::new(
            &permissive_model(),
            GridTopology::cartesian_2d(width, height),
            TilePropagatorOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_propagator_is_undecided() {
        let propagator = propagator(3, 3);
        assert_eq!(propagator.status(), Status::Undecided);
        assert_eq!(propagator.progress(), 0.0);
        assert_eq!(propagator.backtrack_count(), 0);
    }

    #[test]
    fn test_ban_and_queries() {
        let mut propagator = propagator(2, 2);
        propagator.ban(0, 0, 0, &Tile::atom('a')).unwrap();

        assert!(propagator.is_banned(0, 0, 0, &Tile::atom('a')).unwrap());
        assert!(!propagator.is_banned(0, 0, 0, &Tile::atom('b')).unwrap());
        assert!(!propagator.is_selected(0, 0, 0, &Tile::atom('b')).unwrap());
        assert_eq!(
            propagator.possible_tiles(0, 0, 0).unwrap(),
            vec![Tile::atom('b'), Tile::atom('c')]
        );
    }

    #[test]
    fn test_select_decides_cell() {
        let mut propagator = propagator(2, 2);
        propagator.select(1, 1, 0, &Tile::atom('b')).unwrap();
        assert!(propagator.is_selected(1, 1, 0, &Tile::atom('b')).unwrap());
        assert!(propagator.is_banned(1, 1, 0, &Tile::atom('a')).unwrap());
        assert!((propagator.progress() - 0.25).abs() < 1e-9);
    }

    // Selecting a set equals banning its complement
    #[test]
    fn test_select_equivalent_to_complement_ban() {
        let mut selected = propagator(2, 2);
        selected
            .select_tiles(0, 1, 0, &[Tile::atom('a'), Tile::atom('b')])
            .unwrap();

        let mut banned = propagator(2, 2);
        banned.ban(0, 1, 0, &Tile::atom('c')).unwrap();

        assert_eq!(selected.to_array_sets(), banned.to_array_sets());
        assert_eq!(selected.status(), banned.status());
    }

    #[test]
    fn test_unknown_tile_rejected() {
        let mut propagator = propagator(2, 2);
        assert!(propagator.ban(0, 0, 0, &Tile::atom('z')).is_err());
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let propagator = propagator(2, 2);
        assert!(propagator.is_banned(2, 0, 0, &Tile::atom('a')).is_err());
    }

    #[test]
    fn test_forced_contradiction_and_clear() {
        let mut propagator = propagator(2, 2);
        propagator.set_contradiction();
        assert_eq!(propagator.status(), Status::Contradiction);

        propagator.clear().unwrap();
        assert_eq!(propagator.status(), Status::Undecided);
        assert_eq!(propagator.backtrack_count(), 0);
    }

    #[test]
    fn test_to_array_sentinels() {
        let mut propagator = propagator(2, 1);
        propagator.select(0, 0, 0, &Tile::atom('a')).unwrap();

        let decoded = propagator.to_array(Tile::atom('?'), Tile::atom('!'));
        assert_eq!(decoded[[0, 0, 0]], Tile::atom('a'));
        assert_eq!(decoded[[1, 0, 0]], Tile::atom('?'));

        let values = propagator.to_value_array('?', '!');
        assert_eq!(values[[0, 0, 0]], 'a');
        assert_eq!(values[[1, 0, 0]], '?');
    }

    #[test]
    fn test_value_sets_shrink_with_bans() {
        let mut propagator = propagator(2, 1);
        propagator.ban(1, 0, 0, &Tile::atom('c')).unwrap();
        let sets = propagator.to_value_sets();
        assert_eq!(sets[[0, 0, 0]], vec!['a', 'b', 'c']);
        assert_eq!(sets[[1, 0, 0]], vec!['a', 'b']);
    }

    // Step runs to a full decision on a permissive model
    #[test]
    fn test_run_decides_permissive_model() {
        let mut propagator = propagator(3, 3);
        assert_eq!(propagator.run().unwrap(), Status::Decided);
        assert!((propagator.progress() - 1.0).abs() < 1e-9);

        let decoded = propagator.to_value_array('?', '!');
        for value in &decoded {
            assert!(['a', 'b', 'c'].contains(value));
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let run = |seed: u64| {
            let mut propagator = TilePropagator::new(
                &permissive_model(),
                GridTopology::cartesian_2d(4, 4),
                TilePropagatorOptions {
                    seed,
                    ..TilePropagatorOptions::default()
                },
            )
            .unwrap();
            propagator.run().unwrap();
            propagator.to_value_array('?', '!')
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_masked_cells_stay_undecided_in_decode() {
        let mut mask = vec![true; 4];
        mask[3] = false; // cell (1, 1)
        let topology = GridTopology::cartesian_2d(2, 2).with_mask(mask).unwrap();
        let mut propagator = TilePropagator::new(
            &permissive_model(),
            topology,
            TilePropagatorOptions::default(),
        )
        .unwrap();

        assert_eq!(propagator.run().unwrap(), Status::Decided);
        let decoded = propagator.to_value_array('?', '!');
        assert_eq!(decoded[[1, 1, 0]], '?');
        for &(x, y) in &[(0, 0), (1, 0), (0, 1)] {
            assert!(['a', 'b', 'c'].contains(&decoded[[x, y, 0]]));
        }
    }
}
