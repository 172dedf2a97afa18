//! Tests for the border constraint

#[cfg(test)]
mod tests {
    use wavetile::constraints::border::{BorderConstraint, SideSet};
    use wavetile::model::adjacent::AdjacentModel;
    use wavetile::model::tiles::Tile;
    use wavetile::spatial::directions::DirectionSet;
    use wavetile::spatial::topology::GridTopology;
    use wavetile::{TilePropagator, TilePropagatorOptions};

    fn permissive_model() -> AdjacentModel<char> {
        let mut model = AdjacentModel::new(DirectionSet::Cartesian2d);
        for &a in &['a', 'b'] {
            for &b in &['a', 'b'] {
                model.add_adjacency(&Tile::atom(a), &Tile::atom(b), 0).unwrap();
                model.add_adjacency(&Tile::atom(a), &Tile::atom(b), 2).unwrap();
            }
        }
        model
    }

    fn with_border(constraint: BorderConstraint<char>) -> TilePropagator<char> {
        TilePropagator::new(
            &permissive_model(),
            GridTopology::cartesian_2d(3, 3),
            TilePropagatorOptions {
                constraints: vec![Box::new(constraint)],
                ..TilePropagatorOptions::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_ban_on_all_sides() {
        let propagator = with_border(BorderConstraint {
            tiles: vec![Tile::atom('a')],
            sides: SideSet::ALL,
            invert: false,
            ban: true,
        });

        // Every edge cell of a 3x3 grid lost tile a, the center kept it
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
            assert!(propagator.is_banned(x, y, 0, &Tile::atom('a')).unwrap());
        }
        assert!(!propagator.is_banned(1, 1, 0, &Tile::atom('a')).unwrap());
    }

    #[test]
    fn test_force_on_single_side() {
        let propagator = with_border(BorderConstraint {
            tiles: vec![Tile::atom('b')],
            sides: SideSet::X_MIN,
            invert: false,
            ban: false,
        });

        for y in 0..3 {
            assert!(propagator.is_selected(0, y, 0, &Tile::atom('b')).unwrap());
        }
        assert!(!propagator.is_selected(1, 1, 0, &Tile::atom('b')).unwrap());
    }

    // Inverting the area acts on the interior instead
    #[test]
    fn test_inverted_area() {
        let propagator = with_border(BorderConstraint {
            tiles: vec![Tile::atom('a')],
            sides: SideSet::ALL,
            invert: true,
            ban: true,
        });

        assert!(propagator.is_banned(1, 1, 0, &Tile::atom('a')).unwrap());
        assert!(!propagator.is_banned(0, 0, 0, &Tile::atom('a')).unwrap());
    }

    #[test]
    fn test_side_set_matching() {
        let dims = [3, 3, 1];
        assert!(SideSet::X_MIN.matches([0, 1, 0], dims));
        assert!(!SideSet::X_MIN.matches([1, 1, 0], dims));
        assert!((SideSet::X_MIN | SideSet::Y_MAX).matches([1, 2, 0], dims));
        // 2D grids sit on both z faces at once
        assert!(SideSet::Z_MIN.matches([1, 1, 0], dims));
        assert!(SideSet::Z_MAX.matches([1, 1, 0], dims));
    }
}
