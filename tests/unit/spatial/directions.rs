//! Tests for direction sets, opposites, and direction rotation

#[cfg(test)]
mod tests {
    use wavetile::model::rotation::Rotation;
    use wavetile::spatial::directions::{Axis, DirectionSet};

    // Directions are laid out in +/- pairs
    #[test]
    fn test_opposites_pair_up() {
        let set = DirectionSet::Cartesian3d;
        for direction in 0..set.count() {
            let opposite = set.opposite(direction);
            assert_ne!(direction, opposite);
            assert_eq!(set.opposite(opposite), direction);

            let forward = set.offset(direction).unwrap();
            let backward = set.offset(opposite).unwrap();
            for axis in 0..3 {
                assert_eq!(forward[axis], -backward[axis]);
            }
        }
    }

    #[test]
    fn test_direction_counts() {
        assert_eq!(DirectionSet::Cartesian2d.count(), 4);
        assert_eq!(DirectionSet::Cartesian3d.count(), 6);
        assert_eq!(DirectionSet::Hexagonal2d.count(), 6);
    }

    #[test]
    fn test_offset_out_of_bounds() {
        assert!(DirectionSet::Cartesian2d.offset(4).is_err());
    }

    // A quarter turn carries +x onto +y
    #[test]
    fn test_rotate_cartesian_quarter_turn() {
        let set = DirectionSet::Cartesian2d;
        let quarter = Rotation::new(90, false);
        assert_eq!(set.rotate(0, quarter), Some(2));
        assert_eq!(set.rotate(2, quarter), Some(1));
        assert_eq!(set.rotate(1, quarter), Some(3));
        assert_eq!(set.rotate(3, quarter), Some(0));
    }

    #[test]
    fn test_rotate_reflection_flips_x() {
        let set = DirectionSet::Cartesian2d;
        let reflect = Rotation::new(0, true);
        assert_eq!(set.rotate(0, reflect), Some(1));
        assert_eq!(set.rotate(2, reflect), Some(2));
    }

    // The hex diagonal leaves the set under a quarter turn
    #[test]
    fn test_rotate_hex_diagonal_fails() {
        let set = DirectionSet::Hexagonal2d;
        let quarter = Rotation::new(90, false);
        assert_eq!(set.rotate(4, quarter), None);
    }

    #[test]
    fn test_rotate_hex_half_turn() {
        let set = DirectionSet::Hexagonal2d;
        let half = Rotation::new(180, false);
        assert_eq!(set.rotate(4, half), Some(5));
    }

    #[test]
    fn test_axis_indices() {
        assert_eq!(Axis::X.index(), 0);
        assert_eq!(Axis::Y.index(), 1);
        assert_eq!(Axis::Z.index(), 2);
    }
}
