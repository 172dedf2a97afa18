//! Tests for grid topology indexing, periodicity, and masking

#[cfg(test)]
mod tests {
    use wavetile::spatial::topology::{GridTopology, NeighborTable};

    #[test]
    fn test_index_coordinates_roundtrip() {
        let topology = GridTopology::cartesian_3d(4, 3, 2);
        for index in 0..topology.cell_count() {
            let [x, y, z] = topology.coordinates(index);
            assert_eq!(topology.index(x, y, z), index);
        }
    }

    #[test]
    fn test_neighbor_clips_at_edges() {
        let topology = GridTopology::cartesian_2d(3, 2);
        let origin = topology.index(0, 0, 0);
        // -x and -y step off the grid
        assert_eq!(topology.neighbor(origin, 1), None);
        assert_eq!(topology.neighbor(origin, 3), None);
        assert_eq!(topology.neighbor(origin, 0), Some(topology.index(1, 0, 0)));
        assert_eq!(topology.neighbor(origin, 2), Some(topology.index(0, 1, 0)));
    }

    #[test]
    fn test_neighbor_wraps_when_periodic() {
        let topology = GridTopology::cartesian_2d(3, 2).with_periodicity(true, true, false);
        let corner = topology.index(2, 1, 0);
        assert_eq!(topology.neighbor(corner, 0), Some(topology.index(0, 1, 0)));
        assert_eq!(topology.neighbor(corner, 2), Some(topology.index(2, 0, 0)));
    }

    #[test]
    fn test_mask_blocks_neighbors() {
        let mut mask = vec![true; 4];
        mask[1] = false; // cell (1, 0)
        let topology = GridTopology::cartesian_2d(2, 2).with_mask(mask).unwrap();

        assert_eq!(topology.active_count(), 3);
        assert!(!topology.is_active(topology.index(1, 0, 0)));
        // Stepping onto the masked cell is refused
        assert_eq!(topology.neighbor(topology.index(0, 0, 0), 0), None);
        assert_eq!(
            topology.neighbor(topology.index(0, 0, 0), 2),
            Some(topology.index(0, 1, 0))
        );
    }

    #[test]
    fn test_mask_length_validated() {
        assert!(GridTopology::cartesian_2d(2, 2).with_mask(vec![true; 3]).is_err());
    }

    // The table must agree with the topology everywhere
    #[test]
    fn test_neighbor_table_matches_topology() {
        let topology = GridTopology::cartesian_2d(4, 3).with_periodicity(true, false, false);
        let table = NeighborTable::new(&topology);
        assert_eq!(table.direction_count(), 4);
        for cell in 0..topology.cell_count() {
            for direction in 0..4 {
                assert_eq!(table.get(cell, direction), topology.neighbor(cell, direction));
            }
        }
    }
}
