//! Tests for tile-space to pattern-space coordinate translation

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use wavetile::model::mapping::TileModel;
    use wavetile::model::overlapping::OverlappingModel;
    use wavetile::model::tiles::Tile;
    use wavetile::spatial::topology::GridTopology;

    fn mapping_4x4() -> wavetile::model::mapping::TileModelMapping<char> {
        let sample = Array2::from_shape_vec(
            (2, 2),
            vec![Tile::atom('a'), Tile::atom('b'), Tile::atom('b'), Tile::atom('a')],
        )
        .unwrap();
        let mut model = OverlappingModel::new(2).unwrap();
        model.add_sample_2d(sample.view(), [true, true]).unwrap();
        model
            .build_mapping(&GridTopology::cartesian_2d(4, 4))
            .unwrap()
    }

    // Interior coordinates map directly with offset zero
    #[test]
    fn test_interior_coordinates_offset_zero() {
        let mapping = mapping_4x4();
        let (cell, offset) = mapping.tile_to_pattern([1, 2, 0]);
        assert_eq!(cell, mapping.pattern_topology.index(1, 2, 0));
        assert_eq!(offset, 0);
    }

    // Boundary coordinates clamp to the edge pattern cell with an offset
    #[test]
    fn test_boundary_coordinates_carry_offset() {
        let mapping = mapping_4x4();
        let (cell, offset) = mapping.tile_to_pattern([3, 3, 0]);
        assert_eq!(cell, mapping.pattern_topology.index(2, 2, 0));
        // ox = 1, oy = 1 packed over a 2x2 window
        assert_eq!(offset, 3);
    }

    // Every realizable offset carries its own decode tables
    #[test]
    fn test_offset_tables_consistent() {
        let mapping = mapping_4x4();
        for offset in [0usize, 1, 2, 3] {
            let to_tiles = mapping
                .patterns_to_tiles_by_offset
                .get(&offset)
                .expect("offset table missing");
            for (pattern, tile) in to_tiles.iter().enumerate() {
                let patterns = mapping.patterns_for_tile(offset, tile).unwrap();
                assert!(patterns.contains(&pattern));
            }
        }
    }

    #[test]
    fn test_unknown_tile_rejected() {
        let mapping = mapping_4x4();
        assert!(mapping.patterns_for_tile(0, &Tile::atom('z')).is_err());
    }
}
