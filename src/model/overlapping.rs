//! Overlapping tile model: frequency-weighted windows extracted from samples
//!
//! Slides an N×M×L window across sample grids to collect the local
//! configurations the output is allowed to contain. Identical windows share
//! a pattern id and accumulate weight. Compatibility between patterns is
//! decided by window shift: two patterns may neighbor when their windows
//! agree on every overlapping cell.

use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::model::mapping::{PatternModel, TileModel, TileModelMapping};
use crate::model::rotation::{Rotation, TileRotation};
use crate::model::tiles::{Tile, TileValue};
use crate::spatial::topology::GridTopology;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis};
use std::collections::HashMap;

/// Tile model built from overlapping sample windows
#[derive(Clone, Debug)]
pub struct OverlappingModel<V> {
    window: [usize; 3],
    patterns: Vec<Vec<Tile<V>>>,
    pattern_ids: HashMap<Vec<Tile<V>>, usize>,
    frequencies: Vec<f64>,
    tile_rotation: Option<TileRotation<V>>,
}

impl<V: TileValue> OverlappingModel<V> {
    /// Create a model with a square 2D window of side `n`
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero
    pub fn new(n: usize) -> Result<Self> {
        Self::with_dimensions(n, n, 1)
    }

    /// Create a model with an explicit window shape
    ///
    /// # Errors
    ///
    /// Returns an error if any window dimension is zero
    pub fn with_dimensions(nx: usize, ny: usize, nz: usize) -> Result<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(invalid_parameter(
                "window",
                &format!("{nx}x{ny}x{nz}"),
                &"window dimensions must be positive",
            ));
        }
        Ok(Self {
            window: [nx, ny, nz],
            patterns: Vec::new(),
            pattern_ids: HashMap::new(),
            frequencies: Vec::new(),
            tile_rotation: None,
        })
    }

    /// Window dimensions
    pub const fn window(&self) -> [usize; 3] {
        self.window
    }

    /// Number of distinct patterns collected so far
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Ingest every window of a sample grid
    ///
    /// Periodic axes wrap during extraction; non-periodic axes clip, so the
    /// sample must be at least as large as the window along them.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is smaller than the window along a
    /// non-periodic axis
    pub fn add_sample(
        &mut self,
        sample: ArrayView3<'_, Tile<V>>,
        periodic: [bool; 3],
    ) -> Result<()> {
        let dims = sample.dim();
        let dims = [dims.0, dims.1, dims.2];
        let mut ranges = [0usize; 3];
        for axis in 0..3 {
            if periodic[axis] {
                ranges[axis] = dims[axis];
            } else {
                if dims[axis] < self.window[axis] {
                    return Err(invalid_parameter(
                        "sample",
                        &format!("{}x{}x{}", dims[0], dims[1], dims[2]),
                        &"smaller than the pattern window on a non-periodic axis",
                    ));
                }
                ranges[axis] = dims[axis] - self.window[axis] + 1;
            }
        }

        for z in 0..ranges[2] {
            for y in 0..ranges[1] {
                for x in 0..ranges[0] {
                    let mut contents =
                        Vec::with_capacity(self.window[0] * self.window[1] * self.window[2]);
                    for oz in 0..self.window[2] {
                        for oy in 0..self.window[1] {
                            for ox in 0..self.window[0] {
                                let sx = (x + ox) % dims[0];
                                let sy = (y + oy) % dims[1];
                                let sz = (z + oz) % dims[2];
                                contents.push(sample[[sx, sy, sz]].clone());
                            }
                        }
                    }
                    self.record_window(contents);
                }
            }
        }
        Ok(())
    }

    /// Ingest a 2D sample grid
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is smaller than the window along a
    /// non-periodic axis
    pub fn add_sample_2d(
        &mut self,
        sample: ArrayView2<'_, Tile<V>>,
        periodic: [bool; 2],
    ) -> Result<()> {
        self.add_sample(
            sample.insert_axis(Axis(2)),
            [periodic[0], periodic[1], false],
        )
    }

    /// Ingest a sample under every element of a rotation group
    ///
    /// The grid is rotated in the xy plane and each tile is rotated through
    /// the rotation map. Group elements with a missing tile transform are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for 90-degree elements on a non-square window, or if
    /// the sample is smaller than the window along a non-periodic axis
    pub fn add_sample_with_symmetry(
        &mut self,
        sample: ArrayView3<'_, Tile<V>>,
        periodic: [bool; 3],
        rotations: &TileRotation<V>,
    ) -> Result<()> {
        for rotation in rotations.group().elements() {
            if matches!(rotation.angle, 90 | 270) && self.window[0] != self.window[1] {
                return Err(invalid_parameter(
                    "rotation",
                    &rotation,
                    &"quarter turns require a square window",
                ));
            }
            let Some(rotated) = rotate_sample(sample, rotation, rotations) else {
                continue;
            };
            let swapped = matches!(rotation.angle, 90 | 270);
            let rotated_periodic = if swapped {
                [periodic[1], periodic[0], periodic[2]]
            } else {
                periodic
            };
            self.add_sample(rotated.view(), rotated_periodic)?;
        }
        self.tile_rotation = Some(rotations.clone());
        Ok(())
    }

    fn record_window(&mut self, contents: Vec<Tile<V>>) {
        if let Some(&id) = self.pattern_ids.get(&contents) {
            self.frequencies[id] += 1.0;
        } else {
            let id = self.patterns.len();
            self.pattern_ids.insert(contents.clone(), id);
            self.patterns.push(contents);
            self.frequencies.push(1.0);
        }
    }

    const fn slot(&self, ox: usize, oy: usize, oz: usize) -> usize {
        ox + self.window[0] * (oy + self.window[1] * oz)
    }

    /// Whether pattern `q` agrees with pattern `p` shifted by `offset`
    fn compatible(&self, p: usize, q: usize, offset: [i32; 3]) -> bool {
        let [nx, ny, nz] = self.window;
        for oz in 0..nz {
            for oy in 0..ny {
                for ox in 0..nx {
                    let qx = ox as i32 - offset[0];
                    let qy = oy as i32 - offset[1];
                    let qz = oz as i32 - offset[2];
                    if qx < 0
                        || qy < 0
                        || qz < 0
                        || qx >= nx as i32
                        || qy >= ny as i32
                        || qz >= nz as i32
                    {
                        continue;
                    }
                    let p_tile = &self.patterns[p][self.slot(ox, oy, oz)];
                    let q_tile =
                        &self.patterns[q][self.slot(qx as usize, qy as usize, qz as usize)];
                    if p_tile != q_tile {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl<V: TileValue> TileModel<V> for OverlappingModel<V> {
    fn build_mapping(&self, topology: &GridTopology) -> Result<TileModelMapping<V>> {
        if !topology.directions().is_cartesian() {
            return Err(SolverError::TopologyMismatch {
                expected: "a Cartesian direction set".to_string(),
                actual: format!("{:?}", topology.directions()),
            });
        }
        if self.window[2] > 1 && topology.depth() == 1 {
            return Err(SolverError::TopologyMismatch {
                expected: format!("depth >= {}", self.window[2]),
                actual: "a 2D topology".to_string(),
            });
        }
        if self.patterns.is_empty() {
            return Err(SolverError::EmptyPatternSet {
                model: "overlapping",
            });
        }

        let pattern_count = self.patterns.len();
        let directions = topology.directions();
        let mut propagator = vec![vec![Vec::new(); directions.count()]; pattern_count];
        for direction in 0..directions.count() {
            let offset = directions.offset(direction)?;
            for p in 0..pattern_count {
                for q in 0..pattern_count {
                    if self.compatible(p, q, offset) {
                        propagator[p][direction].push(q);
                    }
                }
            }
        }

        // Pattern grid shrinks along non-periodic axes
        let tile_dims = topology.dimensions();
        let periodic = topology.periodicity();
        let mut pattern_dims = [0usize; 3];
        for axis in 0..3 {
            if periodic[axis] {
                pattern_dims[axis] = tile_dims[axis];
            } else {
                if tile_dims[axis] < self.window[axis] {
                    return Err(SolverError::TopologyMismatch {
                        expected: format!("dimension >= {} on axis {axis}", self.window[axis]),
                        actual: format!("{}", tile_dims[axis]),
                    });
                }
                pattern_dims[axis] = tile_dims[axis] - self.window[axis] + 1;
            }
        }

        let mut pattern_topology = match topology.directions() {
            crate::spatial::directions::DirectionSet::Cartesian3d => {
                GridTopology::cartesian_3d(pattern_dims[0], pattern_dims[1], pattern_dims[2])
            }
            _ => GridTopology::cartesian_2d(pattern_dims[0], pattern_dims[1]),
        }
        .with_periodicity(periodic[0], periodic[1], periodic[2]);

        if topology.mask().is_some() {
            let mask = derive_pattern_mask(topology, &pattern_topology, self.window);
            pattern_topology = pattern_topology.with_mask(mask)?;
        }

        // Offsets only vary along clipped axes; periodic axes always resolve
        // to offset zero.
        let mut offset_ranges = [1usize; 3];
        for axis in 0..3 {
            if !periodic[axis] {
                offset_ranges[axis] = self.window[axis];
            }
        }

        let mut tiles_to_patterns_by_offset = HashMap::new();
        let mut patterns_to_tiles_by_offset = HashMap::new();
        for oz in 0..offset_ranges[2] {
            for oy in 0..offset_ranges[1] {
                for ox in 0..offset_ranges[0] {
                    let packed = self.slot(ox, oy, oz);
                    let mut to_patterns: HashMap<Tile<V>, Vec<usize>> = HashMap::new();
                    let mut to_tiles = Vec::with_capacity(pattern_count);
                    for (id, contents) in self.patterns.iter().enumerate() {
                        let tile = contents[self.slot(ox, oy, oz)].clone();
                        to_patterns.entry(tile.clone()).or_default().push(id);
                        to_tiles.push(tile);
                    }
                    tiles_to_patterns_by_offset.insert(packed, to_patterns);
                    patterns_to_tiles_by_offset.insert(packed, to_tiles);
                }
            }
        }

        Ok(TileModelMapping {
            pattern_model: PatternModel::new(self.frequencies.clone(), propagator),
            pattern_topology,
            tiles_to_patterns_by_offset,
            patterns_to_tiles_by_offset,
            window: self.window,
            tile_rotation: self.tile_rotation.clone(),
        })
    }
}

/// Rotate a sample grid in the xy plane, rotating each tile as well
///
/// Returns `None` when some tile has no transform under the rotation.
fn rotate_sample<V: TileValue>(
    sample: ArrayView3<'_, Tile<V>>,
    rotation: Rotation,
    rotations: &TileRotation<V>,
) -> Option<Array3<Tile<V>>> {
    let (width, height, depth) = sample.dim();
    let swapped = matches!(rotation.angle, 90 | 270);
    let (new_width, new_height) = if swapped { (height, width) } else { (width, height) };

    // Transformed corner minima give the shift back into non-negative space
    let corners = [
        [0, 0],
        [width as i32 - 1, 0],
        [0, height as i32 - 1],
        [width as i32 - 1, height as i32 - 1],
    ];
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    for corner in corners {
        let [tx, ty] = rotation.transform_offset(corner);
        min_x = min_x.min(tx);
        min_y = min_y.min(ty);
    }

    let mut slots: Vec<Option<Tile<V>>> = vec![None; new_width * new_height * depth];
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let [tx, ty] = rotation.transform_offset([x as i32, y as i32]);
                let nx = (tx - min_x) as usize;
                let ny = (ty - min_y) as usize;
                let tile = rotations.rotate(&sample[[x, y, z]], rotation)?;
                slots[(nx * new_height + ny) * depth + z] = Some(tile);
            }
        }
    }

    let tiles: Option<Vec<Tile<V>>> = slots.into_iter().collect();
    Array3::from_shape_vec((new_width, new_height, depth), tiles?).ok()
}

/// Pattern cells are active only when every tile cell under the window is
fn derive_pattern_mask(
    topology: &GridTopology,
    pattern_topology: &GridTopology,
    window: [usize; 3],
) -> Vec<bool> {
    let tile_dims = topology.dimensions();
    let mut mask = Vec::with_capacity(pattern_topology.cell_count());
    for index in 0..pattern_topology.cell_count() {
        let [px, py, pz] = pattern_topology.coordinates(index);
        let mut active = true;
        'window: for oz in 0..window[2] {
            for oy in 0..window[1] {
                for ox in 0..window[0] {
                    let tx = (px + ox) % tile_dims[0];
                    let ty = (py + oy) % tile_dims[1];
                    let tz = (pz + oz) % tile_dims[2];
                    if !topology.is_active(topology.index(tx, ty, tz)) {
                        active = false;
                        break 'window;
                    }
                }
            }
        }
        mask.push(active);
    }
    mask
}
