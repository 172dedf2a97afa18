//! The tile-space propagator: decision loop, backtracking, and decoding
//!
//! `TilePropagator` is the public face of the solver. It owns the wave, the
//! support counters, the journal, and the constraints, and lifts everything
//! to tile coordinates through the compiled model mapping. The pattern-space
//! machinery stays private to this module's helpers.

use crate::algorithm::bitset::PatternBitset;
use crate::algorithm::journal::{BacktrackJournal, JournalEntry};
use crate::algorithm::propagation::{self, PropagationState};
use crate::algorithm::selection::{lowest_entropy_cell, weighted_pattern_choice};
use crate::algorithm::wave::Wave;
use crate::constraints::TileConstraint;
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::io::progress::SolveProgress;
use crate::model::mapping::{TileModel, TileModelMapping};
use crate::model::tiles::{Tile, TileValue};
use crate::spatial::topology::{GridTopology, NeighborTable};
use ndarray::Array3;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Solve state of the propagator
#[repr(i8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Some cell still allows more than one pattern
    Undecided = -1,
    /// Every active cell has collapsed to exactly one pattern
    Decided = -2,
    /// Some cell has no pattern left, or a constraint declared failure
    Contradiction = -3,
}

/// Construction options for a [`TilePropagator`]
pub struct TilePropagatorOptions<V> {
    /// Backtracking policy: 0 disables it, a negative value keeps every
    /// decision frame, a positive value bounds the stack depth
    pub backtrack_depth: i32,
    /// Seed for the deterministic random source
    pub seed: u64,
    /// Constraints, checked in registration order
    pub constraints: Vec<Box<dyn TileConstraint<V>>>,
}

impl<V> Default for TilePropagatorOptions<V> {
    fn default() -> Self {
        Self {
            backtrack_depth: 0,
            seed: 0,
            constraints: Vec::new(),
        }
    }
}

/// Tile-space constraint solver over a compiled model
pub struct TilePropagator<V> {
    topology: GridTopology,
    mapping: TileModelMapping<V>,
    neighbors: NeighborTable,
    wave: Wave,
    state: PropagationState,
    journal: BacktrackJournal,
    constraints: Vec<Box<dyn TileConstraint<V>>>,
    rng: StdRng,
    backtrack_depth: i32,
    backtrack_count: usize,
    forced_contradiction: bool,
}

impl<V: TileValue> TilePropagator<V> {
    /// Compile a model against a topology and initialize the wave
    ///
    /// Initialization bans patterns that have no compatible neighbor in some
    /// direction, propagates, and runs every constraint's `init` hook.
    ///
    /// # Errors
    ///
    /// Returns an error when model compilation fails, when a pattern weight
    /// is not positive, or when a constraint's `init` hook fails
    pub fn new(
        model: &dyn TileModel<V>,
        topology: GridTopology,
        options: TilePropagatorOptions<V>,
    ) -> Result<Self> {
        let mapping = model.build_mapping(&topology)?;
        if let Some(weight) = mapping
            .pattern_model
            .frequencies
            .iter()
            .find(|&&w| !(w > 0.0 && w.is_finite()))
        {
            return Err(invalid_parameter(
                "frequencies",
                weight,
                &"every pattern weight must be positive and finite",
            ));
        }

        let neighbors = NeighborTable::new(&mapping.pattern_topology);
        let mut rng = StdRng::seed_from_u64(options.seed);
        let (wave, state) = Self::fresh_state(&mapping, &neighbors, &mut rng);

        let mut propagator = Self {
            topology,
            mapping,
            neighbors,
            wave,
            state,
            journal: BacktrackJournal::new(options.backtrack_depth),
            constraints: options.constraints,
            rng,
            backtrack_depth: options.backtrack_depth,
            backtrack_count: 0,
            forced_contradiction: false,
        };
        propagator.initialize()?;
        Ok(propagator)
    }

    fn fresh_state(
        mapping: &TileModelMapping<V>,
        neighbors: &NeighborTable,
        rng: &mut StdRng,
    ) -> (Wave, PropagationState) {
        let pattern_topology = &mapping.pattern_topology;
        let active: Vec<bool> = (0..pattern_topology.cell_count())
            .map(|cell| pattern_topology.is_active(cell))
            .collect();
        let wave = Wave::new(&mapping.pattern_model.frequencies, active, rng);
        let state = PropagationState::new(
            &mapping.pattern_model.propagator,
            neighbors.direction_count(),
            pattern_topology.cell_count(),
        );
        (wave, state)
    }

    /// Ban patterns that cannot have any neighbor, then run constraint inits
    fn initialize(&mut self) -> Result<()> {
        let pattern_count = self.wave.pattern_count();
        let direction_count = self.neighbors.direction_count();
        for cell in 0..self.wave.cell_count() {
            if !self.wave.is_active(cell) {
                continue;
            }
            for pattern in 0..pattern_count {
                let unsupported = (0..direction_count).any(|direction| {
                    self.neighbors.get(cell, direction).is_some()
                        && self.mapping.pattern_model.propagator[pattern][direction].is_empty()
                });
                if unsupported {
                    self.ban_pattern(cell, pattern);
                }
            }
        }
        self.drain();

        let mut constraints = std::mem::take(&mut self.constraints);
        let mut result = Ok(());
        for constraint in &mut constraints {
            result = constraint.init(self);
            if result.is_err() {
                break;
            }
        }
        self.constraints = constraints;
        result
    }

    /// Reset the wave and re-run initialization
    ///
    /// The random source keeps its stream, so clearing and re-running
    /// explores a different trajectory.
    ///
    /// # Errors
    ///
    /// Returns an error when a constraint's `init` hook fails
    pub fn clear(&mut self) -> Result<()> {
        let (wave, state) = Self::fresh_state(&self.mapping, &self.neighbors, &mut self.rng);
        self.wave = wave;
        self.state = state;
        self.journal = BacktrackJournal::new(self.backtrack_depth);
        self.backtrack_count = 0;
        self.forced_contradiction = false;
        self.initialize()
    }

    /// Current solve status
    pub fn status(&self) -> Status {
        if self.forced_contradiction || self.wave.empty_cells() > 0 {
            Status::Contradiction
        } else if self.wave.undecided_cells() == 0 {
            Status::Decided
        } else {
            Status::Undecided
        }
    }

    /// Fraction of active pattern cells collapsed to a single pattern
    pub fn progress(&self) -> f64 {
        if self.wave.active_cells() == 0 {
            return 1.0;
        }
        self.wave.decided_cells() as f64 / self.wave.active_cells() as f64
    }

    /// Number of decisions undone so far
    pub const fn backtrack_count(&self) -> usize {
        self.backtrack_count
    }

    /// The tile-space topology the propagator was built over
    pub const fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// The compiled tile-to-pattern mapping
    pub const fn mapping(&self) -> &TileModelMapping<V> {
        &self.mapping
    }

    /// The wave, for inspection
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// The support counters, for inspection
    pub const fn support(&self) -> &ndarray::Array3<u32> {
        &self.state.support
    }

    /// Declare the solve failed regardless of wave state
    ///
    /// Backtracking treats this exactly like a propagated contradiction.
    pub fn set_contradiction(&mut self) {
        self.forced_contradiction = true;
    }

    /// Register a callback restoring constraint-private state on backtrack
    pub fn record_undo(&mut self, callback: Box<dyn FnMut()>) {
        self.journal.record(JournalEntry::Undo(callback));
    }

    /// A uniformly random active cell, for constraints placing things
    pub fn random_active_point(&mut self) -> Option<[usize; 3]> {
        let cells: Vec<usize> = self.topology.active_indices().collect();
        if cells.is_empty() {
            return None;
        }
        let pick = cells[self.rng.random_range(0..cells.len())];
        Some(self.topology.coordinates(pick))
    }

    /// Remove one tile from a cell and propagate
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn ban(&mut self, x: usize, y: usize, z: usize, tile: &Tile<V>) -> Result<()> {
        self.ban_tiles(x, y, z, std::slice::from_ref(tile))
    }

    /// Remove a set of tiles from a cell and propagate
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn ban_tiles(&mut self, x: usize, y: usize, z: usize, tiles: &[Tile<V>]) -> Result<()> {
        let (cell, offset) = self.locate(x, y, z)?;
        let mut to_ban = Vec::new();
        for tile in tiles {
            to_ban.extend_from_slice(self.mapping.patterns_for_tile(offset, tile)?);
        }
        for pattern in to_ban {
            self.ban_pattern(cell, pattern);
        }
        self.drain();
        Ok(())
    }

    /// Collapse a cell to one tile and propagate
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn select(&mut self, x: usize, y: usize, z: usize, tile: &Tile<V>) -> Result<()> {
        self.select_tiles(x, y, z, std::slice::from_ref(tile))
    }

    /// Restrict a cell to a set of tiles and propagate
    ///
    /// Equivalent to banning every tile outside the set.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn select_tiles(&mut self, x: usize, y: usize, z: usize, tiles: &[Tile<V>]) -> Result<()> {
        let (cell, offset) = self.locate(x, y, z)?;
        let mut allowed = PatternBitset::none(self.wave.pattern_count());
        for tile in tiles {
            for &pattern in self.mapping.patterns_for_tile(offset, tile)? {
                allowed.insert(pattern);
            }
        }
        let to_ban: Vec<usize> = self
            .wave
            .patterns_at(cell)
            .filter(|&pattern| !allowed.contains(pattern))
            .collect();
        for pattern in to_ban {
            self.ban_pattern(cell, pattern);
        }
        self.drain();
        Ok(())
    }

    /// Whether no pattern realizing the tile remains at a cell
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn is_banned(&self, x: usize, y: usize, z: usize, tile: &Tile<V>) -> Result<bool> {
        Ok(self.banned_selected(x, y, z, std::slice::from_ref(tile))?.0)
    }

    /// Whether only patterns realizing the tile remain at a cell
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn is_selected(&self, x: usize, y: usize, z: usize, tile: &Tile<V>) -> Result<bool> {
        Ok(self.banned_selected(x, y, z, std::slice::from_ref(tile))?.1)
    }

    /// Banned and selected status of a tile set at a cell, in one pass
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates or unknown tiles
    pub fn banned_selected(
        &self,
        x: usize,
        y: usize,
        z: usize,
        tiles: &[Tile<V>],
    ) -> Result<(bool, bool)> {
        let (cell, offset) = self.locate(x, y, z)?;
        let mut member = PatternBitset::none(self.wave.pattern_count());
        for tile in tiles {
            for &pattern in self.mapping.patterns_for_tile(offset, tile)? {
                member.insert(pattern);
            }
        }
        let mut any_inside = false;
        let mut any_outside = false;
        for pattern in self.wave.patterns_at(cell) {
            if member.contains(pattern) {
                any_inside = true;
            } else {
                any_outside = true;
            }
        }
        let banned = !any_inside;
        let selected = any_inside && !any_outside;
        Ok((banned, selected))
    }

    /// The distinct tiles still realizable at a cell
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds coordinates
    pub fn possible_tiles(&self, x: usize, y: usize, z: usize) -> Result<Vec<Tile<V>>> {
        let (cell, offset) = self.locate(x, y, z)?;
        let mut tiles = Vec::new();
        for pattern in self.wave.patterns_at(cell) {
            if let Some(tile) = self.mapping.tile_at(offset, pattern) {
                if !tiles.contains(tile) {
                    tiles.push(tile.clone());
                }
            }
        }
        Ok(tiles)
    }

    /// Make one decision and propagate it, backtracking on contradiction
    ///
    /// Constraint `check` hooks run first, each fully propagated in
    /// registration order. If the step ends in contradiction and frames
    /// remain, the latest decision is undone, counted, and its choice banned
    /// before the loop re-evaluates.
    ///
    /// # Errors
    ///
    /// Returns an error when a constraint's `check` hook fails
    pub fn step(&mut self) -> Result<Status> {
        if self.status() != Status::Undecided {
            return Ok(self.status());
        }

        self.check_constraints()?;

        if self.status() == Status::Undecided {
            if let Some(cell) = lowest_entropy_cell(&self.wave) {
                let chosen = weighted_pattern_choice(
                    &self.wave,
                    cell,
                    &self.mapping.pattern_model.frequencies,
                    &mut self.rng,
                )
                .unwrap_or_else(|| {
                    // Remaining weights are positive, so the walk cannot fail
                    unreachable!("undecided cell with no weighted candidates")
                });
                self.journal.open_frame(cell, chosen);
                let to_ban: Vec<usize> = self
                    .wave
                    .patterns_at(cell)
                    .filter(|&pattern| pattern != chosen)
                    .collect();
                for pattern in to_ban {
                    self.ban_pattern(cell, pattern);
                }
                self.drain();
            }
        }

        while self.status() == Status::Contradiction && self.backtrack() {}

        Ok(self.status())
    }

    /// Step until the solve is decided or contradicted
    ///
    /// # Errors
    ///
    /// Returns an error when a constraint's `check` hook fails
    pub fn run(&mut self) -> Result<Status> {
        while self.step()? == Status::Undecided {}
        Ok(self.status())
    }

    /// [`TilePropagator::run`] with a terminal progress bar
    ///
    /// # Errors
    ///
    /// Returns an error when a constraint's `check` hook fails
    pub fn run_with_progress(&mut self) -> Result<Status> {
        let mut progress = SolveProgress::new(self.wave.active_cells());
        loop {
            let status = self.step()?;
            progress.update(self.wave.decided_cells());
            if status != Status::Undecided {
                progress.finish(status == Status::Decided);
                return Ok(status);
            }
        }
    }

    /// Decode the wave into tile space
    ///
    /// A cell maps to its tile when exactly one pattern remains, to
    /// `contradiction` when none does, and to `undecided` otherwise.
    pub fn to_array(&self, undecided: Tile<V>, contradiction: Tile<V>) -> Array3<Tile<V>> {
        self.decode(|cell, offset| match self.wave.remaining(cell) {
            0 => contradiction.clone(),
            1 => self
                .wave
                .first_pattern(cell)
                .and_then(|pattern| self.mapping.tile_at(offset, pattern))
                .cloned()
                .unwrap_or_else(|| undecided.clone()),
            _ => undecided.clone(),
        })
    }

    /// Decode the wave into the underlying tile values
    pub fn to_value_array(&self, undecided: V, contradiction: V) -> Array3<V> {
        self.to_array(Tile::Atom(undecided), Tile::Atom(contradiction))
            .mapv(|tile| tile.value().clone())
    }

    /// Decode the full set of tiles still realizable at each cell
    pub fn to_array_sets(&self) -> Array3<Vec<Tile<V>>> {
        self.decode(|cell, offset| {
            let mut tiles: Vec<Tile<V>> = Vec::new();
            for pattern in self.wave.patterns_at(cell) {
                if let Some(tile) = self.mapping.tile_at(offset, pattern) {
                    if !tiles.contains(tile) {
                        tiles.push(tile.clone());
                    }
                }
            }
            tiles
        })
    }

    /// Decode the full set of tile values still realizable at each cell
    pub fn to_value_sets(&self) -> Array3<Vec<V>> {
        self.to_array_sets().mapv(|tiles| {
            let mut values: Vec<V> = Vec::new();
            for tile in tiles {
                let value = tile.value().clone();
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            values
        })
    }

    fn decode<T>(&self, mut f: impl FnMut(usize, usize) -> T) -> Array3<T> {
        let [width, height, depth] = self.topology.dimensions();
        Array3::from_shape_fn((width, height, depth), |(x, y, z)| {
            let (cell, offset) = self.mapping.tile_to_pattern([x, y, z]);
            f(cell, offset)
        })
    }

    fn locate(&self, x: usize, y: usize, z: usize) -> Result<(usize, usize)> {
        if !self.topology.contains(x, y, z) {
            return Err(SolverError::OutOfBounds {
                point: [x, y, z],
                dimensions: self.topology.dimensions(),
            });
        }
        Ok(self.mapping.tile_to_pattern([x, y, z]))
    }

    fn ban_pattern(&mut self, cell: usize, pattern: usize) {
        propagation::ban(&mut self.wave, &mut self.state, &mut self.journal, cell, pattern);
    }

    fn drain(&mut self) {
        propagation::drain(
            &mut self.wave,
            &mut self.state,
            &mut self.journal,
            &self.neighbors,
            &self.mapping.pattern_model.propagator,
        );
    }

    fn check_constraints(&mut self) -> Result<()> {
        let mut constraints = std::mem::take(&mut self.constraints);
        let mut result = Ok(());
        for constraint in &mut constraints {
            if self.status() != Status::Undecided {
                break;
            }
            result = constraint.check(self);
            if result.is_err() {
                break;
            }
        }
        self.constraints = constraints;
        result
    }

    /// Undo the latest decision and ban its choice; false when exhausted
    fn backtrack(&mut self) -> bool {
        let Some(frame) = self.journal.pop_frame() else {
            return false;
        };
        propagation::undo(&mut self.wave, &mut self.state, frame.entries);
        self.forced_contradiction = false;
        self.backtrack_count += 1;
        self.ban_pattern(frame.cell, frame.pattern);
        self.drain();
        true
    }
}
