//! Cell and pattern selection for the decision loop

use crate::algorithm::wave::Wave;
use crate::math::probability::weighted_sample;
use rand::Rng;
use rand::rngs::StdRng;

/// Find the undecided cell with the lowest entropy
///
/// Cells with one or zero patterns left are settled and skipped, as are
/// masked cells. Ties break through the per-cell noise baked into the
/// entropy key at wave initialization, so the scan order introduces no
/// low-index bias.
pub fn lowest_entropy_cell(wave: &Wave) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for cell in 0..wave.cell_count() {
        if !wave.is_active(cell) || wave.remaining(cell) <= 1 {
            continue;
        }
        let key = wave.entropy_key(cell);
        match best {
            Some((_, lowest)) if lowest <= key => {}
            _ => best = Some((cell, key)),
        }
    }
    best.map(|(cell, _)| cell)
}

/// Pick one of a cell's remaining patterns, weighted by frequency
pub fn weighted_pattern_choice(
    wave: &Wave,
    cell: usize,
    frequencies: &[f64],
    rng: &mut StdRng,
) -> Option<usize> {
    let candidates: Vec<(usize, f64)> = wave
        .patterns_at(cell)
        .map(|pattern| (pattern, frequencies[pattern]))
        .collect();
    weighted_sample(&candidates, rng.random::<f64>())
}
