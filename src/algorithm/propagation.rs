//! Arc-consistency propagation over the wave
//!
//! Support counters implement the classic AC-4 scheme: `support[c][p][d]`
//! counts the patterns still possible at `c`'s neighbor in direction `d`
//! that allow `p` back at `c`. Banning a pattern enqueues it; the drain
//! loop decrements the support its removal withdraws from surrounding
//! cells, banning any pattern whose support reaches zero. Every decrement
//! is journaled so backtracking can replay the exact inverse.

use crate::algorithm::journal::{BacktrackJournal, JournalEntry};
use crate::algorithm::wave::Wave;
use crate::spatial::topology::NeighborTable;
use ndarray::Array3;
use std::collections::VecDeque;

/// Support counters and the pending-ban queue
#[derive(Clone, Debug)]
pub struct PropagationState {
    /// `support[(cell, pattern, direction)]`: count of compatible neighbors
    pub support: Array3<u32>,
    /// Bans whose consequences have not been applied yet
    pub queue: VecDeque<(usize, usize)>,
}

impl PropagationState {
    /// Initialize support for a wave where everything is still possible
    ///
    /// With all neighbor patterns possible, the support of `p` in direction
    /// `d` is just the length of its compatibility list. Cells without a
    /// neighbor in some direction keep the initial value forever; it is
    /// never decremented, so it never triggers a ban.
    pub fn new(propagator: &[Vec<Vec<usize>>], direction_count: usize, cell_count: usize) -> Self {
        let pattern_count = propagator.len();
        let mut support = Array3::zeros((cell_count, pattern_count, direction_count));
        for (pattern, per_direction) in propagator.iter().enumerate() {
            for (direction, list) in per_direction.iter().enumerate() {
                let count = list.len() as u32;
                for cell in 0..cell_count {
                    support[(cell, pattern, direction)] = count;
                }
            }
        }
        Self {
            support,
            queue: VecDeque::new(),
        }
    }
}

/// Remove a pattern from a cell and queue the consequences
///
/// The sole mutator of the wave. Banning an already-banned pattern is a
/// no-op. Returns `true` when the ban emptied the cell.
pub fn ban(
    wave: &mut Wave,
    state: &mut PropagationState,
    journal: &mut BacktrackJournal,
    cell: usize,
    pattern: usize,
) -> bool {
    if !wave.possible(cell, pattern) {
        return false;
    }
    let emptied = wave.ban(cell, pattern);
    journal.record(JournalEntry::Ban { cell, pattern });
    state.queue.push_back((cell, pattern));
    emptied
}

/// Drain the queue until quiescence or contradiction
///
/// Returns `true` on contradiction, in which case the remaining queue is
/// discarded; the journal still reflects exactly the changes applied.
pub fn drain(
    wave: &mut Wave,
    state: &mut PropagationState,
    journal: &mut BacktrackJournal,
    neighbors: &NeighborTable,
    propagator: &[Vec<Vec<usize>>],
) -> bool {
    if wave.empty_cells() > 0 {
        state.queue.clear();
        return true;
    }
    while let Some((cell, pattern)) = state.queue.pop_front() {
        for direction in 0..neighbors.direction_count() {
            let Some(neighbor) = neighbors.get(cell, direction) else {
                continue;
            };
            // Directions come in +/- pairs, so the pair partner points back
            let opposite = direction ^ 1;
            for &affected in &propagator[pattern][direction] {
                let entry = &mut state.support[(neighbor, affected, opposite)];
                debug_assert!(*entry > 0);
                *entry -= 1;
                let exhausted = *entry == 0;
                journal.record(JournalEntry::SupportDecrement {
                    cell: neighbor,
                    pattern: affected,
                    direction: opposite,
                });
                if exhausted
                    && wave.possible(neighbor, affected)
                    && ban(wave, state, journal, neighbor, affected)
                {
                    state.queue.clear();
                    return true;
                }
            }
        }
    }
    false
}

/// Replay a frame's entries in reverse, restoring wave and support exactly
pub fn undo(wave: &mut Wave, state: &mut PropagationState, entries: Vec<JournalEntry>) {
    for entry in entries.into_iter().rev() {
        match entry {
            JournalEntry::Ban { cell, pattern } => wave.unban(cell, pattern),
            JournalEntry::SupportDecrement {
                cell,
                pattern,
                direction,
            } => {
                state.support[(cell, pattern, direction)] += 1;
            }
            JournalEntry::Undo(mut callback) => callback(),
        }
    }
}
