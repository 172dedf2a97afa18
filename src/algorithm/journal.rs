//! Backtrack journal: decision frames recording every reversible change
//!
//! Each decision opens a frame; every ban, every support-counter decrement,
//! and every constraint-registered undo callback lands in the open frame.
//! Backtracking replays a frame's entries in reverse, which restores the
//! wave and the support table exactly, regardless of whether the
//! propagation queue was drained or discarded mid-flight.

use std::collections::VecDeque;
use std::fmt;

/// One reversible state change
pub enum JournalEntry {
    /// A pattern was removed from a cell
    Ban {
        /// The affected cell
        cell: usize,
        /// The banned pattern
        pattern: usize,
    },
    /// A support counter was decremented
    SupportDecrement {
        /// The affected cell
        cell: usize,
        /// The pattern whose support shrank
        pattern: usize,
        /// The direction of the lost supporter
        direction: usize,
    },
    /// A constraint-supplied callback restoring private constraint state
    Undo(Box<dyn FnMut()>),
}

impl fmt::Debug for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ban { cell, pattern } => {
                write!(f, "Ban({cell}, {pattern})")
            }
            Self::SupportDecrement {
                cell,
                pattern,
                direction,
            } => write!(f, "SupportDecrement({cell}, {pattern}, {direction})"),
            Self::Undo(_) => write!(f, "Undo(..)"),
        }
    }
}

/// A decision and everything that happened because of it
#[derive(Debug)]
pub struct DecisionFrame {
    /// The cell the decision collapsed
    pub cell: usize,
    /// The pattern it was collapsed to
    pub pattern: usize,
    /// Changes recorded since the decision, in application order
    pub entries: Vec<JournalEntry>,
}

/// Bounded stack of decision frames
///
/// Depth semantics follow the configuration: `0` disables the journal
/// entirely, a negative depth keeps every frame, and a positive depth keeps
/// that many frames, silently discarding the oldest. Changes made while no
/// frame is open (initialization, pre-run bans) are irrevocable.
#[derive(Debug, Default)]
pub struct BacktrackJournal {
    frames: VecDeque<DecisionFrame>,
    depth: i32,
}

impl BacktrackJournal {
    /// Create a journal with the given depth policy
    pub fn new(depth: i32) -> Self {
        Self {
            frames: VecDeque::new(),
            depth,
        }
    }

    /// Whether backtracking is enabled at all
    pub const fn enabled(&self) -> bool {
        self.depth != 0
    }

    /// Number of frames currently held
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Open a frame for a decision
    ///
    /// When the depth bound is hit, the oldest frame is discarded and its
    /// decision becomes irrevocable.
    pub fn open_frame(&mut self, cell: usize, pattern: usize) {
        if self.depth == 0 {
            return;
        }
        if self.depth > 0 && self.frames.len() == self.depth as usize {
            self.frames.pop_front();
        }
        self.frames.push_back(DecisionFrame {
            cell,
            pattern,
            entries: Vec::new(),
        });
    }

    /// Record a change into the open frame, if any
    pub fn record(&mut self, entry: JournalEntry) {
        if let Some(frame) = self.frames.back_mut() {
            frame.entries.push(entry);
        }
    }

    /// Take the most recent frame for inverse replay
    pub fn pop_frame(&mut self) -> Option<DecisionFrame> {
        self.frames.pop_back()
    }

    /// Drop every frame
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
