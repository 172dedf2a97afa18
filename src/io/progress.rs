//! Terminal progress reporting for long solves

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking how many cells have collapsed
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Create a bar sized to the number of active cells
    pub fn new(total_cells: usize) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(SOLVE_STYLE.clone());
        bar.set_message("collapsing");
        Self { bar }
    }

    /// Report the number of decided cells
    pub fn update(&mut self, decided_cells: usize) {
        self.bar.set_position(decided_cells as u64);
    }

    /// Close the bar with a final message
    pub fn finish(self, decided: bool) {
        if decided {
            self.bar.finish_with_message("decided");
        } else {
            self.bar.abandon_with_message("contradiction");
        }
    }
}
