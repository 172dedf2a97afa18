//! Weighted sampling helpers

/// Pick an item from a weighted candidate list
///
/// `unit_sample` is a uniform draw from [0, 1). The walk subtracts weights
/// until the scaled sample is exhausted, so heavier candidates claim
/// proportionally larger slices. Returns `None` for an empty list or a
/// non-positive total weight.
pub fn weighted_sample(candidates: &[(usize, f64)], unit_sample: f64) -> Option<usize> {
    let total: f64 = candidates.iter().map(|&(_, weight)| weight).sum();
    if total <= 0.0 {
        return None;
    }

    let mut remaining = unit_sample * total;
    for &(item, weight) in candidates {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(item);
        }
    }
    // Rounding can leave a sliver past the last weight
    candidates.last().map(|&(item, _)| item)
}
