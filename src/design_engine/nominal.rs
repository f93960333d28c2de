//! Nominal size lookup
//!
//! Snaps computed ideal dimensions onto manufacturable sizes. Candidate
//! slices must be sorted ascending; an unsorted slice is reported as
//! `NominalSizeError::UnsortedCandidates` instead of giving a silently wrong
//! answer.

use crate::error::NominalSizeError;

/// Which candidates a `nearest` search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Any candidate
    Unrestricted,
    /// Candidates `>= value`
    AtLeast,
    /// Candidates `> value`
    StrictlyGreater,
}

impl SearchDirection {
    fn admits(self, candidate: f64, value: f64) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::AtLeast => candidate >= value,
            Self::StrictlyGreater => candidate > value,
        }
    }
}

fn check_sorted(candidates: &[f64]) -> Result<(), NominalSizeError> {
    if candidates.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(NominalSizeError::UnsortedCandidates)
    }
}

/// Candidate closest to `value` among those the direction admits.
///
/// Ties resolve to the smallest qualifying candidate.
pub fn nearest(
    value: f64,
    candidates: &[f64],
    direction: SearchDirection,
) -> Result<f64, NominalSizeError> {
    check_sorted(candidates)?;

    let mut best: Option<(f64, f64)> = None;
    for &candidate in candidates.iter().filter(|&&c| direction.admits(c, value)) {
        let distance = (candidate - value).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(candidate, _)| candidate)
        .ok_or(NominalSizeError::EmptyCandidateSet { value })
}

/// Smallest candidate strictly greater than `value`.
pub fn next_largest(value: f64, candidates: &[f64]) -> Result<f64, NominalSizeError> {
    nearest(value, candidates, SearchDirection::StrictlyGreater)
}
