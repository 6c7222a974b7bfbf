use super::candidate::CandidateDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankLimits {
    pub max_targets: usize,
    /// Below this many merged candidates nothing is truncated.
    pub retain_all_below: usize,
}

impl Default for RankLimits {
    fn default() -> Self {
        Self {
            max_targets: 50,
            retain_all_below: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Acquired,
    Retained { index: usize },
    FellBack,
    Cleared,
    Unchanged,
}

impl ReconcileOutcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Acquired => "acquired",
            Self::Retained { .. } => "retained",
            Self::FellBack => "fell_back",
            Self::Cleared => "cleared",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Stable: equidistant candidates keep their merge order. NaN distances sort
/// after every finite distance.
pub fn rank_candidates(
    mut merged: Vec<CandidateDescriptor>,
    limits: RankLimits,
) -> Vec<CandidateDescriptor> {
    merged.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    if merged.len() >= limits.retain_all_below {
        merged.truncate(limits.max_targets);
    }
    merged
}

pub fn reconcile(
    previous: Option<&CandidateDescriptor>,
    working_set: &[CandidateDescriptor],
) -> ReconcileOutcome {
    let Some(previous) = previous else {
        return if working_set.is_empty() {
            ReconcileOutcome::Unchanged
        } else {
            ReconcileOutcome::Acquired
        };
    };

    if working_set.is_empty() {
        return ReconcileOutcome::Cleared;
    }

    match working_set
        .iter()
        .position(|candidate| candidate.id == previous.id)
    {
        Some(index) => ReconcileOutcome::Retained { index },
        None => ReconcileOutcome::FellBack,
    }
}
