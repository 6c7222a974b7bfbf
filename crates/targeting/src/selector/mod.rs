mod candidate;
mod dispatch;
mod input;
mod metrics;
mod presenter;
mod ranker;
mod state;
mod system;

#[cfg(test)]
pub(crate) mod test_support;

pub use candidate::{collect_candidates, interaction_candidate, CandidateDescriptor, CandidateKind};
pub use dispatch::{dispatch_confirm, DispatchOutcome, IgnoreReason};
pub use input::{ActionStates, InputAction};
pub use metrics::{SelectionMetricsHandle, SelectionMetricsSnapshot};
pub use presenter::{marker_request_for, MarkerKind, MarkerRequest, MarkerStyle, Rgba};
pub use ranker::{rank_candidates, reconcile, RankLimits, ReconcileOutcome};
pub use state::SelectionState;
pub use system::TargetingSystem;
