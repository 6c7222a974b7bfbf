use std::time::Instant;

use super::candidate::CandidateDescriptor;
use super::ranker::{reconcile, ReconcileOutcome};

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    working_set: Vec<CandidateDescriptor>,
    active_index: usize,
    last_selected: Option<CandidateDescriptor>,
    next_refresh_at: Option<Instant>,
}

impl SelectionState {
    pub fn working_set(&self) -> &[CandidateDescriptor] {
        &self.working_set
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> Option<&CandidateDescriptor> {
        self.working_set.get(self.active_index)
    }

    pub fn last_selected(&self) -> Option<&CandidateDescriptor> {
        self.last_selected.as_ref()
    }

    pub fn next_refresh_at(&self) -> Option<Instant> {
        self.next_refresh_at
    }

    pub(crate) fn refresh_due(&self, now: Instant) -> bool {
        match self.next_refresh_at {
            Some(at) => now > at,
            None => true,
        }
    }

    pub(crate) fn schedule_refresh(&mut self, at: Instant) {
        self.next_refresh_at = Some(at);
    }

    pub(crate) fn reset_active_index(&mut self) {
        self.active_index = 0;
    }

    pub(crate) fn install_working_set(
        &mut self,
        working_set: Vec<CandidateDescriptor>,
    ) -> ReconcileOutcome {
        let outcome = reconcile(self.last_selected.as_ref(), &working_set);
        self.working_set = working_set;
        match outcome {
            ReconcileOutcome::Acquired | ReconcileOutcome::FellBack => self.select(0),
            ReconcileOutcome::Retained { index } => self.select(index),
            ReconcileOutcome::Cleared => {
                self.active_index = 0;
                self.last_selected = None;
            }
            ReconcileOutcome::Unchanged => {}
        }
        outcome
    }

    pub(crate) fn advance(&mut self) -> Option<usize> {
        if self.working_set.is_empty() {
            return None;
        }
        let next = (self.active_index + 1) % self.working_set.len();
        self.select(next);
        Some(next)
    }

    fn select(&mut self, index: usize) {
        self.active_index = index;
        self.last_selected = self.working_set.get(index).copied();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::selector::CandidateKind;
    use crate::world::{EntityId, Vec3};

    fn candidate(id: i64, distance: f32) -> CandidateDescriptor {
        CandidateDescriptor {
            id: EntityId(id),
            position: Vec3::default(),
            kind: CandidateKind::Object,
            distance,
            height: 1.0,
        }
    }

    #[test]
    fn refresh_due_requires_strictly_later_instant() {
        let base = Instant::now();
        let mut state = SelectionState::default();
        assert!(state.refresh_due(base));

        state.schedule_refresh(base);
        assert!(!state.refresh_due(base));
        assert!(state.refresh_due(base + Duration::from_millis(1)));
    }

    #[test]
    fn advance_wraps_and_recaches_last_selected() {
        let mut state = SelectionState::default();
        state.install_working_set(vec![candidate(1, 1.0), candidate(2, 2.0)]);

        assert_eq!(state.advance(), Some(1));
        assert_eq!(state.last_selected().expect("last").id, EntityId(2));
        assert_eq!(state.advance(), Some(0));
        assert_eq!(state.last_selected().expect("last").id, EntityId(1));
    }

    #[test]
    fn advance_on_empty_set_is_noop() {
        let mut state = SelectionState::default();

        assert_eq!(state.advance(), None);
        assert_eq!(state.active_index(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn install_clears_last_selected_when_set_empties() {
        let mut state = SelectionState::default();
        state.install_working_set(vec![candidate(1, 1.0)]);

        let outcome = state.install_working_set(Vec::new());

        assert_eq!(outcome, ReconcileOutcome::Cleared);
        assert!(state.last_selected().is_none());
        assert!(state.active().is_none());
    }
}
