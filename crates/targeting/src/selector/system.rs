use std::time::Instant;

use tracing::{debug, info, trace};

use super::candidate::{
    collect_candidates, interaction_candidate, CandidateDescriptor, CandidateKind,
};
use super::dispatch::{dispatch_confirm, DispatchOutcome};
use super::input::InputAction;
use super::metrics::SelectionMetricsHandle;
use super::presenter::{marker_request_for, Rgba};
use super::ranker::{rank_candidates, ReconcileOutcome};
use super::state::SelectionState;
use crate::config::TargetingConfig;
use crate::host::ClientEffects;
use crate::world::{Interaction, Vec3, WorldView};

#[derive(Debug)]
pub struct TargetingSystem {
    config: TargetingConfig,
    state: SelectionState,
    interaction: Option<Interaction>,
    running: bool,
    metrics: SelectionMetricsHandle,
}

impl TargetingSystem {
    pub fn new(config: TargetingConfig) -> Self {
        Self::with_metrics(config, SelectionMetricsHandle::default())
    }

    pub fn with_metrics(config: TargetingConfig, metrics: SelectionMetricsHandle) -> Self {
        Self {
            config,
            state: SelectionState::default(),
            interaction: None,
            running: false,
            metrics,
        }
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn metrics(&self) -> SelectionMetricsHandle {
        self.metrics.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now: Instant, world: &dyn WorldView) {
        self.running = true;
        self.state.reset_active_index();
        self.refresh_selection(world);
        self.schedule_next_refresh(now);
        info!(
            candidate_count = self.state.working_set().len(),
            refresh_interval_ms = self.config.refresh_interval_ms,
            max_targets = self.config.max_targets,
            "targeting_started"
        );
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!("targeting_stopped");
        }
    }

    pub fn tick(&mut self, now: Instant, world: &dyn WorldView, effects: &mut dyn ClientEffects) {
        if !self.running || world.is_any_menu_open() {
            return;
        }

        if self.state.refresh_due(now) {
            self.schedule_next_refresh(now);
            self.state.reset_active_index();
            self.refresh_selection(world);
        }

        let Some(active) = self.state.active() else {
            return;
        };
        if !self.config.show_marker {
            return;
        }

        let request = marker_request_for(
            active,
            &world.local_actor(),
            &self.config.marker,
            self.config.mount_marker_offset,
        );
        trace!(
            target_id = %active.id,
            kind = active.kind.label(),
            x = request.position.x,
            y = request.position.y,
            z = request.position.z,
            "marker_drawn"
        );
        effects.draw_marker(&request);
    }

    pub fn handle_input(
        &mut self,
        action: InputAction,
        world: &dyn WorldView,
        effects: &mut dyn ClientEffects,
    ) {
        match action {
            InputAction::Interact | InputAction::InteractAlt => {
                let _ = self.confirm(world, effects);
            }
            InputAction::InteractCycle => {
                let _ = self.cycle(world, effects);
            }
        }
    }

    pub fn cycle(
        &mut self,
        world: &dyn WorldView,
        effects: &mut dyn ClientEffects,
    ) -> Option<usize> {
        if !self.accepts_input(world) {
            return None;
        }

        let index = self.state.advance()?;
        effects.play_sound(&self.config.cycle_sound);
        self.metrics.record_cycle();
        debug!(
            active_index = index,
            candidate_count = self.state.working_set().len(),
            "selection_cycled"
        );
        Some(index)
    }

    pub fn confirm(
        &mut self,
        world: &dyn WorldView,
        effects: &mut dyn ClientEffects,
    ) -> Option<DispatchOutcome> {
        if !self.accepts_input(world) {
            return None;
        }

        let active = self.state.active();
        let outcome = dispatch_confirm(
            active,
            self.interaction.as_ref(),
            world,
            effects,
            self.config.pickup_move_speed,
        );
        self.metrics.record_dispatch();
        debug!(
            target_id = ?active.map(|candidate| candidate.id.0),
            kind = active.map(|candidate| candidate.kind.label()),
            outcome = ?outcome,
            "selection_confirmed"
        );
        Some(outcome)
    }

    pub fn selection(&self) -> Option<&CandidateDescriptor> {
        self.state.active()
    }

    pub fn selectables(&self) -> &[CandidateDescriptor] {
        self.state.working_set()
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    // Dispatch sees the change at once; the working set only on the next refresh.
    pub fn set_interaction(&mut self, interaction: Option<Interaction>) {
        self.interaction = interaction;
    }

    pub fn set_marker_visible(&mut self, visible: bool) {
        self.config.show_marker = visible;
    }

    pub fn set_marker_color(&mut self, color: Rgba) {
        self.config.marker.color = color;
    }

    pub fn set_marker_size(&mut self, size: Vec3) {
        self.config.marker.size = size;
    }

    fn accepts_input(&self, world: &dyn WorldView) -> bool {
        self.running && !world.is_any_menu_open()
    }

    fn schedule_next_refresh(&mut self, now: Instant) {
        let next = now
            .checked_add(self.config.refresh_interval())
            .unwrap_or(now);
        self.state.schedule_refresh(next);
    }

    fn refresh_selection(&mut self, world: &dyn WorldView) -> ReconcileOutcome {
        let started = Instant::now();
        let actor = world.local_actor();

        let mut merged = collect_candidates(world.players(), CandidateKind::Player, &actor);
        merged.extend(collect_candidates(
            world.vehicles(),
            CandidateKind::Vehicle,
            &actor,
        ));
        merged.extend(collect_candidates(world.objects(), CandidateKind::Object, &actor));
        if let Some(interaction) = &self.interaction {
            merged.push(interaction_candidate(interaction, &actor));
        }

        let merged_count = merged.len();
        let working_set = rank_candidates(merged, self.config.rank_limits());
        let outcome = self.state.install_working_set(working_set);
        let candidate_count = self.state.working_set().len();
        self.metrics.record_refresh(candidate_count, started.elapsed());
        debug!(
            merged_count,
            candidate_count,
            active_index = self.state.active_index(),
            target_id = ?self.state.active().map(|candidate| candidate.id.0),
            outcome = outcome.label(),
            "selection_refreshed"
        );
        outcome
    }
}
