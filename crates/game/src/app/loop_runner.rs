use std::process::ExitCode;
use std::time::{Duration, Instant};

use targeting::{
    ActionStates, EntityId, InputAction, Interaction, SelectionMetricsSnapshot, TargetingSystem,
    Vec3,
};
use tracing::{error, info};

use super::bootstrap::AppWiring;
use super::sandbox::{SandboxEffects, SandboxWorld};
use super::scenario::SandboxScenario;

#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopConfig {
    pub(crate) target_tps: u32,
    pub(crate) metrics_log_interval_ticks: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            metrics_log_interval_ticks: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunReport {
    pub(crate) ticks_run: u64,
    pub(crate) markers_drawn: u64,
    pub(crate) objects_remaining: usize,
    pub(crate) final_actor_position: Vec3,
    pub(crate) final_selection: Option<EntityId>,
    pub(crate) metrics: SelectionMetricsSnapshot,
}

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let AppWiring {
        loop_config,
        targeting_config,
        scenario,
    } = app;

    if scenario.total_ticks == 0 {
        error!(reason = "total_ticks is zero", "startup_failed");
        return ExitCode::FAILURE;
    }

    let mut targeting = TargetingSystem::new(targeting_config);
    let report = run_ticks(&loop_config, &scenario, &mut targeting, Instant::now());
    info!(
        ticks = report.ticks_run,
        markers_drawn = report.markers_drawn,
        objects_remaining = report.objects_remaining,
        actor_x = report.final_actor_position.x,
        actor_y = report.final_actor_position.y,
        final_selection = ?report.final_selection.map(|id| id.0),
        refresh_count = report.metrics.refresh_count,
        cycle_count = report.metrics.cycle_count,
        dispatch_count = report.metrics.dispatch_count,
        "shutdown"
    );

    ExitCode::SUCCESS
}

/// Drives the sandbox on a simulated clock: tick `n` happens at
/// `base + n * fixed_dt` regardless of wall time.
pub(crate) fn run_ticks(
    config: &LoopConfig,
    scenario: &SandboxScenario,
    targeting: &mut TargetingSystem,
    base: Instant,
) -> RunReport {
    let target_tps = config.target_tps.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let metrics_log_interval_ticks = config.metrics_log_interval_ticks.max(1);
    info!(
        target_tps,
        total_ticks = scenario.total_ticks,
        metrics_log_interval_ticks,
        "loop_config"
    );
    for action in InputAction::ALL {
        info!(
            binding = action.identifier(),
            description = action.description(),
            confirm = action.is_confirm(),
            "input_bound"
        );
    }

    let mut world = SandboxWorld::from_scenario(scenario);
    let mut effects = SandboxEffects::default();
    let mut actions = ActionStates::default();

    targeting.start(base, &world);

    for tick in 0..scenario.total_ticks {
        let now = sim_instant(base, fixed_dt, tick);

        if let Some(mount) = scenario.mount {
            if mount.at_tick == tick {
                world.mount_vehicle(EntityId(mount.vehicle_id));
            }
        }
        apply_interaction_window(scenario, tick, targeting);

        targeting.tick(now, &world, &mut effects);

        for action in InputAction::ALL {
            actions.set(action, false);
        }
        for action in scenario.inputs_at(tick) {
            actions.set(action, true);
        }
        for action in actions.take_pressed() {
            info!(tick, action = action.identifier(), "input_pressed");
            targeting.handle_input(action, &world, &mut effects);
        }

        world.apply(effects.drain());
        world.advance(fixed_dt_seconds);

        if (tick + 1) % metrics_log_interval_ticks == 0 {
            let metrics = targeting.metrics().snapshot();
            info!(
                tick,
                refresh_count = metrics.refresh_count,
                candidate_count = metrics.candidate_count,
                last_refresh_us = metrics.last_refresh_micros,
                cycle_count = metrics.cycle_count,
                dispatch_count = metrics.dispatch_count,
                "selection_metrics"
            );
        }
    }

    let final_selection = targeting.selection().map(|candidate| candidate.id);
    targeting.stop();

    RunReport {
        ticks_run: scenario.total_ticks,
        markers_drawn: effects.markers_drawn(),
        objects_remaining: world.object_count(),
        final_actor_position: world.actor_position(),
        final_selection,
        metrics: targeting.metrics().snapshot(),
    }
}

fn apply_interaction_window(
    scenario: &SandboxScenario,
    tick: u64,
    targeting: &mut TargetingSystem,
) {
    let Some(window) = &scenario.interaction else {
        return;
    };
    if tick == window.from_tick {
        info!(uid = %window.uid, "interaction_available");
        targeting.set_interaction(Some(Interaction {
            uid: window.uid.clone(),
            position: window.position,
            description: window.description.clone(),
        }));
    } else if tick == window.until_tick {
        info!(uid = %window.uid, "interaction_withdrawn");
        targeting.set_interaction(None);
    }
}

fn sim_instant(base: Instant, fixed_dt: Duration, tick: u64) -> Instant {
    let nanos = fixed_dt.as_nanos().saturating_mul(u128::from(tick));
    let elapsed = Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX));
    base.checked_add(elapsed).unwrap_or(base)
}
