use std::path::Path;

use targeting::{TargetingConfig, CONFIG_ENV_VAR};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::loop_runner::LoopConfig;
use super::scenario::SandboxScenario;

const SCENARIO_ENV_VAR: &str = "SANDBOX_SCENARIO";
const TICKS_ENV_VAR: &str = "SANDBOX_TICKS";

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) targeting_config: TargetingConfig,
    pub(crate) scenario: SandboxScenario,
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Targeting Sandbox Startup ===");

    let targeting_config = TargetingConfig::from_env().map_err(|err| err.to_string())?;
    info!(
        config_source = %config_source(),
        max_targets = targeting_config.max_targets,
        retain_all_below = targeting_config.retain_all_below,
        refresh_interval_ms = targeting_config.refresh_interval_ms,
        show_marker = targeting_config.show_marker,
        "targeting_config_loaded"
    );

    let mut scenario = load_scenario_from_env()?;
    if let Some(total_ticks) = parse_ticks_override_from_env()? {
        scenario.total_ticks = total_ticks;
    }
    info!(
        total_ticks = scenario.total_ticks,
        players = scenario.players.len(),
        vehicles = scenario.vehicles.len(),
        objects = scenario.objects.len(),
        inputs = scenario.inputs.len(),
        "scenario_loaded"
    );

    Ok(AppWiring {
        loop_config: LoopConfig::default(),
        targeting_config,
        scenario,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn config_source() -> String {
    std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "defaults".to_string())
}

fn load_scenario_from_env() -> Result<SandboxScenario, String> {
    match std::env::var(SCENARIO_ENV_VAR) {
        Ok(raw) if !raw.trim().is_empty() => SandboxScenario::load(Path::new(raw.trim())),
        _ => Ok(SandboxScenario::demo()),
    }
}

fn parse_ticks_override_from_env() -> Result<Option<u64>, String> {
    std::env::var(TICKS_ENV_VAR)
        .ok()
        .map(|raw| parse_ticks(&raw))
        .transpose()
}

fn parse_ticks(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|err| format!("invalid {TICKS_ENV_VAR} value '{raw}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ticks_accepts_padded_number() {
        assert_eq!(parse_ticks(" 600 "), Ok(600));
    }

    #[test]
    fn parse_ticks_rejects_garbage() {
        let error = parse_ticks("lots").expect_err("not a number");

        assert!(error.contains(TICKS_ENV_VAR), "{error}");
    }
}
