use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use targeting::{InputAction, Vec3};

pub(crate) type ScenarioResult<T> = Result<T, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SandboxScenario {
    pub(crate) total_ticks: u64,
    pub(crate) actor: ScenarioActor,
    #[serde(default)]
    pub(crate) players: Vec<ScenarioEntity>,
    #[serde(default)]
    pub(crate) vehicles: Vec<ScenarioEntity>,
    #[serde(default)]
    pub(crate) objects: Vec<ScenarioObject>,
    #[serde(default)]
    pub(crate) interaction: Option<ScenarioInteraction>,
    #[serde(default)]
    pub(crate) mount: Option<ScenarioMount>,
    #[serde(default)]
    pub(crate) inputs: Vec<ScriptedInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioActor {
    pub(crate) id: i64,
    pub(crate) start: Vec3,
    /// World units per second.
    pub(crate) velocity: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioEntity {
    pub(crate) id: i64,
    pub(crate) position: Vec3,
    #[serde(default)]
    pub(crate) height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioObject {
    pub(crate) id: i64,
    pub(crate) position: Vec3,
    #[serde(default)]
    pub(crate) height: Option<f32>,
    #[serde(default)]
    pub(crate) dropped_item: Option<String>,
    #[serde(default)]
    pub(crate) uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioInteraction {
    pub(crate) uid: String,
    pub(crate) position: Vec3,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) from_tick: u64,
    pub(crate) until_tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioMount {
    pub(crate) vehicle_id: i64,
    pub(crate) at_tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptedInput {
    pub(crate) tick: u64,
    pub(crate) action: ScriptedAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScriptedAction {
    Interact,
    InteractAlt,
    InteractCycle,
}

impl ScriptedAction {
    pub(crate) fn to_input_action(self) -> InputAction {
        match self {
            Self::Interact => InputAction::Interact,
            Self::InteractAlt => InputAction::InteractAlt,
            Self::InteractCycle => InputAction::InteractCycle,
        }
    }
}

impl SandboxScenario {
    pub(crate) fn demo() -> Self {
        Self {
            total_ticks: 1800,
            actor: ScenarioActor {
                id: 1,
                start: Vec3::new(0.0, 0.0, 0.0),
                velocity: Vec3::new(1.0, 0.0, 0.0),
            },
            players: vec![
                ScenarioEntity {
                    id: 2,
                    position: Vec3::new(6.0, 2.0, 0.0),
                    height: Some(1.8),
                },
                ScenarioEntity {
                    id: 3,
                    position: Vec3::new(20.0, -3.0, 0.0),
                    height: Some(1.7),
                },
            ],
            vehicles: vec![ScenarioEntity {
                id: 40,
                position: Vec3::new(24.0, 1.0, 0.0),
                height: Some(1.4),
            }],
            objects: vec![
                ScenarioObject {
                    id: 70,
                    position: Vec3::new(14.0, 0.5, 0.0),
                    height: None,
                    dropped_item: Some("item-medkit".to_string()),
                    uid: None,
                },
                ScenarioObject {
                    id: 71,
                    position: Vec3::new(4.0, -1.0, 0.0),
                    height: Some(0.8),
                    dropped_item: None,
                    uid: Some("crate-01".to_string()),
                },
            ],
            interaction: Some(ScenarioInteraction {
                uid: "fuel-pump-3".to_string(),
                position: Vec3::new(18.0, 4.0, 0.0),
                description: Some("Refuel".to_string()),
                from_tick: 960,
                until_tick: 1140,
            }),
            mount: Some(ScenarioMount {
                vehicle_id: 40,
                at_tick: 1440,
            }),
            inputs: vec![
                scripted(150, ScriptedAction::Interact),
                scripted(330, ScriptedAction::InteractCycle),
                scripted(340, ScriptedAction::InteractAlt),
                scripted(920, ScriptedAction::InteractCycle),
                scripted(925, ScriptedAction::InteractCycle),
                scripted(930, ScriptedAction::Interact),
                scripted(1000, ScriptedAction::Interact),
                scripted(1500, ScriptedAction::InteractCycle),
                scripted(1560, ScriptedAction::Interact),
            ],
        }
    }

    pub(crate) fn inputs_at(&self, tick: u64) -> impl Iterator<Item = InputAction> + '_ {
        self.inputs
            .iter()
            .filter(move |input| input.tick == tick)
            .map(|input| input.action.to_input_action())
    }

    pub(crate) fn load(path: &Path) -> ScenarioResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|error| format!("read scenario '{}': {error}", path.display()))?;
        let scenario = Self::parse_json(&raw)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub(crate) fn parse_json(raw: &str) -> ScenarioResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        match serde_path_to_error::deserialize::<_, SandboxScenario>(&mut deserializer) {
            Ok(scenario) => Ok(scenario),
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                if path.is_empty() || path == "." {
                    Err(format!("parse scenario json: {source}"))
                } else {
                    Err(format!("parse scenario json at {path}: {source}"))
                }
            }
        }
    }

    pub(crate) fn validate(&self) -> ScenarioResult<()> {
        let mut seen = HashSet::new();
        seen.insert(self.actor.id);
        let ids = self
            .players
            .iter()
            .map(|player| player.id)
            .chain(self.vehicles.iter().map(|vehicle| vehicle.id))
            .chain(self.objects.iter().map(|object| object.id));
        for id in ids {
            if id < 0 {
                return Err(format!("validation failed at id {id}: ids must be non-negative"));
            }
            if !seen.insert(id) {
                return Err(format!("validation failed at id {id}: duplicate entity id"));
            }
        }

        if let Some(interaction) = &self.interaction {
            if interaction.from_tick > interaction.until_tick {
                return Err(format!(
                    "validation failed at interaction: from_tick {} is after until_tick {}",
                    interaction.from_tick, interaction.until_tick
                ));
            }
        }

        if let Some(mount) = self.mount {
            if !self
                .vehicles
                .iter()
                .any(|vehicle| vehicle.id == mount.vehicle_id)
            {
                return Err(format!(
                    "validation failed at mount.vehicle_id: no vehicle {}",
                    mount.vehicle_id
                ));
            }
        }
        Ok(())
    }
}

fn scripted(tick: u64, action: ScriptedAction) -> ScriptedInput {
    ScriptedInput { tick, action }
}
