use serde::{Deserialize, Serialize};

use crate::selector::MarkerRequest;
use crate::world::{EntityId, Interaction, ItemId, LiveEntity, StreamedObject, Vec3};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoundCue {
    pub name: String,
    pub sound_set: String,
}

impl Default for SoundCue {
    fn default() -> Self {
        Self {
            name: "SKIP".to_string(),
            sound_set: "HUD_FRONTEND_DEFAULT_SOUNDSET".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCommand {
    pub actor: EntityId,
    pub target: Vec3,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Npc,
    Player,
    Vehicle,
    Object,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuRequest {
    Npc(EntityId),
    Player(LiveEntity),
    Vehicle(LiveEntity),
    Object(StreamedObject),
}

impl MenuRequest {
    pub fn kind(&self) -> MenuKind {
        match self {
            Self::Npc(_) => MenuKind::Npc,
            Self::Player(_) => MenuKind::Player,
            Self::Vehicle(_) => MenuKind::Vehicle,
            Self::Object(_) => MenuKind::Object,
        }
    }
}

pub trait ClientEffects {
    fn draw_marker(&mut self, request: &MarkerRequest);
    fn play_sound(&mut self, cue: &SoundCue);
    fn open_menu(&mut self, request: MenuRequest);
    fn invoke_interaction(&mut self, interaction: &Interaction);
    fn move_actor_to(&mut self, command: MoveCommand);
    fn emit_pickup_item(&mut self, item_id: &ItemId);
}
