use crate::world::{EntityId, Interaction, LocalActor, Vec3, WorldEntity};

const INTERACTION_HEIGHT: f32 = 1.0;
const FALLBACK_MARKER_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Object,
    PositionMarker,
    Npc,
    Player,
    Vehicle,
    Interaction,
}

impl CandidateKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::PositionMarker => "pos",
            Self::Npc => "npc",
            Self::Player => "player",
            Self::Vehicle => "vehicle",
            Self::Interaction => "interaction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateDescriptor {
    pub id: EntityId,
    pub position: Vec3,
    pub kind: CandidateKind,
    pub distance: f32,
    /// Vertical model extent; NaN when the model bounds were unavailable.
    pub height: f32,
}

impl CandidateDescriptor {
    pub fn marker_height(&self) -> f32 {
        if self.height.is_nan() {
            FALLBACK_MARKER_HEIGHT
        } else {
            self.height
        }
    }
}

pub fn collect_candidates(
    entities: &[WorldEntity],
    kind: CandidateKind,
    local_actor: &LocalActor,
) -> Vec<CandidateDescriptor> {
    entities
        .iter()
        .filter(|entity| !(kind == CandidateKind::Player && entity.id == local_actor.id))
        .map(|entity| CandidateDescriptor {
            id: entity.id,
            position: entity.position,
            kind,
            distance: local_actor.position.distance_2d(entity.position),
            height: entity.model_height(),
        })
        .collect()
}

pub fn interaction_candidate(
    interaction: &Interaction,
    local_actor: &LocalActor,
) -> CandidateDescriptor {
    CandidateDescriptor {
        id: EntityId::INTERACTION,
        position: interaction.position,
        kind: CandidateKind::Interaction,
        distance: local_actor.position.distance_2d(interaction.position),
        height: INTERACTION_HEIGHT,
    }
}
