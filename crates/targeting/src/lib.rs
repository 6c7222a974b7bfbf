pub mod config;
pub mod host;
pub mod selector;
pub mod world;

pub use config::{ConfigError, TargetingConfig, CONFIG_ENV_VAR};
pub use host::{ClientEffects, MenuKind, MenuRequest, MoveCommand, SoundCue};
pub use selector::{
    ActionStates, CandidateDescriptor, CandidateKind, DispatchOutcome, IgnoreReason, InputAction,
    MarkerKind, MarkerRequest, MarkerStyle, RankLimits, ReconcileOutcome, Rgba,
    SelectionMetricsHandle, SelectionMetricsSnapshot, SelectionState, TargetingSystem,
};
pub use world::{
    DroppedItem, EntityId, Interaction, ItemId, LiveEntity, LocalActor, ModelBounds, Mount,
    StreamedObject, Vec3, WorldEntity, WorldView,
};
