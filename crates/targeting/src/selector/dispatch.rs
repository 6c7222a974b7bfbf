use super::candidate::{CandidateDescriptor, CandidateKind};
use crate::host::{ClientEffects, MenuKind, MenuRequest, MoveCommand};
use crate::world::{Interaction, WorldView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoSelection,
    StaleEntity,
    Mounted,
    Unresolved,
    InertKind,
    NoInteraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    InteractionInvoked,
    MenuOpened(MenuKind),
    ItemPickupRequested,
    Ignored(IgnoreReason),
}

/// A pending interaction always wins over the active candidate.
pub fn dispatch_confirm(
    active: Option<&CandidateDescriptor>,
    interaction: Option<&Interaction>,
    world: &dyn WorldView,
    effects: &mut dyn ClientEffects,
    pickup_move_speed: f32,
) -> DispatchOutcome {
    if let Some(interaction) = interaction {
        effects.invoke_interaction(interaction);
        return DispatchOutcome::InteractionInvoked;
    }

    let Some(active) = active else {
        return DispatchOutcome::Ignored(IgnoreReason::NoSelection);
    };

    match active.kind {
        CandidateKind::Npc => open_menu(effects, MenuRequest::Npc(active.id)),
        CandidateKind::Player => match world.resolve_player(active.id) {
            Some(player) => open_menu(effects, MenuRequest::Player(player)),
            None => DispatchOutcome::Ignored(IgnoreReason::StaleEntity),
        },
        CandidateKind::Vehicle => match world.resolve_vehicle(active.id) {
            Some(vehicle) => open_menu(effects, MenuRequest::Vehicle(vehicle)),
            None => DispatchOutcome::Ignored(IgnoreReason::StaleEntity),
        },
        CandidateKind::Object => dispatch_object(active, world, effects, pickup_move_speed),
        CandidateKind::PositionMarker => DispatchOutcome::Ignored(IgnoreReason::InertKind),
        // The override was cleared after this candidate was ranked.
        CandidateKind::Interaction => DispatchOutcome::Ignored(IgnoreReason::NoInteraction),
    }
}

fn dispatch_object(
    active: &CandidateDescriptor,
    world: &dyn WorldView,
    effects: &mut dyn ClientEffects,
    pickup_move_speed: f32,
) -> DispatchOutcome {
    if world.resolve_object(active.id).is_none() {
        return DispatchOutcome::Ignored(IgnoreReason::StaleEntity);
    }

    if let Some(item) = world.dropped_item(active.id) {
        let actor = world.local_actor();
        if actor.is_mounted() {
            return DispatchOutcome::Ignored(IgnoreReason::Mounted);
        }
        effects.move_actor_to(MoveCommand {
            actor: actor.id,
            target: item.position,
            speed: pickup_move_speed,
        });
        effects.emit_pickup_item(&item.item_id);
        return DispatchOutcome::ItemPickupRequested;
    }

    match world.streamed_object(active.id) {
        Some(object) => open_menu(effects, MenuRequest::Object(object)),
        None => DispatchOutcome::Ignored(IgnoreReason::Unresolved),
    }
}

fn open_menu(effects: &mut dyn ClientEffects, request: MenuRequest) -> DispatchOutcome {
    let kind = request.kind();
    effects.open_menu(request);
    DispatchOutcome::MenuOpened(kind)
}
