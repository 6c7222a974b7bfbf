use std::collections::HashMap;

use targeting::{
    ClientEffects, DroppedItem, EntityId, Interaction, ItemId, LocalActor, MarkerRequest,
    MenuRequest, ModelBounds, Mount, MoveCommand, SoundCue, StreamedObject, Vec3, WorldEntity,
    WorldView,
};
use tracing::{debug, info};

use super::scenario::{SandboxScenario, ScenarioEntity, ScenarioObject};

pub(crate) const MENU_HOLD_TICKS: u32 = 90;
const ARRIVAL_EPSILON: f32 = 0.05;

pub(crate) struct SandboxWorld {
    actor_id: EntityId,
    actor_position: Vec3,
    velocity: Vec3,
    walk_to: Option<MoveCommand>,
    mount: Option<EntityId>,
    players: Vec<WorldEntity>,
    vehicles: Vec<WorldEntity>,
    objects: Vec<WorldEntity>,
    dropped_items: HashMap<EntityId, DroppedItem>,
    streamed_objects: HashMap<EntityId, StreamedObject>,
    menu_ticks_remaining: u32,
}

impl SandboxWorld {
    pub(crate) fn from_scenario(scenario: &SandboxScenario) -> Self {
        let actor = scenario.actor;
        let actor_id = EntityId(actor.id);
        let mut players = vec![WorldEntity {
            id: actor_id,
            position: actor.start,
            bounds: None,
        }];
        players.extend(scenario.players.iter().map(world_entity));

        let mut world = Self {
            actor_id,
            actor_position: actor.start,
            velocity: actor.velocity,
            walk_to: None,
            mount: None,
            players,
            vehicles: scenario.vehicles.iter().map(world_entity).collect(),
            objects: Vec::with_capacity(scenario.objects.len()),
            dropped_items: HashMap::new(),
            streamed_objects: HashMap::new(),
            menu_ticks_remaining: 0,
        };
        for object in &scenario.objects {
            world.spawn_object(object);
        }
        world
    }

    fn spawn_object(&mut self, object: &ScenarioObject) {
        let id = EntityId(object.id);
        self.objects.push(WorldEntity {
            id,
            position: object.position,
            bounds: object.height.map(bounds_for_height),
        });
        if let Some(item_id) = &object.dropped_item {
            self.dropped_items.insert(
                id,
                DroppedItem {
                    item_id: ItemId(item_id.clone()),
                    position: object.position,
                },
            );
        }
        if let Some(uid) = &object.uid {
            self.streamed_objects.insert(
                id,
                StreamedObject {
                    uid: uid.clone(),
                    id,
                    model: format!("prop_{uid}"),
                },
            );
        }
    }

    pub(crate) fn actor_position(&self) -> Vec3 {
        self.actor_position
    }

    pub(crate) fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn mount_vehicle(&mut self, vehicle: EntityId) {
        if !self.vehicles.iter().any(|entity| entity.id == vehicle) {
            debug!(vehicle_id = %vehicle, "mount_skipped_missing_vehicle");
            return;
        }
        self.mount = Some(vehicle);
        self.walk_to = None;
        info!(vehicle_id = %vehicle, "actor_mounted");
    }

    pub(crate) fn advance(&mut self, dt_seconds: f32) {
        self.menu_ticks_remaining = self.menu_ticks_remaining.saturating_sub(1);

        match self.walk_to {
            Some(command) => {
                let step = command.speed * dt_seconds;
                let remaining = self.actor_position.distance_2d(command.target);
                if remaining <= step.max(ARRIVAL_EPSILON) {
                    self.actor_position = command.target;
                    self.walk_to = None;
                    debug!(
                        x = command.target.x,
                        y = command.target.y,
                        "actor_arrived"
                    );
                } else {
                    let scale = step / remaining;
                    self.actor_position.x += (command.target.x - self.actor_position.x) * scale;
                    self.actor_position.y += (command.target.y - self.actor_position.y) * scale;
                }
            }
            None => {
                self.actor_position.x += self.velocity.x * dt_seconds;
                self.actor_position.y += self.velocity.y * dt_seconds;
                self.actor_position.z += self.velocity.z * dt_seconds;
            }
        }

        let position = self.actor_position;
        let actor_id = self.actor_id;
        if let Some(entity) = self.players.iter_mut().find(|e| e.id == actor_id) {
            entity.position = position;
        }
        if let Some(vehicle) = self.mount {
            if let Some(entity) = self.vehicles.iter_mut().find(|e| e.id == vehicle) {
                entity.position = position;
            }
        }
    }

    pub(crate) fn apply(&mut self, events: Vec<EffectEvent>) {
        for event in events {
            match event {
                EffectEvent::MenuOpened(_) => self.menu_ticks_remaining = MENU_HOLD_TICKS,
                EffectEvent::MoveRequested(command) => {
                    if !self.is_mounted() {
                        self.walk_to = Some(command);
                    }
                }
                EffectEvent::PickupEmitted(item_id) => self.despawn_item(&item_id),
                EffectEvent::MarkerDrawn(_)
                | EffectEvent::SoundPlayed(_)
                | EffectEvent::InteractionInvoked(_) => {}
            }
        }
    }

    fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    fn despawn_item(&mut self, item_id: &ItemId) {
        let Some(object_id) = self
            .dropped_items
            .iter()
            .find(|(_, item)| &item.item_id == item_id)
            .map(|(id, _)| *id)
        else {
            return;
        };
        self.dropped_items.remove(&object_id);
        self.objects.retain(|entity| entity.id != object_id);
        info!(item_id = %item_id, object_id = %object_id, "item_picked_up");
    }
}

impl WorldView for SandboxWorld {
    fn local_actor(&self) -> LocalActor {
        let mount = self.mount.and_then(|id| {
            self.vehicles
                .iter()
                .find(|entity| entity.id == id)
                .map(|entity| Mount {
                    id,
                    position: entity.position,
                })
        });
        LocalActor {
            id: self.actor_id,
            position: self.actor_position,
            mount,
        }
    }

    fn players(&self) -> &[WorldEntity] {
        &self.players
    }

    fn vehicles(&self) -> &[WorldEntity] {
        &self.vehicles
    }

    fn objects(&self) -> &[WorldEntity] {
        &self.objects
    }

    fn is_any_menu_open(&self) -> bool {
        self.menu_ticks_remaining > 0
    }

    fn dropped_item(&self, object_id: EntityId) -> Option<DroppedItem> {
        self.dropped_items.get(&object_id).cloned()
    }

    fn streamed_object(&self, id: EntityId) -> Option<StreamedObject> {
        self.streamed_objects.get(&id).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EffectEvent {
    MarkerDrawn(MarkerRequest),
    SoundPlayed(SoundCue),
    MenuOpened(MenuRequest),
    InteractionInvoked(Interaction),
    MoveRequested(MoveCommand),
    PickupEmitted(ItemId),
}

#[derive(Debug, Default)]
pub(crate) struct SandboxEffects {
    pending: Vec<EffectEvent>,
    markers_drawn: u64,
}

impl SandboxEffects {
    pub(crate) fn drain(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn markers_drawn(&self) -> u64 {
        self.markers_drawn
    }
}

impl ClientEffects for SandboxEffects {
    fn draw_marker(&mut self, request: &MarkerRequest) {
        self.markers_drawn = self.markers_drawn.saturating_add(1);
        self.pending.push(EffectEvent::MarkerDrawn(*request));
    }

    fn play_sound(&mut self, cue: &SoundCue) {
        debug!(name = %cue.name, sound_set = %cue.sound_set, "sound_played");
        self.pending.push(EffectEvent::SoundPlayed(cue.clone()));
    }

    fn open_menu(&mut self, request: MenuRequest) {
        info!(menu = ?request.kind(), request = ?request, "menu_opened");
        self.pending.push(EffectEvent::MenuOpened(request));
    }

    fn invoke_interaction(&mut self, interaction: &Interaction) {
        info!(
            uid = %interaction.uid,
            description = interaction.description.as_deref().unwrap_or(""),
            "interaction_invoked"
        );
        self.pending
            .push(EffectEvent::InteractionInvoked(interaction.clone()));
    }

    fn move_actor_to(&mut self, command: MoveCommand) {
        info!(
            actor_id = %command.actor,
            x = command.target.x,
            y = command.target.y,
            speed = command.speed,
            "actor_move_requested"
        );
        self.pending.push(EffectEvent::MoveRequested(command));
    }

    fn emit_pickup_item(&mut self, item_id: &ItemId) {
        info!(item_id = %item_id, "pickup_emitted");
        self.pending.push(EffectEvent::PickupEmitted(item_id.clone()));
    }
}

fn world_entity(entity: &ScenarioEntity) -> WorldEntity {
    WorldEntity {
        id: EntityId(entity.id),
        position: entity.position,
        bounds: entity.height.map(bounds_for_height),
    }
}

fn bounds_for_height(height: f32) -> ModelBounds {
    ModelBounds {
        min: Vec3::new(-0.5, -0.5, 0.0),
        max: Vec3::new(0.5, 0.5, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_world() -> SandboxWorld {
        SandboxWorld::from_scenario(&SandboxScenario::demo())
    }

    #[test]
    fn local_actor_is_listed_among_players() {
        let world = demo_world();

        assert!(world
            .players()
            .iter()
            .any(|entity| entity.id == world.local_actor().id));
    }

    #[test]
    fn advance_moves_actor_and_keeps_player_entry_in_sync() {
        let mut world = demo_world();

        world.advance(2.0);

        let actor = world.local_actor();
        assert_eq!(actor.position, Vec3::new(2.0, 0.0, 0.0));
        let entry = world
            .players()
            .iter()
            .find(|entity| entity.id == actor.id)
            .expect("actor entry");
        assert_eq!(entry.position, actor.position);
    }

    #[test]
    fn mounted_vehicle_follows_actor() {
        let mut world = demo_world();
        world.mount_vehicle(EntityId(40));

        world.advance(1.0);

        let actor = world.local_actor();
        let mount = actor.mount.expect("mounted");
        assert_eq!(mount.id, EntityId(40));
        assert_eq!(mount.position, actor.position);
    }

    #[test]
    fn opened_menu_blocks_for_hold_ticks() {
        let mut world = demo_world();
        world.apply(vec![EffectEvent::MenuOpened(MenuRequest::Npc(EntityId(2)))]);

        assert!(world.is_any_menu_open());
        for _ in 0..MENU_HOLD_TICKS {
            world.advance(0.0);
        }
        assert!(!world.is_any_menu_open());
    }

    #[test]
    fn pickup_despawns_dropped_item() {
        let mut world = demo_world();
        let before = world.object_count();

        world.apply(vec![EffectEvent::PickupEmitted(ItemId(
            "item-medkit".to_string(),
        ))]);

        assert_eq!(world.object_count(), before - 1);
        assert!(world.dropped_item(EntityId(70)).is_none());
    }

    #[test]
    fn move_request_walks_actor_to_target() {
        let mut world = demo_world();
        let target = Vec3::new(0.0, 3.0, 0.0);
        world.apply(vec![EffectEvent::MoveRequested(MoveCommand {
            actor: EntityId(1),
            target,
            speed: 2.0,
        })]);

        world.advance(1.0);
        assert!((world.actor_position().y - 2.0).abs() < 1e-4);
        world.advance(1.0);
        assert_eq!(world.actor_position(), target);
    }

    #[test]
    fn effects_buffer_events_until_drained() {
        let mut effects = SandboxEffects::default();
        effects.play_sound(&SoundCue::default());
        effects.emit_pickup_item(&ItemId("item-1".to_string()));

        let events = effects.drain();

        assert_eq!(events.len(), 2);
        assert!(effects.drain().is_empty());
    }
}
