use std::collections::HashMap;

use crate::host::{ClientEffects, MenuRequest, MoveCommand, SoundCue};
use crate::selector::MarkerRequest;
use crate::world::{
    DroppedItem, EntityId, Interaction, ItemId, LocalActor, Mount, StreamedObject, Vec3,
    WorldEntity, WorldView,
};

pub(crate) const ACTOR_ID: EntityId = EntityId(1);

pub(crate) fn entity_at(id: i64, x: f32, y: f32) -> WorldEntity {
    WorldEntity {
        id: EntityId(id),
        position: Vec3::new(x, y, 0.0),
        bounds: None,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeWorld {
    pub(crate) actor: LocalActor,
    pub(crate) players: Vec<WorldEntity>,
    pub(crate) vehicles: Vec<WorldEntity>,
    pub(crate) objects: Vec<WorldEntity>,
    pub(crate) menu_open: bool,
    pub(crate) dropped_items: HashMap<EntityId, DroppedItem>,
    pub(crate) streamed_objects: HashMap<EntityId, StreamedObject>,
}

impl Default for FakeWorld {
    fn default() -> Self {
        Self {
            actor: LocalActor {
                id: ACTOR_ID,
                position: Vec3::default(),
                mount: None,
            },
            players: Vec::new(),
            vehicles: Vec::new(),
            objects: Vec::new(),
            menu_open: false,
            dropped_items: HashMap::new(),
            streamed_objects: HashMap::new(),
        }
    }
}

impl FakeWorld {
    pub(crate) fn mount(&mut self, id: EntityId, position: Vec3) {
        self.actor.mount = Some(Mount { id, position });
    }

    pub(crate) fn drop_item(&mut self, object_id: i64, item_id: &str, position: Vec3) {
        self.objects.push(WorldEntity {
            id: EntityId(object_id),
            position,
            bounds: None,
        });
        self.dropped_items.insert(
            EntityId(object_id),
            DroppedItem {
                item_id: ItemId(item_id.to_string()),
                position,
            },
        );
    }

    pub(crate) fn stream_object(&mut self, object_id: i64, uid: &str, x: f32, y: f32) {
        self.objects.push(entity_at(object_id, x, y));
        self.streamed_objects.insert(
            EntityId(object_id),
            StreamedObject {
                uid: uid.to_string(),
                id: EntityId(object_id),
                model: "prop_box".to_string(),
            },
        );
    }
}

impl WorldView for FakeWorld {
    fn local_actor(&self) -> LocalActor {
        self.actor
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
        self.menu_open
    }

    fn dropped_item(&self, object_id: EntityId) -> Option<DroppedItem> {
        self.dropped_items.get(&object_id).cloned()
    }

    fn streamed_object(&self, id: EntityId) -> Option<StreamedObject> {
        self.streamed_objects.get(&id).cloned()
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingEffects {
    pub(crate) markers: Vec<MarkerRequest>,
    pub(crate) sounds: Vec<SoundCue>,
    pub(crate) menus: Vec<MenuRequest>,
    pub(crate) interactions: Vec<Interaction>,
    pub(crate) moves: Vec<MoveCommand>,
    pub(crate) pickups: Vec<ItemId>,
}

impl ClientEffects for RecordingEffects {
    fn draw_marker(&mut self, request: &MarkerRequest) {
        self.markers.push(*request);
    }

    fn play_sound(&mut self, cue: &SoundCue) {
        self.sounds.push(cue.clone());
    }

    fn open_menu(&mut self, request: MenuRequest) {
        self.menus.push(request);
    }

    fn invoke_interaction(&mut self, interaction: &Interaction) {
        self.interactions.push(interaction.clone());
    }

    fn move_actor_to(&mut self, command: MoveCommand) {
        self.moves.push(command);
    }

    fn emit_pickup_item(&mut self, item_id: &ItemId) {
        self.pickups.push(item_id.clone());
    }
}
