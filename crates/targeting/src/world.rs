use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Reserved id carried by the synthetic interaction candidate.
    pub const INTERACTION: EntityId = EntityId(-1);
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn offset_z(self, dz: f32) -> Self {
        Self {
            z: self.z + dz,
            ..self
        }
    }

    /// Distance on the ground plane; `z` is ignored.
    pub fn distance_2d(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBounds {
    pub fn height(&self) -> f32 {
        self.min.z.abs() + self.max.z.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldEntity {
    pub id: EntityId,
    pub position: Vec3,
    pub bounds: Option<ModelBounds>,
}

impl WorldEntity {
    pub fn model_height(&self) -> f32 {
        self.bounds.map_or(f32::NAN, |bounds| bounds.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mount {
    pub id: EntityId,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalActor {
    pub id: EntityId,
    pub position: Vec3,
    pub mount: Option<Mount>,
}

impl LocalActor {
    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveEntity {
    pub id: EntityId,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub item_id: ItemId,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamedObject {
    pub uid: String,
    pub id: EntityId,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub uid: String,
    pub position: Vec3,
    pub description: Option<String>,
}

pub trait WorldView {
    fn local_actor(&self) -> LocalActor;
    fn players(&self) -> &[WorldEntity];
    fn vehicles(&self) -> &[WorldEntity];
    fn objects(&self) -> &[WorldEntity];

    fn is_any_menu_open(&self) -> bool {
        false
    }

    fn resolve_player(&self, id: EntityId) -> Option<LiveEntity> {
        find_live(self.players(), id)
    }

    fn resolve_vehicle(&self, id: EntityId) -> Option<LiveEntity> {
        find_live(self.vehicles(), id)
    }

    fn resolve_object(&self, id: EntityId) -> Option<LiveEntity> {
        find_live(self.objects(), id)
    }

    fn dropped_item(&self, _object_id: EntityId) -> Option<DroppedItem> {
        None
    }

    fn streamed_object(&self, _id: EntityId) -> Option<StreamedObject> {
        None
    }
}

fn find_live(entities: &[WorldEntity], id: EntityId) -> Option<LiveEntity> {
    entities
        .iter()
        .find(|entity| entity.id == id)
        .map(|entity| LiveEntity {
            id: entity.id,
            position: entity.position,
        })
}
