use serde::{Deserialize, Serialize};

use super::candidate::CandidateDescriptor;
use crate::world::{LocalActor, Vec3};

const MARKER_ROTATION: Vec3 = Vec3::new(0.0, 180.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    ChevronUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerStyle {
    pub size: Vec3,
    pub color: Rgba,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: Vec3::new(0.1, 0.05, 0.1),
            color: Rgba::new(255, 255, 255, 200),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerRequest {
    pub kind: MarkerKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: Vec3,
    pub color: Rgba,
    pub face_camera: bool,
}

/// A candidate that is the actor's own mount is pinned above the mount's live
/// position.
pub fn marker_request_for(
    active: &CandidateDescriptor,
    actor: &LocalActor,
    style: &MarkerStyle,
    mount_offset: f32,
) -> MarkerRequest {
    let position = match actor.mount {
        Some(mount) if mount.id == active.id => mount.position.offset_z(mount_offset),
        _ => active.position.offset_z(active.marker_height()),
    };

    MarkerRequest {
        kind: MarkerKind::ChevronUp,
        position,
        rotation: MARKER_ROTATION,
        size: style.size,
        color: style.color,
        face_camera: true,
    }
}
