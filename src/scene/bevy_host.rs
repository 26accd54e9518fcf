//! Bevy implementations of the scene seams.
//!
//! A [`GltfObject`] is a loaded glTF scene that has not necessarily been
//! spawned yet. [`BevySceneHost`] spawns and despawns it through `Commands`.
//! Freeing the GPU resources happens when the last handle to the scene is
//! dropped, which is the object itself once it is despawned.
use bevy::animation::graph::AnimationNodeIndex;
use bevy::prelude::*;

use crate::assets::AssetSlot;
use crate::character::Driver;
use crate::clock::Mixer;
use crate::scene::{RenderObject, SceneHost};

/// The driver as a Bevy resource.
#[derive(Resource, Deref, DerefMut)]
pub struct CharacterDriver(pub Driver<GltfObject>);

/// Marker for the spawned character scene root.
#[derive(Component)]
pub struct CharacterModel;

/// Marker for the spawned world scene root.
#[derive(Component)]
pub struct WorldModel;

/// First clip of a character asset, prepared as a one-node animation graph.
#[derive(Debug, Clone)]
pub struct ClipBinding {
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
    /// Clip length in seconds.
    pub duration: f32,
}

/// Playback position of the bound clip.
///
/// The clock advances it; `apply_clip_playback` seeks the scene's
/// `AnimationPlayer` to `seconds` every frame.
#[derive(Debug, Clone)]
pub struct ClipMixer {
    pub binding: ClipBinding,
    pub seconds: f32,
}

impl Mixer for ClipMixer {
    fn advance(&mut self, seconds: f32) {
        self.seconds += seconds;
        if self.binding.duration > 0.0 {
            self.seconds %= self.binding.duration;
        }
    }
}

/// A loaded glTF scene owned by the driver.
#[derive(Debug)]
pub struct GltfObject {
    pub slot: AssetSlot,
    pub path: String,
    pub scene: Handle<Scene>,
    pub clip: Option<ClipBinding>,
    /// Lowest mesh-bounds point with `transform.scale` applied.
    pub lowest_point: f32,
    pub transform: Transform,
    /// Model yaw added to every heading so the model's front matches the map's.
    pub yaw_offset: f32,
    /// Root entity once spawned.
    pub entity: Option<Entity>,
}

impl RenderObject for GltfObject {
    type Mixer = ClipMixer;

    fn lowest_point(&self) -> f32 {
        self.lowest_point
    }

    fn place(&mut self, translation: Vec3, heading: f32) {
        self.transform.translation = translation;
        self.transform.rotation = Quat::from_rotation_y(heading + self.yaw_offset);
    }

    fn play_first_clip(&mut self) -> Option<ClipMixer> {
        self.clip.clone().map(|binding| ClipMixer { binding, seconds: 0.0 })
    }
}

/// Scene host backed by `Commands` for the duration of one system run.
pub struct BevySceneHost<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
}

impl SceneHost<GltfObject> for BevySceneHost<'_, '_, '_> {
    fn add_object(&mut self, object: &mut GltfObject) {
        let mut entity = self.commands.spawn((
            SceneBundle {
                scene: object.scene.clone(),
                transform: object.transform,
                ..default()
            },
            Name::new(object.path.clone()),
        ));
        match object.slot {
            AssetSlot::Character => entity.insert(CharacterModel),
            AssetSlot::World => entity.insert(WorldModel),
        };
        object.entity = Some(entity.id());
    }

    fn remove_object(&mut self, object: GltfObject) {
        if let Some(entity) = object.entity {
            self.commands.entity(entity).despawn_recursive();
        }
    }
}
