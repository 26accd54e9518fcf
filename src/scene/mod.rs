//! Scene host and render object seams.
//!
//! The driver never searches the scene: it holds the objects it attached and
//! hands them back to the host when they are replaced.
pub mod bevy_host;

use bevy::math::Vec3;

use crate::clock::Mixer;

/// Engine-native object produced by an asset load.
pub trait RenderObject {
    type Mixer: Mixer;

    /// Lowest point of the object's bounds in its own placed frame (scale applied).
    fn lowest_point(&self) -> f32;

    /// Put the object at `translation` facing `heading` (radians about +Y).
    fn place(&mut self, translation: Vec3, heading: f32);

    /// Start the first animation clip, returning a mixer for it.
    ///
    /// `None` when the asset carries no clips.
    fn play_first_clip(&mut self) -> Option<Self::Mixer>;
}

/// Owner of the render surface.
pub trait SceneHost<O> {
    fn add_object(&mut self, object: &mut O);

    /// Detach `object` and release its resources.
    fn remove_object(&mut self, object: O);
}
