//! glTF asset provider on top of Bevy's `AssetServer`.
//!
//! `load` only queues the request. `start_queued` hands queued paths to the
//! asset server and `poll` turns finished handles into [`GltfObject`]s, each
//! returned with the ticket it was requested under.
use bevy::animation::graph::AnimationGraph;
use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;

use crate::assets::bounds::{self, BoundsNode};
use crate::assets::{AssetProvider, AssetSlot, LoadTicket};
use crate::settings::AssetSettings;
use crate::error::AssetError;
use crate::scene::bevy_host::{ClipBinding, GltfObject};

#[derive(Debug)]
struct InFlight {
    ticket: LoadTicket,
    path: String,
    handle: Handle<Gltf>,
}

/// Request queue and in-flight loads.
#[derive(Resource, Debug, Default)]
pub struct GltfProvider {
    queued: Vec<(LoadTicket, String)>,
    in_flight: Vec<InFlight>,
    pub character_scale: f32,
    pub world_scale: f32,
    /// Extra yaw (radians) applied to character models when placed.
    pub character_yaw: f32,
}

impl AssetProvider for GltfProvider {
    fn load(&mut self, ticket: LoadTicket, path: &str) {
        self.queued.push((ticket, path.to_owned()));
    }
}

/// Asset storages `poll` reads from.
#[derive(bevy::ecs::system::SystemParam)]
pub struct GltfAssets<'w> {
    pub server: Res<'w, AssetServer>,
    pub gltfs: Res<'w, Assets<Gltf>>,
    pub gltf_meshes: Res<'w, Assets<GltfMesh>>,
    pub gltf_nodes: Res<'w, Assets<GltfNode>>,
    pub meshes: Res<'w, Assets<Mesh>>,
    pub clips: Res<'w, Assets<AnimationClip>>,
    pub graphs: ResMut<'w, Assets<AnimationGraph>>,
}

impl GltfProvider {
    #[must_use]
    pub fn new(character_scale: f32, world_scale: f32) -> Self {
        Self { character_scale, world_scale, ..Self::default() }
    }

    #[must_use]
    pub fn from_settings(settings: &AssetSettings) -> Self {
        Self {
            character_yaw: settings.model_yaw_degrees.to_radians(),
            ..Self::new(settings.character_scale, settings.world_scale)
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queued.is_empty() && self.in_flight.is_empty()
    }

    /// Hand every queued request to the asset server.
    pub fn start_queued(&mut self, server: &AssetServer) {
        for (ticket, path) in self.queued.drain(..) {
            let handle = server.load::<Gltf>(path.clone());
            self.in_flight.push(InFlight { ticket, path, handle });
        }
    }

    /// Collect finished loads, in request order.
    pub fn poll(&mut self, assets: &mut GltfAssets) -> Vec<(LoadTicket, Result<GltfObject, AssetError>)> {
        let mut done = Vec::new();
        let mut still_loading = Vec::with_capacity(self.in_flight.len());
        for job in self.in_flight.drain(..) {
            let root = assets.server.load_state(&job.handle);
            let deps = assets.server.recursive_dependency_load_state(&job.handle);
            match job_status(&root, &deps) {
                JobStatus::Loading => {
                    still_loading.push(job);
                    continue;
                }
                JobStatus::Failed(reason) => {
                    done.push((job.ticket, Err(AssetError::LoadFailed { path: job.path, reason })));
                    continue;
                }
                JobStatus::Ready => {}
            }
            let (scale, yaw_offset) = match job.ticket.slot {
                AssetSlot::Character => (self.character_scale, self.character_yaw),
                AssetSlot::World => (self.world_scale, 0.0),
            };
            done.push((job.ticket, build_object(&job, scale, yaw_offset, assets)));
        }
        self.in_flight = still_loading;
        done
    }
}

/// Where a load stands, from the root asset's state and its dependencies'.
#[derive(Debug, Clone, PartialEq, Eq)]
enum JobStatus {
    Loading,
    Ready,
    Failed(String),
}

/// A failed dependency (an external texture or buffer) fails the whole load,
/// even when the glTF document itself parsed.
fn job_status(root: &LoadState, deps: &RecursiveDependencyLoadState) -> JobStatus {
    if let LoadState::Failed(err) = root {
        return JobStatus::Failed(err.to_string());
    }
    match deps {
        RecursiveDependencyLoadState::Failed { .. } => {
            JobStatus::Failed("a dependency of the file failed to load".to_string())
        }
        RecursiveDependencyLoadState::Loaded if matches!(root, LoadState::Loaded) => JobStatus::Ready,
        _ => JobStatus::Loading,
    }
}

/// Node hierarchy of `gltf` with the local bounds of each node's mesh primitives.
fn bounds_nodes(gltf: &Gltf, assets: &GltfAssets) -> Vec<BoundsNode> {
    gltf.nodes
        .iter()
        .map(|handle| {
            let Some(node) = assets.gltf_nodes.get(handle) else {
                return BoundsNode::default();
            };
            let boxes = node
                .mesh
                .as_ref()
                .and_then(|h| assets.gltf_meshes.get(h))
                .map(|gm| {
                    gm.primitives
                        .iter()
                        .filter_map(|p| assets.meshes.get(&p.mesh))
                        .filter_map(Mesh::compute_aabb)
                        .map(|aabb| (Vec3::from(aabb.min()), Vec3::from(aabb.max())))
                        .collect()
                })
                .unwrap_or_default();
            BoundsNode {
                transform: node.transform,
                children: node.children.iter().map(|c| c.index).filter(|&i| i < gltf.nodes.len()).collect(),
                boxes,
            }
        })
        .collect()
}

fn build_object(
    job: &InFlight,
    scale: f32,
    yaw_offset: f32,
    assets: &mut GltfAssets,
) -> Result<GltfObject, AssetError> {
    let gltf = assets.gltfs.get(&job.handle).ok_or_else(|| AssetError::LoadFailed {
        path: job.path.clone(),
        reason: "asset was unloaded before it could be used".to_string(),
    })?;
    let scene = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
        .ok_or_else(|| AssetError::NoScene { path: job.path.clone() })?;

    let lowest_point = bounds::lowest_point(&bounds_nodes(gltf, assets))
        .filter(|y| y.is_finite())
        .map_or(0.0, |y| y * scale);

    // World scenes are never bound to the clock.
    let clip = match job.ticket.slot {
        AssetSlot::World => None,
        AssetSlot::Character => gltf.animations.first().map(|clip_handle| {
            let duration = assets.clips.get(clip_handle).map_or(0.0, AnimationClip::duration);
            let (graph, node) = AnimationGraph::from_clip(clip_handle.clone());
            ClipBinding { graph: assets.graphs.add(graph), node, duration }
        }),
    };

    Ok(GltfObject {
        slot: job.ticket.slot,
        path: job.path.clone(),
        scene,
        clip,
        lowest_point,
        transform: Transform::from_scale(Vec3::splat(scale)),
        yaw_offset,
        entity: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_only_queues() {
        let mut p = GltfProvider::new(0.01, 1.0);
        assert!(p.is_idle());
        p.load(LoadTicket { slot: AssetSlot::Character, seq: 1 }, "flame_boy/base/idle.glb");
        assert!(!p.is_idle());
        assert_eq!(p.queued.len(), 1);
        assert_eq!(p.queued[0].1, "flame_boy/base/idle.glb");
    }

    #[test]
    fn settings_yaw_is_converted_to_radians() {
        let p = GltfProvider::from_settings(&AssetSettings::default());
        assert!((p.character_yaw - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(p.character_scale, 1.0);
    }

    #[test]
    fn failed_dependency_fails_a_parsed_document() {
        let status = job_status(&LoadState::Loaded, &RecursiveDependencyLoadState::Failed);
        assert!(matches!(status, JobStatus::Failed(_)));
    }

    #[test]
    fn ready_only_when_root_and_dependencies_are_loaded() {
        assert_eq!(
            job_status(&LoadState::Loaded, &RecursiveDependencyLoadState::Loaded),
            JobStatus::Ready
        );
        assert_eq!(
            job_status(&LoadState::Loaded, &RecursiveDependencyLoadState::Loading),
            JobStatus::Loading
        );
        assert_eq!(
            job_status(&LoadState::Loading, &RecursiveDependencyLoadState::NotLoaded),
            JobStatus::Loading
        );
    }
}
