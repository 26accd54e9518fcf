//! Scene-space bounds of a node hierarchy.
//!
//! Each node carries its local transform, its children and the local AABBs of
//! the meshes attached to it. Transforms are composed from the roots down and
//! every box corner is transformed before the minimum is taken, so scaled or
//! rotated armature nodes are accounted for.
use bevy::math::{Affine3A, Vec3};
use bevy::prelude::Transform;

/// One node of a glTF-like hierarchy, addressed by index.
#[derive(Debug, Clone, Default)]
pub struct BoundsNode {
    pub transform: Transform,
    pub children: Vec<usize>,
    /// Local `(min, max)` boxes of the meshes on this node.
    pub boxes: Vec<(Vec3, Vec3)>,
}

/// Lowest y over every mesh box in scene space.
///
/// Roots are the nodes nobody lists as a child. Out-of-range child indices
/// are skipped and each node is visited at most once. `None` when no node
/// carries a box.
#[must_use]
pub fn lowest_point(nodes: &[BoundsNode]) -> Option<f32> {
    let mut is_child = vec![false; nodes.len()];
    for node in nodes {
        for &c in &node.children {
            if let Some(flag) = is_child.get_mut(c) {
                *flag = true;
            }
        }
    }

    let mut visited = vec![false; nodes.len()];
    let mut stack: Vec<(usize, Affine3A)> = (0..nodes.len())
        .filter(|&i| !is_child[i])
        .map(|i| (i, Affine3A::IDENTITY))
        .collect();
    let mut lowest: Option<f32> = None;

    while let Some((index, parent)) = stack.pop() {
        let Some(node) = nodes.get(index) else { continue };
        if std::mem::replace(&mut visited[index], true) {
            continue;
        }
        let world = parent * node.transform.compute_affine();
        for &(min, max) in &node.boxes {
            for corner in corners(min, max) {
                let y = world.transform_point3(corner).y;
                lowest = Some(lowest.map_or(y, |l| l.min(y)));
            }
        }
        stack.extend(node.children.iter().map(|&c| (c, world)));
    }
    lowest
}

fn corners(min: Vec3, max: Vec3) -> [Vec3; 8] {
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(max.x, max.y, max.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn armature_scale_and_offset_are_applied() {
        // Root armature at 1/100 scale, mesh node lifted 100 units inside it.
        let nodes = vec![
            BoundsNode {
                transform: Transform::from_scale(Vec3::splat(0.01)),
                children: vec![1],
                boxes: Vec::new(),
            },
            BoundsNode {
                transform: Transform::from_xyz(0.0, 100.0, 0.0),
                children: Vec::new(),
                boxes: vec![(Vec3::splat(-1.0), Vec3::splat(1.0))],
            },
        ];
        let lowest = lowest_point(&nodes).expect("one box");
        assert!(approx(lowest, 0.99), "got {lowest}");
    }

    #[test]
    fn rotated_parent_swaps_the_vertical_axis() {
        // +90° about X maps local z to -y, so the box's far z extent ends up lowest.
        let nodes = vec![
            BoundsNode {
                transform: Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                children: vec![1],
                boxes: Vec::new(),
            },
            BoundsNode {
                transform: Transform::IDENTITY,
                children: Vec::new(),
                boxes: vec![(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 5.0))],
            },
        ];
        let lowest = lowest_point(&nodes).expect("one box");
        assert!(approx(lowest, -5.0), "got {lowest}");
    }

    #[test]
    fn no_boxes_means_no_bounds() {
        let nodes = vec![BoundsNode::default()];
        assert_eq!(lowest_point(&nodes), None);
        assert_eq!(lowest_point(&[]), None);
    }

    #[test]
    fn cyclic_children_terminate() {
        let nodes = vec![
            BoundsNode { children: vec![1], ..BoundsNode::default() },
            BoundsNode {
                children: vec![2, 7],
                boxes: vec![(Vec3::ZERO, Vec3::ONE)],
                ..BoundsNode::default()
            },
            BoundsNode { children: vec![1], ..BoundsNode::default() },
        ];
        assert_eq!(lowest_point(&nodes), Some(0.0));
    }
}
