//! Collision detection between convex colliders.
//!
//! The shape set is closed and small (oriented box, ground plane), so
//! shapes are a tagged variant dispatched by pattern matching. Detection
//! is pairwise O(n²) over the registered colliders, which is fine at the
//! expected counts (dozens).

use crate::constants::{CONTACT_EPSILON, MIN_AXIS_LENGTH};
use crate::math::Vec3;
use crate::terminal::Material;

/// Convex collider shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Oriented box: center, half extents along the local axes, and the
    /// orthonormal local axes in world space.
    Box {
        center: Vec3,
        half_extents: Vec3,
        axes: [Vec3; 3],
    },
    /// Infinite horizontal ground plane at the given height.
    Ground { height: f64 },
}

/// A collider: shape plus an optional terminal-ballistics material.
///
/// Transform state is synced from the owning body each tick, never the
/// reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    pub material: Option<Material>,
}

impl Collider {
    /// Axis-aligned box at the origin with the given half extents.
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Box {
                center: Vec3::zeros(),
                half_extents: Vec3::new(
                    half_extents.x.abs(),
                    half_extents.y.abs(),
                    half_extents.z.abs(),
                ),
                axes: [Vec3::x(), Vec3::y(), Vec3::z()],
            },
            material: None,
        }
    }

    /// Ground plane at the given height.
    pub fn ground(height: f64) -> Self {
        Self {
            shape: ColliderShape::Ground { height },
            material: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Move a box collider to follow its owning body. No-op for ground.
    pub fn set_position(&mut self, position: Vec3) {
        if let ColliderShape::Box { center, .. } = &mut self.shape {
            *center = position;
        }
    }

    /// Re-orient a box collider from its owning body. No-op for ground.
    pub fn set_axes(&mut self, new_axes: [Vec3; 3]) {
        if let ColliderShape::Box { axes, .. } = &mut self.shape {
            *axes = new_axes;
        }
    }
}

/// Geometric description of a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    /// Unit normal, pointing from collider `b` toward collider `a`
    pub normal: Vec3,
    /// Penetration depth, always ≥ 0
    pub penetration: f64,
}

/// A contact between two registered colliders, by registration index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    pub a: usize,
    pub b: usize,
    pub contact: ContactInfo,
}

/// Pairwise collision detector over a per-tick collider set.
#[derive(Default)]
pub struct CollisionDetection {
    colliders: Vec<Collider>,
}

impl CollisionDetection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider, returning its index for manifold lookup.
    pub fn add_collider(&mut self, collider: Collider) -> usize {
        self.colliders.push(collider);
        self.colliders.len() - 1
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn collider(&self, index: usize) -> Option<&Collider> {
        self.colliders.get(index)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Run all pairwise overlap tests for the current collider set.
    ///
    /// An empty set yields an empty list. Swapping the registration order
    /// of two colliders flips the manifold indices and negates the normal
    /// but never changes the overlap determination.
    pub fn detect(&self) -> Vec<Manifold> {
        let mut manifolds = Vec::new();

        for i in 0..self.colliders.len() {
            for j in (i + 1)..self.colliders.len() {
                if let Some(contact) = test_pair(&self.colliders[i], &self.colliders[j]) {
                    manifolds.push(Manifold {
                        a: i,
                        b: j,
                        contact,
                    });
                }
            }
        }

        manifolds
    }
}

/// Overlap test for one pair; the returned normal points from the second
/// collider toward the first.
fn test_pair(a: &Collider, b: &Collider) -> Option<ContactInfo> {
    match (&a.shape, &b.shape) {
        (
            ColliderShape::Box {
                center: ca,
                half_extents: ha,
                axes: aa,
            },
            ColliderShape::Box {
                center: cb,
                half_extents: hb,
                axes: ab,
            },
        ) => box_box(*ca, *ha, aa, *cb, *hb, ab),
        (
            ColliderShape::Box {
                center,
                half_extents,
                axes,
            },
            ColliderShape::Ground { height },
        ) => box_ground(*center, *half_extents, axes, *height).map(|penetration| ContactInfo {
            normal: Vec3::y(),
            penetration,
        }),
        (
            ColliderShape::Ground { height },
            ColliderShape::Box {
                center,
                half_extents,
                axes,
            },
        ) => box_ground(*center, *half_extents, axes, *height).map(|penetration| ContactInfo {
            normal: -Vec3::y(),
            penetration,
        }),
        (ColliderShape::Ground { .. }, ColliderShape::Ground { .. }) => None,
    }
}

/// Ground-vs-box: project the box extent onto the ground normal to find
/// the lowest vertex; overlap when it sits below the plane by more than
/// the contact epsilon.
fn box_ground(center: Vec3, half_extents: Vec3, axes: &[Vec3; 3], height: f64) -> Option<f64> {
    let reach = half_extents.x * axes[0].y.abs()
        + half_extents.y * axes[1].y.abs()
        + half_extents.z * axes[2].y.abs();
    let lowest = center.y - reach;
    let penetration = height - lowest;

    (penetration > CONTACT_EPSILON).then_some(penetration)
}

/// Projected radius of an oriented box onto a unit axis.
fn projected_radius(half_extents: Vec3, axes: &[Vec3; 3], axis: &Vec3) -> f64 {
    half_extents.x * axes[0].dot(axis).abs()
        + half_extents.y * axes[1].dot(axis).abs()
        + half_extents.z * axes[2].dot(axis).abs()
}

/// Box-vs-box separating-axis test over all 15 candidate axes: each box's
/// three face normals plus the nine pairwise edge cross products. If no
/// axis separates the boxes they overlap, and the axis of minimum
/// penetration gives the contact normal (oriented from `b` toward `a`).
fn box_box(
    ca: Vec3,
    ha: Vec3,
    aa: &[Vec3; 3],
    cb: Vec3,
    hb: Vec3,
    ab: &[Vec3; 3],
) -> Option<ContactInfo> {
    let d = ca - cb;

    let mut best_penetration = f64::MAX;
    let mut best_normal = Vec3::y();

    let mut check_axis = |axis: Vec3| -> bool {
        let ra = projected_radius(ha, aa, &axis);
        let rb = projected_radius(hb, ab, &axis);
        let distance = d.dot(&axis);
        let penetration = ra + rb - distance.abs();

        // separated, or touching too shallowly to report
        if penetration <= CONTACT_EPSILON {
            return false;
        }
        if penetration < best_penetration {
            best_penetration = penetration;
            best_normal = if distance >= 0.0 { axis } else { -axis };
        }
        true
    };

    for axis in aa.iter().chain(ab.iter()) {
        if !check_axis(*axis) {
            return None;
        }
    }

    for ea in aa {
        for eb in ab {
            let cross = ea.cross(eb);
            let len = cross.norm();
            if len < MIN_AXIS_LENGTH {
                continue; // parallel edges, axis already covered
            }
            if !check_axis(cross / len) {
                return None;
            }
        }
    }

    Some(ContactInfo {
        normal: best_normal,
        penetration: best_penetration,
    })
}
