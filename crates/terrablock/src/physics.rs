//! # TERRABLOCK Physics System
//!
//! Player-versus-voxel collision against a single `ChunkStore`.
//!
//! Features:
//! - Broad phase: every block cell the player box could touch
//! - Narrow phase: strict AABB overlap on all three axes
//! - Resolution: push out along the axis of least penetration, nearest block first
//! - Ground detection from vertical resolutions while falling
//!
//! The store is only read. Resolution works on local copies of the player
//! position, velocity and box.

use terrablock_procedural::{Block, ChunkStore};
use terrablock_shared::{Axis, Vec3, COLLISION_EPSILON, COLLISION_PADDING};
use tracing::trace;

/// Upper bound on gather-and-resolve rounds per call.
pub const MAX_PASSES: usize = 4;

/// Axis check order for minimum penetration. Earlier wins ties.
const AXIS_ORDER: [Axis; 3] = [Axis::Y, Axis::Z, Axis::X];

// ============================================================================
// AABB (Axis-Aligned Bounding Box)
// ============================================================================

/// Axis-Aligned Bounding Box for collision detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from its center and full size.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The unit cube of the block at integer coordinates.
    #[must_use]
    pub fn from_block(x: i32, y: i32, z: i32) -> Self {
        let min = Vec3::new(x as f32, y as f32, z as f32);
        Self {
            min,
            max: min + Vec3::splat(1.0),
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Checks if this AABB overlaps another. Touching faces do not count.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        Axis::ALL.into_iter().all(|a| {
            self.min.axis(a) < other.max.axis(a) && self.max.axis(a) > other.min.axis(a)
        })
    }

    /// Per-axis penetration depth against another box.
    ///
    /// Each component is `min(self.max - other.min, other.max - self.min)`;
    /// positive on every axis exactly when the boxes overlap.
    #[must_use]
    pub fn penetration(&self, other: &Self) -> Vec3 {
        let depth = |a: Axis| {
            (self.max.axis(a) - other.min.axis(a)).min(other.max.axis(a) - self.min.axis(a))
        };
        Vec3::new(depth(Axis::X), depth(Axis::Y), depth(Axis::Z))
    }
}

// ============================================================================
// BODY & RESULTS
// ============================================================================

/// Size of the player volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyShape {
    /// Half the horizontal extent.
    pub half_width: f32,
    /// Feet to head.
    pub height: f32,
}

impl BodyShape {
    /// Creates a body shape.
    #[must_use]
    pub const fn new(half_width: f32, height: f32) -> Self {
        Self { half_width, height }
    }
}

/// A solid block the player box may overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionCandidate {
    /// The block value.
    pub block: Block,
    /// Integer cell coordinates.
    pub position: [i32; 3],
    /// Unit cube of the cell.
    pub aabb: Aabb,
}

/// Corrected player state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResult {
    /// Feet position after correction.
    pub position: Vec3,
    /// Velocity with resolved components zeroed.
    pub velocity: Vec3,
    /// True if a vertical resolution happened while falling.
    pub is_on_ground: bool,
    /// Number of resolutions applied.
    pub contacts: usize,
}

// ============================================================================
// COLLISION SYSTEM
// ============================================================================

/// Broad phase, narrow phase and resolution against one chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionSystem {
    padding: f32,
    epsilon: f32,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSystem {
    /// Creates a collision system with the default tolerances.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            padding: COLLISION_PADDING,
            epsilon: COLLISION_EPSILON,
        }
    }

    /// Creates a collision system with custom tolerances.
    #[must_use]
    pub const fn with_tolerances(padding: f32, epsilon: f32) -> Self {
        Self { padding, epsilon }
    }

    /// Box shrink applied to the player volume.
    #[must_use]
    pub const fn padding(&self) -> f32 {
        self.padding
    }

    /// Push-out margin.
    #[must_use]
    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Player box for feet position `position`.
    ///
    /// Centered at `(x, y + height / 2, z)`, shrunk by the padding on every axis.
    #[must_use]
    pub fn player_aabb(&self, position: Vec3, body: BodyShape) -> Aabb {
        let width = body.half_width * 2.0;
        Aabb::from_center_size(
            Vec3::new(position.x, position.y + body.height * 0.5, position.z),
            Vec3::new(
                width - self.padding,
                body.height - self.padding,
                width - self.padding,
            ),
        )
    }

    /// Solid blocks whose cell lies in the floor..ceil range of the box.
    ///
    /// Unset and non-solid cells are skipped.
    #[must_use]
    pub fn broad_phase(&self, aabb: &Aabb, store: &ChunkStore) -> Vec<CollisionCandidate> {
        // Cells outside the store can never be solid; clamp the scan to it.
        let width = i32::try_from(store.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(store.height()).unwrap_or(i32::MAX);
        let span = |min: f32, max: f32, extent: i32| {
            (min.floor() as i32).max(0)..(max.ceil() as i32).min(extent)
        };

        let mut candidates = Vec::new();
        for y in span(aabb.min.y, aabb.max.y, height) {
            for z in span(aabb.min.z, aabb.max.z, width) {
                for x in span(aabb.min.x, aabb.max.x, width) {
                    let Some(block) = store.get(x, y, z) else {
                        continue;
                    };
                    if !block.is_solid {
                        continue;
                    }
                    candidates.push(CollisionCandidate {
                        block,
                        position: [x, y, z],
                        aabb: Aabb::from_block(x, y, z),
                    });
                }
            }
        }
        candidates
    }

    /// Keeps the candidates that actually overlap the box.
    #[must_use]
    pub fn narrow_phase(
        &self,
        aabb: &Aabb,
        candidates: Vec<CollisionCandidate>,
    ) -> Vec<CollisionCandidate> {
        candidates
            .into_iter()
            .filter(|c| aabb.intersects(&c.aabb))
            .collect()
    }

    /// Corrects an intended player position against the solid blocks of `store`.
    ///
    /// Collisions are resolved nearest first. Each one pushes the player out
    /// along its axis of least penetration, away from the block center, and
    /// zeroes that velocity component. The box is recomputed after every push.
    #[must_use]
    pub fn resolve(
        &self,
        position: Vec3,
        velocity: Vec3,
        body: BodyShape,
        store: &ChunkStore,
    ) -> CollisionResult {
        let mut result = CollisionResult {
            position,
            velocity,
            is_on_ground: false,
            contacts: 0,
        };

        for pass in 0..MAX_PASSES {
            let aabb = self.player_aabb(result.position, body);
            let mut hits = self.narrow_phase(&aabb, self.broad_phase(&aabb, store));
            if hits.is_empty() {
                break;
            }

            let center = aabb.center();
            hits.sort_by(|a, b| {
                let da = center.distance_squared(a.aabb.center());
                let db = center.distance_squared(b.aabb.center());
                da.total_cmp(&db)
            });

            for hit in &hits {
                let aabb = self.player_aabb(result.position, body);
                if !aabb.intersects(&hit.aabb) {
                    continue;
                }
                self.resolve_one(&mut result, &aabb, hit);
                trace!(
                    "pass {} block {:?} -> pos ({:.3}, {:.3}, {:.3})",
                    pass,
                    hit.position,
                    result.position.x,
                    result.position.y,
                    result.position.z
                );
            }
        }

        result
    }

    fn resolve_one(&self, result: &mut CollisionResult, aabb: &Aabb, hit: &CollisionCandidate) {
        let depth = aabb.penetration(&hit.aabb);
        let mut axis = AXIS_ORDER[0];
        for &a in &AXIS_ORDER[1..] {
            if depth.axis(a) < depth.axis(axis) {
                axis = a;
            }
        }

        let direction = if aabb.center().axis(axis) < hit.aabb.center().axis(axis) {
            -1.0
        } else {
            1.0
        };
        *result.position.axis_mut(axis) += direction * (depth.axis(axis) + self.epsilon);

        if axis == Axis::Y && result.velocity.y < 0.0 {
            result.is_on_ground = true;
        }
        *result.velocity.axis_mut(axis) = 0.0;
        result.contacts += 1;
    }
}
