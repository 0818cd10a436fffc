use glam::{Vec2, Vec3};
use lumen_engine::EntityId;

/// Interaction radius in world units.
pub const INTERACTION_THRESHOLD: f32 = 3.0;

/// Lift a floor-plane position `(x, z)` into world space at `height`.
///
/// Floor-plane positions are stored as `Vec2 { x, y: z }`.
pub fn lift(pos: Vec2, height: f32) -> Vec3 {
    Vec3::new(pos.x, height, pos.y)
}

/// Every object strictly closer than `threshold` to `origin`, in input order.
///
/// An object exactly at the threshold is out of range.
pub fn find_nearby<I>(origin: Vec3, objects: I, threshold: f32) -> Vec<EntityId>
where
    I: IntoIterator<Item = (EntityId, Vec3)>,
{
    objects
        .into_iter()
        .filter(|(_, pos)| origin.distance(*pos) < threshold)
        .map(|(id, _)| id)
        .collect()
}

/// The closest in-range object. Ties keep the earlier object.
pub fn nearest<I>(origin: Vec3, objects: I, threshold: f32) -> Option<EntityId>
where
    I: IntoIterator<Item = (EntityId, Vec3)>,
{
    let mut best: Option<(EntityId, f32)> = None;
    for (id, pos) in objects {
        let d = origin.distance(pos);
        if d >= threshold {
            continue;
        }
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((id, d)),
        }
    }
    best.map(|(id, _)| id)
}
