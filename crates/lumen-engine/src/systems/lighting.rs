/// Persistent light state for the room.
///
/// Lights stay until explicitly cleared. Each frame the renderer reads the
/// packed light array and the ambient term through the runner's accessors.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::EntityId;

/// Convert a `0xRRGGBB` color into linear [0..1] components.
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// A light source placed in world space.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, size]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Emitter width in world units (area lights are square).
    pub size: f32,
}

impl PointLight {
    /// Create a light at `pos`.
    ///
    /// - `color`: RGB color (typically [0..1])
    /// - `intensity`: Light strength multiplier
    /// - `size`: Emitter width in world units
    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, size: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            size,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn color(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.r = color[0];
        self.g = color[1];
        self.b = color[2];
    }
}

/// Ambient term applied to the whole room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ambient {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for Ambient {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Manages the room's lights, keyed by the entity that owns each one.
///
/// Lights are kept in a contiguous array so the renderer can read them as
/// one flat f32 slice.
pub struct LightState {
    lights: Vec<PointLight>,
    owners: Vec<EntityId>,
    ambient: Ambient,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            owners: Vec::with_capacity(max_lights),
            ambient: Ambient::default(),
        }
    }

    /// Add a light owned by `id`. Replaces any light `id` already owns.
    pub fn add(&mut self, id: EntityId, light: PointLight) {
        match self.index_of(id) {
            Some(i) => self.lights[i] = light,
            None => {
                self.lights.push(light);
                self.owners.push(id);
            }
        }
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.owners.iter().position(|o| *o == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&PointLight> {
        self.index_of(id).map(|i| &self.lights[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut PointLight> {
        self.index_of(id).map(move |i| &mut self.lights[i])
    }

    /// Remove all lights. The ambient term is left as is.
    pub fn clear(&mut self) {
        self.lights.clear();
        self.owners.clear();
    }

    /// Get an iterator over active lights.
    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, ambient: Ambient) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> Ambient {
        self.ambient
    }

    /// Lights as a flat float slice (`count() * LIGHT_FLOATS` values).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.lights)
    }

    /// Pointer to the lights data for shared-memory reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn hex_colors_convert() {
        assert_eq!(rgb_from_hex(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(rgb_from_hex(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb_from_hex(0x00ff00), [0.0, 1.0, 0.0]);
        let [r, g, b] = rgb_from_hex(0x4400ff);
        assert!((r - 68.0 / 255.0).abs() < 1e-6);
        assert_eq!(g, 0.0);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn point_light_new() {
        let light = PointLight::new(Vec3::new(-40.0, 9.9, 35.0), [1.0, 0.5, 0.0], 20.0, 2.0);
        assert_eq!(light.pos(), Vec3::new(-40.0, 9.9, 35.0));
        assert_eq!(light.color(), [1.0, 0.5, 0.0]);
        assert_eq!(light.intensity, 20.0);
        assert_eq!(light.size, 2.0);
    }

    #[test]
    fn add_and_lookup_by_owner() {
        let mut state = LightState::new();
        state.add(EntityId(1), PointLight::new(Vec3::ZERO, [1.0; 3], 1.0, 2.0));
        state.add(EntityId(2), PointLight::new(Vec3::X, [0.5; 3], 2.0, 2.0));
        assert_eq!(state.count(), 2);

        state.get_mut(EntityId(2)).unwrap().set_color([0.0, 1.0, 0.0]);
        assert_eq!(state.get(EntityId(2)).unwrap().color(), [0.0, 1.0, 0.0]);
        assert_eq!(state.get(EntityId(1)).unwrap().color(), [1.0; 3]);
        assert!(state.get(EntityId(3)).is_none());
    }

    #[test]
    fn re_adding_an_owner_replaces_its_light() {
        let mut state = LightState::new();
        state.add(EntityId(1), PointLight::new(Vec3::ZERO, [1.0; 3], 1.0, 2.0));
        state.add(EntityId(1), PointLight::new(Vec3::ZERO, [0.0; 3], 1.0, 2.0));
        assert_eq!(state.count(), 1);
        assert_eq!(state.get(EntityId(1)).unwrap().color(), [0.0; 3]);
    }

    #[test]
    fn clear_keeps_ambient() {
        let mut state = LightState::new();
        state.add(EntityId(1), PointLight::new(Vec3::ZERO, [1.0; 3], 1.0, 2.0));
        state.set_ambient(Ambient { color: [0.2, 0.2, 0.25], intensity: 0.5 });
        state.clear();
        assert_eq!(state.count(), 0);
        assert_eq!(state.ambient().intensity, 0.5);
    }

    #[test]
    fn ambient_default_is_white() {
        let state = LightState::new();
        assert_eq!(state.ambient(), Ambient { color: [1.0; 3], intensity: 1.0 });
    }

    #[test]
    fn flat_view_matches_wire_format() {
        let mut state = LightState::new();
        state.add(EntityId(9), PointLight::new(Vec3::new(1.0, 2.0, 3.0), [0.1, 0.2, 0.3], 4.0, 5.0));
        assert_eq!(state.as_floats(), &[1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 4.0, 5.0]);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
