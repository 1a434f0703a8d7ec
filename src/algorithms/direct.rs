//! Direct position resolution for hints that already carry a coordinate

use crate::core::constants::{CHUNK_CENTER_OFFSET, CHUNK_SIZE};
use crate::core::{Color, EntityKey, RenderDescriptor};
use crate::utils::config::EngineConfig;

/// Turns exact and coarse hints into render descriptors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectPositionResolver {
    cell_offset: f64,
    brightness: f32,
}

impl Default for DirectPositionResolver {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DirectPositionResolver {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            cell_offset: config.cell_offset,
            brightness: config.derived_brightness,
        }
    }

    /// Horizontal position of an exact block hint
    pub fn vector_position(&self, x: i32, z: i32) -> (f64, f64) {
        (x as f64 + self.cell_offset, z as f64 + self.cell_offset)
    }

    /// Centre of a coarse grid cell
    pub fn chunk_center(&self, chunk_x: i32, chunk_z: i32) -> (f64, f64) {
        let center = |chunk: i32| {
            (chunk as i64 * CHUNK_SIZE as i64 + CHUNK_CENTER_OFFSET as i64) as f64 + self.cell_offset
        };
        (center(chunk_x), center(chunk_z))
    }

    /// Explicit colour if the update carried one, otherwise the key's derived colour
    pub fn color_for(&self, key: &EntityKey, explicit: Option<Color>) -> Color {
        explicit.unwrap_or_else(|| Color::derived(key, self.brightness))
    }

    pub fn resolve(&self, key: &EntityKey, x: f64, z: f64, explicit: Option<Color>) -> RenderDescriptor {
        RenderDescriptor {
            x,
            z,
            color: self.color_for(key, explicit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_position_drops_height() {
        let resolver = DirectPositionResolver::default();
        assert_eq!(resolver.vector_position(12, -40), (12.0, -40.0));
    }

    #[test]
    fn test_chunk_center() {
        let resolver = DirectPositionResolver::default();
        assert_eq!(resolver.chunk_center(0, 0), (8.0, 8.0));
        assert_eq!(resolver.chunk_center(3, -2), (56.0, -24.0));
    }

    #[test]
    fn test_chunk_center_far_out_does_not_overflow() {
        let resolver = DirectPositionResolver::default();
        let (x, _) = resolver.chunk_center(i32::MAX, 0);
        assert_eq!(x, i32::MAX as f64 * 16.0 + 8.0);
    }

    #[test]
    fn test_block_center_offset() {
        let config = EngineConfig {
            cell_offset: 0.5,
            ..EngineConfig::default()
        };
        let resolver = DirectPositionResolver::new(&config);
        assert_eq!(resolver.vector_position(1, 2), (1.5, 2.5));
        assert_eq!(resolver.chunk_center(1, 1), (24.5, 24.5));
    }

    #[test]
    fn test_explicit_color_wins() {
        let resolver = DirectPositionResolver::default();
        let key = EntityKey::name("flag");
        let explicit = Color::opaque(0x0011_2233);

        let descriptor = resolver.resolve(&key, 1.0, 2.0, Some(explicit));
        assert_eq!(descriptor.color.argb(), 0xFF11_2233);

        let derived = resolver.resolve(&key, 1.0, 2.0, None);
        assert_eq!(derived.color, Color::derived(&key, 0.9));
    }
}
