//! World constants and default engine parameters

/// Maximum absolute horizontal coordinate of the world (blocks)
pub const WORLD_BOUND: f64 = 30_000_000.0;

/// Side length of a coarse grid cell (blocks)
pub const CHUNK_SIZE: i32 = 16;

/// Offset from a cell's origin corner to its centre (blocks)
pub const CHUNK_CENTER_OFFSET: i32 = 8;

/// Minimum distance between the observer and a bearing fix (blocks)
pub const MIN_OBSERVER_DISTANCE: f64 = 8.0;

/// HSV value used for colours derived from an entity key
pub const DERIVED_COLOR_BRIGHTNESS: f32 = 0.9;
