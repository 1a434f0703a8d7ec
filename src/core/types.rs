//! Core data types for hint tracking

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::color::Color;

/// Stable identifier of a tracked entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKey {
    /// 128-bit unique identifier
    Uuid(Uuid),
    /// Free-form name
    Name(String),
}

impl EntityKey {
    pub fn uuid(id: Uuid) -> Self {
        EntityKey::Uuid(id)
    }

    pub fn name(name: impl Into<String>) -> Self {
        EntityKey::Name(name.into())
    }

    /// Deterministic 32-bit hash, identical across processes and runs.
    ///
    /// UUIDs fold their two 64-bit halves together; names use the polynomial
    /// hash `h = 31 * h + unit` over their UTF-16 code units.
    pub fn stable_hash(&self) -> i32 {
        match self {
            EntityKey::Uuid(id) => {
                let (high, low) = id.as_u64_pair();
                let folded = high ^ low;
                ((folded >> 32) as i32) ^ (folded as i32)
            }
            EntityKey::Name(name) => name
                .encode_utf16()
                .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32)),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Uuid(id) => write!(f, "{}", id.hyphenated()),
            EntityKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<Uuid> for EntityKey {
    fn from(id: Uuid) -> Self {
        EntityKey::Uuid(id)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        EntityKey::Name(name.to_string())
    }
}

/// A single bearing observation: where the observer stood and which way the
/// target was when the bearing arrived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingSample {
    /// Compass angle towards the target (radians, [-π, π])
    pub angle: f64,
    /// Observer X position at the moment of receiving the angle
    pub observer_x: f64,
    /// Observer Z position at the moment of receiving the angle
    pub observer_z: f64,
}

impl BearingSample {
    pub fn new(angle: f64, observer_x: f64, observer_z: f64) -> Self {
        debug_assert!(
            (-std::f64::consts::PI..=std::f64::consts::PI).contains(&angle),
            "bearing angle {angle} outside [-PI, PI]"
        );

        Self {
            angle,
            observer_x,
            observer_z,
        }
    }

    /// Angle in degrees, for diagnostics
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// Best current estimate of an entity's horizontal position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderDescriptor {
    pub x: f64,
    pub z: f64,
    pub color: Color,
}

/// Positional information attached to an update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Hint {
    /// Exact block position
    Vector { x: i32, y: i32, z: i32 },
    /// Coarse 16x16 grid cell
    ChunkCoarse { chunk_x: i32, chunk_z: i32 },
    /// Compass bearing from the observer, no coordinate
    Bearing { angle: f64 },
    /// Removal or no usable information
    Unknown,
}

/// A decoded update for one entity, as delivered by the decoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedHint {
    pub key: EntityKey,
    pub hint: Hint,
    /// Explicit display colour carried by the update, if any
    #[serde(default)]
    pub color: Option<Color>,
}

impl TrackedHint {
    pub fn new(key: impl Into<EntityKey>, hint: Hint) -> Self {
        Self {
            key: key.into(),
            hint,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Which path produced a published position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Vector,
    Chunk,
    Bearing,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Vector => "vector",
            ResolutionSource::Chunk => "chunk",
            ResolutionSource::Bearing => "bearing",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
