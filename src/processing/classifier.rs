//! Routes each hint to the path that can handle its kind of positional data

use crate::algorithms::direct::DirectPositionResolver;
use crate::core::{Hint, ResolutionSource};

/// What the engine should do with a hint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// The hint already names a position
    ResolveDirect { x: f64, z: f64, source: ResolutionSource },
    /// Only a bearing is known; pair it with the stored one
    Triangulate { angle: f64 },
    /// Forget everything about the key
    Remove,
}

impl Classification {
    /// Whether the key's pending bearing baseline must be dropped before applying
    pub fn clears_sample(&self) -> bool {
        !matches!(self, Classification::Triangulate { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HintClassifier {
    resolver: DirectPositionResolver,
}

impl HintClassifier {
    pub fn new(resolver: DirectPositionResolver) -> Self {
        Self { resolver }
    }

    /// Resolver used for direct positions, shared with colour selection
    pub fn resolver(&self) -> &DirectPositionResolver {
        &self.resolver
    }

    pub fn classify(&self, hint: &Hint) -> Classification {
        match *hint {
            Hint::Vector { x, z, .. } => {
                let (x, z) = self.resolver.vector_position(x, z);
                Classification::ResolveDirect {
                    x,
                    z,
                    source: ResolutionSource::Vector,
                }
            }
            Hint::ChunkCoarse { chunk_x, chunk_z } => {
                let (x, z) = self.resolver.chunk_center(chunk_x, chunk_z);
                Classification::ResolveDirect {
                    x,
                    z,
                    source: ResolutionSource::Chunk,
                }
            }
            Hint::Bearing { angle } => Classification::Triangulate { angle },
            Hint::Unknown => Classification::Remove,
        }
    }
}
