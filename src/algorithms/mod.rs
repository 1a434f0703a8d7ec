//! Position algorithms: bearing triangulation and direct resolution

pub mod triangulation;
pub mod direct;

pub use triangulation::{BearingLine, BearingTriangulationEngine, Rejection, TriangulationOutcome};
pub use direct::DirectPositionResolver;
