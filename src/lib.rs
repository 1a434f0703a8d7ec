//! Bearing Fix
//!
//! Best-effort world positions for remote entities from a stream of position
//! hints. Exact and coarse hints are taken as they are; bearing-only hints are
//! paired with the previous bearing for the same entity and triangulated.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{BearingSample, Color, EntityKey, Hint, RenderDescriptor, ResolutionSource, TrackedHint, WORLD_BOUND};
pub use crate::algorithms::{BearingTriangulationEngine, DirectPositionResolver, Rejection, TriangulationOutcome};
pub use crate::processing::{Classification, HintClassifier, RenderStateStore, Snapshot};
pub use crate::utils::{ConfigError, EngineConfig, SamplePolicy};
pub use crate::api::{
    EngineError, EngineExecutor, EngineHandle, FixedObserver, HintOutcome, ObserverPosition,
    ResetSummary, ResolutionEvent, SharedObserver, TrackingEngine,
};
