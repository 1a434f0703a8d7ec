//! Engine API and execution context
//!
//! This module exposes the tracking engine to a host: the engine itself, the
//! single-consumer executor that serialises access to it, and the observer
//! position seam it queries for bearing hints.

pub mod engine;
pub mod executor;
pub mod observer;
pub mod types;
pub mod error;

// Re-export commonly used API types
pub use engine::TrackingEngine;
pub use executor::{spawn, EngineExecutor, EngineHandle};
pub use observer::{FixedObserver, ObserverPosition, SharedObserver};
pub use types::{EngineCommand, HintOutcome, OutcomeSink, ResetSummary, ResolutionEvent};
pub use error::{EngineError, EngineResult};
