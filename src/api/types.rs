//! Common API types and data structures

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::algorithms::triangulation::Rejection;
use crate::core::{Color, EntityKey, RenderDescriptor, ResolutionSource, TrackedHint};

/// A position published for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionEvent {
    pub key: EntityKey,
    pub x: f64,
    pub z: f64,
    pub color: Color,
    pub source: ResolutionSource,
}

impl ResolutionEvent {
    pub fn descriptor(&self) -> RenderDescriptor {
        RenderDescriptor {
            x: self.x,
            z: self.z,
            color: self.color,
        }
    }
}

/// What handling one hint did to the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HintOutcome {
    /// A position was published
    Published(ResolutionEvent),
    /// All state for the key was dropped
    Removed { key: EntityKey },
    /// The hint produced no position; any stored sample was still updated
    Ignored { key: EntityKey, reason: Rejection },
}

impl HintOutcome {
    pub fn key(&self) -> &EntityKey {
        match self {
            HintOutcome::Published(event) => &event.key,
            HintOutcome::Removed { key } | HintOutcome::Ignored { key, .. } => key,
        }
    }

    pub fn event(&self) -> Option<&ResolutionEvent> {
        match self {
            HintOutcome::Published(event) => Some(event),
            _ => None,
        }
    }
}

/// Counts reported by a session reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    pub samples_cleared: usize,
    pub renders_cleared: usize,
}

/// Work item for the engine's owning thread
#[derive(Debug)]
pub enum EngineCommand {
    /// Process a decoded update
    Hint(TrackedHint),
    /// Session boundary: clear all state
    Reset,
    /// Copy of the current render state
    Snapshot(Sender<Vec<RenderDescriptor>>),
    /// Stop the executor loop
    Shutdown,
}

/// Hook receiving every hint outcome, e.g. for a chat or log overlay
pub type OutcomeSink = Box<dyn FnMut(&HintOutcome) + Send>;
