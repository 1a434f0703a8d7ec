//! Tracking engine: owns all per-session state
//!
//! `TrackingEngine` ties the classifier, both resolution paths and the render
//! store together. It is not thread safe by construction: every call must come
//! from the one thread that owns it (see [`crate::api::executor`] for a queue
//! that enforces this). A host that shares it across threads some other way
//! breaks the pairing of bearing samples.

use tracing::{debug, info};

use crate::algorithms::direct::DirectPositionResolver;
use crate::algorithms::triangulation::{BearingTriangulationEngine, Rejection, TriangulationOutcome};
use crate::api::observer::ObserverPosition;
use crate::api::types::{HintOutcome, ResetSummary, ResolutionEvent};
use crate::core::{BearingSample, Color, EntityKey, RenderDescriptor, ResolutionSource, TrackedHint};
use crate::processing::classifier::{Classification, HintClassifier};
use crate::processing::render_store::{RenderStateStore, Snapshot};
use crate::utils::config::{ConfigError, EngineConfig};

#[derive(Debug, Clone)]
pub struct TrackingEngine {
    config: EngineConfig,
    classifier: HintClassifier,
    triangulation: BearingTriangulationEngine,
    renders: RenderStateStore,
}

impl Default for TrackingEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl TrackingEngine {
    /// Create an engine after validating `config`
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: EngineConfig) -> Self {
        Self {
            classifier: HintClassifier::new(DirectPositionResolver::new(&config)),
            triangulation: BearingTriangulationEngine::new(&config),
            renders: RenderStateStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply one decoded update.
    ///
    /// `observer` is only consulted for bearing hints.
    pub fn handle<O>(&mut self, update: &TrackedHint, observer: &O) -> HintOutcome
    where
        O: ObserverPosition + ?Sized,
    {
        let key = &update.key;
        let class = self.classifier.classify(&update.hint);
        debug!(%key, ?class, "hint classified");

        if class.clears_sample() {
            self.triangulation.clear_sample(key);
        }

        match class {
            Classification::ResolveDirect { x, z, source } => self.publish(key, x, z, update.color, source),
            Classification::Triangulate { angle } => {
                let Some((observer_x, observer_z)) = observer.observer_position() else {
                    debug!(%key, "bearing dropped, no observer position");
                    return HintOutcome::Ignored {
                        key: key.clone(),
                        reason: Rejection::NoObserver,
                    };
                };

                match self.triangulation.on_bearing(key, angle, observer_x, observer_z) {
                    TriangulationOutcome::Resolved { x, z } => {
                        self.publish(key, x, z, update.color, ResolutionSource::Bearing)
                    }
                    TriangulationOutcome::Rejected(reason) => HintOutcome::Ignored {
                        key: key.clone(),
                        reason,
                    },
                }
            }
            Classification::Remove => {
                self.remove(key);
                HintOutcome::Removed { key: key.clone() }
            }
        }
    }

    fn publish(
        &mut self,
        key: &EntityKey,
        x: f64,
        z: f64,
        explicit: Option<Color>,
        source: ResolutionSource,
    ) -> HintOutcome {
        let color = self.classifier.resolver().color_for(key, explicit);
        self.renders.publish(key.clone(), x, z, color);
        info!(%key, x, z, %source, "entity located");

        HintOutcome::Published(ResolutionEvent {
            key: key.clone(),
            x,
            z,
            color,
            source,
        })
    }

    /// Forget `key` entirely. Absent keys are a no-op.
    pub fn remove(&mut self, key: &EntityKey) {
        self.triangulation.clear_sample(key);
        if self.renders.remove(key).is_some() {
            debug!(%key, "render position removed");
        }
    }

    /// Session boundary: drop every sample and every published position
    pub fn reset(&mut self) -> ResetSummary {
        let summary = ResetSummary {
            samples_cleared: self.triangulation.clear(),
            renders_cleared: self.renders.clear(),
        };
        info!(
            samples = summary.samples_cleared,
            renders = summary.renders_cleared,
            "session state cleared"
        );
        summary
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.renders.snapshot()
    }

    pub fn render(&self, key: &EntityKey) -> Option<&RenderDescriptor> {
        self.renders.get(key)
    }

    pub fn sample(&self, key: &EntityKey) -> Option<&BearingSample> {
        self.triangulation.sample(key)
    }

    /// Number of keys with a published position
    pub fn tracked_count(&self) -> usize {
        self.renders.len()
    }

    /// Number of keys with a stored bearing sample
    pub fn pending_samples(&self) -> usize {
        self.triangulation.len()
    }
}
