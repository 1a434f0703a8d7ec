//! Bearing-only triangulation
//!
//! Every bearing constrains a stationary target to a line through the observer.
//! Two bearings for the same key taken from different observer positions give
//! two lines, and their crossing point is the estimate. The estimate is only
//! meaningful while the target stands still between the samples, so results
//! are screened for plausibility before they are returned:
//! - parallel (or numerically degenerate) lines never cross
//! - a crossing outside the world means the target moved
//! - a crossing on top of the observer means the observer is the one moving

use std::collections::HashMap;
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{BearingSample, EntityKey};
use crate::utils::config::{EngineConfig, SamplePolicy};

/// Why a hint did not produce a position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// No observer position was available when the bearing arrived
    NoObserver,
    /// First bearing for the key, nothing to pair it with
    NoBaseline,
    /// Same angle from the same spot as the stored sample
    Unchanged,
    /// The two bearing lines do not intersect
    Parallel,
    /// The intersection lies outside the world
    OutOfBounds { x: f64, z: f64 },
    /// The intersection lies on top of the observer
    TooClose { dist_sqr: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoObserver => f.write_str("no observer position"),
            Rejection::NoBaseline => f.write_str("no baseline sample"),
            Rejection::Unchanged => f.write_str("sample unchanged"),
            Rejection::Parallel => f.write_str("parallel bearings"),
            Rejection::OutOfBounds { x, z } => write!(f, "fix {:.1} / {:.1} outside world", x, z),
            Rejection::TooClose { dist_sqr } => {
                write!(f, "fix {:.1} blocks from observer", dist_sqr.sqrt())
            }
        }
    }
}

/// Result of feeding one bearing into the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangulationOutcome {
    Resolved { x: f64, z: f64 },
    Rejected(Rejection),
}

impl TriangulationOutcome {
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            TriangulationOutcome::Resolved { x, z } => Some((x, z)),
            TriangulationOutcome::Rejected(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TriangulationOutcome::Resolved { .. })
    }
}

/// A bearing line in slope form: `z = inv_tan * x + cross`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingLine {
    pub inv_tan: f64,
    pub cross: f64,
}

impl BearingLine {
    pub fn from_sample(sample: &BearingSample) -> Self {
        let inv_tan = -1.0 / sample.angle.tan();
        let cross = sample.observer_z - sample.observer_x * inv_tan;
        Self { inv_tan, cross }
    }

    /// Crossing point with `other`, or `None` for parallel or non-finite geometry
    pub fn intersect(&self, other: &BearingLine, epsilon: f64) -> Option<Vector2<f64>> {
        let slope_delta = self.inv_tan - other.inv_tan;
        if !slope_delta.is_finite() || slope_delta.abs() <= epsilon {
            return None;
        }

        let x = (other.cross - self.cross) / slope_delta;
        let z = x * self.inv_tan + self.cross;
        trace!(
            inv_tan = self.inv_tan,
            cross = self.cross,
            other_inv_tan = other.inv_tan,
            other_cross = other.cross,
            x,
            z,
            "bearing intersection"
        );

        if x.is_finite() && z.is_finite() {
            Some(Vector2::new(x, z))
        } else {
            None
        }
    }
}

/// Per-key bearing baselines and the pairwise triangulation over them
#[derive(Debug, Clone)]
pub struct BearingTriangulationEngine {
    samples: HashMap<EntityKey, BearingSample>,
    world_bound: f64,
    min_distance_sqr: f64,
    parallel_epsilon: f64,
    policy: SamplePolicy,
}

impl Default for BearingTriangulationEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl BearingTriangulationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            samples: HashMap::new(),
            world_bound: config.world_bound,
            min_distance_sqr: config.min_observer_distance_sqr(),
            parallel_epsilon: config.parallel_epsilon,
            policy: config.sample_policy,
        }
    }

    /// Record a bearing for `key` and try to fix its position against the
    /// previous one.
    ///
    /// The stored sample is updated before any filter runs, so a rejected
    /// bearing still becomes the baseline for the next one (under
    /// [`SamplePolicy::Overwrite`]).
    pub fn on_bearing(
        &mut self,
        key: &EntityKey,
        angle: f64,
        observer_x: f64,
        observer_z: f64,
    ) -> TriangulationOutcome {
        debug_assert!(
            observer_x.abs() <= self.world_bound && observer_z.abs() <= self.world_bound,
            "observer ({observer_x}, {observer_z}) outside world bound {}",
            self.world_bound
        );
        let current = BearingSample::new(angle, observer_x, observer_z);

        let previous = match self.policy {
            SamplePolicy::Overwrite => self.samples.insert(key.clone(), current),
            SamplePolicy::KeepFirst => match self.samples.get(key) {
                Some(stored) => Some(*stored),
                None => {
                    self.samples.insert(key.clone(), current);
                    None
                }
            },
        };

        let outcome = match previous {
            None => TriangulationOutcome::Rejected(Rejection::NoBaseline),
            Some(previous) if previous == current => TriangulationOutcome::Rejected(Rejection::Unchanged),
            Some(previous) => self.solve(&previous, &current),
        };

        if let TriangulationOutcome::Rejected(reason) = outcome {
            debug!(%key, angle, observer_x, observer_z, %reason, "bearing rejected");
        }
        outcome
    }

    fn solve(&self, previous: &BearingSample, current: &BearingSample) -> TriangulationOutcome {
        let current_line = BearingLine::from_sample(current);
        let previous_line = BearingLine::from_sample(previous);

        let Some(fix) = current_line.intersect(&previous_line, self.parallel_epsilon) else {
            return TriangulationOutcome::Rejected(Rejection::Parallel);
        };

        self.screen(fix, Vector2::new(current.observer_x, current.observer_z))
    }

    /// Bounds then proximity filter for a crossing point seen from `observer`
    fn screen(&self, fix: Vector2<f64>, observer: Vector2<f64>) -> TriangulationOutcome {
        if fix.x.abs() >= self.world_bound || fix.y.abs() >= self.world_bound {
            return TriangulationOutcome::Rejected(Rejection::OutOfBounds { x: fix.x, z: fix.y });
        }

        let dist_sqr = (observer - fix).norm_squared();
        if dist_sqr <= self.min_distance_sqr {
            return TriangulationOutcome::Rejected(Rejection::TooClose { dist_sqr });
        }

        TriangulationOutcome::Resolved { x: fix.x, z: fix.y }
    }

    /// Stored baseline for `key`
    pub fn sample(&self, key: &EntityKey) -> Option<&BearingSample> {
        self.samples.get(key)
    }

    /// Drop the baseline for `key`, returning it if there was one
    pub fn clear_sample(&mut self, key: &EntityKey) -> Option<BearingSample> {
        self.samples.remove(key)
    }

    /// Drop every baseline, returning how many were stored
    pub fn clear(&mut self) -> usize {
        let count = self.samples.len();
        self.samples.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn key() -> EntityKey {
        EntityKey::name("target")
    }

    /// Bearing angle whose line through the observer has slope `inv_tan`
    fn angle_for_slope(inv_tan: f64) -> f64 {
        (-1.0 / inv_tan).atan()
    }

    #[test]
    fn test_first_bearing_has_no_baseline() {
        let mut engine = BearingTriangulationEngine::default();
        let outcome = engine.on_bearing(&key(), 0.3, 0.0, 0.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::NoBaseline));
        assert_eq!(engine.sample(&key()), Some(&BearingSample::new(0.3, 0.0, 0.0)));
    }

    #[test]
    fn test_identical_sample_is_unchanged() {
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), 0.3, 5.0, 5.0);
        let outcome = engine.on_bearing(&key(), 0.3, 5.0, 5.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::Unchanged));
    }

    #[test]
    fn test_two_bearings_triangulate() {
        // Target at (-10, -10): slope 1 from the origin, slope 0.5 from (10, 0)
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), -FRAC_PI_4, 0.0, 0.0);
        let outcome = engine.on_bearing(&key(), angle_for_slope(0.5), 10.0, 0.0);

        let (x, z) = outcome.position().expect("bearings should cross");
        assert!((x + 10.0).abs() < 1e-9, "x = {x}");
        assert!((z + 10.0).abs() < 1e-9, "z = {z}");
    }

    #[test]
    fn test_observer_on_previous_line_is_too_close() {
        // Second observer stands on the first bearing line, so the lines
        // cross at the observer itself
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), FRAC_PI_2, 0.0, 0.0);
        let outcome = engine.on_bearing(&key(), -FRAC_PI_4, 10.0, 0.0);

        match outcome {
            TriangulationOutcome::Rejected(Rejection::TooClose { dist_sqr }) => assert!(dist_sqr < 1e-9),
            other => panic!("expected too-close rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_fix_within_eight_blocks_rejected() {
        // Lines z = -x + 5 and z = x + 5 cross at (0, 5), 50 blocks² from (-5, 0)
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), angle_for_slope(-1.0), 5.0, 0.0);
        let outcome = engine.on_bearing(&key(), angle_for_slope(1.0), -5.0, 0.0);

        match outcome {
            TriangulationOutcome::Rejected(Rejection::TooClose { dist_sqr }) => {
                assert!((dist_sqr - 50.0).abs() < 1e-6)
            }
            other => panic!("expected too-close rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_min_distance_either_side() {
        // Current observer at the origin looking along z = x
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), angle_for_slope(-3.0 / 7.0), 20.0, 0.0);
        let outcome = engine.on_bearing(&key(), angle_for_slope(1.0), 0.0, 0.0);
        let (x, z) = outcome.position().expect("(6, 6) is ~8.5 blocks away");
        assert!((x - 6.0).abs() < 1e-9);
        assert!((z - 6.0).abs() < 1e-9);

        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), angle_for_slope(-1.0 / 3.0), 20.0, 0.0);
        let outcome = engine.on_bearing(&key(), angle_for_slope(1.0), 0.0, 0.0);
        assert!(matches!(
            outcome,
            TriangulationOutcome::Rejected(Rejection::TooClose { .. })
        ));
    }

    #[test]
    fn test_fix_exactly_at_min_distance_rejected() {
        let engine = BearingTriangulationEngine::default();
        let observer = Vector2::new(3.0, -2.0);

        // 8 blocks east: dist² is exactly 64
        let outcome = engine.screen(Vector2::new(11.0, -2.0), observer);
        assert_eq!(
            outcome,
            TriangulationOutcome::Rejected(Rejection::TooClose { dist_sqr: 64.0 })
        );

        let outcome = engine.screen(Vector2::new(11.0, -2.001), observer);
        assert!(outcome.is_resolved());
    }

    #[test]
    fn test_observer_beyond_default_world_with_larger_bound() {
        let config = EngineConfig {
            world_bound: 60_000_000.0,
            ..EngineConfig::default()
        };
        let mut engine = BearingTriangulationEngine::new(&config);

        let outcome = engine.on_bearing(&key(), 0.5, 40_000_000.0, 0.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::NoBaseline));
        let outcome = engine.on_bearing(&key(), -FRAC_PI_4, 40_000_100.0, 0.0);
        let (x, _) = outcome.position().expect("crossing lies inside the larger world");
        assert!(x.abs() > 30_000_000.0 && x.abs() < 60_000_000.0);
    }

    #[test]
    fn test_nearly_parallel_bearings_out_of_bounds() {
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), 0.5, 0.0, 0.0);
        let outcome = engine.on_bearing(&key(), 0.5 + 1e-9, 0.0, 100.0);

        assert!(matches!(
            outcome,
            TriangulationOutcome::Rejected(Rejection::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_exactly_parallel_bearings() {
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), 0.5, 0.0, 0.0);
        let outcome = engine.on_bearing(&key(), 0.5, 0.0, 100.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::Parallel));
    }

    #[test]
    fn test_parallel_epsilon_widens_guard() {
        let config = EngineConfig {
            parallel_epsilon: 1e-6,
            ..EngineConfig::default()
        };
        let mut engine = BearingTriangulationEngine::new(&config);
        engine.on_bearing(&key(), 0.5, 0.0, 0.0);
        let outcome = engine.on_bearing(&key(), 0.5 + 1e-9, 0.0, 100.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::Parallel));
    }

    #[test]
    fn test_zero_angle_is_degenerate() {
        // tan(0) = 0 makes the slope infinite
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), 0.0, 3.0, 0.0);
        let outcome = engine.on_bearing(&key(), 0.7, 50.0, 20.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::Parallel));
    }

    #[test]
    fn test_rejected_bearing_becomes_baseline() {
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&key(), 0.5, 0.0, 0.0);
        engine.on_bearing(&key(), 0.5, 0.0, 100.0);
        assert_eq!(engine.sample(&key()), Some(&BearingSample::new(0.5, 0.0, 100.0)));
    }

    #[test]
    fn test_keep_first_policy() {
        let config = EngineConfig {
            sample_policy: SamplePolicy::KeepFirst,
            ..EngineConfig::default()
        };
        let mut engine = BearingTriangulationEngine::new(&config);
        engine.on_bearing(&key(), -FRAC_PI_4, 0.0, 0.0);
        engine.on_bearing(&key(), 0.5, 0.0, 100.0);
        assert_eq!(engine.sample(&key()), Some(&BearingSample::new(-FRAC_PI_4, 0.0, 0.0)));

        // Still pairs against the first sample
        let outcome = engine.on_bearing(&key(), angle_for_slope(0.5), 10.0, 0.0);
        let (x, z) = outcome.position().unwrap();
        assert!((x + 10.0).abs() < 1e-9);
        assert!((z + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut engine = BearingTriangulationEngine::default();
        engine.on_bearing(&EntityKey::name("a"), -FRAC_PI_4, 0.0, 0.0);
        let outcome = engine.on_bearing(&EntityKey::name("b"), angle_for_slope(0.5), 10.0, 0.0);
        assert_eq!(outcome, TriangulationOutcome::Rejected(Rejection::NoBaseline));
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.clear(), 2);
        assert!(engine.is_empty());
    }
}
