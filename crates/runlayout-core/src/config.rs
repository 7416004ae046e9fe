//! Press constants and scoring weights.
//!
//! Nothing in the optimizer reads a global: every constant that depends on the
//! press (frame length, changeover time, heuristic thresholds) travels in a
//! [`PressConfig`], so alternative press geometries can be tested side by side.

use serde::{Deserialize, Serialize};

use crate::types::{OptimizerError, Result};

/// Fixed geometry and heuristic tuning of the press.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressConfig {
    /// Longest print cycle the press can image, in millimetres.
    pub max_frame_length_mm: f64,

    /// Roll length advanced per frame, in metres.
    pub meters_per_frame: f64,

    /// Soft cap on the labels the balanced heuristic puts in a single slot
    /// so one large item cannot monopolize a run.
    pub balanced_slot_ceiling: u32,

    /// Minimal-waste grouping threshold: an item joins the current run when
    /// its remaining quantity is at least this fraction of the largest one.
    pub similarity_ratio: f64,

    /// Constants for the production time estimate.
    pub timing: TimingConfig,
}

impl PressConfig {
    pub const DEFAULT_MAX_FRAME_LENGTH_MM: f64 = 960.0;
    pub const DEFAULT_METERS_PER_FRAME: f64 = 0.96;
    pub const DEFAULT_BALANCED_SLOT_CEILING: u32 = 10_000;
    pub const DEFAULT_SIMILARITY_RATIO: f64 = 0.5;

    /// Rejects constants that would make the geometry divide by zero.
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.max_frame_length_mm) {
            return Err(OptimizerError::InvalidConfig(
                "max_frame_length_mm must be positive".to_string(),
            ));
        }
        if !is_positive(self.meters_per_frame) {
            return Err(OptimizerError::InvalidConfig(
                "meters_per_frame must be positive".to_string(),
            ));
        }
        if self.balanced_slot_ceiling == 0 {
            return Err(OptimizerError::InvalidConfig(
                "balanced_slot_ceiling must be at least 1".to_string(),
            ));
        }
        if !(self.similarity_ratio.is_finite() && (0.0..=1.0).contains(&self.similarity_ratio)) {
            return Err(OptimizerError::InvalidConfig(format!(
                "similarity_ratio must be within 0..=1, got {}",
                self.similarity_ratio
            )));
        }
        self.timing.validate()
    }
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            max_frame_length_mm: Self::DEFAULT_MAX_FRAME_LENGTH_MM,
            meters_per_frame: Self::DEFAULT_METERS_PER_FRAME,
            balanced_slot_ceiling: Self::DEFAULT_BALANCED_SLOT_CEILING,
            similarity_ratio: Self::DEFAULT_SIMILARITY_RATIO,
            timing: TimingConfig::default(),
        }
    }
}

/// Production time constants, all in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// One-off make-ready before the first run.
    pub setup_minutes: f64,
    /// Plate/artwork change between consecutive runs.
    pub changeover_minutes: f64,
    pub per_frame_minutes: f64,
}

impl TimingConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("setup_minutes", self.setup_minutes),
            ("changeover_minutes", self.changeover_minutes),
            ("per_frame_minutes", self.per_frame_minutes),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OptimizerError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            setup_minutes: 15.0,
            changeover_minutes: 2.0,
            per_frame_minutes: 0.5,
        }
    }
}

/// Linear weights of the overall score. They need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationWeights {
    pub material_efficiency: f64,
    pub print_efficiency: f64,
    pub labor_efficiency: f64,
}

impl OptimizationWeights {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("material_efficiency", self.material_efficiency),
            ("print_efficiency", self.print_efficiency),
            ("labor_efficiency", self.labor_efficiency),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OptimizerError::InvalidInput(format!(
                    "weight {name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for OptimizationWeights {
    fn default() -> Self {
        Self {
            material_efficiency: 0.4,
            print_efficiency: 0.35,
            labor_efficiency: 0.25,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
