use serde::{Deserialize, Serialize};

use crate::config::{OptimizationWeights, PressConfig};

/// Printable item - one distinct artwork with the number of finished labels required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub quantity: u32,
    pub name: String,
}

/// Dieline geometry of the roll-fed die
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dieline {
    pub roll_width_mm: f64,
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    /// Number of lanes (slots) side by side across the roll
    pub columns_across: u32,
    pub rows_around: u32,
    #[serde(default)]
    pub horizontal_gap_mm: f64,
    #[serde(default)]
    pub vertical_gap_mm: f64,
}

/// Layout heuristic used to build a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Balanced,
    MinimalWaste,
    Simple,
}

impl Strategy {
    /// Generation order, which is also the tie-break order when scores are equal.
    pub const ALL: [Strategy; 3] = [Strategy::Balanced, Strategy::MinimalWaste, Strategy::Simple];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::MinimalWaste => "minimal-waste",
            Strategy::Simple => "simple",
        }
    }

    fn all() -> Vec<Strategy> {
        Self::ALL.to_vec()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Input: What the order system hands over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub items: Vec<Item>,
    pub dieline: Dieline,
    #[serde(default)]
    pub weights: OptimizationWeights,
    /// Press constants (frame length, timing). Defaults match the standard press.
    #[serde(default)]
    pub press: PressConfig,
    /// Heuristics to run, in generation order
    #[serde(default = "Strategy::all")]
    pub strategies: Vec<Strategy>,
}

impl OptimizationRequest {
    /// Builds a request with default weights, press constants and all strategies.
    pub fn new(items: Vec<Item>, dieline: Dieline) -> Self {
        Self {
            items,
            dieline,
            weights: OptimizationWeights::default(),
            press: PressConfig::default(),
            strategies: Strategy::all(),
        }
    }
}

/// This many units of one item print in one lane of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot: u32,
    pub item_id: String,
    pub quantity_in_slot: u32,
}

/// One continuous printing pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedRun {
    /// 1-based, contiguous within an option
    pub run_number: u32,
    pub slot_assignments: Vec<SlotAssignment>,
    /// Roll length consumed
    pub meters: f64,
    pub frames: u32,
}

impl ProposedRun {
    /// Number of assignments that actually print something.
    pub fn used_slots(&self) -> usize {
        self.slot_assignments
            .iter()
            .filter(|a| a.quantity_in_slot > 0)
            .count()
    }
}

/// Output: one candidate production plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOption {
    pub id: String,
    pub strategy: Strategy,
    pub runs: Vec<ProposedRun>,
    pub total_meters: f64,
    pub total_frames: u32,
    /// Meters above the zero-rounding theoretical minimum
    pub total_waste_meters: f64,
    /// 0-100
    pub material_efficiency_score: u32,
    /// 0-100
    pub print_efficiency_score: u32,
    /// 0-100
    pub labor_efficiency_score: u32,
    /// Weighted sum of the three scores, on the same 0-100 scale when weights sum to 1
    pub overall_score: u32,
    pub reasoning: String,
}

impl LayoutOption {
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Total labels assigned to `item_id` across every run and slot.
    pub fn assigned_quantity(&self, item_id: &str) -> u64 {
        self.runs
            .iter()
            .flat_map(|r| &r.slot_assignments)
            .filter(|a| a.item_id == item_id)
            .map(|a| u64::from(a.quantity_in_slot))
            .sum()
    }
}

/// Result of checking an option against the items it must cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Error type for optimization
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid press configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
