use crate::config::PressConfig;
use crate::geometry;
use crate::timing;
use crate::types::*;
use crate::validation;
use std::collections::HashSet;
use tracing::{debug, info};

mod balanced;
mod minimal_waste;
mod reasoning;
mod remaining;
mod scoring;
mod simple;
#[cfg(test)]
mod tests;

use remaining::RemainingQuantities;
use scoring::Scores;

/// Gangs items into production runs with several competing heuristics and ranks the results.
pub struct Optimizer {
    request: OptimizationRequest,
}

impl Optimizer {
    /// Validates requests and builds a new optimizer instance.
    pub fn new(request: OptimizationRequest) -> Result<Self> {
        request.press.validate()?;
        request.weights.validate()?;

        if request.strategies.is_empty() {
            return Err(OptimizerError::InvalidInput(
                "At least one strategy must be requested".to_string(),
            ));
        }

        Self::validate_dieline(&request.dieline, &request.press)?;

        let mut seen = HashSet::new();
        for item in &request.items {
            if item.quantity == 0 {
                return Err(OptimizerError::InvalidInput(format!(
                    "Item '{}' has zero quantity",
                    item.id
                )));
            }

            if !seen.insert(item.id.as_str()) {
                return Err(OptimizerError::InvalidInput(format!(
                    "Item id '{}' appears more than once",
                    item.id
                )));
            }
        }

        Ok(Self { request })
    }

    fn validate_dieline(dieline: &Dieline, press: &PressConfig) -> Result<()> {
        let dimensions = [
            ("roll_width_mm", dieline.roll_width_mm),
            ("label_width_mm", dieline.label_width_mm),
            ("label_height_mm", dieline.label_height_mm),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(OptimizerError::InvalidInput(format!(
                    "Dieline {name} must be positive, got {value}"
                )));
            }
        }

        let gaps = [
            ("horizontal_gap_mm", dieline.horizontal_gap_mm),
            ("vertical_gap_mm", dieline.vertical_gap_mm),
        ];
        for (name, value) in gaps {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OptimizerError::InvalidInput(format!(
                    "Dieline {name} must not be negative, got {value}"
                )));
            }
        }

        if dieline.columns_across == 0 {
            return Err(OptimizerError::InvalidInput(
                "Dieline must have at least one column across".to_string(),
            ));
        }

        if dieline.rows_around == 0 {
            return Err(OptimizerError::InvalidInput(
                "Dieline must have at least one row around".to_string(),
            ));
        }

        if geometry::labels_per_frame(dieline, press) == 0 {
            return Err(OptimizerError::InvalidInput(format!(
                "Label pitch of {} mm does not fit the {} mm frame",
                geometry::vertical_pitch_mm(dieline),
                press.max_frame_length_mm
            )));
        }

        Ok(())
    }

    pub fn request(&self) -> &OptimizationRequest {
        &self.request
    }

    /// Runs every requested strategy, scores and explains each candidate, and
    /// returns them best first. Equal scores keep generation order.
    pub fn generate_layout_options(&self) -> Vec<LayoutOption> {
        if self.request.items.is_empty() {
            return Vec::new();
        }

        let mut strategies: Vec<Strategy> = Vec::new();
        for strategy in &self.request.strategies {
            if !strategies.contains(strategy) {
                strategies.push(*strategy);
            }
        }

        let mut options: Vec<LayoutOption> = strategies
            .iter()
            .enumerate()
            .map(|(idx, strategy)| self.build_option(*strategy, idx + 1))
            .collect();

        // sort_by is stable, ties stay in generation order
        options.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));

        if let Some(best) = options.first() {
            info!(
                "Generated {} layout options for {} items, best is {} ({} runs, score {})",
                options.len(),
                self.request.items.len(),
                best.id,
                best.runs.len(),
                best.overall_score
            );
        }

        options
    }

    /// Checks that an option covers every requested item exactly.
    pub fn validate_layout(&self, option: &LayoutOption) -> ValidationReport {
        validation::validate_layout(option, &self.request.items)
    }

    /// Estimated minutes on press, using this request's timing constants.
    pub fn estimate_production_time(&self, option: &LayoutOption) -> u32 {
        timing::estimate_production_time(option, &self.request.press.timing)
    }

    fn build_option(&self, strategy: Strategy, index: usize) -> LayoutOption {
        let runs = self.generate_runs(strategy);
        let scores = self.score(&runs);

        let total_meters = geometry::round_to_centimeters(runs.iter().map(|r| r.meters).sum());
        let total_frames: u32 = runs.iter().map(|r| r.frames).sum();
        let total_waste_meters =
            geometry::round_to_centimeters((total_meters - scores.theoretical_min_meters).max(0.0));
        let reasoning = reasoning::explain(
            runs.len(),
            self.total_labels(),
            total_meters,
            total_frames,
            &scores,
        );

        debug!(
            "Strategy {} produced {} runs, {:.2} m, {} frames",
            strategy,
            runs.len(),
            total_meters,
            total_frames
        );

        LayoutOption {
            id: format!("{}-{}", strategy.name(), index),
            strategy,
            runs,
            total_meters,
            total_frames,
            total_waste_meters,
            material_efficiency_score: Scores::percent(scores.material),
            print_efficiency_score: Scores::percent(scores.print),
            labor_efficiency_score: Scores::percent(scores.labor),
            overall_score: Scores::percent(scores.overall),
            reasoning,
        }
    }

    fn generate_runs(&self, strategy: Strategy) -> Vec<ProposedRun> {
        let items = &self.request.items;
        match strategy {
            Strategy::Balanced => self.balanced_runs(items),
            Strategy::MinimalWaste => self.minimal_waste_runs(items),
            Strategy::Simple => self.simple_runs(items),
        }
    }

    fn total_labels(&self) -> u64 {
        self.request
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    fn columns(&self) -> u32 {
        self.request.dieline.columns_across
    }

    /// Closes a run whose length is set by its longest lane.
    fn close_run(&self, run_number: usize, slot_assignments: Vec<SlotAssignment>) -> ProposedRun {
        let dieline = &self.request.dieline;
        let press = &self.request.press;

        let longest_slot = slot_assignments
            .iter()
            .map(|a| geometry::slot_meters(a.quantity_in_slot, dieline, press))
            .fold(0.0, f64::max);
        let meters = geometry::ceil_to_centimeters(longest_slot);

        ProposedRun {
            run_number: run_number as u32,
            slot_assignments,
            meters,
            frames: geometry::frames_for_meters(meters, press),
        }
    }
}
