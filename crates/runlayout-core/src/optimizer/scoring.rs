use super::*;

/// Efficiency ratios of one candidate, each in 0..=1 except `overall`,
/// which is scaled by the weights.
#[derive(Debug, Clone)]
pub(super) struct Scores {
    pub material: f64,
    pub print: f64,
    pub labor: f64,
    pub overall: f64,
    /// Roll length if no label were rounded into a partial frame or lane
    pub theoretical_min_meters: f64,
}

impl Scores {
    /// Converts a ratio to a whole-number percentage.
    pub fn percent(ratio: f64) -> u32 {
        (ratio * 100.0).round().max(0.0) as u32
    }
}

impl Optimizer {
    /// Scores a set of runs for material, print and labor efficiency.
    pub(super) fn score(&self, runs: &[ProposedRun]) -> Scores {
        let dieline = &self.request.dieline;
        let weights = &self.request.weights;
        let columns = f64::from(self.columns());

        let theoretical_min_meters =
            self.total_labels() as f64 / geometry::labels_per_meter(dieline, &self.request.press);
        let total_meters: f64 = runs.iter().map(|r| r.meters).sum();
        let run_count = runs.len() as f64;

        let material = if total_meters > 0.0 {
            (theoretical_min_meters / total_meters).min(1.0)
        } else {
            0.0
        };

        let (print, labor) = if runs.is_empty() {
            (0.0, 0.0)
        } else {
            let min_possible_runs = (self.request.items.len() as f64 / columns).ceil();
            let used_slots: usize = runs.iter().map(ProposedRun::used_slots).sum();
            (
                (min_possible_runs / run_count).min(1.0),
                used_slots as f64 / (run_count * columns),
            )
        };

        let overall = material * weights.material_efficiency
            + print * weights.print_efficiency
            + labor * weights.labor_efficiency;

        Scores {
            material,
            print,
            labor,
            overall,
            theoretical_min_meters,
        }
    }
}
