use super::*;

impl Optimizer {
    /// Best-fit grouping. Each run gangs the items whose remaining quantity is
    /// close to the largest one, so lanes in a run end at similar lengths and
    /// little substrate is left unused behind the short lanes.
    pub(super) fn minimal_waste_runs(&self, items: &[Item]) -> Vec<ProposedRun> {
        let columns = self.columns() as usize;
        let ratio = self.request.press.similarity_ratio;
        let mut remaining = RemainingQuantities::sorted_by_quantity(items);
        let mut runs = Vec::new();

        while !remaining.is_exhausted() {
            let active = remaining.active_by_remaining();
            let Some(largest) = active.first().map(|idx| remaining.quantity(*idx)) else {
                break;
            };
            let threshold = f64::from(largest) * ratio;

            let mut group: Vec<usize> = active
                .iter()
                .copied()
                .filter(|idx| f64::from(remaining.quantity(*idx)) >= threshold)
                .take(columns)
                .collect();
            if group.is_empty() {
                group = active.iter().copied().take(columns).collect();
            }

            let target = group
                .iter()
                .map(|idx| remaining.quantity(*idx))
                .max()
                .unwrap_or(0);

            let mut assignments = Vec::new();
            for (slot, idx) in group.into_iter().enumerate() {
                let quantity = remaining.quantity(idx).min(target);
                if quantity == 0 {
                    continue;
                }
                let item_id = remaining.take(idx, quantity);
                assignments.push(SlotAssignment {
                    slot: slot as u32,
                    item_id,
                    quantity_in_slot: quantity,
                });
            }

            if assignments.is_empty() {
                break;
            }

            runs.push(self.close_run(runs.len() + 1, assignments));
        }

        runs
    }
}
