use super::*;

impl Optimizer {
    /// First-fit decreasing ganging. Every slot of a run takes the item with the
    /// most labels left; the first slot sets the run length (capped by the
    /// balanced slot ceiling) and later slots fill up to it.
    pub(super) fn balanced_runs(&self, items: &[Item]) -> Vec<ProposedRun> {
        let ceiling = self.request.press.balanced_slot_ceiling;
        let mut remaining = RemainingQuantities::sorted_by_quantity(items);
        let mut runs = Vec::new();

        while !remaining.is_exhausted() {
            let mut assignments = Vec::new();
            let mut run_length = 0u32;

            for slot in 0..self.columns() {
                let Some(idx) = remaining.largest() else {
                    break;
                };

                let available = remaining.quantity(idx);
                let target = if run_length == 0 {
                    available.min(ceiling)
                } else {
                    run_length
                };
                let quantity = available.min(target);
                if quantity == 0 {
                    continue;
                }

                let item_id = remaining.take(idx, quantity);
                assignments.push(SlotAssignment {
                    slot,
                    item_id,
                    quantity_in_slot: quantity,
                });
                run_length = run_length.max(quantity);
            }

            if assignments.is_empty() {
                break;
            }

            runs.push(self.close_run(runs.len() + 1, assignments));
        }

        runs
    }
}
