use super::*;

impl Optimizer {
    /// One dedicated run per item, spread evenly over every lane. The last
    /// lanes absorb the remainder, so an item smaller than the lane count
    /// leaves the trailing lanes empty.
    pub(super) fn simple_runs(&self, items: &[Item]) -> Vec<ProposedRun> {
        let columns = self.columns();
        let dieline = &self.request.dieline;
        let press = &self.request.press;

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let per_slot = item.quantity.div_ceil(columns);
                let mut left = item.quantity;
                let mut slot_assignments = Vec::new();

                for slot in 0..columns {
                    if left == 0 {
                        break;
                    }
                    let quantity = per_slot.min(left);
                    slot_assignments.push(SlotAssignment {
                        slot,
                        item_id: item.id.clone(),
                        quantity_in_slot: quantity,
                    });
                    left -= quantity;
                }

                // A dedicated run prints whole frames across the full width.
                let meters = geometry::round_to_centimeters(geometry::meters_for_quantity(
                    u64::from(item.quantity),
                    dieline,
                    press,
                ));

                ProposedRun {
                    run_number: idx as u32 + 1,
                    slot_assignments,
                    meters,
                    frames: geometry::frames_for_meters(meters, press),
                }
            })
            .collect()
    }
}
