use crate::types::Item;

/// Per-call record of how many labels of each item are still unassigned.
///
/// Entries keep a fixed order (largest requested quantity first, input order on
/// ties) and every scan walks that order, so "first occurrence wins" is stable.
pub(super) struct RemainingQuantities<'a> {
    entries: Vec<(&'a Item, u32)>,
}

impl<'a> RemainingQuantities<'a> {
    /// Orders items by requested quantity, largest first. The sort is stable.
    pub fn sorted_by_quantity(items: &'a [Item]) -> Self {
        let mut entries: Vec<(&'a Item, u32)> =
            items.iter().map(|item| (item, item.quantity)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    pub fn is_exhausted(&self) -> bool {
        self.entries.iter().all(|(_, left)| *left == 0)
    }

    pub fn quantity(&self, idx: usize) -> u32 {
        self.entries[idx].1
    }

    /// Index of the item with the most labels left; the first one wins ties.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, (_, left)) in self.entries.iter().enumerate() {
            if *left == 0 {
                continue;
            }
            match best {
                Some(b) if self.entries[b].1 >= *left => {}
                _ => best = Some(idx),
            }
        }
        best
    }

    /// Indices of items with labels left, most remaining first, stable on ties.
    pub fn active_by_remaining(&self) -> Vec<usize> {
        let mut active: Vec<usize> = (0..self.entries.len())
            .filter(|idx| self.entries[*idx].1 > 0)
            .collect();
        active.sort_by(|a, b| self.entries[*b].1.cmp(&self.entries[*a].1));
        active
    }

    /// Removes `quantity` labels from the item and returns its id.
    pub fn take(&mut self, idx: usize, quantity: u32) -> String {
        let (item, left) = &mut self.entries[idx];
        *left = left.saturating_sub(quantity);
        item.id.clone()
    }
}
