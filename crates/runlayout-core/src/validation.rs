//! Coverage check of a layout option against the items it was built for.

use std::collections::{HashMap, HashSet};

use crate::types::{Item, LayoutOption, ValidationReport};

/// Sums the labels assigned to each item across every run and compares them
/// with the requested quantities.
///
/// Never fails and never changes the option: each shortfall, surplus, unknown
/// item id or out-of-sequence run becomes one entry in `errors`, and callers
/// decide what an invalid option means for them.
pub fn validate_layout(option: &LayoutOption, items: &[Item]) -> ValidationReport {
    let mut assigned: HashMap<&str, u64> = HashMap::new();
    for assignment in option.runs.iter().flat_map(|r| &r.slot_assignments) {
        *assigned.entry(assignment.item_id.as_str()).or_insert(0) +=
            u64::from(assignment.quantity_in_slot);
    }

    let mut errors = Vec::new();

    for item in items {
        let required = u64::from(item.quantity);
        let actual = assigned.get(item.id.as_str()).copied().unwrap_or(0);

        if actual < required {
            errors.push(format!("{}: Missing {} labels", item.name, required - actual));
        } else if actual > required {
            errors.push(format!(
                "{}: Over-assigned by {} labels",
                item.name,
                actual - required
            ));
        }
    }

    let known: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
    let mut reported = HashSet::new();
    for assignment in option.runs.iter().flat_map(|r| &r.slot_assignments) {
        let id = assignment.item_id.as_str();
        if !known.contains(id) && reported.insert(id) {
            errors.push(format!(
                "Unknown item '{}': {} labels assigned",
                id,
                assigned.get(id).copied().unwrap_or(0)
            ));
        }
    }

    for (idx, run) in option.runs.iter().enumerate() {
        let expected = idx as u32 + 1;
        if run.run_number != expected {
            errors.push(format!(
                "Run {} is out of sequence (expected run {})",
                run.run_number, expected
            ));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProposedRun, SlotAssignment, Strategy};

    fn item(id: &str, quantity: u32) -> Item {
        Item {
            id: id.to_string(),
            quantity,
            name: format!("Label {}", id.to_uppercase()),
        }
    }

    fn assignment(slot: u32, item_id: &str, quantity_in_slot: u32) -> SlotAssignment {
        SlotAssignment {
            slot,
            item_id: item_id.to_string(),
            quantity_in_slot,
        }
    }

    fn option(runs: Vec<ProposedRun>) -> LayoutOption {
        LayoutOption {
            id: "manual-1".to_string(),
            strategy: Strategy::Balanced,
            runs,
            total_meters: 0.0,
            total_frames: 0,
            total_waste_meters: 0.0,
            material_efficiency_score: 0,
            print_efficiency_score: 0,
            labor_efficiency_score: 0,
            overall_score: 0,
            reasoning: String::new(),
        }
    }

    fn run(run_number: u32, slot_assignments: Vec<SlotAssignment>) -> ProposedRun {
        ProposedRun {
            run_number,
            slot_assignments,
            meters: 1.0,
            frames: 2,
        }
    }

    #[test]
    fn test_exact_coverage_is_valid() {
        let layout = option(vec![
            run(1, vec![assignment(0, "a", 600), assignment(1, "b", 500)]),
            run(2, vec![assignment(0, "a", 400), assignment(1, "b", 0)]),
        ]);

        let report = validate_layout(&layout, &[item("a", 1000), item("b", 500)]);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_reports_missing_and_over_assigned() {
        let layout = option(vec![run(
            1,
            vec![assignment(0, "a", 900), assignment(1, "b", 550)],
        )]);

        let report = validate_layout(&layout, &[item("a", 1000), item("b", 500)]);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Label A: Missing 100 labels".to_string(),
                "Label B: Over-assigned by 50 labels".to_string(),
            ]
        );
    }

    #[test]
    fn test_reports_item_never_assigned() {
        let layout = option(vec![run(1, vec![assignment(0, "a", 10)])]);

        let report = validate_layout(&layout, &[item("a", 10), item("c", 7)]);
        assert_eq!(report.errors, vec!["Label C: Missing 7 labels".to_string()]);
    }

    #[test]
    fn test_reports_unknown_item_and_run_sequence() {
        let layout = option(vec![
            run(1, vec![assignment(0, "a", 10), assignment(1, "ghost", 5)]),
            run(3, vec![assignment(0, "ghost", 5)]),
        ]);

        let report = validate_layout(&layout, &[item("a", 10)]);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Unknown item 'ghost': 10 labels assigned".to_string(),
                "Run 3 is out of sequence (expected run 2)".to_string(),
            ]
        );
    }
}
