use super::*;
use crate::config::OptimizationWeights;
use approx::assert_relative_eq;

fn dieline(columns_across: u32) -> Dieline {
    // 50 mm labels with a 3 mm gap: 18 labels per lane per 960 mm frame
    Dieline {
        roll_width_mm: 330.0,
        label_width_mm: 70.0,
        label_height_mm: 50.0,
        columns_across,
        rows_around: 18,
        horizontal_gap_mm: 3.0,
        vertical_gap_mm: 3.0,
    }
}

fn item(id: &str, quantity: u32) -> Item {
    Item {
        id: id.to_string(),
        quantity,
        name: format!("Label {}", id.to_uppercase()),
    }
}

fn optimizer(items: Vec<Item>, columns_across: u32) -> Optimizer {
    Optimizer::new(OptimizationRequest::new(items, dieline(columns_across))).unwrap()
}

fn option_for(options: &[LayoutOption], strategy: Strategy) -> &LayoutOption {
    options.iter().find(|o| o.strategy == strategy).unwrap()
}

fn mixed_order() -> Vec<Item> {
    vec![
        item("a", 25_000),
        item("b", 12_000),
        item("c", 7_000),
        item("d", 7_000),
        item("e", 300),
        item("f", 1),
    ]
}

#[test]
fn test_two_items_run_counts() {
    let options = optimizer(vec![item("a", 1000), item("b", 500)], 4).generate_layout_options();

    assert_eq!(options.len(), 3);
    assert_eq!(option_for(&options, Strategy::Balanced).runs.len(), 1);
    assert_eq!(option_for(&options, Strategy::MinimalWaste).runs.len(), 1);
    assert_eq!(option_for(&options, Strategy::Simple).runs.len(), 2);
}

#[test]
fn test_balanced_places_largest_first() {
    let optimizer = optimizer(vec![item("b", 500), item("a", 1000)], 4);
    let runs = optimizer.balanced_runs(&optimizer.request().items);

    assert_eq!(runs.len(), 1);
    assert_eq!(
        runs[0].slot_assignments,
        vec![
            SlotAssignment {
                slot: 0,
                item_id: "a".into(),
                quantity_in_slot: 1000,
            },
            SlotAssignment {
                slot: 1,
                item_id: "b".into(),
                quantity_in_slot: 500,
            },
        ]
    );
    // 1000 labels at 18.75 labels per lane metre
    assert_relative_eq!(runs[0].meters, 53.34);
    assert_eq!(runs[0].frames, 56);
}

#[test]
fn test_balanced_respects_slot_ceiling() {
    let optimizer = optimizer(vec![item("big", 25_000)], 4);
    let runs = optimizer.balanced_runs(&optimizer.request().items);

    assert_eq!(runs.len(), 1);
    let quantities: Vec<u32> = runs[0]
        .slot_assignments
        .iter()
        .map(|a| a.quantity_in_slot)
        .collect();
    assert_eq!(quantities, vec![10_000, 10_000, 5_000]);
}

#[test]
fn test_balanced_ties_keep_input_order() {
    let items: Vec<Item> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|id| item(id, 500))
        .collect();
    let optimizer = optimizer(items, 2);
    let runs = optimizer.balanced_runs(&optimizer.request().items);

    let order: Vec<Vec<&str>> = runs
        .iter()
        .map(|r| {
            r.slot_assignments
                .iter()
                .map(|a| a.item_id.as_str())
                .collect()
        })
        .collect();
    assert_eq!(order, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
}

#[test]
fn test_minimal_waste_groups_similar_quantities() {
    let optimizer = optimizer(mixed_order(), 4);
    let runs = optimizer.minimal_waste_runs(&optimizer.request().items);

    let groups: Vec<Vec<&str>> = runs
        .iter()
        .map(|r| {
            r.slot_assignments
                .iter()
                .map(|a| a.item_id.as_str())
                .collect()
        })
        .collect();
    assert_eq!(
        groups,
        vec![vec!["a"], vec!["b", "c", "d"], vec!["e"], vec!["f"]]
    );
}

#[test]
fn test_minimal_waste_splits_dissimilar_pair() {
    let optimizer = optimizer(vec![item("a", 1000), item("b", 499)], 4);
    let runs = optimizer.minimal_waste_runs(&optimizer.request().items);

    assert_eq!(runs.len(), 2);
}

#[test]
fn test_minimal_waste_caps_group_to_columns() {
    let items: Vec<Item> = (0..5).map(|i| item(&format!("i{i}"), 800)).collect();
    let optimizer = optimizer(items, 2);
    let runs = optimizer.minimal_waste_runs(&optimizer.request().items);

    assert_eq!(runs.len(), 3);
    assert!(runs.iter().all(|r| r.slot_assignments.len() <= 2));
}

#[test]
fn test_simple_spreads_item_over_lanes() {
    let optimizer = optimizer(vec![item("a", 10), item("b", 2)], 4);
    let runs = optimizer.simple_runs(&optimizer.request().items);

    assert_eq!(runs.len(), 2);
    let first: Vec<u32> = runs[0]
        .slot_assignments
        .iter()
        .map(|a| a.quantity_in_slot)
        .collect();
    assert_eq!(first, vec![3, 3, 3, 1]);
    assert_eq!(runs[1].slot_assignments.len(), 2);
    assert!(runs[1].slot_assignments.iter().all(|a| a.item_id == "b"));
}

#[test]
fn test_simple_runs_print_whole_frames() {
    let optimizer = optimizer(vec![item("a", 1000), item("b", 500)], 4);
    let runs = optimizer.simple_runs(&optimizer.request().items);

    // 72 labels per frame across four lanes
    assert_relative_eq!(runs[0].meters, 13.44);
    assert_eq!(runs[0].frames, 14);
    assert_relative_eq!(runs[1].meters, 6.72);
    assert_eq!(runs[1].frames, 7);
}

#[test]
fn test_every_option_covers_every_item() {
    let optimizer = optimizer(mixed_order(), 4);
    let options = optimizer.generate_layout_options();

    assert_eq!(options.len(), 3);
    for option in &options {
        let report = optimizer.validate_layout(option);
        assert!(report.valid, "{}: {:?}", option.id, report.errors);
        assert!(report.errors.is_empty());

        for item in &optimizer.request().items {
            assert_eq!(option.assigned_quantity(&item.id), u64::from(item.quantity));
        }
    }
}

#[test]
fn test_runs_are_well_formed() {
    let press = PressConfig::default();
    let options = optimizer(mixed_order(), 3).generate_layout_options();

    for option in &options {
        for (idx, run) in option.runs.iter().enumerate() {
            assert_eq!(run.run_number as usize, idx + 1);
            assert_eq!(run.frames, geometry::frames_for_meters(run.meters, &press));

            let mut slots: Vec<u32> = run.slot_assignments.iter().map(|a| a.slot).collect();
            assert!(slots.iter().all(|slot| *slot < 3));
            slots.dedup();
            assert_eq!(slots.len(), run.slot_assignments.len());
        }

        let frames: u32 = option.runs.iter().map(|r| r.frames).sum();
        assert_eq!(option.total_frames, frames);
    }
}

#[test]
fn test_options_sorted_by_overall_score() {
    let options = optimizer(mixed_order(), 4).generate_layout_options();

    for pair in options.windows(2) {
        assert!(pair[0].overall_score >= pair[1].overall_score);
    }
}

#[test]
fn test_equal_scores_keep_generation_order() {
    // balanced and minimal-waste build the same single run here
    let options = optimizer(vec![item("a", 1000), item("b", 500)], 4).generate_layout_options();

    let balanced = options.iter().position(|o| o.id == "balanced-1").unwrap();
    let minimal = options.iter().position(|o| o.id == "minimal-waste-2").unwrap();
    assert_eq!(options[balanced].overall_score, options[minimal].overall_score);
    assert!(balanced < minimal);
}

#[test]
fn test_scores_for_single_run() {
    let options = optimizer(vec![item("a", 1000), item("b", 500)], 4).generate_layout_options();
    let balanced = option_for(&options, Strategy::Balanced);

    // 1500 labels / 75 labels per metre = 20 m against 53.34 m used
    assert_eq!(balanced.material_efficiency_score, 37);
    assert_eq!(balanced.print_efficiency_score, 100);
    assert_eq!(balanced.labor_efficiency_score, 50);
    assert_relative_eq!(balanced.total_meters, 53.34);
    assert_relative_eq!(balanced.total_waste_meters, 33.34);
    assert!(balanced.reasoning.contains("Single-run simplicity"));
    assert!(balanced.reasoning.contains("Some material waste expected"));
}

#[test]
fn test_weights_change_ranking() {
    let mut request = OptimizationRequest::new(vec![item("a", 1000), item("b", 500)], dieline(4));
    request.weights = OptimizationWeights {
        material_efficiency: 0.0,
        print_efficiency: 1.0,
        labor_efficiency: 0.0,
    };

    let options = Optimizer::new(request).unwrap().generate_layout_options();
    assert_eq!(options[0].id, "balanced-1");
    assert_eq!(options[0].overall_score, 100);
    assert_eq!(options.last().unwrap().strategy, Strategy::Simple);
    assert_eq!(options.last().unwrap().overall_score, 50);
}

#[test]
fn test_requested_strategies_only() {
    let mut request = OptimizationRequest::new(vec![item("a", 1000)], dieline(4));
    request.strategies = vec![Strategy::Simple, Strategy::Simple, Strategy::Balanced];

    let options = Optimizer::new(request).unwrap().generate_layout_options();
    let mut ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["balanced-2", "simple-1"]);
}

#[test]
fn test_empty_items_yield_no_options() {
    let options = optimizer(vec![], 4).generate_layout_options();
    assert!(options.is_empty());

    let options =
        crate::generate_layout_options(&[], &dieline(4), &OptimizationWeights::default()).unwrap();
    assert!(options.is_empty());
}

#[test]
fn test_repeated_calls_are_identical() {
    let optimizer = optimizer(mixed_order(), 4);
    let first = serde_json::to_string(&optimizer.generate_layout_options()).unwrap();
    let second = serde_json::to_string(&optimizer.generate_layout_options()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_estimate_uses_request_timing() {
    let optimizer = optimizer(vec![item("a", 1000), item("b", 500)], 4);
    let options = optimizer.generate_layout_options();
    let simple = option_for(&options, Strategy::Simple);

    // 15 + 1 * 2 + 21 * 0.5 = 27.5
    assert_eq!(simple.total_frames, 21);
    assert_eq!(optimizer.estimate_production_time(simple), 28);
}

#[test]
fn test_rejects_zero_quantity() {
    let request = OptimizationRequest::new(vec![item("a", 0)], dieline(4));
    assert!(matches!(
        Optimizer::new(request),
        Err(OptimizerError::InvalidInput(_))
    ));
}

#[test]
fn test_rejects_duplicate_item_ids() {
    let request = OptimizationRequest::new(vec![item("a", 10), item("a", 20)], dieline(4));
    assert!(Optimizer::new(request).is_err());
}

#[test]
fn test_rejects_malformed_dieline() {
    let request = OptimizationRequest::new(vec![item("a", 10)], dieline(0));
    assert!(Optimizer::new(request).is_err());

    let mut tall = dieline(4);
    tall.label_height_mm = 1200.0;
    let request = OptimizationRequest::new(vec![item("a", 10)], tall);
    assert!(Optimizer::new(request).is_err());

    let mut flat = dieline(4);
    flat.label_height_mm = 0.0;
    flat.vertical_gap_mm = 0.0;
    let request = OptimizationRequest::new(vec![item("a", 10)], flat);
    assert!(Optimizer::new(request).is_err());
}

#[test]
fn test_rejects_negative_weights_and_bad_press() {
    let mut request = OptimizationRequest::new(vec![item("a", 10)], dieline(4));
    request.weights.labor_efficiency = -0.1;
    assert!(Optimizer::new(request).is_err());

    let mut request = OptimizationRequest::new(vec![item("a", 10)], dieline(4));
    request.press.meters_per_frame = 0.0;
    assert!(matches!(
        Optimizer::new(request),
        Err(OptimizerError::InvalidConfig(_))
    ));

    let mut request = OptimizationRequest::new(vec![item("a", 10)], dieline(4));
    request.strategies.clear();
    assert!(Optimizer::new(request).is_err());
}

#[test]
fn test_request_from_yaml() {
    let yaml = r#"
items:
  - id: lemon
    quantity: 1000
    name: Lemon 250ml
  - id: lime
    quantity: 600
    name: Lime 250ml
dieline:
  roll_width_mm: 330.0
  label_width_mm: 70.0
  label_height_mm: 50.0
  columns_across: 4
  rows_around: 18
  horizontal_gap_mm: 3.0
  vertical_gap_mm: 3.0
press:
  timing:
    setup_minutes: 20.0
strategies: [balanced, minimal-waste]
"#;

    let request: OptimizationRequest = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(request.weights, OptimizationWeights::default());
    assert_eq!(request.press.meters_per_frame, 0.96);
    assert_eq!(request.press.timing.setup_minutes, 20.0);
    assert_eq!(request.press.timing.changeover_minutes, 2.0);

    let options = Optimizer::new(request).unwrap().generate_layout_options();
    assert_eq!(options.len(), 2);
}
