use super::Scores;

/// Plain-language summary of a candidate for the operator picking a plan.
/// Display only; nothing parses it.
pub(super) fn explain(
    run_count: usize,
    total_labels: u64,
    total_meters: f64,
    total_frames: u32,
    scores: &Scores,
) -> String {
    let mut sentences = vec![format!(
        "{} {} producing {} labels on {:.2} m of roll ({} frames)",
        run_count,
        if run_count == 1 { "run" } else { "runs" },
        total_labels,
        total_meters,
        total_frames
    )];

    let material = Scores::percent(scores.material);
    sentences.push(
        if material >= 90 {
            "Excellent material utilization"
        } else if material >= 75 {
            "Good material efficiency"
        } else {
            "Some material waste expected"
        }
        .to_string(),
    );

    if run_count == 1 {
        sentences.push("Single-run simplicity".to_string());
    } else if Scores::percent(scores.labor) >= 85 {
        sentences.push("Well-balanced slot usage".to_string());
    }

    format!("{}.", sentences.join(". "))
}
