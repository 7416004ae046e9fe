//! Production time estimate for a layout option.

use crate::config::TimingConfig;
use crate::types::LayoutOption;

/// Estimated minutes on press: one setup, a changeover between consecutive
/// runs, and a fixed time per frame. Rounded up to a whole minute.
pub fn estimate_production_time(option: &LayoutOption, timing: &TimingConfig) -> u32 {
    let changeovers = option.runs.len().saturating_sub(1) as f64;
    let minutes = timing.setup_minutes
        + changeovers * timing.changeover_minutes
        + f64::from(option.total_frames) * timing.per_frame_minutes;

    // float noise must not push an exact minute up to the next one
    (minutes - 1e-9).ceil().max(0.0) as u32
}
