//! Dieline math: labels per metre, metres per quantity, frames per length.
//!
//! All functions assume geometry that passed [`Optimizer::new`](crate::Optimizer::new);
//! zero pitch or zero columns is a precondition violation rejected there.

use crate::config::PressConfig;
use crate::types::Dieline;

/// Slack for float noise when rounding up, so 2.88 m at 0.96 m/frame is 3 frames, not 4.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Vertical distance between the tops of two consecutive labels in a lane.
pub fn vertical_pitch_mm(dieline: &Dieline) -> f64 {
    dieline.label_height_mm + dieline.vertical_gap_mm
}

/// Labels one lane produces per frame.
pub fn labels_per_frame(dieline: &Dieline, press: &PressConfig) -> u32 {
    (press.max_frame_length_mm / vertical_pitch_mm(dieline)).floor() as u32
}

/// Labels one lane produces per metre of roll.
pub fn column_labels_per_meter(dieline: &Dieline, press: &PressConfig) -> f64 {
    f64::from(labels_per_frame(dieline, press)) / press.meters_per_frame
}

/// Labels the whole roll width produces per metre.
pub fn labels_per_meter(dieline: &Dieline, press: &PressConfig) -> f64 {
    column_labels_per_meter(dieline, press) * f64::from(dieline.columns_across)
}

/// Roll length needed to print `quantity` labels across the full width,
/// rounded up to a whole number of frames. Never under-prints.
pub fn meters_for_quantity(quantity: u64, dieline: &Dieline, press: &PressConfig) -> f64 {
    let per_frame =
        u64::from(labels_per_frame(dieline, press)) * u64::from(dieline.columns_across);
    let frames = quantity.div_ceil(per_frame);
    frames as f64 * press.meters_per_frame
}

/// Exact roll length a single lane needs for `quantity` labels.
pub fn slot_meters(quantity: u32, dieline: &Dieline, press: &PressConfig) -> f64 {
    f64::from(quantity) / column_labels_per_meter(dieline, press)
}

/// Whole frames needed to advance `meters` of roll.
pub fn frames_for_meters(meters: f64, press: &PressConfig) -> u32 {
    if meters <= 0.0 {
        return 0;
    }
    (meters / press.meters_per_frame - ROUNDING_EPSILON).ceil() as u32
}

/// Rounds up to the next centimetre.
pub fn ceil_to_centimeters(meters: f64) -> f64 {
    (meters * 100.0 - ROUNDING_EPSILON).ceil().max(0.0) / 100.0
}

/// Rounds to the nearest centimetre.
pub fn round_to_centimeters(meters: f64) -> f64 {
    (meters * 100.0).round() / 100.0
}
