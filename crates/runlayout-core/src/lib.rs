//! Production-run layout optimizer for roll-fed label printing.
//!
//! Given the items of an order and the dieline of the die, the optimizer gangs
//! items into sequential runs, assigns quantities to the lanes across the roll,
//! and ranks the candidates by material, print and labor efficiency.
//!
//! ```no_run
//! use runlayout_core::{Dieline, Item, OptimizationRequest, Optimizer};
//!
//! let dieline = Dieline {
//!     roll_width_mm: 330.0,
//!     label_width_mm: 70.0,
//!     label_height_mm: 50.0,
//!     columns_across: 4,
//!     rows_around: 18,
//!     horizontal_gap_mm: 3.0,
//!     vertical_gap_mm: 3.0,
//! };
//! let items = vec![Item { id: "a".into(), quantity: 1000, name: "Lemon".into() }];
//!
//! let optimizer = Optimizer::new(OptimizationRequest::new(items, dieline))?;
//! for option in optimizer.generate_layout_options() {
//!     println!("{}: {}", option.id, option.reasoning);
//! }
//! # Ok::<(), runlayout_core::OptimizerError>(())
//! ```

pub mod config;
pub mod geometry;
mod optimizer;
pub mod timing;
pub mod types;
pub mod validation;

pub use config::{OptimizationWeights, PressConfig, TimingConfig};
pub use optimizer::Optimizer;
pub use timing::estimate_production_time;
pub use types::*;
pub use validation::validate_layout;

/// One-shot entry point with the standard press constants and every strategy.
pub fn generate_layout_options(
    items: &[Item],
    dieline: &Dieline,
    weights: &OptimizationWeights,
) -> Result<Vec<LayoutOption>> {
    let request = OptimizationRequest {
        weights: weights.clone(),
        ..OptimizationRequest::new(items.to_vec(), dieline.clone())
    };
    Ok(Optimizer::new(request)?.generate_layout_options())
}
