//! A bounded walkability grid implementing the [`replan_paths::Graph`]
//! capability.
//!
//! Cells are [`Point`]s (x = column, y = row). Movement is 8-way by default
//! with straight steps costing `1` and diagonal steps `√2`; both the movement
//! rule and the costs are configurable through [`GridConfig`].

mod distance;
mod grid;

pub use distance::euclidean;
pub use grid::{GridConfig, GridError, Movement, StepCosts, WalkGrid};
pub use replan_core::{Point, Range};
