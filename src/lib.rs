//! One-dimensional cutting lists: how to cut requested piece lengths from
//! bars of a single stock length, and how much is left over.

pub mod api;
pub mod bar;
pub mod config;
pub mod error;
pub mod planner;
pub mod render;
pub mod types;

pub use error::{InputField, PlanError};
pub use planner::{Planner, plan};
pub use types::{CuttingPlan, DemandList, Pattern, PieceDemand, PlanEntry, WasteFigure};
