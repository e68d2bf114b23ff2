//! Calculation logic for the Invoice Interpretation Engine.
//!
//! This module contains the three post-extraction stages: work-week hours
//! splitting, strict validation, and financial calculation with
//! reconciliation.

mod calculator;
mod hours_split;
mod validator;

pub use calculator::calculate_invoice;
pub use hours_split::{apply_hours_split, split_hours};
pub use validator::validate_entries;
