//! Core data models for the Invoice Interpretation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod contract;
mod entry;
mod invoice;

pub use contract::{Category, ContractData, EngineerLevel, RateSet};
pub use entry::TimesheetEntry;
pub use invoice::{EngineerBlock, InvoiceResult, round_money};
