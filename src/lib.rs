//! Invoice Interpretation Engine
//!
//! This crate turns extracted contract and timesheet documents into a
//! financially reconciled invoice computation: structured extraction,
//! canonical entry modelling, work-week hours splitting, strict validation,
//! and exact decimal cost calculation with cross-checked totals.

#![warn(missing_docs)]

pub mod audit;
pub mod calculation;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
