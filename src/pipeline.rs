//! End-to-end invoice generation.
//!
//! Wires the stages together: contract extraction, per-document timesheet
//! extraction, work-week hours splitting, strict validation, and the
//! financial calculation with reconciliation. Each stage either completes
//! or fails with every problem it found; a failed stage stops the run.

use crate::calculation::{apply_hours_split, calculate_invoice, validate_entries};
use crate::config::EngineerDirectory;
use crate::document::ExtractedDocument;
use crate::error::{EngineError, EngineResult};
use crate::extract::{extract_contract, extract_timesheet};
use crate::models::{InvoiceResult, TimesheetEntry};

/// Runs the full pipeline over one contract document and any number of
/// timesheet documents.
///
/// Timesheet documents are processed in the order given; extraction
/// problems are collected across all of them before the run fails, so one
/// bad document does not mask another.
///
/// # Errors
///
/// Returns [`EngineError::ValidationFailed`] from whichever stage fails
/// first, carrying every problem that stage found.
pub fn generate_invoice(
    contract_doc: &ExtractedDocument,
    timesheet_docs: &[ExtractedDocument],
    directory: &EngineerDirectory,
) -> EngineResult<InvoiceResult> {
    let contract = extract_contract(contract_doc)?;
    tracing::info!(
        contract_number = %contract.contract_number,
        onshore_levels = contract.onshore_rates.len(),
        offshore_levels = contract.offshore_rates.len(),
        "contract extracted"
    );

    let mut entries: Vec<TimesheetEntry> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    for doc in timesheet_docs {
        match extract_timesheet(doc, directory) {
            Ok(extracted) => {
                tracing::info!(
                    source = %doc.source,
                    entries = extracted.len(),
                    "timesheet extracted"
                );
                entries.extend(extracted);
            }
            Err(err) => errors.extend(err.problems().iter().cloned()),
        }
    }
    if !errors.is_empty() {
        return Err(EngineError::validation(errors));
    }

    let entries = apply_hours_split(&entries, &contract);
    validate_entries(&entries, &contract)?;
    tracing::info!(entries = entries.len(), "validation passed");

    let result = calculate_invoice(&entries, &contract)?;
    tracing::info!(
        engineers = result.engineer_blocks.len(),
        grand_total = %result.grand_total(),
        "invoice calculated"
    );
    Ok(result)
}
