// ============================================================
// LEDGER PROCESSOR USE CASE
// ============================================================
// Orchestrate loading, normalization and reporting for one upload

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::application::use_cases::ledger_normalizer::normalize;
use crate::domain::error::Result;
use crate::domain::ledger::CleanTable;
use crate::infrastructure::config::LoaderConfig;
use crate::infrastructure::loader::LedgerLoader;

/// Result of processing one uploaded ledger
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedLedger {
    /// Name of the uploaded file
    pub file_name: String,

    /// Normalized rows
    pub table: CleanTable,

    /// Rows decoded from the file
    pub input_rows: usize,

    /// Rows removed because a field was empty
    pub dropped_rows: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Load -> normalize pipeline for a single upload
#[derive(Debug, Clone, Default)]
pub struct LedgerProcessor {
    loader: LedgerLoader,
}

impl LedgerProcessor {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            loader: LedgerLoader::new(config.trim),
        }
    }

    /// Process uploaded bytes. Nothing is kept between calls.
    pub fn process(&self, file_name: &str, bytes: &[u8]) -> Result<ProcessedLedger> {
        let start = Instant::now();

        let raw = self.loader.load_bytes(file_name, bytes)?;
        let table = normalize(&raw)?;

        let processed = ProcessedLedger {
            file_name: file_name.to_string(),
            input_rows: raw.len(),
            dropped_rows: raw.len() - table.len(),
            table,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            file_name,
            input_rows = processed.input_rows,
            output_rows = processed.table.len(),
            dropped_rows = processed.dropped_rows,
            "Ledger processed"
        );
        Ok(processed)
    }
}
