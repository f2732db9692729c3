pub mod use_cases;

pub use use_cases::ledger_normalizer::normalize;
pub use use_cases::ledger_processor::{LedgerProcessor, ProcessedLedger};
