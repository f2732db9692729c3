pub mod error;

// Ledger normalization module
pub mod ledger;
