pub mod ledger_normalizer;
pub mod ledger_processor;
