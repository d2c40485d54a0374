// Export the extractor and harness modules
pub mod corpus;
pub mod extractor;
pub mod runner;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::corpus::{load_manifest, partition, Fixture, FixtureGroup};
pub use crate::extractor::{
    extract_product, ExtractError, ProductRecord, META_IMAGE_URL, META_PRICE, META_PRODUCT_TITLE,
};
pub use crate::runner::{
    render_report, run_corpus, run_group, CaseFailure, FailureKind, RunOptions, RunResult,
};
