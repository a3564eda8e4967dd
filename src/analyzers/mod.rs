//! Source analyzers. Everything here works on raw text; no parsing.

pub mod react;

pub use react::{
    analyze_redundancy, analyze_state_updates, classify, classify_with_evidence,
    extract_state_hooks, ClassificationEvidence,
};
