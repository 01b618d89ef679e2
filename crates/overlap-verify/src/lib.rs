//! Findings verification: confirms or rejects a reviewer's claims about an
//! analysis report. The reviewer never edits content; this only checks that
//! each claim is backed by what the analysis actually found.

pub mod types;
pub mod verifier;

pub use types::*;
pub use verifier::{verify_findings, Verifier};
