//! Claraprint End-to-End Test Infrastructure
//!
//! This crate holds integration tests that cross crate boundaries:
//!
//! - Pipeline: annotation files -> manifest -> dataset -> fingerprints
//! - Properties: proptest checks of the encoder, shingler and scores
//! - Evaluation: seeded retrieval runs over synthetic datasets
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p claraprint-tests
//! ```

pub mod fixtures;
