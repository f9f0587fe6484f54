//! CLI command implementations

pub mod build_dataset;
pub mod cliques;
pub mod compare;
pub mod encode;
pub mod evaluate;
pub mod json_output;
pub mod shingle;
