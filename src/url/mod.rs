//! URL handling module for Paexkey
//!
//! This module provides relative-reference resolution, seed URL validation and
//! the domain naming used for the output directory layout.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, output_domain};
pub use normalize::{parse_seed, resolve};
