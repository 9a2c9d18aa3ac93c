//! # Utilities Module
//!
//! Utility functions for grid mathematics and line rasterization.

pub mod math;

pub use math::*;
