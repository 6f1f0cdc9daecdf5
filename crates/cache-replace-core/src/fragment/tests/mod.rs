//! Tests for the fragment replacer
//!
//! Grouped by replacement strategy.

use super::*;

// Test helper renderers
mod helpers;
