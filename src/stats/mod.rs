// CrowdSec Monitor - Statistics Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Client-side computations over dashboard statistics.

mod breakdown;
pub mod models;

pub use breakdown::{breakdown, breakdown_with_palette};
pub use models::{BreakdownItem, OTHER_COLOR, OTHER_LABEL, PALETTE};
