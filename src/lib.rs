// CrowdSec Monitor - Library
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Client for the CrowdSec Monitor API: transport, resource clients, and the
//! view-models a frontend drives.

pub mod api;
pub mod config;
pub mod countdown;
pub mod format;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod viewmodels;

#[cfg(test)]
mod testing;
